use crate::config::{default_probe_args, default_probe_program};

use serde::{Deserialize, Serialize};

/// Audio device probe invocation settings.
///
/// The probe is expected to print its device inventory to stderr in the
/// `"<name>" (audio)` line format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Probe program to launch.
    #[serde(default = "default_probe_program")]
    pub program: String,
    /// Full argument list for the probe.
    #[serde(default = "default_probe_args")]
    pub args: Vec<String>,
}
