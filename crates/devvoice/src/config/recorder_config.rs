use crate::config::{default_max_duration_secs, default_recorder_program};

use serde::{Deserialize, Serialize};

/// External recorder invocation settings.
///
/// The recorder is launched as `program <args...> <output-file>
/// <max-duration-secs>` and must write a WAV file to the given path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecorderConfig {
    /// Program to launch (name resolved via PATH or absolute path).
    #[serde(default = "default_recorder_program")]
    pub program: String,
    /// Leading arguments placed before the output path (script path etc.).
    #[serde(default)]
    pub args: Vec<String>,
    /// Hard recording ceiling in seconds.
    #[serde(default = "default_max_duration_secs")]
    pub max_duration_secs: u64,
}
