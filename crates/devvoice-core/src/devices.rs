//! Audio input device enumeration via an external probing tool.
//!
//! The probe (ffmpeg by default) prints its device inventory to stderr in
//! diagnostic form; device names appear as `"<name>" (audio)` lines. The
//! parsing is a pure function over that output so it can be tested without
//! the tool.

use crate::{VoiceError, error::Result as CoreResult};

use std::panic::Location;

use error_location::ErrorLocation;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Invocation of the media probing tool in list-input-devices mode.
#[derive(Debug, Clone)]
pub struct ProbeCommand {
    /// Program to launch.
    pub program: String,
    /// Arguments putting the tool in device-listing mode.
    pub args: Vec<String>,
}

impl Default for ProbeCommand {
    fn default() -> Self {
        Self {
            program: "ffmpeg".to_string(),
            args: ["-f", "dshow", "-list_devices", "true", "-i", "dummy", "-hide_banner"]
                .map(str::to_string)
                .to_vec(),
        }
    }
}

/// Parse device names out of the probe's diagnostic output.
///
/// Accepts lines containing `"<name>" (audio)`, excludes `@`-prefixed
/// synthetic device monikers, trims, and de-duplicates preserving first-seen
/// order.
pub fn parse_device_list(output: &str) -> Vec<String> {
    let mut devices: Vec<String> = Vec::new();

    for line in output.lines() {
        let Some(open) = line.find('"') else { continue };
        let rest = &line[open + 1..];
        let Some(close) = rest.find('"') else { continue };
        let name = &rest[..close];

        if !rest[close + 1..].trim_start().starts_with("(audio)") {
            continue;
        }
        if name.starts_with('@') {
            continue;
        }

        let name = name.trim();
        if !name.is_empty() && !devices.iter().any(|d| d == name) {
            devices.push(name.to_string());
        }
    }

    devices
}

/// Run the probe and return the parsed input device names.
///
/// The probe is expected to exit non-zero in listing mode (its dummy input
/// never opens), so only its stderr is interpreted.
///
/// # Errors
///
/// `DeviceListError` if the tool cannot be run or its output contains no
/// parseable device lines.
#[track_caller]
#[instrument(skip(probe), fields(program = %probe.program))]
pub async fn list_input_devices(probe: &ProbeCommand) -> CoreResult<Vec<String>> {
    let output = Command::new(&probe.program)
        .args(&probe.args)
        .stdin(std::process::Stdio::null())
        .output()
        .await
        .map_err(|e| VoiceError::DeviceListError {
            reason: format!("Failed to run {}: {}", probe.program, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    let devices = parse_device_list(&stderr);

    if devices.is_empty() {
        return Err(VoiceError::DeviceListError {
            reason: "Probe produced no parseable device lines".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    debug!(count = devices.len(), "Input devices enumerated");

    Ok(devices)
}
