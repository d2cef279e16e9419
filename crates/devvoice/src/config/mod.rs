#[allow(clippy::module_inception)]
mod config;
mod probe_config;
mod recorder_config;
mod workspace_config;

pub(crate) use {
    config::Config, probe_config::ProbeConfig, recorder_config::RecorderConfig,
    workspace_config::WorkspaceConfig,
};

pub(crate) const DEFAULT_MAX_DURATION_SECS: u64 = 300;
pub(crate) const DEFAULT_RECORDER_PROGRAM: &str = "powershell";
pub(crate) const DEFAULT_PROBE_PROGRAM: &str = "ffmpeg";

pub(crate) fn default_max_duration_secs() -> u64 {
    DEFAULT_MAX_DURATION_SECS
}

pub(crate) fn default_recorder_program() -> String {
    DEFAULT_RECORDER_PROGRAM.to_string()
}

pub(crate) fn default_probe_program() -> String {
    DEFAULT_PROBE_PROGRAM.to_string()
}

pub(crate) fn default_probe_args() -> Vec<String> {
    ["-f", "dshow", "-list_devices", "true", "-i", "dummy", "-hide_banner"]
        .map(str::to_string)
        .to_vec()
}
