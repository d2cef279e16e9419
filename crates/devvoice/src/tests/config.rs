use crate::config::Config;

use std::path::Path;

fn default_config() -> Config {
    Config::default_with_script_path(Path::new("/data/record-audio.ps1"))
}

/// WHAT: Default recorder settings invoke powershell with the 300 s ceiling
/// WHY: First-run behavior must match the documented recorder contract
#[test]
fn given_default_config_when_built_then_recorder_defaults_set() {
    // Given/When: A default configuration for a known script path
    let config = default_config();

    // Then: Program, ceiling, and script invocation match the defaults
    assert_eq!(config.recorder.program, "powershell");
    assert_eq!(config.recorder.max_duration_secs, 300);
    assert_eq!(config.recorder.args, vec![
        "-NoProfile".to_string(),
        "-ExecutionPolicy".to_string(),
        "Bypass".to_string(),
        "-File".to_string(),
        "/data/record-audio.ps1".to_string(),
    ]);
}

/// WHAT: Default probe settings list dshow devices via ffmpeg
/// WHY: Device enumeration depends on the probe's exact listing invocation
#[test]
fn given_default_config_when_built_then_probe_defaults_set() {
    let config = default_config();

    assert_eq!(config.probe.program, "ffmpeg");
    assert_eq!(config.probe.args, vec![
        "-f".to_string(),
        "dshow".to_string(),
        "-list_devices".to_string(),
        "true".to_string(),
        "-i".to_string(),
        "dummy".to_string(),
        "-hide_banner".to_string(),
    ]);
    assert!(config.workspace.root.is_none());
}

/// WHAT: The configuration round-trips through TOML unchanged
/// WHY: The on-disk format must reload to the same settings
#[test]
fn given_default_config_when_round_tripped_through_toml_then_equal() {
    // Given: A default configuration
    let config = default_config();

    // When: Serializing to TOML and parsing it back
    let contents = toml::to_string_pretty(&config).unwrap();
    let reloaded: Config = toml::from_str(&contents).unwrap();

    // Then: The reloaded configuration is identical
    assert_eq!(reloaded, config);
}

/// WHAT: Empty sections fall back to the field defaults
/// WHY: A hand-edited config may omit any setting it does not override
#[test]
fn given_sparse_toml_when_parsing_then_defaults_fill_in() {
    let config: Config = toml::from_str("[recorder]\n[probe]\n[workspace]\n").unwrap();

    assert_eq!(config.recorder.program, "powershell");
    assert_eq!(config.recorder.max_duration_secs, 300);
    assert!(config.recorder.args.is_empty());
    assert_eq!(config.probe.program, "ffmpeg");
    assert!(config.workspace.root.is_none());
}

/// WHAT: The session controller invocation mirrors the recorder settings
/// WHY: Config is the single source for the external recorder contract
#[test]
fn given_config_when_building_recorder_command_then_settings_carried() {
    let config = default_config();

    let command = config.recorder_command();

    assert_eq!(command.program, config.recorder.program);
    assert_eq!(command.args, config.recorder.args);
    assert_eq!(command.max_duration_secs, config.recorder.max_duration_secs);
}
