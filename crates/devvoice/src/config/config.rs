//! Configuration management for devvoice.
//!
//! Handles loading and saving TOML configuration files with cross-platform
//! paths and atomic write operations.

use crate::{
    AppError, AppResult,
    config::{ProbeConfig, RecorderConfig, WorkspaceConfig},
    config::{
        DEFAULT_MAX_DURATION_SECS, DEFAULT_RECORDER_PROGRAM, default_probe_args,
        default_probe_program,
    },
};
use devvoice_core::{ProbeCommand, RecorderCommand};

use std::{
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Main configuration struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// External recorder invocation settings.
    pub recorder: RecorderConfig,
    /// Device probe invocation settings.
    pub probe: ProbeConfig,
    /// Workspace resolution settings.
    pub workspace: WorkspaceConfig,
}

impl Config {
    /// Load configuration from disk, creating default if not found.
    ///
    /// Note: This does NOT validate that the recorder program or script
    /// exists. Spawn failures surface when recording starts, so the app can
    /// launch and serve device listing and playback with an incomplete
    /// recorder setup.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to read config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            let config: Config = toml::from_str(&contents).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to parse config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            info!(config_path = ?config_path, "Configuration loaded");

            Ok(config)
        } else {
            info!("No config found, creating default");
            Self::create_default()
        }
    }

    /// Save configuration to disk using atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent corruption
    /// if the process crashes during the write.
    #[track_caller]
    #[instrument]
    pub fn save(&self) -> AppResult<()> {
        let config_path = Self::config_path()?;

        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        // Atomic write: write to temp file then rename
        let temp_path = config_path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, &config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    /// The default configuration, pointing the recorder at the given script.
    pub fn default_with_script_path(script_path: &Path) -> Self {
        Config {
            recorder: RecorderConfig {
                program: DEFAULT_RECORDER_PROGRAM.to_string(),
                args: vec![
                    "-NoProfile".to_string(),
                    "-ExecutionPolicy".to_string(),
                    "Bypass".to_string(),
                    "-File".to_string(),
                    script_path.to_string_lossy().into_owned(),
                ],
                max_duration_secs: DEFAULT_MAX_DURATION_SECS,
            },
            probe: ProbeConfig {
                program: default_probe_program(),
                args: default_probe_args(),
            },
            workspace: WorkspaceConfig { root: None },
        }
    }

    /// Build the recorder invocation for the session controller.
    pub fn recorder_command(&self) -> RecorderCommand {
        RecorderCommand {
            program: self.recorder.program.clone(),
            args: self.recorder.args.clone(),
            max_duration_secs: self.recorder.max_duration_secs,
            scratch_dir: std::env::temp_dir().join("devvoice"),
        }
    }

    /// Build the device probe invocation.
    pub fn probe_command(&self) -> ProbeCommand {
        ProbeCommand {
            program: self.probe.program.clone(),
            args: self.probe.args.clone(),
        }
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "devvoice", "DevVoice").ok_or_else(|| {
            AppError::ConfigError {
                reason: "Failed to get config directory".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }

    #[track_caller]
    fn create_default() -> AppResult<Self> {
        let proj_dirs = ProjectDirs::from("com", "devvoice", "DevVoice").ok_or_else(|| {
            AppError::ConfigError {
                reason: "Failed to get project directories".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        let script_path = proj_dirs.data_dir().join("record-audio.ps1");

        let config = Config::default_with_script_path(&script_path);

        config.save()?;

        warn!(
            script_path = ?script_path,
            "Default config created. The recorder script must exist before recording."
        );

        Ok(config)
    }
}
