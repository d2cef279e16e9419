//! Audio playback via the platform's default opener.
//!
//! Playback delegates to the OS file opener (`xdg-open`, `open`, `start`),
//! tracked as a child process so a new playback can kill a still-running
//! prior one: last request wins, no queueing.

use crate::{VoiceError, error::Result as CoreResult};

use std::{panic::Location, path::Path};

use error_location::ErrorLocation;
use tokio::process::{Child, Command};
use tracing::{debug, info, instrument};

/// Owner of at most one playback process at a time.
#[derive(Default)]
pub struct Playback {
    child: Option<Child>,
}

impl Playback {
    /// Create a playback handle with no active process.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an audio file in the platform player, killing any prior playback.
    ///
    /// # Errors
    ///
    /// `PlaybackError` if the file does not exist, no opener is available, or
    /// the opener cannot be spawned.
    #[track_caller]
    #[instrument(skip(self))]
    pub async fn play(&mut self, audio_path: &Path) -> CoreResult<()> {
        if !tokio::fs::try_exists(audio_path).await.unwrap_or(false) {
            return Err(VoiceError::PlaybackError {
                reason: format!("Audio file not found: {:?}", audio_path),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.stop();

        let opener = open::commands(audio_path)
            .into_iter()
            .next()
            .ok_or_else(|| VoiceError::PlaybackError {
                reason: "No platform opener available".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let child = Command::from(opener)
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| VoiceError::PlaybackError {
                reason: format!("Failed to spawn player: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.child = Some(child);

        info!(path = ?audio_path, "Playback started");

        Ok(())
    }

    /// Best-effort kill of the current playback process, if any.
    pub fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.start_kill() {
                debug!(error = %e, "Player already exited");
            }
        }
    }
}
