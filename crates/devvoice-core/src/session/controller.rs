//! Recording session controller.
//!
//! Owns the session state machine and the external recorder process. The
//! recorder captures microphone audio to a file; the controller only spawns
//! it, signals termination, and polls the filesystem until the output file
//! settles (the recorder provides no completion signal of its own).

use crate::{SessionPhase, VoiceError, error::Result as CoreResult};

use std::{
    panic::Location,
    path::{Path, PathBuf},
    time::Duration,
};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::Utc;
use error_location::ErrorLocation;
use tokio::process::{Child, Command};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Invocation contract for the external recorder process.
///
/// The recorder is launched as `program <args...> <output-file>
/// <duration-ceiling-secs>` and must write a valid audio file to the given
/// path, exiting when signalled or when the ceiling elapses.
#[derive(Debug, Clone)]
pub struct RecorderCommand {
    /// Program to launch (absolute path or name resolved via PATH).
    pub program: String,
    /// Leading arguments placed before the output path (script path etc.).
    pub args: Vec<String>,
    /// Hard recording ceiling in seconds; a forgotten session self-terminates.
    pub max_duration_secs: u64,
    /// Scratch directory for temp output files.
    pub scratch_dir: PathBuf,
}

impl Default for RecorderCommand {
    fn default() -> Self {
        Self {
            program: "powershell".to_string(),
            args: Vec::new(),
            max_duration_secs: 300,
            scratch_dir: std::env::temp_dir().join("devvoice"),
        }
    }
}

/// Tuning for the post-stop output-file poll.
#[derive(Debug, Clone)]
pub struct PollPolicy {
    /// Initial delay before the first check, giving the recorder time to exit.
    pub grace: Duration,
    /// Interval between checks.
    pub interval: Duration,
    /// Maximum number of checks before giving up.
    pub max_attempts: u32,
    /// Files below this size are treated as not yet written.
    pub min_bytes: u64,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            grace: Duration::from_millis(1500),
            interval: Duration::from_millis(250),
            max_attempts: 80,
            min_bytes: 200,
        }
    }
}

/// Captured audio, read into memory and transport-encoded.
#[derive(Debug, Clone)]
pub struct ReadyAudio {
    /// Base64 encoding of the full audio file.
    pub data: String,
    /// MIME type of the underlying audio.
    pub mime_type: String,
    /// Size of the raw audio file in bytes.
    pub byte_len: u64,
}

/// State machine driving one recording session at a time.
///
/// Phases: `Idle -> Recording -> Stopping -> Ready | Failed`. Only one
/// session may be active; `start` while any session exists is rejected.
/// All methods are called from a single task, so phase checks double as
/// reentrancy guards.
pub struct SessionController {
    recorder: RecorderCommand,
    poll: PollPolicy,
    phase: SessionPhase,
    session_id: Option<Uuid>,
    output_path: Option<PathBuf>,
    child: Option<Child>,
}

impl SessionController {
    /// Create a controller with the given recorder invocation and poll tuning.
    pub fn new(recorder: RecorderCommand, poll: PollPolicy) -> Self {
        Self {
            recorder,
            poll,
            phase: SessionPhase::Idle,
            session_id: None,
            output_path: None,
            child: None,
        }
    }

    /// Current phase of the session state machine.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Temp output path of the current session, if one exists.
    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    /// Start a new recording session.
    ///
    /// Valid only from `Idle`. Allocates a fresh temp output path and spawns
    /// the external recorder with the configured duration ceiling.
    ///
    /// # Errors
    ///
    /// `SessionActive` if any session exists; `SpawnError` if the recorder
    /// cannot be started (phase stays `Idle`).
    #[track_caller]
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> CoreResult<Uuid> {
        if self.phase != SessionPhase::Idle {
            return Err(VoiceError::SessionActive {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        tokio::fs::create_dir_all(&self.recorder.scratch_dir)
            .await
            .map_err(|e| VoiceError::SpawnError {
                reason: format!(
                    "Failed to create scratch dir {:?}: {}",
                    self.recorder.scratch_dir, e
                ),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let output_path = self
            .recorder
            .scratch_dir
            .join(format!("recording-{}.wav", Utc::now().timestamp_millis()));

        let child = Command::new(&self.recorder.program)
            .args(&self.recorder.args)
            .arg(&output_path)
            .arg(self.recorder.max_duration_secs.to_string())
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| VoiceError::SpawnError {
                reason: format!("Failed to spawn {}: {}", self.recorder.program, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let session_id = Uuid::new_v4();
        self.session_id = Some(session_id);
        self.output_path = Some(output_path);
        self.child = Some(child);
        self.phase = SessionPhase::Recording;

        info!(session_id = %session_id, "Recording started");

        Ok(session_id)
    }

    /// Stop the current recording and wait for the output file.
    ///
    /// Valid only from `Recording`. Signals the recorder, then polls the
    /// output path on a fixed interval until a file of sufficient size
    /// appears. On success the file is read fully into memory and returned
    /// base64-encoded; the phase becomes `Ready`.
    ///
    /// # Errors
    ///
    /// `NoActiveSession` when not recording; `FileNotCreated` when the file
    /// never appears within the poll budget; `NoAudioCaptured` when it stays
    /// below the size threshold; `ReadError` if it cannot be read. All
    /// failures leave the phase at `Failed`.
    #[track_caller]
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> CoreResult<ReadyAudio> {
        if self.phase != SessionPhase::Recording {
            return Err(VoiceError::NoActiveSession {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let output_path = match self.output_path.clone() {
            Some(p) => p,
            None => {
                return Err(VoiceError::NoActiveSession {
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        self.phase = SessionPhase::Stopping;
        self.kill_recorder().await;

        // Give the recorder time to flush and exit before the first check.
        tokio::time::sleep(self.poll.grace).await;

        let mut file_seen = false;
        for attempt in 1..=self.poll.max_attempts {
            match tokio::fs::metadata(&output_path).await {
                Ok(meta) if meta.len() >= self.poll.min_bytes => {
                    return self.read_ready(&output_path, meta.len()).await;
                }
                Ok(meta) => {
                    file_seen = true;
                    debug!(
                        attempt,
                        size = meta.len(),
                        "Output file below size threshold, waiting"
                    );
                }
                Err(_) => {
                    if attempt % 4 == 0 {
                        debug!(attempt, max = self.poll.max_attempts, "Output file not yet present");
                    }
                }
            }

            if attempt < self.poll.max_attempts {
                tokio::time::sleep(self.poll.interval).await;
            }
        }

        self.phase = SessionPhase::Failed;
        if file_seen {
            warn!(path = ?output_path, "Poll budget exhausted with undersized file");
            Err(VoiceError::NoAudioCaptured {
                path: output_path,
                location: ErrorLocation::from(Location::caller()),
            })
        } else {
            warn!(path = ?output_path, "Poll budget exhausted, file never created");
            Err(VoiceError::FileNotCreated {
                path: output_path,
                location: ErrorLocation::from(Location::caller()),
            })
        }
    }

    /// Tear down the session from any phase.
    ///
    /// Kills the recorder if still running and resets to `Idle`. Never
    /// errors; also used to reset after a saved or failed session.
    #[instrument(skip(self))]
    pub async fn cancel(&mut self) {
        self.kill_recorder().await;
        if self.phase != SessionPhase::Idle {
            info!(phase = %self.phase, "Session cancelled");
        }
        self.session_id = None;
        self.output_path = None;
        self.phase = SessionPhase::Idle;
    }

    #[track_caller]
    async fn read_ready(&mut self, path: &Path, byte_len: u64) -> CoreResult<ReadyAudio> {
        match tokio::fs::read(path).await {
            Ok(bytes) => {
                self.phase = SessionPhase::Ready;
                info!(bytes = bytes.len(), "Recording ready");
                Ok(ReadyAudio {
                    data: STANDARD.encode(&bytes),
                    mime_type: "audio/wav".to_string(),
                    byte_len,
                })
            }
            Err(source) => {
                self.phase = SessionPhase::Failed;
                Err(VoiceError::ReadError {
                    path: path.to_path_buf(),
                    source,
                    location: ErrorLocation::from(Location::caller()),
                })
            }
        }
    }

    async fn kill_recorder(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.start_kill() {
                debug!(error = %e, "Recorder process already exited");
            }
            // Reap without blocking the caller for long; kill_on_drop covers
            // the case where the process ignores the signal.
            let _ = tokio::time::timeout(Duration::from_millis(100), child.wait()).await;
        }
    }
}
