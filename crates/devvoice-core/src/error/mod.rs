use error_location::ErrorLocation;
use thiserror::Error;

/// Voice-annotation errors with source location tracking.
#[derive(Error, Debug)]
pub enum VoiceError {
    /// External recorder process could not be located or started.
    #[error("Recorder spawn failed: {reason} {location}")]
    SpawnError {
        /// Description of the spawn failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A recording session is already active.
    #[error("A recording session is already active {location}")]
    SessionActive {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// No recording session is active for the requested operation.
    #[error("No recording session is active {location}")]
    NoActiveSession {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The recorder never wrote its output file within the poll budget.
    #[error("Audio file was not created: {path:?} {location}")]
    FileNotCreated {
        /// Expected output path that never appeared.
        path: std::path::PathBuf,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The output file appeared but never grew past the minimum size.
    #[error("No audio data captured: {path:?} {location}")]
    NoAudioCaptured {
        /// Output path that stayed below the size threshold.
        path: std::path::PathBuf,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// An audio file exists but could not be read.
    #[error("Failed to read audio file {path:?}: {source} {location}")]
    ReadError {
        /// Path of the unreadable file.
        path: std::path::PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The metadata document exists but is not parseable.
    #[error("Corrupt metadata at {path:?}: {reason} {location}")]
    CorruptMetadata {
        /// Path of the metadata document.
        path: std::path::PathBuf,
        /// Parse failure description.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Copying audio or rewriting the metadata document failed.
    #[error("Save failed: {reason} {location}")]
    SaveError {
        /// Description of the save failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The probing tool failed or produced no parseable device lines.
    #[error("Device listing failed: {reason} {location}")]
    DeviceListError {
        /// Description of the probe failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Audio playback could not be started.
    #[error("Playback failed: {reason} {location}")]
    PlaybackError {
        /// Description of the playback failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// An annotation range has its start line after its end line.
    #[error("Invalid line range {start_line}..{end_line} {location}")]
    InvalidRange {
        /// 1-based start line.
        start_line: u32,
        /// 1-based end line.
        end_line: u32,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// IO error from filesystem operations.
    #[error("IO error: {source} {location}")]
    IoError {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl From<std::io::Error> for VoiceError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        VoiceError::IoError {
            source,
            location: ErrorLocation::from(std::panic::Location::caller()),
        }
    }
}

/// Result type alias using [`VoiceError`].
pub type Result<T> = std::result::Result<T, VoiceError>;
