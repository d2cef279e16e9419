use crate::{VoiceError, error::Result as CoreResult};

use std::{panic::Location, path::PathBuf};

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// A single voice-annotation record linking an audio file to a line range.
///
/// Immutable once written: the store only ever appends new records.
/// Serialized with the camelCase keys of the on-disk metadata document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recording {
    /// Opaque unique id, generated at save time.
    pub id: String,
    /// Workspace-relative audio path (`recordings/<id>.wav`).
    pub audio_file: String,
    /// Absolute path of the annotated source file; the map key.
    pub source_file: String,
    /// Language identifier of the source file, informational only.
    pub language: String,
    /// 1-based inclusive start line.
    pub start_line: u32,
    /// 1-based inclusive end line.
    pub end_line: u32,
    /// ISO-8601 creation time.
    pub timestamp: String,
    /// Approximate duration in seconds, derived from file size.
    pub duration: u64,
}

/// The code range and context a recording is being attached to.
///
/// Validated at construction: `start_line <= end_line`, both 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Absolute path of the annotated source file.
    pub source_file: PathBuf,
    /// Language identifier of the source file.
    pub language: String,
    /// 1-based inclusive start line.
    pub start_line: u32,
    /// 1-based inclusive end line.
    pub end_line: u32,
}

impl Annotation {
    /// Create an annotation, validating the line range.
    ///
    /// # Errors
    ///
    /// `InvalidRange` if `start_line` is zero (lines are 1-based) or greater
    /// than `end_line`.
    #[track_caller]
    pub fn new(
        source_file: PathBuf,
        language: String,
        start_line: u32,
        end_line: u32,
    ) -> CoreResult<Self> {
        if start_line == 0 || start_line > end_line {
            return Err(VoiceError::InvalidRange {
                start_line,
                end_line,
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(Self {
            source_file,
            language,
            start_line,
            end_line,
        })
    }
}

/// Rough clip duration from WAV byte length (44.1 kHz, 4 bytes per frame).
pub(crate) fn estimate_duration_secs(byte_len: u64) -> u64 {
    (byte_len as f64 / 44_100.0 / 4.0).round() as u64
}
