//! JSON message vocabulary exchanged with the presentation surface.
//!
//! Every message is a single JSON object with a `command` discriminator and
//! camelCase payload keys. Unknown commands and malformed payloads are
//! rejected at parse time; the transport reports them without touching
//! application state.

use devvoice_core::LineRange;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Context about the focused editor selection, attached to save requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorInfo {
    /// Absolute path of the focused source file.
    pub filepath: PathBuf,
    /// Display name of the file.
    pub filename: String,
    /// 1-based inclusive start line of the selection.
    pub start_line: u32,
    /// 1-based inclusive end line of the selection.
    pub end_line: u32,
    /// Language identifier of the source file.
    pub language: String,
}

/// Inbound request from the presentation surface.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Request {
    /// The recorder surface opened; remember the focused selection.
    OpenRecorder {
        /// Selection context, absent when no editor is focused.
        #[serde(default)]
        editor_info: Option<EditorInfo>,
    },
    /// Begin a recording session.
    Start,
    /// End the active recording session and collect the audio.
    Stop,
    /// Enumerate available audio input devices.
    ListDevices,
    /// Persist the ready recording against the given selection.
    Save {
        /// Selection the recording annotates.
        editor_info: EditorInfo,
    },
    /// The recorder surface closed; discard any in-flight session.
    PanelClosed,
    /// A source file gained focus; project its decorations.
    EditorFocused {
        /// Absolute path of the newly focused file.
        filepath: PathBuf,
    },
    /// The cursor rests on a line; resolve hover content for it.
    HoverAt {
        /// Absolute path of the hovered file.
        filepath: PathBuf,
        /// Zero-based hovered line.
        line: u32,
    },
    /// Play a stored recording.
    PlayAudio {
        /// Workspace-relative audio path from the record.
        audio_file: String,
        /// Source file the record belongs to, used to resolve the workspace.
        source_file: PathBuf,
    },
    /// Delete every recording and the metadata document.
    ClearAllRecordings,
    /// Terminate the application.
    Shutdown,
}

/// Outbound reply to the presentation surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Reply {
    /// Human-readable progress message.
    Status {
        /// Message text.
        message: String,
    },
    /// A request failed; state was left safe.
    Error {
        /// Human-readable error description.
        error: String,
    },
    /// Result of a device enumeration.
    DeviceList {
        /// Parsed device names in first-seen order.
        devices: Vec<String>,
        /// Pre-rendered HTML fragment listing the devices.
        html: String,
    },
    /// A stopped recording is ready for review.
    AudioReady {
        /// Base64-encoded audio bytes.
        audio_data: String,
        /// MIME type of the audio.
        mime_type: String,
    },
    /// A recording was persisted.
    RecordingSaved {
        /// Id of the new record.
        recording_id: String,
    },
    /// Decoration ranges for one source file.
    Decorations {
        /// Absolute path of the decorated file.
        source_file: String,
        /// Zero-based line ranges to decorate, in stored order.
        ranges: Vec<LineRange>,
    },
    /// Hover content for a line, None when the line has no recording.
    Hover {
        /// Markdown to render, absent over unannotated lines.
        markdown: Option<String>,
    },
    /// All recordings were deleted.
    RecordingsCleared,
}
