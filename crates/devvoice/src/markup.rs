//! Presentation fragments rendered on the application side.
//!
//! The surface treats these as opaque strings: hover markdown with an
//! embedded playback command link, and an HTML fragment for the device list.

use devvoice_core::Recording;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

// Command-link arguments ride in a URI query, so the JSON payload is
// percent-encoded with the same character set encodeURIComponent keeps.
const COMMAND_LINK: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Render the hover markdown for one record.
///
/// The play link carries `[audioFile, sourceFile]` as a percent-encoded JSON
/// array in the command URI query.
pub fn hover_markdown(record: &Recording) -> String {
    let payload = serde_json::to_string(&[
        record.audio_file.as_str(),
        record.source_file.as_str(),
    ])
    .unwrap_or_default();
    let encoded = utf8_percent_encode(&payload, COMMAND_LINK);

    format!(
        "**Audio Recording**\n\nLines: {}-{}\n\nDuration: {}s\n\n\
         [Play Audio](command:devvoice.playAudio?{})",
        record.start_line, record.end_line, record.duration, encoded
    )
}

/// Render the device list as a preformatted HTML fragment.
pub fn device_list_html(devices: &[String]) -> String {
    let listing = devices
        .iter()
        .map(|d| format!("Device: {}", d))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "<strong>Available Audio Devices:</strong>\
         <pre style=\"background: #f5f5f5; padding: 10px; border-radius: 4px; overflow-x: auto;\">\
         {}</pre>\
         <p><small>If you don't see your microphone, try recording anyway. \
         Some devices use generic names.</small></p>",
        listing
    )
}
