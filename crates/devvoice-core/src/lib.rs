//! Devvoice Core Library
//!
//! Links short voice annotations to line ranges in source files: a
//! recording-session state machine around an external recorder process, a
//! per-workspace JSON metadata store with WAV blobs, and the projection that
//! turns stored records into editor decorations and hover lookups.
//!
//! # Example
//!
//! ```no_run
//! use devvoice_core::{PollPolicy, RecorderCommand, SessionController};
//!
//! #[tokio::main]
//! async fn main() -> devvoice_core::CoreResult<()> {
//!     let mut session =
//!         SessionController::new(RecorderCommand::default(), PollPolicy::default());
//!
//!     session.start().await?;
//!     tokio::time::sleep(std::time::Duration::from_secs(3)).await;
//!     let audio = session.stop().await?;
//!
//!     println!("Captured {} bytes", audio.byte_len);
//!     Ok(())
//! }
//! ```

mod decoration;
mod devices;
mod error;
mod playback;
mod session;
mod store;

pub use {
    decoration::{LineRange, compute_ranges, find_record_at},
    devices::{ProbeCommand, list_input_devices, parse_device_list},
    error::{Result as CoreResult, VoiceError},
    playback::Playback,
    session::{PollPolicy, ReadyAudio, RecorderCommand, SessionController, SessionPhase},
    store::{Annotation, MetadataMap, MetadataStore, Recording},
};

#[cfg(test)]
mod tests;
