//! Per-workspace metadata store.
//!
//! One JSON document per workspace at `<root>/.devvoice/metadata.json`,
//! mapping absolute source-file paths to ordered recording lists, with audio
//! blobs under `<root>/.devvoice/recordings/`. The document is loaded fully
//! into memory and rewritten fully on each save; there is no incremental
//! update.

use crate::{
    VoiceError,
    error::Result as CoreResult,
    store::record::{Annotation, Recording, estimate_duration_secs},
};

use std::{
    collections::BTreeMap,
    panic::Location,
    path::{Path, PathBuf},
};

use chrono::Utc;
use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Mapping from absolute source-file path to its recordings, in save order.
pub type MetadataMap = BTreeMap<String, Vec<Recording>>;

const DEVVOICE_DIR: &str = ".devvoice";
const RECORDINGS_DIR: &str = "recordings";
const METADATA_FILE: &str = "metadata.json";

/// Handle on one workspace's `.devvoice` persistence folder.
pub struct MetadataStore {
    workspace_root: PathBuf,
}

impl MetadataStore {
    /// Create a store rooted at the given workspace directory.
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
        }
    }

    /// The workspace root this store persists under.
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Path of the `.devvoice` folder.
    pub fn devvoice_dir(&self) -> PathBuf {
        self.workspace_root.join(DEVVOICE_DIR)
    }

    /// Path of the audio blob folder.
    pub fn recordings_dir(&self) -> PathBuf {
        self.devvoice_dir().join(RECORDINGS_DIR)
    }

    /// Path of the metadata document.
    pub fn metadata_path(&self) -> PathBuf {
        self.devvoice_dir().join(METADATA_FILE)
    }

    /// Resolve a record's workspace-relative audio path to an absolute one.
    pub fn audio_path(&self, audio_file: &str) -> PathBuf {
        self.devvoice_dir().join(audio_file)
    }

    /// Load the full metadata document.
    ///
    /// An absent document is an empty mapping.
    ///
    /// # Errors
    ///
    /// `CorruptMetadata` if the document exists but is not parseable; the
    /// caller decides whether to abort or keep prior state.
    #[track_caller]
    #[instrument(skip(self))]
    pub async fn load(&self) -> CoreResult<MetadataMap> {
        let path = self.metadata_path();

        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = ?path, "No metadata document, starting empty");
                return Ok(MetadataMap::new());
            }
            Err(source) => return Err(source.into()),
        };

        let map: MetadataMap =
            serde_json::from_str(&contents).map_err(|e| VoiceError::CorruptMetadata {
                path: path.clone(),
                reason: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!(files = map.len(), "Metadata loaded");

        Ok(map)
    }

    /// Persist a ready recording: copy the audio into the workspace, append a
    /// record, and rewrite the document.
    ///
    /// Creates `.devvoice/` and `recordings/` idempotently, copies the temp
    /// audio to `recordings/<id>.wav`, deletes the temp file (best-effort),
    /// and appends under the annotation's source-file key in insertion order.
    ///
    /// The audio copy and the metadata rewrite are not transactional: a crash
    /// between them leaves an orphaned audio file with no referencing record.
    ///
    /// # Errors
    ///
    /// `ReadError` if the temp audio cannot be read, `SaveError` if the copy
    /// or document rewrite fails, `CorruptMetadata` if the existing document
    /// is unparseable (nothing is written in that case).
    #[track_caller]
    #[instrument(skip(self, temp_audio))]
    pub async fn save_recording(
        &self,
        temp_audio: &Path,
        annotation: &Annotation,
    ) -> CoreResult<Recording> {
        let recordings_dir = self.recordings_dir();
        tokio::fs::create_dir_all(&recordings_dir)
            .await
            .map_err(|e| VoiceError::SaveError {
                reason: format!("Failed to create {:?}: {}", recordings_dir, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let audio_bytes =
            tokio::fs::read(temp_audio)
                .await
                .map_err(|source| VoiceError::ReadError {
                    path: temp_audio.to_path_buf(),
                    source,
                    location: ErrorLocation::from(Location::caller()),
                })?;

        let id = format!("rec-{}", Uuid::new_v4().simple());
        let audio_file = format!("{RECORDINGS_DIR}/{id}.wav");
        let destination = recordings_dir.join(format!("{id}.wav"));

        tokio::fs::write(&destination, &audio_bytes)
            .await
            .map_err(|e| VoiceError::SaveError {
                reason: format!("Failed to write {:?}: {}", destination, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        if let Err(e) = tokio::fs::remove_file(temp_audio).await {
            warn!(path = ?temp_audio, error = %e, "Could not delete temp audio file");
        }

        let source_key = annotation.source_file.to_string_lossy().into_owned();
        let record = Recording {
            id,
            audio_file,
            source_file: source_key.clone(),
            language: annotation.language.clone(),
            start_line: annotation.start_line,
            end_line: annotation.end_line,
            timestamp: Utc::now().to_rfc3339(),
            duration: estimate_duration_secs(audio_bytes.len() as u64),
        };

        let mut map = self.load().await?;
        map.entry(source_key).or_default().push(record.clone());
        self.write_document(&map).await?;

        info!(
            id = %record.id,
            source_file = %record.source_file,
            start_line = record.start_line,
            end_line = record.end_line,
            "Recording saved"
        );

        Ok(record)
    }

    /// Delete every audio blob, the recordings folder, and the document.
    ///
    /// Each deletion is best-effort and independently non-fatal; failures are
    /// logged and the rest of the cleanup proceeds. Calling this when nothing
    /// exists succeeds, so the operation is idempotent.
    #[instrument(skip(self))]
    pub async fn clear_all(&self) -> CoreResult<()> {
        let recordings_dir = self.recordings_dir();

        match tokio::fs::read_dir(&recordings_dir).await {
            Ok(mut entries) => {
                while let Ok(Some(entry)) = entries.next_entry().await {
                    if let Err(e) = tokio::fs::remove_file(entry.path()).await {
                        warn!(path = ?entry.path(), error = %e, "Could not delete recording");
                    }
                }
                if let Err(e) = tokio::fs::remove_dir(&recordings_dir).await {
                    warn!(path = ?recordings_dir, error = %e, "Could not remove recordings dir");
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = ?recordings_dir, error = %e, "Could not list recordings dir"),
        }

        let metadata_path = self.metadata_path();
        match tokio::fs::remove_file(&metadata_path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = ?metadata_path, error = %e, "Could not delete metadata document"),
        }

        info!("All recordings cleared");

        Ok(())
    }

    #[track_caller]
    async fn write_document(&self, map: &MetadataMap) -> CoreResult<()> {
        let contents =
            serde_json::to_string_pretty(map).map_err(|e| VoiceError::SaveError {
                reason: format!("Failed to serialize metadata: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let path = self.metadata_path();
        tokio::fs::write(&path, contents)
            .await
            .map_err(|e| VoiceError::SaveError {
                reason: format!("Failed to write {:?}: {}", path, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!(path = ?path, "Metadata document rewritten");

        Ok(())
    }
}
