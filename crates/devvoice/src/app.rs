//! Application orchestrator.
//!
//! Owns the session controller, playback handle, and metadata cache, and
//! serves protocol requests one at a time. A failed request is answered with
//! an error reply and leaves the session in a safe state; the loop itself
//! only ends on shutdown or when the request stream closes.

use crate::{
    AppError, AppResult, EditorInfo, Reply, Request, config::Config, markup,
};
use devvoice_core::{
    Annotation, MetadataMap, MetadataStore, Playback, PollPolicy, SessionController, SessionPhase,
    compute_ranges, find_record_at, list_input_devices,
};

use std::{
    panic::Location,
    path::{Path, PathBuf},
};

use error_location::ErrorLocation;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

/// Request-serving application state.
pub struct App {
    config: Config,
    session: SessionController,
    playback: Playback,
    metadata: MetadataMap,
    metadata_root: Option<PathBuf>,
    editor_info: Option<EditorInfo>,
    requests: mpsc::Receiver<Request>,
    replies: mpsc::Sender<Reply>,
}

impl App {
    /// Create the application around its request and reply channels.
    pub fn new(
        config: Config,
        requests: mpsc::Receiver<Request>,
        replies: mpsc::Sender<Reply>,
    ) -> Self {
        let session = SessionController::new(config.recorder_command(), PollPolicy::default());
        Self {
            config,
            session,
            playback: Playback::new(),
            metadata: MetadataMap::new(),
            metadata_root: None,
            editor_info: None,
            requests,
            replies,
        }
    }

    /// Serve requests until shutdown or until the request stream closes.
    #[instrument(skip(self))]
    pub async fn run(mut self) -> AppResult<()> {
        info!("Devvoice ready");

        while let Some(request) = self.requests.recv().await {
            if matches!(request, Request::Shutdown) {
                info!("Shutdown requested");
                break;
            }

            if let Err(e) = self.handle(request).await {
                error!(error = %e, "Request failed");
                self.send(Reply::Error {
                    error: e.to_string(),
                })
                .await;
            }
        }

        self.playback.stop();
        self.session.cancel().await;

        info!("Devvoice stopped");

        Ok(())
    }

    #[instrument(skip(self, request), fields(request = ?request))]
    async fn handle(&mut self, request: Request) -> AppResult<()> {
        match request {
            Request::OpenRecorder { editor_info } => self.open_recorder(editor_info).await,
            Request::Start => self.start().await,
            Request::Stop => self.stop().await,
            Request::ListDevices => self.list_devices().await,
            Request::Save { editor_info } => self.save(editor_info).await,
            Request::PanelClosed => self.panel_closed().await,
            Request::EditorFocused { filepath } => self.editor_focused(filepath).await,
            Request::HoverAt { filepath, line } => self.hover_at(&filepath, line).await,
            Request::PlayAudio {
                audio_file,
                source_file,
            } => self.play_audio(&audio_file, &source_file).await,
            Request::ClearAllRecordings => self.clear_all_recordings().await,
            // Handled by the run loop before dispatch.
            Request::Shutdown => Ok(()),
        }
    }

    async fn open_recorder(&mut self, editor_info: Option<EditorInfo>) -> AppResult<()> {
        let message = match &editor_info {
            Some(info) => format!(
                "Recording for {} (lines {}-{})",
                info.filename, info.start_line, info.end_line
            ),
            None => "No file selected. Recording will not be linked to code.".to_string(),
        };
        self.editor_info = editor_info;

        self.send(Reply::Status { message }).await;

        Ok(())
    }

    async fn start(&mut self) -> AppResult<()> {
        // A stale ready or failed session is discarded; an active one is not.
        if matches!(
            self.session.phase(),
            SessionPhase::Ready | SessionPhase::Failed
        ) {
            self.session.cancel().await;
        }

        self.session.start().await?;

        self.send(Reply::Status {
            message: "Recording in progress... Speak clearly!".to_string(),
        })
        .await;

        Ok(())
    }

    async fn stop(&mut self) -> AppResult<()> {
        if self.session.phase() != SessionPhase::Recording {
            self.send(Reply::Status {
                message: "No recording in progress".to_string(),
            })
            .await;
            return Ok(());
        }

        self.send(Reply::Status {
            message: "Processing recording...".to_string(),
        })
        .await;

        match self.session.stop().await {
            Ok(audio) => {
                self.send(Reply::AudioReady {
                    audio_data: audio.data,
                    mime_type: audio.mime_type,
                })
                .await;
                Ok(())
            }
            Err(e) => {
                // The failed session holds nothing worth keeping.
                self.session.cancel().await;
                Err(e.into())
            }
        }
    }

    async fn list_devices(&mut self) -> AppResult<()> {
        self.send(Reply::Status {
            message: "Scanning for audio devices...".to_string(),
        })
        .await;

        let devices = list_input_devices(&self.config.probe_command()).await?;
        let html = markup::device_list_html(&devices);

        self.send(Reply::DeviceList { devices, html }).await;

        Ok(())
    }

    async fn save(&mut self, editor_info: EditorInfo) -> AppResult<()> {
        if self.session.phase() != SessionPhase::Ready {
            return Err(AppError::InvalidRequest {
                reason: "No recording available to save".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        let temp_audio = match self.session.output_path() {
            Some(p) => p.to_path_buf(),
            None => {
                return Err(AppError::InvalidRequest {
                    reason: "No recording available to save".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        let annotation = Annotation::new(
            editor_info.filepath.clone(),
            editor_info.language.clone(),
            editor_info.start_line,
            editor_info.end_line,
        )?;

        let root = self.workspace_root_for(&editor_info.filepath)?;
        let store = MetadataStore::new(&root);
        let record = store.save_recording(&temp_audio, &annotation).await?;

        // The temp audio is consumed; the session resets for the next one.
        self.session.cancel().await;
        self.editor_info = Some(editor_info);

        self.metadata = store.load().await?;
        self.metadata_root = Some(root);

        let source_file = record.source_file.clone();
        self.send(Reply::RecordingSaved {
            recording_id: record.id,
        })
        .await;
        self.send_decorations(&source_file).await;

        Ok(())
    }

    async fn panel_closed(&mut self) -> AppResult<()> {
        debug!("Recorder panel closed");
        self.session.cancel().await;
        Ok(())
    }

    async fn editor_focused(&mut self, filepath: PathBuf) -> AppResult<()> {
        let root = self.workspace_root_for(&filepath)?;
        let store = MetadataStore::new(&root);

        // A corrupt document is reported and the prior cache kept.
        self.metadata = store.load().await?;
        self.metadata_root = Some(root);

        let source_file = filepath.to_string_lossy().into_owned();
        self.send_decorations(&source_file).await;

        Ok(())
    }

    async fn hover_at(&mut self, filepath: &Path, line: u32) -> AppResult<()> {
        let source_file = filepath.to_string_lossy();
        let markdown =
            find_record_at(&self.metadata, &source_file, line).map(markup::hover_markdown);

        self.send(Reply::Hover { markdown }).await;

        Ok(())
    }

    async fn play_audio(&mut self, audio_file: &str, source_file: &Path) -> AppResult<()> {
        let root = self.workspace_root_for(source_file)?;
        let audio_path = MetadataStore::new(&root).audio_path(audio_file);

        self.playback.play(&audio_path).await?;

        self.send(Reply::Status {
            message: "Playing audio...".to_string(),
        })
        .await;

        Ok(())
    }

    async fn clear_all_recordings(&mut self) -> AppResult<()> {
        let root = match self.clear_target_root() {
            Some(root) => root,
            None => {
                return Err(AppError::InvalidRequest {
                    reason: "Could not determine workspace root".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        MetadataStore::new(&root).clear_all().await?;
        self.metadata.clear();
        self.metadata_root = Some(root);

        self.send(Reply::RecordingsCleared).await;

        if let Some(info) = self.editor_info.clone() {
            let source_file = info.filepath.to_string_lossy().into_owned();
            self.send_decorations(&source_file).await;
        }

        Ok(())
    }

    /// Resolve the workspace root a source file persists under.
    ///
    /// A configured root wins; otherwise the file's parent folder is used.
    fn workspace_root_for(&self, source_file: &Path) -> AppResult<PathBuf> {
        if let Some(root) = &self.config.workspace.root {
            return Ok(root.clone());
        }

        match source_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => Ok(parent.to_path_buf()),
            _ => Err(AppError::InvalidRequest {
                reason: format!("Could not determine workspace root for {:?}", source_file),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    fn clear_target_root(&self) -> Option<PathBuf> {
        if let Some(root) = &self.config.workspace.root {
            return Some(root.clone());
        }
        if let Some(info) = &self.editor_info {
            if let Ok(root) = self.workspace_root_for(&info.filepath) {
                return Some(root);
            }
        }
        self.metadata_root.clone()
    }

    async fn send_decorations(&self, source_file: &str) {
        let ranges = compute_ranges(&self.metadata, source_file);
        self.send(Reply::Decorations {
            source_file: source_file.to_string(),
            ranges,
        })
        .await;
    }

    async fn send(&self, reply: Reply) {
        if let Err(e) = self.replies.send(reply).await {
            warn!(error = %e, "Reply channel closed");
        }
    }
}
