//! Line-delimited JSON transport over stdio.
//!
//! Requests arrive one JSON object per line on stdin; replies leave one JSON
//! object per line on stdout. Logging goes to stderr so the reply stream
//! stays clean. Malformed lines are answered with an error reply and do not
//! reach the application.

use crate::{AppError, AppResult, Reply, Request};

use std::panic::Location;

use error_location::ErrorLocation;
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    sync::mpsc,
};
use tracing::{debug, instrument, warn};

/// Read requests from stdin until it closes.
///
/// Each parsed request is forwarded to the application channel. Lines that
/// fail to parse are reported on the reply channel and skipped.
///
/// # Errors
///
/// `IoError` if stdin cannot be read; `ChannelSendFailed` if the application
/// channel closes while a request is pending.
#[instrument(skip_all)]
pub async fn read_requests(
    requests: mpsc::Sender<Request>,
    replies: mpsc::Sender<Reply>,
) -> AppResult<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<Request>(&line) {
            Ok(request) => {
                debug!(request = ?request, "Request received");
                requests
                    .send(request)
                    .await
                    .map_err(|e| AppError::ChannelSendFailed {
                        message: format!("Request channel closed: {}", e),
                        location: ErrorLocation::from(Location::caller()),
                    })?;
            }
            Err(e) => {
                warn!(error = %e, "Unrecognized message");
                let reply = Reply::Error {
                    error: format!("Unrecognized message: {}", e),
                };
                if replies.send(reply).await.is_err() {
                    break;
                }
            }
        }
    }

    debug!("Request stream closed");

    Ok(())
}

/// Write replies to stdout until the channel closes.
///
/// # Errors
///
/// `IoError` if stdout cannot be written.
#[instrument(skip_all)]
pub async fn write_replies(mut replies: mpsc::Receiver<Reply>) -> AppResult<()> {
    let mut stdout = tokio::io::stdout();

    while let Some(reply) = replies.recv().await {
        let line = match serde_json::to_string(&reply) {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "Could not serialize reply");
                continue;
            }
        };

        stdout.write_all(line.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    debug!("Reply stream closed");

    Ok(())
}
