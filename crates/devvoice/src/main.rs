//! Devvoice: voice annotations pinned to source-file line ranges.

mod app;
mod config;
mod error;
mod markup;
mod protocol;
#[cfg(test)]
mod tests;
mod transport;

pub(crate) use {
    app::App,
    error::{AppError, Result as AppResult},
    protocol::{EditorInfo, Reply, Request},
};

use crate::config::Config;

use tokio::sync::mpsc;
use tracing::error;

/// Application entry point.
#[tokio::main]
async fn main() {
    // stdout carries the reply stream, so logging goes to stderr.
    tracing_subscriber::fmt()
        .with_env_filter("devvoice=debug")
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    let (request_tx, request_rx) = mpsc::channel(32);
    let (reply_tx, reply_rx) = mpsc::channel(32);

    let reader = tokio::spawn(transport::read_requests(request_tx, reply_tx.clone()));
    let writer = tokio::spawn(transport::write_replies(reply_rx));

    let app = App::new(config, request_rx, reply_tx);
    if let Err(e) = app.run().await {
        error!(error = ?e, "App error");
    }

    // App dropped its reply sender; once the reader stops, the writer drains
    // remaining replies and ends.
    reader.abort();
    match writer.await {
        Ok(Err(e)) => error!(error = ?e, "Writer error"),
        Err(e) => error!(error = ?e, "Writer task failed"),
        Ok(Ok(())) => {}
    }
}
