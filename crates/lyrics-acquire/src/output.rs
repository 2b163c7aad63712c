use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::SinkError;

/// Where finished documents go.
///
/// Payloads arrive already sanitized (see `lyrics_model::sanitize`). An empty
/// payload is the "no results" signal.
#[async_trait]
pub trait LyricsSink: Send + Sync {
    async fn deliver(&self, payload: &str) -> Result<(), SinkError>;

    /// Show a short informational message to the user.
    async fn notify(&self, message: &str) -> Result<(), SinkError> {
        self.deliver(message).await
    }
}

/// Hands documents to a running Amarok through the `dcop` command.
pub struct DcopSink {
    program: String,
}

impl DcopSink {
    pub fn new() -> Self {
        Self::with_program("dcop")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    async fn call(&self, args: &[&str]) -> Result<(), SinkError> {
        // Arguments are passed as argv entries, never through a shell.
        let status = Command::new(&self.program).args(args).status().await?;
        if !status.success() {
            return Err(SinkError::Status {
                program: self.program.clone(),
                code: status.code(),
            });
        }
        Ok(())
    }
}

impl Default for DcopSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LyricsSink for DcopSink {
    async fn deliver(&self, payload: &str) -> Result<(), SinkError> {
        tracing::debug!(bytes = payload.len(), "Delivering to contextbrowser");
        if payload.is_empty() {
            self.call(&["amarok", "contextbrowser", "showLyrics"]).await
        } else {
            self.call(&["amarok", "contextbrowser", "showLyrics", payload]).await
        }
    }

    async fn notify(&self, message: &str) -> Result<(), SinkError> {
        self.call(&["amarok", "playlist", "popupMessage", message]).await
    }
}

/// Writes each payload to stdout followed by a newline.
#[derive(Default)]
pub struct StdoutSink;

#[async_trait]
impl LyricsSink for StdoutSink {
    async fn deliver(&self, payload: &str) -> Result<(), SinkError> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(payload.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
        Ok(())
    }
}
