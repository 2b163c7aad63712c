use thiserror::Error;

/// A required marker or pattern was missing from a fetched page.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("page is missing marker: {0}")]
    MissingMarker(&'static str),

    #[error("result entry has no usable content")]
    UnusableEntry,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("timed out talking to {host}:{port}")]
    Timeout { host: String, port: u16 },
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{program} exited with {code:?}")]
    Status { program: String, code: Option<i32> },
}

/// Failure of a single user-visible command.
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

pub type Result<T> = std::result::Result<T, AcquireError>;
