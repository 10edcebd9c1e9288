//! Error types surfaced by the sync pipeline.

use thiserror::Error;

/// Failure modes of a single synchronisation run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The sheet could not be downloaded: connection failure, DNS error,
    /// or a non-success HTTP status.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// The download did not complete within the configured deadline.
    #[error("fetch timed out after {0}s")]
    Timeout(u64),

    /// The response body was not valid UTF-8.
    #[error("response is not valid UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    /// The translation table rejected the staged changes.
    #[error(transparent)]
    Persist(#[from] PersistError),

    /// The run was cancelled before it could finish.
    #[error("sync cancelled")]
    Cancelled,
}

/// Failure writing a translation table to durable storage.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Filesystem-level failure while writing the table document.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The table document could not be serialised.
    #[error("serialisation error: {0}")]
    Serialize(#[from] serde_json::Error),
}
