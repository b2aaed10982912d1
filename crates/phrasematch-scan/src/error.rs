//! Scan error types

use thiserror::Error;

/// Errors raised while configuring or driving a scan.
///
/// Cancellation is not an error; it is reported through
/// [`ScanStatus::Cancelled`](crate::ScanStatus::Cancelled).
#[derive(Error, Debug)]
pub enum ScanError {
    /// `start`/`run` called on a scan that already left `Created`
    #[error("scan {id} was already started")]
    AlreadyStarted { id: u64 },

    /// `start` called outside a tokio runtime
    #[error("no tokio runtime available to schedule the scan")]
    NoRuntime,

    /// A candidate with unusable text; recovered by skipping it
    #[error("malformed candidate at index {index}: {reason}")]
    MalformedCandidate { index: usize, reason: String },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using ScanError.
pub type Result<T> = std::result::Result<T, ScanError>;
