// error.rs - Error types for the goal ledger.
//
// Every variant is recoverable: the caller reports it and retries with
// corrected input. Load-time variants carry the 1-based line number of the
// offending record in the ledger file.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building, mutating, or persisting a ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Goal constructor arguments violated one or more constraints.
    #[error("invalid goal: {}", violations.join("; "))]
    Validation { violations: Vec<String> },

    /// A 1-based goal index outside the current listing.
    #[error("goal index {index} is out of range (1..={len})")]
    OutOfRange { index: usize, len: usize },

    /// The ledger file does not exist.
    #[error("ledger file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A file I/O operation failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The points total line is missing or not an integer.
    #[error("line {line}: expected points total, found {value:?}")]
    Format { line: usize, value: String },

    /// A goal record has the wrong number of fields or a bad field value.
    #[error("line {line}: malformed {kind} record: {reason}")]
    MalformedRecord {
        line: usize,
        kind: String,
        reason: String,
    },

    /// A goal record starts with a kind tag nobody knows.
    #[error("line {line}: unknown goal kind {tag:?}")]
    UnknownKind { line: usize, tag: String },

    /// Failed to serialize a ledger event.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A notification sink could not deliver an event.
    ///
    /// Sinks that are not file-backed (a webhook, a desktop notifier) return
    /// this from `NotificationSink::send`. The dispatcher logs it and moves on;
    /// it never reaches the caller of a ledger operation.
    #[error("notification error: {0}")]
    Notification(String),
}

impl LedgerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LedgerError::Io {
            path: path.into(),
            source,
        }
    }
}
