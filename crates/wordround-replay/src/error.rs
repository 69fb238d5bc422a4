//! Replay error types.

use thiserror::Error;

/// Errors that can occur while replaying a transcript.
#[derive(Error, Debug)]
pub enum ReplayError {
    /// A transcript line is not a valid step.
    #[error("transcript line {line}: {reason}")]
    Transcript {
        /// 1-based line number
        line: usize,
        /// Parser error description
        reason: String,
    },

    /// The snapshot file is not a valid round snapshot.
    #[error("invalid snapshot: {0}")]
    Snapshot(String),

    /// Writing the replay report failed.
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    /// A report record could not be serialized.
    #[error("failed to encode report record: {0}")]
    Encode(#[from] serde_json::Error),
}
