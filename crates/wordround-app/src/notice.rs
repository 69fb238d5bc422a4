//! User-facing notices.
//!
//! Errors the user must see are queued, not shown modally. Whatever draws
//! the UI drains the queue and decides how to present each notice.

use serde::{Deserialize, Serialize};

/// Error payload reported by the server (`{"error": "..."}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameError {
    /// Human-readable reason.
    pub error: String,
}

impl GameError {
    /// Create an error payload.
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

/// A notice for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Notice {
    /// The server rejected something the user did.
    Error {
        /// Text to show.
        message: String,
    },
}

impl From<GameError> for Notice {
    fn from(err: GameError) -> Self {
        Self::Error { message: err.error }
    }
}
