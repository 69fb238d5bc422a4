//! Protocol error types.
//!
//! Only decoding can really fail: the envelope text is not JSON, or a known
//! command carries a payload of the wrong shape. An unknown command name is
//! not an error at this layer (see [`crate::Decoded::Unrecognized`]).

use thiserror::Error;

/// Result alias for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors produced while encoding or decoding command envelopes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Raw message text is not a JSON command envelope.
    #[error("invalid envelope: {reason}")]
    InvalidJson {
        /// Parser error description
        reason: String,
    },

    /// A recognized command carried a payload of the wrong shape.
    #[error("malformed payload for {command}: {reason}")]
    MalformedPayload {
        /// Command name from the envelope
        command: String,
        /// Parser error description
        reason: String,
    },

    /// An outbound command could not be serialized.
    #[error("failed to encode {command}: {reason}")]
    Encode {
        /// Command name being encoded
        command: &'static str,
        /// Serializer error description
        reason: String,
    },
}
