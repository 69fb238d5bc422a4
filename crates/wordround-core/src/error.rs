//! Error types for session model operations.

use thiserror::Error;

/// Errors raised by session model operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Rack slot index past the end of the rack.
    #[error("rack slot {slot} out of range (rack holds {capacity})")]
    SlotOutOfRange {
        /// Requested slot
        slot: usize,
        /// Rack capacity
        capacity: usize,
    },
}
