//! Wordround wire protocol
//!
//! Both directions of the round protocol use the same JSON command envelope:
//! `{"command": <name>, "payload": <command-specific>}`. Outbound commands are a
//! closed enum serialized with an adjacent tag. Inbound envelopes are parsed
//! loosely first and only then narrowed to [`InboundCommand`], so a command
//! name this client does not know is reported as
//! [`Decoded::Unrecognized`] instead of a decode failure.
//!
//! # Coordinates
//!
//! The board widget works in 0-indexed coordinates; the server speaks
//! 1-indexed ones. [`Position::from_board`] is the single place the offset is
//! applied.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod inbound;
mod outbound;
mod types;

pub use error::{ProtocolError, Result};
pub use inbound::{
    BOARD_MOVE_SUCCESS, BoardMoveSuccess, Decoded, InboundCommand, InboundEnvelope,
    PLAYER_BOARD_MOVE, PLAYER_PASS_MOVE, PlayerBoardMove, PlayerPassMove,
};
pub use outbound::{EmptyPayload, OutboundCommand};
pub use types::{ChatLine, PlacedTile, PlayerId, PlayerScore, Position, TileFace};
