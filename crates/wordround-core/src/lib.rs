//! Core session model
//!
//! The in-memory view of one round as seen by one player: whose turn it is,
//! the seven-slot rack, scores, move history and chat. Nothing here talks to
//! the network or draws anything; the controller in `wordround-app` is the
//! single writer of a [`SessionModel`].
//!
//! # Components
//!
//! - [`SessionModel`]: the per-round view model
//! - [`Rack`]: fixed seven-slot rack with slot bookkeeping
//! - [`Tile`]: a rack or candidate tile with its origin slot
//! - [`MoveRecord`]: entries of the append-only move history
//! - [`RoundSnapshot`]: initial state delivered at round start or reconnect
//! - [`env::Environment`]: randomness seam for deterministic testing

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod env;
mod error;
mod history;
mod model;
mod rack;
mod snapshot;
mod tile;

pub use error::ModelError;
pub use history::{MoveRecord, MoveSummary};
pub use model::SessionModel;
pub use rack::{RACK_SIZE, Rack, RackSlot};
pub use snapshot::RoundSnapshot;
pub use tile::Tile;
pub use wordround_proto::{ChatLine, PlayerId, PlayerScore, TileFace};
