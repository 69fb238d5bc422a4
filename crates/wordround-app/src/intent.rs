//! Local intents.
//!
//! This module defines [`Intent`], everything the local side can ask of the
//! controller: button presses from the round UI and the two callbacks the
//! board widget raises while tiles are dragged.

use serde::{Deserialize, Serialize};
use wordround_core::Tile;

/// Inputs from the local player and the board widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Intent {
    /// Submit the candidate placement.
    MakeBoardMove,

    /// Pass the turn.
    MakePassMove,

    /// Enter exchange mode, or leave it and exchange the selected tiles.
    ToggleExchangeMode,

    /// Select or deselect a rack slot for exchange.
    ToggleExchangeSelection {
        /// Rack slot.
        slot: usize,
    },

    /// Send a chat message.
    SendChat {
        /// Message text.
        message: String,
    },

    /// Shuffle the rack.
    ShuffleRack,

    /// The board widget accepted a tile on a square.
    TileDropped {
        /// The dropped tile, still carrying its slot of origin.
        tile: Tile,
    },

    /// The board widget rejected or cancelled a drag and wants the tile back.
    RevertRequested {
        /// The tile to put back.
        tile: Tile,
    },
}
