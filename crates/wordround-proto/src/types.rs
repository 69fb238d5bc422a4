//! Shared wire types.

use serde::{Deserialize, Serialize};

/// Player identity as used by the server (`playerNumber`, `nowPlaying`).
pub type PlayerId = u32;

/// Board position in server coordinates (1-indexed on both axes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column, starting at 1.
    pub x: u32,
    /// Row, starting at 1.
    pub y: u32,
}

impl Position {
    /// Convert 0-indexed board widget coordinates to server coordinates.
    ///
    /// Adds exactly one to each axis. Any other transformation desyncs the
    /// client from the server. `None` if an axis has no 1-indexed
    /// counterpart (`u32::MAX`).
    pub fn from_board(x: u32, y: u32) -> Option<Self> {
        Some(Self { x: x.checked_add(1)?, y: y.checked_add(1)? })
    }

    /// Convert back to 0-indexed board widget coordinates.
    ///
    /// `None` if either axis is 0, which no server position can be.
    pub fn to_board(self) -> Option<(u32, u32)> {
        Some((self.x.checked_sub(1)?, self.y.checked_sub(1)?))
    }
}

/// The face of a tile as the server knows it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileFace {
    /// Letter printed on the tile. Blank tiles use an empty or space letter.
    pub letter: String,
    /// Point value.
    pub value: u32,
}

impl TileFace {
    /// Create a tile face.
    pub fn new(letter: impl Into<String>, value: u32) -> Self {
        Self { letter: letter.into(), value }
    }
}

/// A tile at a board position, in server coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedTile {
    /// Target square.
    pub pos: Position,
    /// Tile placed there.
    pub tile: TileFace,
}

impl PlacedTile {
    /// Build a wire placement from a board widget placement (0-indexed).
    ///
    /// `None` when the square has no server position, see
    /// [`Position::from_board`].
    pub fn from_board(x: u32, y: u32, tile: TileFace) -> Option<Self> {
        Some(Self { pos: Position::from_board(x, y)?, tile })
    }
}

/// A player's name and running score, index-aligned with player numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    /// Display name.
    pub name: String,
    /// Current score.
    pub score: i64,
}

/// One line of round chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatLine {
    /// Display name of the sender.
    pub sender: String,
    /// Message text.
    pub message: String,
}
