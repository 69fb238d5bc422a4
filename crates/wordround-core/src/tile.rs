//! Rack and board tiles.

use serde::{Deserialize, Serialize};
use wordround_proto::TileFace;

/// A tile held by the local player.
///
/// A tile is a candidate while it sits on the board without server
/// confirmation. `slot_number` remembers which rack slot it came from so a
/// cancelled drag can put it back.
///
/// Two tiles can share a face (two E's). `id` tells them apart: the rack
/// issues one when the tile first enters it and the tile keeps it through
/// drags, reverts and shuffles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    /// Rack-issued identity. [`Tile::UNISSUED`] until the tile enters a rack.
    #[serde(default)]
    pub id: u64,
    /// Letter printed on the tile.
    pub letter: String,
    /// Point value.
    pub value: u32,
    /// Playable onto the board and not yet confirmed by the server.
    #[serde(default)]
    pub is_candidate: bool,
    /// Rack slot of origin.
    #[serde(default)]
    pub slot_number: Option<usize>,
}

impl Tile {
    /// Identity of a tile no rack has seen yet.
    pub const UNISSUED: u64 = 0;

    /// Unplaced tile with no slot of origin and no identity.
    pub fn from_face(face: TileFace) -> Self {
        Self {
            id: Self::UNISSUED,
            letter: face.letter,
            value: face.value,
            is_candidate: false,
            slot_number: None,
        }
    }

    /// Rack tile with identity `id`, stamped with its slot and marked as a
    /// candidate.
    pub fn in_slot(face: TileFace, slot: usize, id: u64) -> Self {
        Self {
            id,
            letter: face.letter,
            value: face.value,
            is_candidate: true,
            slot_number: Some(slot),
        }
    }

    /// Same physical tile as `other`. Tiles without an identity never match.
    pub fn is_same_tile(&self, other: &Tile) -> bool {
        self.id != Self::UNISSUED && self.id == other.id
    }

    /// The wire face (`{letter, value}`).
    pub fn face(&self) -> TileFace {
        TileFace { letter: self.letter.clone(), value: self.value }
    }
}

impl From<TileFace> for Tile {
    fn from(face: TileFace) -> Self {
        Self::from_face(face)
    }
}
