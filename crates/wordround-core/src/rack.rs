//! Fixed seven-slot rack.
//!
//! # Invariants
//!
//! - The rack always has exactly [`RACK_SIZE`] slots (enforced by the array
//!   type; nothing can grow or shrink it).
//! - An empty slot holds no tile.
//! - Every operation that moves a tile into a slot stamps the tile's
//!   `slot_number` with that slot.
//! - Every tile in the rack has an identity, unique among the tiles this rack
//!   has issued. Identities are never reused.

use serde::{Deserialize, Serialize};
use wordround_proto::TileFace;

use crate::{ModelError, Tile, env::Environment};

/// Number of rack slots.
pub const RACK_SIZE: usize = 7;

/// One rack slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RackSlot {
    /// Tile in the slot, if any.
    pub tile: Option<Tile>,
    /// Marked for exchange while in exchange mode.
    pub selected_for_exchange: bool,
}

impl RackSlot {
    /// Slot holds no tile.
    pub fn is_empty(&self) -> bool {
        self.tile.is_none()
    }
}

/// The local player's rack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rack {
    slots: [RackSlot; RACK_SIZE],
    #[serde(default)]
    last_id: u64,
}

impl Rack {
    /// Empty rack.
    pub fn new() -> Self {
        Self::default()
    }

    /// All slots, in order.
    pub fn slots(&self) -> &[RackSlot; RACK_SIZE] {
        &self.slots
    }

    /// Slot at `index`. `None` if out of range.
    pub fn slot(&self, index: usize) -> Option<&RackSlot> {
        self.slots.get(index)
    }

    /// Tile at `index`. `None` if out of range or empty.
    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.slots.get(index).and_then(|slot| slot.tile.as_ref())
    }

    /// Occupied slots as `(index, tile)`.
    pub fn tiles(&self) -> impl Iterator<Item = (usize, &Tile)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| slot.tile.as_ref().map(|t| (i, t)))
    }

    /// Number of occupied slots.
    pub fn tile_count(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_empty()).count()
    }

    /// Index of the first empty slot.
    pub fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(RackSlot::is_empty)
    }

    /// Put `tile` in the first empty slot, stamping its slot number.
    ///
    /// Returns the slot used, or `None` (dropping the tile) if the rack is full.
    pub fn place_in_first_empty(&mut self, tile: Tile) -> Option<usize> {
        let index = self.first_empty()?;
        self.put(index, tile);
        Some(index)
    }

    /// Put `tile` in slot `index`, stamping its slot number. Replaces any
    /// occupant. Out-of-range indices are ignored.
    ///
    /// A tile without an identity is issued one; any other keeps its own.
    pub fn put(&mut self, index: usize, mut tile: Tile) {
        if index >= RACK_SIZE {
            return;
        }
        if tile.id == Tile::UNISSUED {
            tile.id = self.issue_id();
        }
        tile.slot_number = Some(index);
        if let Some(slot) = self.slots.get_mut(index) {
            slot.tile = Some(tile);
        }
    }

    /// Remove and return the tile in slot `index`. The slot is deselected.
    pub fn take(&mut self, index: usize) -> Option<Tile> {
        let slot = self.slots.get_mut(index)?;
        slot.selected_for_exchange = false;
        slot.tile.take()
    }

    /// Overwrite every slot from `faces`, slot by slot.
    ///
    /// Slot `i` receives `faces[i]` marked as a candidate, stamped with `i`
    /// and issued a fresh identity, or becomes empty when `faces` is shorter.
    /// Exchange selections are cleared. Faces past [`RACK_SIZE`] are not
    /// accepted; the number rejected is returned.
    pub fn refill(&mut self, faces: &[TileFace]) -> usize {
        for index in 0..RACK_SIZE {
            let tile =
                faces.get(index).map(|face| Tile::in_slot(face.clone(), index, self.issue_id()));
            if let Some(slot) = self.slots.get_mut(index) {
                slot.tile = tile;
                slot.selected_for_exchange = false;
            }
        }
        faces.len().saturating_sub(RACK_SIZE)
    }

    fn issue_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    /// Faces of the tiles selected for exchange, in slot order.
    pub fn selected_for_exchange(&self) -> Vec<TileFace> {
        self.slots
            .iter()
            .filter(|slot| slot.selected_for_exchange)
            .filter_map(|slot| slot.tile.as_ref().map(Tile::face))
            .collect()
    }

    /// Deselect every slot.
    pub fn clear_selection(&mut self) {
        for slot in &mut self.slots {
            slot.selected_for_exchange = false;
        }
    }

    /// Flip the exchange selection of an occupied slot.
    ///
    /// Returns the new selection state. Empty slots cannot be selected and
    /// report `false`.
    pub fn toggle_selection(&mut self, index: usize) -> Result<bool, ModelError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(ModelError::SlotOutOfRange { slot: index, capacity: RACK_SIZE })?;

        if slot.is_empty() {
            slot.selected_for_exchange = false;
        } else {
            slot.selected_for_exchange = !slot.selected_for_exchange;
        }
        Ok(slot.selected_for_exchange)
    }

    /// Uniformly permute slot order (Fisher-Yates, last to first), then
    /// re-stamp every tile with its new slot.
    pub fn shuffle<E: Environment>(&mut self, env: &E) {
        for i in (1..RACK_SIZE).rev() {
            let j = env.random_index(i + 1);
            self.slots.swap(i, j);
        }

        for (index, slot) in self.slots.iter_mut().enumerate() {
            if let Some(tile) = slot.tile.as_mut() {
                tile.slot_number = Some(index);
            }
        }
    }
}
