//! Standard invariant checks.

use std::collections::HashSet;

use wordround_core::Tile;

use super::{Invariant, InvariantKind, InvariantResult, ModelSnapshot, Violation};

/// Board interactivity follows the turn.
///
/// `board_interactive` is true iff the local player is to move, and the
/// widget's view-only flag (when observable) is its negation.
pub struct TurnInteractivity;

impl Invariant for TurnInteractivity {
    fn kind(&self) -> InvariantKind {
        InvariantKind::TurnInteractivity
    }

    fn check(&self, state: &ModelSnapshot) -> InvariantResult {
        let model = &state.model;
        let local = model.is_local_turn();

        if model.board_interactive != local {
            return Err(Violation {
                invariant: self.kind(),
                message: format!(
                    "board_interactive={} but player_to_move={} player_number={}",
                    model.board_interactive, model.player_to_move, model.player_number
                ),
            });
        }

        if let Some(view_only) = state.board_view_only
            && view_only == model.board_interactive
        {
            return Err(Violation {
                invariant: self.kind(),
                message: format!(
                    "widget view_only={view_only} disagrees with board_interactive={}",
                    model.board_interactive
                ),
            });
        }

        Ok(())
    }
}

/// No score preview while another player is to move.
pub struct PotentialScoreTurnGate;

impl Invariant for PotentialScoreTurnGate {
    fn kind(&self) -> InvariantKind {
        InvariantKind::PotentialScoreTurnGate
    }

    fn check(&self, state: &ModelSnapshot) -> InvariantResult {
        let model = &state.model;
        if !model.is_local_turn() && model.potential_score != 0 {
            return Err(Violation {
                invariant: self.kind(),
                message: format!(
                    "potential_score={} while player {} is to move",
                    model.potential_score, model.player_to_move
                ),
            });
        }
        Ok(())
    }
}

/// Every rack tile is stamped with the slot it sits in.
pub struct SlotStampsMatchPosition;

impl Invariant for SlotStampsMatchPosition {
    fn kind(&self) -> InvariantKind {
        InvariantKind::SlotStampsMatchPosition
    }

    fn check(&self, state: &ModelSnapshot) -> InvariantResult {
        for (index, tile) in state.model.rack.tiles() {
            if tile.slot_number != Some(index) {
                return Err(Violation {
                    invariant: self.kind(),
                    message: format!(
                        "tile {:?} in slot {index} stamped {:?}",
                        tile.letter, tile.slot_number
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Only occupied slots can be selected for exchange.
pub struct SelectionOccupied;

impl Invariant for SelectionOccupied {
    fn kind(&self) -> InvariantKind {
        InvariantKind::SelectionOccupied
    }

    fn check(&self, state: &ModelSnapshot) -> InvariantResult {
        let slots = state.model.rack.slots();
        if let Some(index) = slots.iter().position(|s| s.selected_for_exchange && s.is_empty()) {
            return Err(Violation {
                invariant: self.kind(),
                message: format!("empty slot {index} selected for exchange"),
            });
        }
        Ok(())
    }
}

/// A tile is in one place at a time.
///
/// No rack-issued identity appears twice across the rack and the board's
/// candidates.
pub struct TileInOnePlace;

impl Invariant for TileInOnePlace {
    fn kind(&self) -> InvariantKind {
        InvariantKind::TileInOnePlace
    }

    fn check(&self, state: &ModelSnapshot) -> InvariantResult {
        let mut seen = HashSet::new();
        for tile in state.tiles_in_play().filter(|t| t.id != Tile::UNISSUED) {
            if !seen.insert(tile.id) {
                return Err(Violation {
                    invariant: self.kind(),
                    message: format!("tile {} ({:?}) is in play twice", tile.id, tile.letter),
                });
            }
        }
        Ok(())
    }
}
