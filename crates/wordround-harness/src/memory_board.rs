//! In-memory board widget.
//!
//! Stands in for the drag-and-drop board. Tests play the part of the user by
//! placing and lifting candidates directly; the controller sees the same
//! [`BoardWidget`] calls it would make against a real widget.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use wordround_app::{BoardPlacement, BoardWidget};
use wordround_core::Tile;
use wordround_proto::PlacedTile;

#[derive(Debug, Default)]
struct BoardState {
    candidates: Vec<BoardPlacement>,
    committed: Vec<PlacedTile>,
    view_only: bool,
}

/// Shared handle to an in-memory board.
///
/// Clones refer to the same board, so a test can keep a handle after moving
/// one into a controller.
#[derive(Debug, Clone, Default)]
pub struct MemoryBoard {
    state: Arc<Mutex<BoardState>>,
}

impl MemoryBoard {
    /// Empty, interactive board.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drop `tile` on square (x, y), 0-indexed.
    ///
    /// Refused (returning `false`) while the board is view-only or when the
    /// square already holds a candidate or a committed tile.
    pub fn place_candidate(&self, x: u32, y: u32, tile: Tile) -> bool {
        let mut state = self.lock();
        if state.view_only {
            tracing::debug!(x, y, "placement refused, board is view-only");
            return false;
        }

        let candidate_there = state.candidates.iter().any(|p| p.x == x && p.y == y);
        let committed_there =
            state.committed.iter().any(|p| p.pos.to_board() == Some((x, y)));
        if candidate_there || committed_there {
            return false;
        }

        state.candidates.push(BoardPlacement { x, y, tile });
        true
    }

    /// Lift the candidate on square (x, y) off the board.
    pub fn lift_candidate(&self, x: u32, y: u32) -> Option<Tile> {
        let mut state = self.lock();
        let index = state.candidates.iter().position(|p| p.x == x && p.y == y)?;
        Some(state.candidates.remove(index).tile)
    }

    /// Candidates currently on the board, in placement order.
    pub fn candidates(&self) -> Vec<BoardPlacement> {
        self.lock().candidates.clone()
    }

    /// Tiles confirmed by the server, in server coordinates.
    pub fn committed(&self) -> Vec<PlacedTile> {
        self.lock().committed.clone()
    }

    /// Board refuses placements.
    pub fn is_view_only(&self) -> bool {
        self.lock().view_only
    }
}

impl BoardWidget for MemoryBoard {
    fn move_tiles(&mut self, placed: &[PlacedTile]) {
        self.lock().committed.extend_from_slice(placed);
    }

    fn candidate_tiles(&self) -> Vec<BoardPlacement> {
        self.candidates()
    }

    fn remove_candidate_tiles(&mut self) -> Vec<Tile> {
        self.lock().candidates.drain(..).map(|p| p.tile).collect()
    }

    fn set_view_only(&mut self, view_only: bool) {
        self.lock().view_only = view_only;
    }
}
