//! Observable state snapshots for invariant checking.

use wordround_app::{Controller, Transport};
use wordround_core::{SessionModel, Tile, env::Environment};

use crate::MemoryBoard;

/// Snapshot of one session's observable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSnapshot {
    /// The session model.
    pub model: SessionModel,
    /// The board widget's view-only flag, when the board is observable.
    pub board_view_only: Option<bool>,
    /// Candidate tiles on the board. Empty when the board is not observable.
    pub board_candidates: Vec<Tile>,
}

impl ModelSnapshot {
    /// Every tile in play: rack tiles in slot order, then board candidates.
    pub fn tiles_in_play(&self) -> impl Iterator<Item = &Tile> {
        self.model.rack.tiles().map(|(_, tile)| tile).chain(&self.board_candidates)
    }

    /// Snapshot a model on its own.
    pub fn from_model(model: SessionModel) -> Self {
        Self { model, board_view_only: None, board_candidates: Vec::new() }
    }

    /// Snapshot a controller driving a [`MemoryBoard`].
    pub fn of<T, E>(controller: &Controller<MemoryBoard, T, E>) -> Self
    where
        T: Transport,
        E: Environment,
    {
        Self {
            model: controller.model().clone(),
            board_view_only: Some(controller.board().is_view_only()),
            board_candidates: controller
                .board()
                .candidates()
                .into_iter()
                .map(|placement| placement.tile)
                .collect(),
        }
    }
}
