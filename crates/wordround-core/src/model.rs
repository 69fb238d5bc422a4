//! Session view model.

use serde::Serialize;
use wordround_proto::{ChatLine, PlayerId, PlayerScore};

use crate::{MoveRecord, Rack};

/// The local view of one round.
///
/// One instance per round. Fields are public for reading; the controller
/// owning the model is its only writer.
///
/// # Invariants
///
/// - `board_interactive == is_local_turn()` after every completed update.
/// - No turn is local until a mover has been announced.
/// - `potential_score == 0` whenever it is not the local player's turn.
/// - `move_history` is append-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionModel {
    /// The local player.
    pub player_number: PlayerId,
    /// The player whose turn it is. Meaningful once `turn_known` is set.
    pub player_to_move: PlayerId,
    /// A mover has been announced (turn change or snapshot).
    pub turn_known: bool,
    /// Board widget accepts placements (mirror of its view-only flag).
    pub board_interactive: bool,
    /// Scoreboard, index-aligned with player numbers.
    pub players: Vec<PlayerScore>,
    /// Local rack.
    pub rack: Rack,
    /// Rack clicks select tiles for exchange instead of playing them.
    pub exchange_mode: bool,
    /// Server-computed score of the current candidate placement.
    pub potential_score: i64,
    /// Moves so far, oldest first.
    pub move_history: Vec<MoveRecord>,
    /// Tiles left in the bag.
    pub tiles_remaining: u32,
    /// Penalty display state, passed through from the server as-is.
    pub penalties: serde_json::Value,
    /// Chat, oldest first.
    pub chat_messages: Vec<ChatLine>,
}

impl SessionModel {
    /// Fresh model for the given local player.
    pub fn new(player_number: PlayerId) -> Self {
        Self { player_number, ..Self::default() }
    }

    /// It is the local player's turn.
    pub fn is_local_turn(&self) -> bool {
        self.turn_known && self.player_to_move == self.player_number
    }
}
