//! Initial round state.

use serde::{Deserialize, Serialize};
use wordround_proto::{ChatLine, PlayerId, PlayerScore, TileFace};

use crate::MoveSummary;

/// Round state delivered when a round is opened or rejoined.
///
/// Every field except the player numbers may be absent; absent fields leave
/// the corresponding model state untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSnapshot {
    /// The local player.
    pub player_number: PlayerId,
    /// The player whose turn it is.
    pub player_to_move: PlayerId,
    /// Scoreboard.
    #[serde(default)]
    pub players: Option<Vec<PlayerScore>>,
    /// Local rack contents.
    #[serde(default)]
    pub rack: Option<Vec<TileFace>>,
    /// Moves made so far, oldest first.
    #[serde(default)]
    pub move_history: Vec<MoveSummary>,
    /// Tiles left in the bag.
    #[serde(default)]
    pub tiles_remaining: Option<u32>,
    /// Penalty display state.
    #[serde(default)]
    pub penalties: Option<serde_json::Value>,
    /// Chat so far.
    #[serde(default)]
    pub chat_messages: Option<Vec<ChatLine>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_snapshot_decodes() {
        let snapshot: RoundSnapshot =
            serde_json::from_str(r#"{"playerNumber":1,"playerToMove":2}"#).unwrap();

        assert_eq!(snapshot.player_number, 1);
        assert_eq!(snapshot.player_to_move, 2);
        assert!(snapshot.rack.is_none());
        assert!(snapshot.move_history.is_empty());
    }
}
