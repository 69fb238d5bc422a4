//! Move history entries.
//!
//! The words a board move formed are kept as the server sent them. Only the
//! move kind and the overall score are interpreted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of the move history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MoveRecord {
    /// Tiles were placed on the board.
    Board {
        /// Words formed by the placement, passed through as-is.
        #[serde(rename = "wordsMade", default)]
        words_made: Value,
        /// Total points for the move.
        #[serde(rename = "overallScore")]
        overall_score: i64,
    },
    /// The player passed.
    Pass,
    /// The player exchanged tiles.
    Exchange,
}

/// A move as the server summarizes it during history catch-up.
///
/// The `type` tag is free text on the wire: `"pass"` and `"exchange"` select
/// those kinds and anything else (including a missing tag) is a board move.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveSummary {
    /// Move kind tag.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Words formed (board moves only), passed through as-is.
    #[serde(default)]
    pub words_made: Value,
    /// Total points (board moves only).
    #[serde(default)]
    pub overall_score: i64,
}

impl MoveSummary {
    /// Summary of a pass.
    pub fn pass() -> Self {
        Self { kind: Some("pass".into()), ..Self::default() }
    }

    /// Summary of an exchange.
    pub fn exchange() -> Self {
        Self { kind: Some("exchange".into()), ..Self::default() }
    }

    /// Summary of a board move.
    pub fn board(words_made: Value, overall_score: i64) -> Self {
        Self { kind: Some("board".into()), words_made, overall_score }
    }
}

impl From<MoveSummary> for MoveRecord {
    fn from(summary: MoveSummary) -> Self {
        match summary.kind.as_deref() {
            Some("pass") => Self::Pass,
            Some("exchange") => Self::Exchange,
            _ => Self::Board {
                words_made: summary.words_made,
                overall_score: summary.overall_score,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_summary_is_a_board_move() {
        let summary: MoveSummary =
            serde_json::from_str(r#"{"wordsMade":[{"word":"QI","score":11}],"overallScore":11}"#)
                .unwrap();

        assert_eq!(
            MoveRecord::from(summary),
            MoveRecord::Board {
                words_made: serde_json::json!([{"word": "QI", "score": 11}]),
                overall_score: 11
            }
        );
    }

    #[test]
    fn unfamiliar_words_made_shape_still_decodes() {
        let summary: MoveSummary = serde_json::from_str(
            r#"{"type":"board","wordsMade":[["QI",11],{"word":"XI","bonus":"DW"}],"overallScore":20}"#,
        )
        .unwrap();

        assert_eq!(
            MoveRecord::from(summary),
            MoveRecord::Board {
                words_made: serde_json::json!([["QI", 11], {"word": "XI", "bonus": "DW"}]),
                overall_score: 20
            }
        );
    }

    #[test]
    fn pass_and_exchange_tags_select_kind() {
        assert_eq!(MoveRecord::from(MoveSummary::pass()), MoveRecord::Pass);
        assert_eq!(MoveRecord::from(MoveSummary::exchange()), MoveRecord::Exchange);
    }

    #[test]
    fn record_serializes_with_type_tag() {
        let value = serde_json::to_value(MoveRecord::Pass).unwrap();
        assert_eq!(value, serde_json::json!({"type": "pass"}));
    }
}
