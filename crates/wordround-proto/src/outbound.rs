//! Commands the client sends to the server.
//!
//! # Invariants
//!
//! Every variant serializes as `{"command": <camelCase name>, "payload": ...}`.
//! There is no message id or sequence number: a `boardMove` and the
//! `boardMoveSuccess` that answers it are matched only by arrival order.

use serde::{Deserialize, Serialize};

use crate::{PlacedTile, ProtocolError, Result, TileFace};

/// Payload of commands that carry no data. Serializes as `{}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyPayload {}

/// Outbound command envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "payload", rename_all = "camelCase")]
pub enum OutboundCommand {
    /// Submit the current candidate placement as a move.
    BoardMove(Vec<PlacedTile>),
    /// Pass the turn.
    PassMove(EmptyPayload),
    /// Swap the listed rack tiles for new ones from the bag.
    ExchangeMove(Vec<TileFace>),
    /// Chat message to the round.
    Say {
        /// Message text.
        message: String,
    },
    /// Ask the server to score the current candidate placement.
    PotentialScore(Vec<PlacedTile>),
}

impl OutboundCommand {
    /// Create a pass command.
    pub fn pass() -> Self {
        Self::PassMove(EmptyPayload {})
    }

    /// Create a chat command.
    pub fn say(message: impl Into<String>) -> Self {
        Self::Say { message: message.into() }
    }

    /// Command name as it appears on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Self::BoardMove(_) => "boardMove",
            Self::PassMove(_) => "passMove",
            Self::ExchangeMove(_) => "exchangeMove",
            Self::Say { .. } => "say",
            Self::PotentialScore(_) => "potentialScore",
        }
    }

    /// Serialize to envelope JSON.
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| ProtocolError::Encode { command: self.name(), reason: e.to_string() })
    }

    /// Serialize to an envelope JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self)
            .map_err(|e| ProtocolError::Encode { command: self.name(), reason: e.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[test]
    fn pass_payload_is_empty_object() {
        let json = OutboundCommand::pass().encode().unwrap();
        insta::assert_snapshot!(json, @r#"{"command":"passMove","payload":{}}"#);
    }

    #[test]
    fn board_move_envelope_shape() {
        let placed = PlacedTile::from_board(0, 6, TileFace::new("Q", 10)).unwrap();
        let command = OutboundCommand::BoardMove(vec![placed]);
        let json = command.encode().unwrap();
        insta::assert_snapshot!(
            json,
            @r#"{"command":"boardMove","payload":[{"pos":{"x":1,"y":7},"tile":{"letter":"Q","value":10}}]}"#
        );
    }

    #[test]
    fn say_payload_wraps_message() {
        let json = OutboundCommand::say("gg").encode().unwrap();
        insta::assert_snapshot!(json, @r#"{"command":"say","payload":{"message":"gg"}}"#);
    }

    #[test]
    fn exchange_payload_is_face_list() {
        let command =
            OutboundCommand::ExchangeMove(vec![TileFace::new("A", 1), TileFace::new("Z", 10)]);
        let value = command.to_value().unwrap();

        assert_eq!(value["command"], "exchangeMove");
        assert_eq!(value["payload"][1]["letter"], "Z");
        assert_eq!(value["payload"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn potential_score_uses_board_move_payload_shape() {
        let placed = vec![PlacedTile { pos: Position { x: 8, y: 8 }, tile: TileFace::new("E", 1) }];
        let query = OutboundCommand::PotentialScore(placed.clone()).to_value().unwrap();
        let submit = OutboundCommand::BoardMove(placed).to_value().unwrap();

        assert_eq!(query["payload"], submit["payload"]);
        assert_eq!(query["command"], "potentialScore");
    }

    #[test]
    fn names_match_serialized_tag() {
        let commands = [
            OutboundCommand::BoardMove(Vec::new()),
            OutboundCommand::pass(),
            OutboundCommand::ExchangeMove(Vec::new()),
            OutboundCommand::say(""),
            OutboundCommand::PotentialScore(Vec::new()),
        ];

        for command in commands {
            let value = command.to_value().unwrap();
            assert_eq!(value["command"], command.name());
        }
    }
}
