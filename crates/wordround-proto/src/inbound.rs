//! Commands the server sends to the client.
//!
//! Decoding happens in two steps. [`InboundEnvelope::parse`] accepts any
//! `{command, payload}` object. [`InboundCommand::decode`] then narrows the
//! envelope to the closed set of commands this client handles. Names outside
//! that set come back as [`Decoded::Unrecognized`]: older clients must
//! tolerate commands added by newer servers.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{PlacedTile, PlayerId, PlayerScore, ProtocolError, Result, TileFace};

/// Wire name of [`InboundCommand::PlayerBoardMove`].
pub const PLAYER_BOARD_MOVE: &str = "playerBoardMove";

/// Wire name of [`InboundCommand::PlayerPassMove`].
pub const PLAYER_PASS_MOVE: &str = "playerPassMove";

/// Wire name of [`InboundCommand::BoardMoveSuccess`].
pub const BOARD_MOVE_SUCCESS: &str = "boardMoveSuccess";

/// Loosely parsed inbound envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundEnvelope {
    /// Command name.
    pub command: String,
    /// Command-specific payload. `null` when the server omitted it.
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl InboundEnvelope {
    /// Create an envelope from parts.
    pub fn new(command: impl Into<String>, payload: serde_json::Value) -> Self {
        Self { command: command.into(), payload }
    }

    /// Parse raw message text.
    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| ProtocolError::InvalidJson { reason: e.to_string() })
    }
}

/// A player placed tiles on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerBoardMove {
    /// Tiles placed, in server coordinates.
    #[serde(default)]
    pub placed: Vec<PlacedTile>,
    /// Updated scoreboard. `None` if the server left it out.
    #[serde(default)]
    pub players: Option<Vec<PlayerScore>>,
    /// Player whose turn it is now.
    pub now_playing: PlayerId,
}

/// A player passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPassMove {
    /// Player whose turn it is now.
    pub now_playing: PlayerId,
}

/// The server accepted this client's board move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardMoveSuccess {
    /// Replacement rack. `None` if the server left it out.
    #[serde(default)]
    pub rack: Option<Vec<TileFace>>,
}

/// Inbound commands this client acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundCommand {
    /// A board move was made (by any player).
    PlayerBoardMove(PlayerBoardMove),
    /// A pass was made (by any player).
    PlayerPassMove(PlayerPassMove),
    /// The local player's board move was accepted.
    BoardMoveSuccess(BoardMoveSuccess),
}

/// Result of narrowing an envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// A command in the handled set.
    Known(InboundCommand),
    /// A command name outside the handled set.
    Unrecognized {
        /// The unrecognized name.
        command: String,
    },
}

impl InboundCommand {
    /// Narrow an envelope to a known command.
    ///
    /// Unknown names are `Ok(Decoded::Unrecognized)`. A known name with a
    /// payload of the wrong shape is [`ProtocolError::MalformedPayload`]. A
    /// missing payload is read as an empty object, so optional fields decode
    /// to their defaults.
    pub fn decode(envelope: InboundEnvelope) -> Result<Decoded> {
        let InboundEnvelope { command, payload } = envelope;

        let decoded = match command.as_str() {
            PLAYER_BOARD_MOVE => Self::PlayerBoardMove(payload_as(&command, payload)?),
            PLAYER_PASS_MOVE => Self::PlayerPassMove(payload_as(&command, payload)?),
            BOARD_MOVE_SUCCESS => Self::BoardMoveSuccess(payload_as(&command, payload)?),
            _ => return Ok(Decoded::Unrecognized { command }),
        };

        Ok(Decoded::Known(decoded))
    }

    /// Parse raw text and narrow it in one step.
    pub fn decode_text(raw: &str) -> Result<Decoded> {
        Self::decode(InboundEnvelope::parse(raw)?)
    }

    /// Command name as it appears on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PlayerBoardMove(_) => PLAYER_BOARD_MOVE,
            Self::PlayerPassMove(_) => PLAYER_PASS_MOVE,
            Self::BoardMoveSuccess(_) => BOARD_MOVE_SUCCESS,
        }
    }
}

fn payload_as<T: DeserializeOwned>(command: &str, payload: serde_json::Value) -> Result<T> {
    let payload = if payload.is_null() {
        serde_json::Value::Object(serde_json::Map::new())
    } else {
        payload
    };

    serde_json::from_value(payload).map_err(|e| ProtocolError::MalformedPayload {
        command: command.to_owned(),
        reason: e.to_string(),
    })
}
