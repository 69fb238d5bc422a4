//! Socket protocol dispatcher.
//!
//! Decodes inbound command envelopes and routes them to the [`Controller`].
//! The handled set is closed ([`InboundCommand`]), so adding a command is a
//! compile error here until it is routed. Anything outside the set is logged
//! and ignored: older clients must tolerate commands from newer servers.

use wordround_core::env::Environment;
use wordround_proto::{Decoded, InboundCommand, InboundEnvelope, ProtocolError};

use crate::{BoardWidget, Controller, Transport};

/// What happened to one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// A handled command was routed to the controller.
    Applied(&'static str),
    /// The command name is outside the handled set.
    Ignored {
        /// The ignored name.
        command: String,
    },
    /// The message could not be decoded. The model is untouched.
    Malformed {
        /// Command name, if the envelope got that far.
        command: Option<String>,
        /// Decoder error.
        reason: String,
    },
}

/// Running counts of dispatch outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Messages routed to the controller.
    pub applied: u64,
    /// Unrecognized commands.
    pub ignored: u64,
    /// Undecodable messages.
    pub malformed: u64,
}

/// Routes inbound messages to a controller.
///
/// Holds no game state: the controller is passed in per call.
#[derive(Debug, Default)]
pub struct Dispatcher {
    stats: DispatchStats,
}

impl Dispatcher {
    /// Create a dispatcher with zeroed stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode raw message text and dispatch it.
    ///
    /// Never fails: bad input is reported as [`Dispatch::Malformed`].
    pub fn dispatch_text<B, T, E>(
        &mut self,
        controller: &mut Controller<B, T, E>,
        raw: &str,
    ) -> Dispatch
    where
        B: BoardWidget,
        T: Transport,
        E: Environment,
    {
        match InboundEnvelope::parse(raw) {
            Ok(envelope) => self.dispatch(controller, envelope),
            Err(err) => self.malformed(None, &err),
        }
    }

    /// Narrow an envelope and dispatch it.
    pub fn dispatch<B, T, E>(
        &mut self,
        controller: &mut Controller<B, T, E>,
        envelope: InboundEnvelope,
    ) -> Dispatch
    where
        B: BoardWidget,
        T: Transport,
        E: Environment,
    {
        let command = envelope.command.clone();
        match InboundCommand::decode(envelope) {
            Ok(Decoded::Known(inbound)) => self.apply(controller, inbound),
            Ok(Decoded::Unrecognized { command }) => {
                tracing::info!(%command, "ignoring unrecognized command");
                self.stats.ignored += 1;
                Dispatch::Ignored { command }
            },
            Err(err) => self.malformed(Some(command), &err),
        }
    }

    /// Route a decoded command to the controller.
    pub fn apply<B, T, E>(
        &mut self,
        controller: &mut Controller<B, T, E>,
        inbound: InboundCommand,
    ) -> Dispatch
    where
        B: BoardWidget,
        T: Transport,
        E: Environment,
    {
        let name = inbound.name();
        tracing::debug!(command = name, "dispatching");

        match inbound {
            InboundCommand::PlayerBoardMove(board_move) => {
                controller.set_player_to_move(board_move.now_playing);
                controller.board_move_made(&board_move.placed);
                if let Some(players) = board_move.players {
                    controller.set_players(players);
                }
            },
            InboundCommand::PlayerPassMove(pass) => {
                controller.set_player_to_move(pass.now_playing);
            },
            InboundCommand::BoardMoveSuccess(success) => {
                controller.update_rack(success.rack.as_deref());
            },
        }

        self.stats.applied += 1;
        Dispatch::Applied(name)
    }

    /// Outcome counts so far.
    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    fn malformed(&mut self, command: Option<String>, err: &ProtocolError) -> Dispatch {
        tracing::warn!(command = command.as_deref(), error = %err, "dropping malformed message");
        self.stats.malformed += 1;
        Dispatch::Malformed { command, reason: err.to_string() }
    }
}
