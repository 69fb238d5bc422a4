//! Round session controller.
//!
//! This module defines the [`Controller`], the only writer of the
//! [`SessionModel`] for a round. It sits between three collaborators injected
//! at construction: the board widget, the outbound transport and the
//! environment (randomness).
//!
//! # Responsibilities
//!
//! - Turns local intents (submit, pass, exchange, chat, shuffle) into outbound
//!   commands.
//! - Keeps the rack consistent with what the board widget holds while tiles are
//!   dragged, dropped and reverted.
//! - Applies server events routed by the [`crate::Dispatcher`].
//! - Wraps every model mutation in a [`ModelUpdate`] bracket so a view never
//!   sees a half-applied change.
//!
//! The server is authoritative. Submitting a board move changes nothing
//! locally; the rack is only replaced when `boardMoveSuccess` arrives. Moves
//! carry no request id, so at most one board move should be in flight. Only
//! the UI enforces that, by gating the submit control on [`Controller::can_submit`].

use std::collections::VecDeque;

use wordround_core::{
    ChatLine, ModelError, MoveRecord, MoveSummary, PlayerId, PlayerScore, RACK_SIZE, Rack,
    RoundSnapshot, SessionModel, Tile, TileFace, env::Environment,
};
use wordround_proto::{OutboundCommand, PlacedTile};

use crate::{BoardWidget, GameError, Intent, ModelUpdate, Notice, RenderTracker, Transport};

/// Where a reverted tile ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevertOutcome {
    /// The tile never left its slot; nothing changed.
    AlreadyInPlace,
    /// The tile went back to its slot of origin.
    Restored {
        /// Slot of origin.
        slot: usize,
    },
    /// The slot of origin was taken, so the tile went to the first empty slot.
    Relocated {
        /// Slot used instead.
        slot: usize,
    },
    /// The rack had no empty slot; the tile was dropped.
    NoRoom,
}

/// Round session controller.
///
/// Generic over the board widget `B`, the transport `T` and the environment
/// `E` so tests and simulation drive the same code as production.
pub struct Controller<B, T, E> {
    model: SessionModel,
    board: B,
    transport: T,
    env: E,
    render: RenderTracker,
    notices: VecDeque<Notice>,
}

impl<B, T, E> Controller<B, T, E>
where
    B: BoardWidget,
    T: Transport,
    E: Environment,
{
    /// Create a controller for `player_number`.
    ///
    /// The board starts view-only until the first mover is announced with
    /// [`Controller::set_player_to_move`] or [`Controller::apply_snapshot`].
    pub fn new(player_number: PlayerId, mut board: B, transport: T, env: E) -> Self {
        let mut model = SessionModel::new(player_number);
        sync_turn(&mut model, &mut board);

        Self {
            model,
            board,
            transport,
            env,
            render: RenderTracker::new(),
            notices: VecDeque::new(),
        }
    }

    /// Route a local intent to the matching operation.
    pub fn handle_intent(&mut self, intent: Intent) -> Result<(), ModelError> {
        match intent {
            Intent::MakeBoardMove => self.make_board_move(),
            Intent::MakePassMove => self.make_pass_move(),
            Intent::ToggleExchangeMode => self.toggle_exchange_mode(),
            Intent::ToggleExchangeSelection { slot } => {
                self.toggle_exchange_selection(slot)?;
            },
            Intent::SendChat { message } => self.send_chat_message(message),
            Intent::ShuffleRack => self.shuffle_rack(),
            Intent::TileDropped { tile } => self.on_tile_dropped(&tile),
            Intent::RevertRequested { tile } => {
                let outcome = self.on_revert_requested(tile);
                tracing::debug!(?outcome, "tile reverted");
            },
        }
        Ok(())
    }

    /// Run `f` on the model inside a render bracket.
    pub fn with_model_update<R>(&mut self, f: impl FnOnce(&mut SessionModel) -> R) -> R {
        let mut update = ModelUpdate::begin(&mut self.model, &mut self.render);
        f(&mut *update)
    }

    /// Submit the board widget's candidate placement as a `boardMove`.
    ///
    /// Nothing changes locally: the rack is replaced when the server confirms.
    pub fn make_board_move(&mut self) {
        if !self.model.is_local_turn() {
            tracing::debug!(
                player_to_move = self.model.player_to_move,
                "board move submitted out of turn"
            );
        }

        let placed = self.placed_model();
        self.send(OutboundCommand::BoardMove(placed));
    }

    /// Recall candidate tiles to the rack, then send `passMove`.
    pub fn make_pass_move(&mut self) {
        self.recall_tiles_to_rack();
        self.send(OutboundCommand::pass());
    }

    /// Enter exchange mode, or leave it and exchange the selected tiles.
    ///
    /// Leaving with at least one selected tile sends a single `exchangeMove`
    /// with their faces; leaving with none sends nothing. Either way candidate
    /// tiles are recalled and the mode flips.
    pub fn toggle_exchange_mode(&mut self) {
        if self.model.exchange_mode {
            let selected = self.model.rack.selected_for_exchange();
            if selected.is_empty() {
                tracing::debug!("leaving exchange mode with nothing selected");
            } else {
                self.send(OutboundCommand::ExchangeMove(selected));
            }
        }

        let mut update = ModelUpdate::begin(&mut self.model, &mut self.render);
        recall_candidates(&mut self.board, &mut update.rack);
        if update.exchange_mode {
            update.rack.clear_selection();
        }
        update.exchange_mode = !update.exchange_mode;
    }

    /// Select or deselect a rack slot for exchange.
    ///
    /// Only honoured in exchange mode; returns the slot's new selection state.
    pub fn toggle_exchange_selection(&mut self, slot: usize) -> Result<bool, ModelError> {
        if slot >= RACK_SIZE {
            return Err(ModelError::SlotOutOfRange { slot, capacity: RACK_SIZE });
        }
        if !self.model.exchange_mode {
            tracing::debug!(slot, "exchange selection ignored outside exchange mode");
            return Ok(false);
        }

        let mut update = ModelUpdate::begin(&mut self.model, &mut self.render);
        update.rack.toggle_selection(slot)
    }

    /// Send a chat message. Chat is echoed back by the server, not locally.
    pub fn send_chat_message(&mut self, message: impl Into<String>) {
        self.send(OutboundCommand::say(message));
    }

    /// Set whose turn it is.
    ///
    /// This is the only place board interactivity follows the turn: the board
    /// accepts input iff the mover is the local player, and the potential
    /// score is reset otherwise.
    pub fn set_player_to_move(&mut self, mover: PlayerId) {
        let mut update = ModelUpdate::begin(&mut self.model, &mut self.render);
        apply_turn(&mut update, &mut self.board, mover);
    }

    /// Set the local player's number.
    pub fn set_player_number(&mut self, player_number: PlayerId) {
        let mut update = ModelUpdate::begin(&mut self.model, &mut self.render);
        update.player_number = player_number;
        sync_turn(&mut update, &mut self.board);
    }

    /// Replace the scoreboard.
    pub fn set_players(&mut self, players: Vec<PlayerScore>) {
        self.with_model_update(|model| model.players = players);
    }

    /// Replace the penalty display state.
    pub fn set_penalties(&mut self, penalties: serde_json::Value) {
        self.with_model_update(|model| model.penalties = penalties);
    }

    /// Set the number of tiles left in the bag.
    pub fn set_tiles_remaining(&mut self, tiles_remaining: u32) {
        self.with_model_update(|model| model.tiles_remaining = tiles_remaining);
    }

    /// Replace the chat log.
    pub fn set_chat_messages(&mut self, messages: Vec<ChatLine>) {
        self.with_model_update(|model| model.chat_messages = messages);
    }

    /// Append one chat line.
    pub fn add_chat_message(&mut self, sender: impl Into<String>, message: impl Into<String>) {
        let line = ChatLine { sender: sender.into(), message: message.into() };
        self.with_model_update(|model| model.chat_messages.push(line));
    }

    /// Apply a potential score reply.
    ///
    /// Ignored when it is not the local player's turn: a reply that arrives
    /// after the turn moved on must not resurrect a preview.
    pub fn set_potential_score(&mut self, score: i64) {
        if !self.model.is_local_turn() {
            tracing::debug!(score, "stale potential score ignored");
            return;
        }
        self.with_model_update(|model| model.potential_score = score);
    }

    /// Fill the rack from `tiles`, padding with empty slots.
    ///
    /// Every tile is marked as a candidate and stamped with its slot. An empty
    /// list is ignored: some server messages leave the rack out.
    pub fn set_rack_tiles(&mut self, tiles: &[TileFace]) {
        if tiles.is_empty() {
            tracing::debug!("empty rack ignored");
            return;
        }

        let mut update = ModelUpdate::begin(&mut self.model, &mut self.render);
        fill_rack(&mut update.rack, tiles);
    }

    /// Replace the rack after a confirmed move.
    ///
    /// Overwrites slot by slot, stamps each tile with its slot and clears every
    /// exchange selection. `None` is ignored.
    pub fn update_rack(&mut self, rack: Option<&[TileFace]>) {
        let Some(faces) = rack else {
            tracing::debug!("rack update without rack ignored");
            return;
        };

        let mut update = ModelUpdate::begin(&mut self.model, &mut self.render);
        fill_rack(&mut update.rack, faces);
    }

    /// Take every candidate tile off the board and put each in the first empty
    /// rack slot, in the order the board returns them.
    pub fn recall_tiles_to_rack(&mut self) {
        let mut update = ModelUpdate::begin(&mut self.model, &mut self.render);
        recall_candidates(&mut self.board, &mut update.rack);
    }

    /// Append moves to the history in the order given.
    pub fn set_move_history(&mut self, moves: impl IntoIterator<Item = MoveSummary>) {
        self.with_model_update(|model| {
            model.move_history.extend(moves.into_iter().map(MoveRecord::from));
        });
    }

    /// Append a board move to the history. `words_made` is kept as given.
    pub fn add_board_move_to_history(&mut self, words_made: serde_json::Value, overall_score: i64) {
        self.with_model_update(|model| {
            model.move_history.push(MoveRecord::Board { words_made, overall_score });
        });
    }

    /// Append a pass to the history.
    pub fn add_pass_move_to_history(&mut self) {
        self.with_model_update(|model| model.move_history.push(MoveRecord::Pass));
    }

    /// Append an exchange to the history.
    pub fn add_exchange_move_to_history(&mut self) {
        self.with_model_update(|model| model.move_history.push(MoveRecord::Exchange));
    }

    /// Shuffle rack slot order. Tiles keep their faces; only slots change.
    pub fn shuffle_rack(&mut self) {
        let mut update = ModelUpdate::begin(&mut self.model, &mut self.render);
        update.rack.shuffle(&self.env);
    }

    /// Ask the server to score the current candidate placement.
    ///
    /// The reply arrives later and is applied with
    /// [`Controller::set_potential_score`].
    pub fn ask_potential_score(&mut self) {
        let placed = self.placed_model();
        self.send(OutboundCommand::PotentialScore(placed));
    }

    /// The board widget accepted `tile` on a square.
    ///
    /// Empties the tile's slot of origin (if it still holds that very tile)
    /// and asks for a new potential score.
    pub fn on_tile_dropped(&mut self, tile: &Tile) {
        if let Some(slot) = tile.slot_number {
            let holds_tile =
                self.model.rack.tile(slot).is_some_and(|current| current.is_same_tile(tile));
            if holds_tile {
                let mut update = ModelUpdate::begin(&mut self.model, &mut self.render);
                update.rack.take(slot);
            }
        }

        self.ask_potential_score();
    }

    /// The board widget wants `tile` back on the rack.
    ///
    /// Restores it to its slot of origin when that slot is empty, falls back to
    /// the first empty slot when another tile took it, then asks for a new
    /// potential score. A tile whose slot still holds it never left the rack.
    pub fn on_revert_requested(&mut self, tile: Tile) -> RevertOutcome {
        let vacant_origin = match tile.slot_number.filter(|slot| *slot < RACK_SIZE) {
            Some(slot) => match self.model.rack.tile(slot) {
                Some(current) if current.is_same_tile(&tile) => {
                    return RevertOutcome::AlreadyInPlace;
                },
                Some(_) => None,
                None => Some(slot),
            },
            None => None,
        };

        let outcome = {
            let mut update = ModelUpdate::begin(&mut self.model, &mut self.render);
            if let Some(slot) = vacant_origin {
                update.rack.put(slot, tile);
                RevertOutcome::Restored { slot }
            } else if let Some(slot) = update.rack.place_in_first_empty(tile) {
                RevertOutcome::Relocated { slot }
            } else {
                tracing::warn!("rack full, reverted tile dropped");
                RevertOutcome::NoRoom
            }
        };

        self.ask_potential_score();
        outcome
    }

    /// Show a confirmed move on the board.
    pub fn board_move_made(&mut self, placed: &[PlacedTile]) {
        self.board.move_tiles(placed);
    }

    /// Queue a server-reported error for the user.
    pub fn show_error_message(&mut self, err: GameError) {
        tracing::warn!(error = %err.error, "server reported error");
        self.notices.push_back(err.into());
    }

    /// Seed the round from a snapshot, as one update.
    ///
    /// Absent fields leave the model untouched. History entries are appended.
    pub fn apply_snapshot(&mut self, snapshot: RoundSnapshot) {
        let RoundSnapshot {
            player_number,
            player_to_move,
            players,
            rack,
            move_history,
            tiles_remaining,
            penalties,
            chat_messages,
        } = snapshot;

        let mut update = ModelUpdate::begin(&mut self.model, &mut self.render);
        update.player_number = player_number;
        if let Some(players) = players {
            update.players = players;
        }
        if let Some(faces) = rack.filter(|faces| !faces.is_empty()) {
            fill_rack(&mut update.rack, &faces);
        }
        update.move_history.extend(move_history.into_iter().map(MoveRecord::from));
        if let Some(tiles_remaining) = tiles_remaining {
            update.tiles_remaining = tiles_remaining;
        }
        if let Some(penalties) = penalties {
            update.penalties = penalties;
        }
        if let Some(chat_messages) = chat_messages {
            update.chat_messages = chat_messages;
        }
        apply_turn(&mut update, &mut self.board, player_to_move);
    }

    /// The submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        self.model.is_local_turn()
    }

    /// Current model.
    pub fn model(&self) -> &SessionModel {
        &self.model
    }

    /// The board widget.
    pub fn board(&self) -> &B {
        &self.board
    }

    /// The board widget, mutably (for the widget's host).
    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    /// The transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The transport, mutably.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Number of completed model updates.
    pub fn revision(&self) -> u64 {
        self.render.revision()
    }

    /// Take the pending render request. See [`RenderTracker::take_request`].
    pub fn take_render_request(&mut self) -> Option<u64> {
        self.render.take_request()
    }

    /// Drain queued notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    fn placed_model(&self) -> Vec<PlacedTile> {
        self.board
            .candidate_tiles()
            .iter()
            .filter_map(|placement| {
                let wire = placement.to_wire();
                if wire.is_none() {
                    tracing::warn!(x = placement.x, y = placement.y, "candidate off the board");
                }
                wire
            })
            .collect()
    }

    fn send(&mut self, command: OutboundCommand) {
        tracing::debug!(command = command.name(), "sending command");
        self.transport.send(command);
    }
}

fn apply_turn<B: BoardWidget>(model: &mut SessionModel, board: &mut B, mover: PlayerId) {
    model.player_to_move = mover;
    model.turn_known = true;
    sync_turn(model, board);
}

fn sync_turn<B: BoardWidget>(model: &mut SessionModel, board: &mut B) {
    let local = model.is_local_turn();
    board.set_view_only(!local);
    model.board_interactive = local;
    if !local {
        model.potential_score = 0;
    }
}

fn fill_rack(rack: &mut Rack, faces: &[TileFace]) {
    let rejected = rack.refill(faces);
    if rejected > 0 {
        tracing::warn!(rejected, "rack overflow, extra tiles ignored");
    }
}

fn recall_candidates<B: BoardWidget>(board: &mut B, rack: &mut Rack) {
    for tile in board.remove_candidate_tiles() {
        if rack.place_in_first_empty(tile).is_none() {
            tracing::warn!("rack full, recalled tile dropped");
        }
    }
}
