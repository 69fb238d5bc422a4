//! Round scenarios driven through the public controller API.
//!
//! Each test plays a short exchange between the local player, the board widget
//! and the server, then checks the model, the board and the outbound commands.

use wordround_app::{
    Controller, Dispatch, Dispatcher, GameError, Intent, Notice, Outbox, RevertOutcome,
};
use wordround_core::{MoveRecord, MoveSummary, PlayerScore, TileFace};
use wordround_harness::{InvariantRegistry, MemoryBoard, ModelSnapshot, SimEnv};
use wordround_proto::OutboundCommand;

type Session = Controller<MemoryBoard, Outbox, SimEnv>;

fn faces(letters: &str) -> Vec<TileFace> {
    letters.chars().map(|c| TileFace::new(c.to_string(), 1)).collect()
}

/// Player 1, on turn, holding `rack`.
fn session(rack: &str) -> (Session, MemoryBoard) {
    let board = MemoryBoard::new();
    let mut ctrl = Controller::new(1, board.clone(), Outbox::new(), SimEnv::with_seed(11));
    ctrl.set_player_to_move(1);
    ctrl.set_rack_tiles(&faces(rack));
    (ctrl, board)
}

/// Drag rack slot `slot` onto square (x, y) the way the widget reports it.
fn drag(ctrl: &mut Session, board: &MemoryBoard, slot: usize, x: u32, y: u32) {
    let tile = ctrl.model().rack.tile(slot).cloned().unwrap();
    assert!(board.place_candidate(x, y, tile.clone()));
    ctrl.handle_intent(Intent::TileDropped { tile }).unwrap();
}

fn assert_invariants(ctrl: &Session, context: &str) {
    InvariantRegistry::standard().assert_all(&ModelSnapshot::of(ctrl), context);
}

#[test]
fn opponent_board_move_hands_over_turn() {
    let (mut ctrl, board) = session("ABC");
    drag(&mut ctrl, &board, 0, 4, 4);
    ctrl.set_potential_score(6);
    let mut dispatcher = Dispatcher::new();

    let outcome = dispatcher.dispatch_text(
        &mut ctrl,
        r#"{"command":"playerBoardMove","payload":{
            "nowPlaying":2,
            "placed":[{"pos":{"x":8,"y":8},"tile":{"letter":"Z","value":10}}],
            "players":[{"name":"A","score":10},{"name":"B","score":0}]}}"#,
    );

    assert_eq!(outcome, Dispatch::Applied("playerBoardMove"));
    assert_eq!(ctrl.model().player_to_move, 2);
    assert!(board.is_view_only());
    assert!(!ctrl.model().board_interactive);
    assert_eq!(ctrl.model().potential_score, 0);
    assert_eq!(
        ctrl.model().players,
        vec![
            PlayerScore { name: "A".into(), score: 10 },
            PlayerScore { name: "B".into(), score: 0 },
        ]
    );
    assert_eq!(board.committed().len(), 1);
    assert_invariants(&ctrl, "after playerBoardMove");
}

#[test]
fn board_move_without_players_keeps_scoreboard() {
    let (mut ctrl, _board) = session("ABC");
    ctrl.set_players(vec![PlayerScore { name: "A".into(), score: 3 }]);

    Dispatcher::new().dispatch_text(
        &mut ctrl,
        r#"{"command":"playerBoardMove","payload":{"nowPlaying":1,"placed":[]}}"#,
    );

    assert_eq!(ctrl.model().players.len(), 1);
}

#[test]
fn pass_recalls_candidates_before_sending() {
    let (mut ctrl, board) = session("ABCD");
    drag(&mut ctrl, &board, 1, 7, 7);
    drag(&mut ctrl, &board, 3, 8, 7);
    ctrl.transport_mut().take();

    ctrl.handle_intent(Intent::MakePassMove).unwrap();

    assert!(board.candidates().is_empty());
    assert_eq!(ctrl.model().rack.tile_count(), 4);
    // Slots 1 and 3 were the first empty slots, in board order.
    assert_eq!(ctrl.model().rack.tile(1).map(|t| t.letter.as_str()), Some("B"));
    assert_eq!(ctrl.model().rack.tile(3).map(|t| t.letter.as_str()), Some("D"));
    assert_eq!(ctrl.transport_mut().take(), vec![OutboundCommand::pass()]);
    assert_invariants(&ctrl, "after pass");
}

#[test]
fn board_move_carries_shifted_coordinates_and_waits_for_server() {
    let (mut ctrl, board) = session("CAT");
    drag(&mut ctrl, &board, 0, 6, 7);
    drag(&mut ctrl, &board, 1, 7, 7);
    drag(&mut ctrl, &board, 2, 8, 7);
    ctrl.transport_mut().take();

    ctrl.handle_intent(Intent::MakeBoardMove).unwrap();

    let sent = ctrl.transport_mut().take();
    let [OutboundCommand::BoardMove(placed)] = sent.as_slice() else {
        panic!("expected one boardMove, got {sent:?}");
    };
    let positions: Vec<_> = placed.iter().map(|p| (p.pos.x, p.pos.y)).collect();
    assert_eq!(positions, vec![(7, 8), (8, 8), (9, 8)]);
    assert_eq!(ctrl.model().rack.tile_count(), 0);

    let outcome = Dispatcher::new().dispatch_text(
        &mut ctrl,
        r#"{"command":"boardMoveSuccess","payload":{"rack":[
            {"letter":"E","value":1},{"letter":"R","value":1}]}}"#,
    );

    assert_eq!(outcome, Dispatch::Applied("boardMoveSuccess"));
    assert_eq!(ctrl.model().rack.tile_count(), 2);
    assert!(ctrl.model().rack.tiles().all(|(_, t)| t.is_candidate));
    assert_invariants(&ctrl, "after boardMoveSuccess");
}

#[test]
fn board_move_success_without_rack_is_noop() {
    let (mut ctrl, _board) = session("ABC");
    let before = ctrl.model().clone();

    Dispatcher::new().dispatch_text(&mut ctrl, r#"{"command":"boardMoveSuccess"}"#);

    assert_eq!(ctrl.model(), &before);
}

#[test]
fn exchange_round_trip_sends_selected_faces() {
    let (mut ctrl, board) = session("QXZAB");
    drag(&mut ctrl, &board, 4, 0, 0);
    ctrl.transport_mut().take();

    ctrl.handle_intent(Intent::ToggleExchangeMode).unwrap();
    assert!(ctrl.model().exchange_mode);
    assert!(board.candidates().is_empty());
    assert_eq!(ctrl.transport().len(), 0);

    ctrl.handle_intent(Intent::ToggleExchangeSelection { slot: 0 }).unwrap();
    ctrl.handle_intent(Intent::ToggleExchangeSelection { slot: 2 }).unwrap();
    ctrl.handle_intent(Intent::ToggleExchangeMode).unwrap();

    assert_eq!(
        ctrl.transport_mut().take(),
        vec![OutboundCommand::ExchangeMove(vec![TileFace::new("Q", 1), TileFace::new("Z", 1)])]
    );
    assert!(!ctrl.model().exchange_mode);
    assert!(ctrl.model().rack.selected_for_exchange().is_empty());
    assert_invariants(&ctrl, "after exchange");
}

#[test]
fn exchange_with_nothing_selected_sends_nothing() {
    let (mut ctrl, board) = session("ABC");
    ctrl.handle_intent(Intent::ToggleExchangeMode).unwrap();
    drag(&mut ctrl, &board, 0, 2, 2);
    ctrl.transport_mut().take();

    ctrl.handle_intent(Intent::ToggleExchangeMode).unwrap();

    assert!(ctrl.transport().is_empty());
    assert!(!ctrl.model().exchange_mode);
    assert!(board.candidates().is_empty());
    assert_eq!(ctrl.model().rack.tile_count(), 3);
}

#[test]
fn turn_gate_follows_mover() {
    let (mut ctrl, board) = session("ABC");
    ctrl.set_potential_score(20);

    for (mover, local) in [(2, false), (1, true), (3, false), (1, true)] {
        ctrl.set_player_to_move(mover);
        assert_eq!(ctrl.model().board_interactive, local);
        assert_eq!(board.is_view_only(), !local);
        assert_eq!(ctrl.can_submit(), local);
        if !local {
            assert_eq!(ctrl.model().potential_score, 0);
        }
        assert_invariants(&ctrl, "after turn change");
    }
}

#[test]
fn view_only_board_refuses_drags_off_turn() {
    let (mut ctrl, board) = session("ABC");
    ctrl.set_player_to_move(2);

    let tile = ctrl.model().rack.tile(0).cloned().unwrap();
    assert!(!board.place_candidate(0, 0, tile));
}

#[test]
fn cancelled_drag_returns_tile() {
    let (mut ctrl, board) = session("ABC");
    drag(&mut ctrl, &board, 2, 5, 5);
    let tile = board.lift_candidate(5, 5).unwrap();

    ctrl.handle_intent(Intent::RevertRequested { tile }).unwrap();

    assert_eq!(ctrl.model().rack.tile(2).map(|t| t.letter.as_str()), Some("C"));
    assert!(matches!(
        ctrl.transport_mut().take().last(),
        Some(OutboundCommand::PotentialScore(placed)) if placed.is_empty()
    ));
}

#[test]
fn cancelled_drag_after_shuffle_keeps_duplicate_letters() {
    for seed in 0..32 {
        let board = MemoryBoard::new();
        let mut ctrl = Controller::new(1, board.clone(), Outbox::new(), SimEnv::with_seed(seed));
        ctrl.set_player_to_move(1);
        ctrl.set_rack_tiles(&faces("EEA"));
        drag(&mut ctrl, &board, 0, 7, 7);
        ctrl.handle_intent(Intent::ShuffleRack).unwrap();

        let tile = board.lift_candidate(7, 7).unwrap();
        let outcome = ctrl.on_revert_requested(tile.clone());

        assert_ne!(outcome, RevertOutcome::AlreadyInPlace, "seed {seed}");
        assert_eq!(ctrl.model().rack.tile_count(), 3, "seed {seed}");
        assert!(ctrl.model().rack.tiles().any(|(_, t)| t.is_same_tile(&tile)), "seed {seed}");
        assert_invariants(&ctrl, "after revert");
    }
}

#[test]
fn chat_is_sent_not_echoed() {
    let (mut ctrl, _board) = session("ABC");

    ctrl.handle_intent(Intent::SendChat { message: "gg".into() }).unwrap();

    assert_eq!(ctrl.transport_mut().take(), vec![OutboundCommand::say("gg")]);
    assert!(ctrl.model().chat_messages.is_empty());
}

#[test]
fn shuffle_keeps_tiles() {
    let (mut ctrl, _board) = session("SHUFLE");
    let mut before: Vec<_> = ctrl.model().rack.tiles().map(|(_, t)| t.letter.clone()).collect();

    ctrl.handle_intent(Intent::ShuffleRack).unwrap();

    let mut after: Vec<_> = ctrl.model().rack.tiles().map(|(_, t)| t.letter.clone()).collect();
    before.sort();
    after.sort();
    assert_eq!(before, after);
    assert_invariants(&ctrl, "after shuffle");
}

#[test]
fn history_catch_up_preserves_order() {
    let (mut ctrl, _board) = session("ABC");
    let moves: Vec<MoveSummary> = serde_json::from_str(
        r#"[{"type":"board","wordsMade":[{"word":"CAT","score":5}],"overallScore":5},
            {"type":"pass"},{"type":"exchange"},{"overallScore":2}]"#,
    )
    .unwrap();

    ctrl.set_move_history(moves);
    ctrl.add_exchange_move_to_history();

    let history = &ctrl.model().move_history;
    assert_eq!(history.len(), 5);
    assert!(matches!(history[0], MoveRecord::Board { overall_score: 5, .. }));
    assert_eq!(history[1], MoveRecord::Pass);
    assert_eq!(history[2], MoveRecord::Exchange);
    assert!(matches!(history[3], MoveRecord::Board { overall_score: 2, .. }));
    assert_eq!(history[4], MoveRecord::Exchange);
    insta::assert_json_snapshot!(history[..2].to_vec(), @r#"
    [
      {
        "type": "board",
        "wordsMade": [
          {
            "score": 5,
            "word": "CAT"
          }
        ],
        "overallScore": 5
      },
      {
        "type": "pass"
      }
    ]
    "#);
}

#[test]
fn server_errors_queue_notices() {
    let (mut ctrl, _board) = session("ABC");
    let err: GameError = serde_json::from_str(r#"{"error":"word not in dictionary"}"#).unwrap();

    ctrl.show_error_message(err);

    assert_eq!(
        ctrl.take_notices(),
        vec![Notice::Error { message: "word not in dictionary".into() }]
    );
}

#[test]
fn snapshot_seeds_round() {
    let board = MemoryBoard::new();
    let mut ctrl = Controller::new(0, board.clone(), Outbox::new(), SimEnv::with_seed(1));
    let snapshot = serde_json::from_str(
        r#"{"playerNumber":2,"playerToMove":1,
            "players":[{"name":"A","score":0},{"name":"B","score":0}],
            "rack":[{"letter":"O","value":1},{"letter":"K","value":5}],
            "moveHistory":[{"type":"pass"}],
            "tilesRemaining":86,
            "chatMessages":[{"sender":"A","message":"hi"}]}"#,
    )
    .unwrap();

    ctrl.apply_snapshot(snapshot);

    let model = ctrl.model();
    assert_eq!(model.player_number, 2);
    assert_eq!(model.rack.tile_count(), 2);
    assert_eq!(model.move_history, vec![MoveRecord::Pass]);
    assert_eq!(model.tiles_remaining, 86);
    assert_eq!(model.chat_messages.len(), 1);
    assert!(board.is_view_only());
    assert_eq!(ctrl.take_render_request(), Some(1));
    assert_invariants(&ctrl, "after snapshot");
}
