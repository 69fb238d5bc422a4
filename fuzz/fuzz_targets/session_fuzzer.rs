//! Fuzz target for interleaved local intents and server messages
//!
//! Drives a controller with arbitrary sequences of user gestures and
//! well-formed server events.
//!
//! # Invariants
//!
//! - The standard invariant registry holds after every step
//! - The rack never holds more than seven tiles
//! - Intents are either applied or rejected, never panic

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use wordround_app::{Controller, Dispatcher, Intent, Outbox};
use wordround_core::RACK_SIZE;
use wordround_harness::{InvariantRegistry, MemoryBoard, ModelSnapshot, SimEnv};

#[derive(Debug, Clone, Arbitrary)]
enum Op {
    BoardMove,
    Pass,
    ToggleExchange,
    Select { slot: u8 },
    Chat { message: String },
    Shuffle,
    Drop { slot: u8, x: u8, y: u8 },
    Cancel { x: u8, y: u8 },
    OpponentPass { now_playing: u8 },
    OpponentMove { now_playing: u8, x: u8, y: u8 },
    Refill { letters: Vec<u8> },
    Score { score: i16 },
}

fn server(command: &str, payload: &str) -> String {
    format!(r#"{{"command":"{command}","payload":{payload}}}"#)
}

fn letter(byte: u8) -> char {
    char::from(b'A' + byte % 26)
}

fuzz_target!(|input: (u64, Vec<Op>)| {
    let (seed, ops) = input;
    let board = MemoryBoard::new();
    let mut controller = Controller::new(1, board.clone(), Outbox::new(), SimEnv::with_seed(seed));
    let mut dispatcher = Dispatcher::new();
    let invariants = InvariantRegistry::standard();

    for op in ops.into_iter().take(64) {
        match op {
            Op::BoardMove => {
                let _ = controller.handle_intent(Intent::MakeBoardMove);
            }
            Op::Pass => {
                let _ = controller.handle_intent(Intent::MakePassMove);
            }
            Op::ToggleExchange => {
                let _ = controller.handle_intent(Intent::ToggleExchangeMode);
            }
            Op::Select { slot } => {
                let _ = controller.handle_intent(Intent::ToggleExchangeSelection { slot: usize::from(slot % 9) });
            }
            Op::Chat { message } => {
                let _ = controller.handle_intent(Intent::SendChat { message });
            }
            Op::Shuffle => {
                let _ = controller.handle_intent(Intent::ShuffleRack);
            }
            Op::Drop { slot, x, y } => {
                let tile = controller.model().rack.tile(usize::from(slot) % RACK_SIZE).cloned();
                if let Some(tile) = tile {
                    if board.place_candidate(u32::from(x % 15), u32::from(y % 15), tile.clone()) {
                        let _ = controller.handle_intent(Intent::TileDropped { tile });
                    }
                }
            }
            Op::Cancel { x, y } => {
                if let Some(tile) = board.lift_candidate(u32::from(x % 15), u32::from(y % 15)) {
                    let _ = controller.handle_intent(Intent::RevertRequested { tile });
                }
            }
            Op::OpponentPass { now_playing } => {
                let payload = format!(r#"{{"nowPlaying":{}}}"#, now_playing % 4 + 1);
                dispatcher.dispatch_text(&mut controller, &server("playerPassMove", &payload));
            }
            Op::OpponentMove { now_playing, x, y } => {
                let payload = format!(
                    r#"{{"nowPlaying":{},"placed":[{{"pos":{{"x":{},"y":{}}},"tile":{{"letter":"Q","value":10}}}}]}}"#,
                    now_playing % 4 + 1,
                    x % 15 + 1,
                    y % 15 + 1,
                );
                dispatcher.dispatch_text(&mut controller, &server("playerBoardMove", &payload));
            }
            Op::Refill { letters } => {
                let tiles: Vec<String> = letters
                    .iter()
                    .take(10)
                    .map(|b| format!(r#"{{"letter":"{}","value":{}}}"#, letter(*b), b % 10))
                    .collect();
                let payload = format!(r#"{{"rack":[{}]}}"#, tiles.join(","));
                dispatcher.dispatch_text(&mut controller, &server("boardMoveSuccess", &payload));
            }
            Op::Score { score } => {
                controller.set_potential_score(i64::from(score));
            }
        }

        invariants.assert_all(&ModelSnapshot::of(&controller), "after fuzz op");
        assert!(controller.model().rack.tile_count() <= RACK_SIZE);
    }
});
