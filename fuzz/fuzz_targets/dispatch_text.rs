//! Fuzz target for Dispatcher::dispatch_text
//!
//! Feeds arbitrary bytes to the inbound dispatcher as if they arrived on the
//! socket.
//!
//! # Invariants
//!
//! - NEVER panic on malformed text
//! - Every message is counted exactly once (applied, ignored or malformed)
//! - A message that is not applied leaves the model untouched

#![no_main]

use libfuzzer_sys::fuzz_target;
use wordround_app::{Controller, Dispatch, Dispatcher, Outbox};
use wordround_harness::{MemoryBoard, SimEnv};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mut controller = Controller::new(1, MemoryBoard::new(), Outbox::new(), SimEnv::with_seed(0));
    let mut dispatcher = Dispatcher::new();
    let before = controller.model().clone();

    let outcome = dispatcher.dispatch_text(&mut controller, text);

    let stats = dispatcher.stats();
    assert_eq!(stats.applied + stats.ignored + stats.malformed, 1);
    if !matches!(outcome, Dispatch::Applied(_)) {
        assert_eq!(controller.model(), &before);
    }
});
