//! Deterministic simulation harness for wordround round sessions.
//!
//! In-memory implementations of the seams the round controller depends on,
//! so the same [`wordround_app::Runtime`] and [`wordround_app::Controller`]
//! code runs under test with reproducible results:
//!
//! - [`SimEnv`]: seeded randomness
//! - [`MemoryBoard`]: board widget holding candidates in memory
//! - [`SimDriver`]: scripted intents and inbound messages, captured output
//!
//! # Invariant Testing
//!
//! The `invariants` module checks properties of the session model that must
//! hold after every update. Use [`InvariantRegistry::standard()`] for the
//! full set.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod memory_board;
pub mod sim_driver;
pub mod sim_env;

pub use invariants::{
    Invariant, InvariantKind, InvariantRegistry, InvariantResult, ModelSnapshot,
    PotentialScoreTurnGate, SelectionOccupied, SlotStampsMatchPosition, TileInOnePlace,
    TurnInteractivity, Violation,
};
pub use memory_board::MemoryBoard;
pub use sim_driver::{SimDriver, SimDriverError};
pub use sim_env::SimEnv;
