//! Application layer for a wordround client
//!
//! The round session state machine and the protocol dispatcher that feeds it,
//! plus a generic runtime so the same orchestration code runs against a real
//! connection and in deterministic simulation.
//!
//! # Components
//!
//! - [`Controller`]: single writer of the [`SessionModel`]; turns local intents
//!   into outbound commands and applies server events
//! - [`Dispatcher`]: decodes inbound envelopes and routes them to the controller
//! - [`BoardWidget`]: seam to the drag-and-drop board
//! - [`Transport`]: seam to the outbound connection ([`Outbox`] queues in memory)
//! - [`ModelUpdate`]: render bracket around model mutations
//! - [`Driver`]: trait for platform-specific I/O
//! - [`Runtime`]: generic orchestration loop using a driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod board;
mod controller;
mod dispatcher;
mod driver;
mod intent;
mod notice;
mod render;
mod runtime;
mod transport;

pub use board::{BoardPlacement, BoardWidget};
pub use controller::{Controller, RevertOutcome};
pub use dispatcher::{Dispatch, DispatchStats, Dispatcher};
pub use driver::Driver;
pub use intent::Intent;
pub use notice::{GameError, Notice};
pub use render::{ModelUpdate, RenderTracker};
pub use runtime::Runtime;
pub use transport::{Outbox, Transport};
pub use wordround_core::{SessionModel, env::Environment};
