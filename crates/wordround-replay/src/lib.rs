//! Transcript replay for wordround round sessions.
//!
//! Replays a recorded round (local intents, board drags and server messages)
//! through the same [`Runtime`] the client uses and reports every outbound
//! command, render and notice as JSON lines. Useful for reproducing a bug
//! report offline or for checking a protocol change against recorded rounds.
//!
//! # Components
//!
//! - [`Transcript`]: parsed JSON-lines recording
//! - [`ReplayDriver`]: [`wordround_app::Driver`] over a transcript
//! - [`replay`]: runs a transcript to completion

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod driver;
mod error;
mod transcript;

use std::io::Write;

pub use driver::ReplayDriver;
pub use error::ReplayError;
pub use transcript::{Step, Transcript};
use wordround_app::{Controller, DispatchStats, Outbox, Runtime, SessionModel};
use wordround_core::{
    PlayerId, RoundSnapshot,
    env::{Environment, SystemEnv},
};
use wordround_harness::{MemoryBoard, SimEnv};

/// Replay settings.
#[derive(Debug, Clone, Default)]
pub struct ReplayConfig {
    /// Local player number.
    pub player: PlayerId,
    /// Seed for rack shuffles. `None` uses system randomness.
    pub seed: Option<u64>,
    /// Round state to start from.
    pub snapshot: Option<RoundSnapshot>,
}

/// Outcome of a replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Commands the client sent.
    pub sent: usize,
    /// Renders performed.
    pub renders: usize,
    /// Inbound dispatch counts.
    pub stats: DispatchStats,
    /// Model at the end of the transcript.
    pub model: SessionModel,
}

/// Parse a round snapshot from JSON text.
pub fn parse_snapshot(text: &str) -> Result<RoundSnapshot, ReplayError> {
    serde_json::from_str(text).map_err(|e| ReplayError::Snapshot(e.to_string()))
}

/// Replay `transcript`, writing the report to `out`.
///
/// # Errors
///
/// Returns an error if the report cannot be written.
pub async fn replay(
    config: ReplayConfig,
    transcript: Transcript,
    out: Box<dyn Write + Send>,
) -> Result<ReplaySummary, ReplayError> {
    match config.seed {
        Some(seed) => run(config, transcript, out, SimEnv::with_seed(seed)).await,
        None => run(config, transcript, out, SystemEnv::new()).await,
    }
}

async fn run<E: Environment>(
    config: ReplayConfig,
    transcript: Transcript,
    out: Box<dyn Write + Send>,
    env: E,
) -> Result<ReplaySummary, ReplayError> {
    let board = MemoryBoard::new();
    let mut controller = Controller::new(config.player, board.clone(), Outbox::new(), env);
    if let Some(snapshot) = config.snapshot {
        controller.apply_snapshot(snapshot);
    }

    tracing::info!(steps = transcript.len(), player = config.player, "replaying transcript");

    let driver = ReplayDriver::new(transcript, board, out);
    let mut runtime = Runtime::with_controller(driver, controller);
    runtime.run().await?;

    let model = runtime.controller().model().clone();
    let stats = runtime.dispatcher().stats();
    let driver = runtime.driver_mut();
    driver.finish(&model, stats)?;

    Ok(ReplaySummary { sent: driver.sent(), renders: driver.renders(), stats, model })
}
