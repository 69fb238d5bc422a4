//! Transcript-backed driver.
//!
//! [`ReplayDriver`] feeds recorded steps to the runtime and writes one JSON
//! report record per line for everything the runtime emits.

use std::io::Write;

use serde::Serialize;
use wordround_app::{DispatchStats, Driver, Intent, Notice, SessionModel};
use wordround_harness::MemoryBoard;
use wordround_proto::OutboundCommand;

use crate::{ReplayError, Step, Transcript};

/// One line of the replay report.
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
enum Record<'a> {
    Sent { command: &'a OutboundCommand },
    Render { revision: u64 },
    Notice { notice: &'a Notice },
    Skipped { step: usize, reason: &'a str },
    Final { applied: u64, ignored: u64, malformed: u64, model: &'a SessionModel },
}

/// Driver replaying a [`Transcript`].
///
/// Local steps are yielded from [`Driver::poll_intent`] and server steps from
/// [`Driver::recv_message`], each only when it is next in the transcript, so
/// the runtime sees events in recorded order.
pub struct ReplayDriver {
    transcript: Transcript,
    board: MemoryBoard,
    out: Box<dyn Write + Send>,
    last_model: Option<SessionModel>,
    consumed: usize,
    sent: usize,
    renders: usize,
}

impl ReplayDriver {
    /// Create a driver over `transcript`.
    ///
    /// `board` must be a handle to the board the controller drives: drop and
    /// cancel steps act on it before the runtime hears about them.
    pub fn new(transcript: Transcript, board: MemoryBoard, out: Box<dyn Write + Send>) -> Self {
        Self { transcript, board, out, last_model: None, consumed: 0, sent: 0, renders: 0 }
    }

    /// Commands sent so far.
    pub fn sent(&self) -> usize {
        self.sent
    }

    /// Renders so far.
    pub fn renders(&self) -> usize {
        self.renders
    }

    /// Write the closing record and flush the report.
    pub fn finish(&mut self, model: &SessionModel, stats: DispatchStats) -> Result<(), ReplayError> {
        self.write(&Record::Final {
            applied: stats.applied,
            ignored: stats.ignored,
            malformed: stats.malformed,
            model,
        })?;
        self.out.flush()?;
        Ok(())
    }

    fn write(&mut self, record: &Record<'_>) -> Result<(), ReplayError> {
        serde_json::to_writer(&mut self.out, record)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn skip(&mut self, reason: &str) -> Result<Option<Intent>, ReplayError> {
        tracing::warn!(step = self.consumed, reason, "skipping transcript step");
        self.write(&Record::Skipped { step: self.consumed, reason })?;
        Ok(None)
    }

    fn local_step(&mut self, step: Step) -> Result<Option<Intent>, ReplayError> {
        match step {
            Step::Intent(intent) => Ok(Some(intent)),
            Step::Drop { slot, x, y } => {
                let tile = self.last_model.as_ref().and_then(|m| m.rack.tile(slot)).cloned();
                let Some(tile) = tile else {
                    return self.skip("no tile in rack slot");
                };
                if !self.board.place_candidate(x, y, tile.clone()) {
                    return self.skip("board refused placement");
                }
                Ok(Some(Intent::TileDropped { tile }))
            },
            Step::Cancel { x, y } => match self.board.lift_candidate(x, y) {
                Some(tile) => Ok(Some(Intent::RevertRequested { tile })),
                None => self.skip("no candidate on square"),
            },
            Step::Server(_) => Ok(None),
        }
    }
}

impl Driver for ReplayDriver {
    type Error = ReplayError;

    async fn poll_intent(&mut self) -> Result<Option<Intent>, Self::Error> {
        if !self.transcript.peek().is_some_and(Step::is_local) {
            return Ok(None);
        }
        let Some(step) = self.transcript.next_step() else {
            return Ok(None);
        };
        self.consumed += 1;
        self.local_step(step)
    }

    async fn recv_message(&mut self) -> Option<String> {
        if !matches!(self.transcript.peek(), Some(Step::Server(_))) {
            return None;
        }
        let Some(Step::Server(message)) = self.transcript.next_step() else {
            return None;
        };
        self.consumed += 1;

        Some(match message {
            serde_json::Value::String(raw) => raw,
            other => other.to_string(),
        })
    }

    async fn send_command(&mut self, command: OutboundCommand) -> Result<(), Self::Error> {
        self.sent += 1;
        self.write(&Record::Sent { command: &command })
    }

    fn render(&mut self, model: &SessionModel, revision: u64) -> Result<(), Self::Error> {
        self.renders += 1;
        self.last_model = Some(model.clone());
        self.write(&Record::Render { revision })
    }

    fn notify(&mut self, notice: Notice) {
        if let Err(err) = self.write(&Record::Notice { notice: &notice }) {
            tracing::warn!(error = %err, "failed to record notice");
        }
    }

    fn is_closed(&self) -> bool {
        self.transcript.is_empty()
    }

    fn stop(&mut self) {
        tracing::debug!(steps = self.consumed, "transcript exhausted");
    }
}
