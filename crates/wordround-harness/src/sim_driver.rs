//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` feeds the [`wordround_app::Runtime`] a scripted queue of local
//! intents and inbound messages and records everything the runtime emits, so
//! the production orchestration loop runs unchanged under test.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use wordround_app::{Driver, Intent, Notice, SessionModel};
use wordround_proto::{InboundEnvelope, OutboundCommand};

use crate::invariants::{InvariantRegistry, ModelSnapshot, Violation};

/// Error type for simulation driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimDriverError(pub String);

impl std::fmt::Display for SimDriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SimDriverError: {}", self.0)
    }
}

impl std::error::Error for SimDriverError {}

/// Shared state for injection and capture.
///
/// This allows injection from outside async contexts.
#[derive(Default)]
struct SharedState {
    pending_intents: VecDeque<Intent>,
    incoming: VecDeque<String>,
    sent: Vec<OutboundCommand>,
    renders: Vec<u64>,
    last_model: Option<SessionModel>,
    notices: Vec<Notice>,
    violations: Vec<Violation>,
    disconnected: bool,
    stopped: bool,
}

/// Simulation driver for deterministic testing.
///
/// Clones share state: keep one handle in the test and move another into the
/// runtime.
#[derive(Clone, Default)]
pub struct SimDriver {
    state: Arc<Mutex<SharedState>>,
    invariants: Option<Arc<InvariantRegistry>>,
}

impl SimDriver {
    /// Create a new simulation driver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check invariants against the model on every render.
    ///
    /// Violations are recorded, not raised; read them with
    /// [`SimDriver::violations`].
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(Arc::new(registry));
        self
    }

    fn lock(&self) -> MutexGuard<'_, SharedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a local intent.
    pub fn inject_intent(&self, intent: Intent) {
        self.lock().pending_intents.push_back(intent);
    }

    /// Queue raw inbound text from the server.
    pub fn inject_message(&self, raw: impl Into<String>) {
        self.lock().incoming.push_back(raw.into());
    }

    /// Queue an inbound envelope from the server.
    pub fn inject_envelope(&self, envelope: &InboundEnvelope) {
        match serde_json::to_string(envelope) {
            Ok(raw) => self.inject_message(raw),
            Err(err) => tracing::warn!(error = %err, "failed to encode envelope"),
        }
    }

    /// Drop the connection: pending messages are discarded and sends fail.
    pub fn disconnect(&self) {
        let mut state = self.lock();
        state.disconnected = true;
        state.incoming.clear();
    }

    /// Take all captured outbound commands.
    pub fn take_sent(&self) -> Vec<OutboundCommand> {
        std::mem::take(&mut self.lock().sent)
    }

    /// Revisions rendered so far, in order.
    pub fn renders(&self) -> Vec<u64> {
        self.lock().renders.clone()
    }

    /// The most recently rendered model.
    pub fn last_model(&self) -> Option<SessionModel> {
        self.lock().last_model.clone()
    }

    /// Take all captured notices.
    pub fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.lock().notices)
    }

    /// Invariant violations seen at render time.
    pub fn violations(&self) -> Vec<Violation> {
        self.lock().violations.clone()
    }

    /// Check if there are pending intents or messages to process.
    pub fn has_pending(&self) -> bool {
        let state = self.lock();
        !state.pending_intents.is_empty() || !state.incoming.is_empty()
    }

    /// The runtime stopped the driver.
    pub fn is_stopped(&self) -> bool {
        self.lock().stopped
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn poll_intent(&mut self) -> Result<Option<Intent>, Self::Error> {
        Ok(self.lock().pending_intents.pop_front())
    }

    async fn recv_message(&mut self) -> Option<String> {
        self.lock().incoming.pop_front()
    }

    async fn send_command(&mut self, command: OutboundCommand) -> Result<(), Self::Error> {
        let mut state = self.lock();
        if state.disconnected {
            return Err(SimDriverError(format!("disconnected, cannot send {}", command.name())));
        }
        state.sent.push(command);
        Ok(())
    }

    fn render(&mut self, model: &SessionModel, revision: u64) -> Result<(), Self::Error> {
        let violations = self
            .invariants
            .as_ref()
            .and_then(|registry| registry.check_all(&ModelSnapshot::from_model(model.clone())).err());

        let mut state = self.lock();
        state.renders.push(revision);
        state.last_model = Some(model.clone());
        if let Some(violations) = violations {
            tracing::warn!(revision, count = violations.len(), "invariant violations");
            state.violations.extend(violations);
        }
        Ok(())
    }

    fn notify(&mut self, notice: Notice) {
        self.lock().notices.push(notice);
    }

    fn is_closed(&self) -> bool {
        let state = self.lock();
        state.pending_intents.is_empty() && (state.incoming.is_empty() || state.disconnected)
    }

    fn stop(&mut self) {
        self.lock().stopped = true;
    }
}
