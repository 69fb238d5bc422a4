//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the round runtime from where intents come
//! from, where messages travel and how the model is drawn. A browser host, a
//! terminal client, the transcript replayer and the simulation harness each
//! implement it; the generic [`crate::Runtime`] does the orchestration.

use std::future::Future;

use wordround_proto::OutboundCommand;

use crate::{Intent, Notice, SessionModel};

/// Abstracts I/O operations for the round runtime.
///
/// # Associated Types
///
/// - [`Error`](Driver::Error): Platform-specific error type
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Poll for the next local intent.
    ///
    /// Returns `None` if no intent is ready.
    fn poll_intent(&mut self) -> impl Future<Output = Result<Option<Intent>, Self::Error>> + Send;

    /// Receive the next raw inbound message.
    ///
    /// Returns `None` if no message is ready or the connection is closed.
    fn recv_message(&mut self) -> impl Future<Output = Option<String>> + Send;

    /// Send a command to the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection is closed or the send fails.
    fn send_command(
        &mut self,
        command: OutboundCommand,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Draw the model at `revision`.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, model: &SessionModel, revision: u64) -> Result<(), Self::Error>;

    /// Show a notice without blocking.
    fn notify(&mut self, notice: Notice);

    /// Both the intent source and the inbound connection are exhausted.
    fn is_closed(&self) -> bool;

    /// Stop the connection and clean up resources.
    fn stop(&mut self);
}
