//! Generic runtime for round orchestration.
//!
//! The Runtime drives the round event loop, coordinating between:
//! - [`Controller`]: round session state machine
//! - [`Dispatcher`]: inbound protocol routing
//! - [`Driver`]: platform-specific I/O
//!
//! Outbound commands queue in the controller's [`Outbox`] and are flushed to
//! the driver after every event, so commands leave in the order the
//! controller issued them.

use wordround_core::{PlayerId, env::Environment};

use crate::{BoardWidget, Controller, Dispatcher, Driver, Outbox};

/// Generic runtime that orchestrates Controller, Dispatcher, and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `B`: Board widget
/// - `E`: Environment for randomness
pub struct Runtime<D, B, E>
where
    D: Driver,
    B: BoardWidget,
    E: Environment,
{
    driver: D,
    controller: Controller<B, Outbox, E>,
    dispatcher: Dispatcher,
}

impl<D, B, E> Runtime<D, B, E>
where
    D: Driver,
    B: BoardWidget,
    E: Environment,
{
    /// Create a runtime for `player_number`.
    pub fn new(driver: D, board: B, env: E, player_number: PlayerId) -> Self {
        Self::with_controller(driver, Controller::new(player_number, board, Outbox::new(), env))
    }

    /// Create a runtime around an existing controller (e.g. one seeded from a
    /// snapshot).
    pub fn with_controller(driver: D, controller: Controller<B, Outbox, E>) -> Self {
        Self { driver, controller, dispatcher: Dispatcher::new() }
    }

    /// Run the main event loop until the driver is closed.
    ///
    /// Each cycle:
    /// 1. Polls for a local intent and hands it to the controller
    /// 2. Receives an inbound message and dispatches it
    /// 3. Sends queued commands, renders if requested, and forwards notices
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(&mut self) -> Result<(), D::Error> {
        let revision =
            self.controller.take_render_request().unwrap_or_else(|| self.controller.revision());
        self.driver.render(self.controller.model(), revision)?;

        while !self.driver.is_closed() {
            self.process_cycle().await?;
        }

        self.flush().await?;
        self.driver.stop();
        Ok(())
    }

    /// Process one cycle of the event loop.
    async fn process_cycle(&mut self) -> Result<(), D::Error> {
        if let Some(intent) = self.driver.poll_intent().await? {
            if let Err(err) = self.controller.handle_intent(intent) {
                tracing::warn!(error = %err, "intent rejected");
            }
            self.flush().await?;
        }

        if let Some(raw) = self.driver.recv_message().await {
            let outcome = self.dispatcher.dispatch_text(&mut self.controller, &raw);
            tracing::trace!(?outcome, "message dispatched");
            self.flush().await?;
        }

        Ok(())
    }

    /// Send pending commands, render a pending update and forward notices.
    async fn flush(&mut self) -> Result<(), D::Error> {
        for command in self.controller.transport_mut().take() {
            self.driver.send_command(command).await?;
        }

        if let Some(revision) = self.controller.take_render_request() {
            self.driver.render(self.controller.model(), revision)?;
        }

        for notice in self.controller.take_notices() {
            self.driver.notify(notice);
        }

        Ok(())
    }

    /// Get a reference to the Controller
    pub fn controller(&self) -> &Controller<B, Outbox, E> {
        &self.controller
    }

    /// Get a mutable reference to the Controller
    pub fn controller_mut(&mut self) -> &mut Controller<B, Outbox, E> {
        &mut self.controller
    }

    /// Get a reference to the Dispatcher
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Get a reference to the Driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Get a mutable reference to the Driver
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}
