//! Seam to the outbound connection.

use std::collections::VecDeque;

use wordround_proto::OutboundCommand;

/// Outbound half of the connection.
///
/// Sends are fire-and-forget: there is no reply correlation, timeout or
/// retry at this layer.
pub trait Transport {
    /// Queue `command` for delivery, preserving call order.
    fn send(&mut self, command: OutboundCommand);
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, command: OutboundCommand) {
        (**self).send(command);
    }
}

/// In-memory transport that accumulates commands until taken.
///
/// The [`crate::Runtime`] drains it into the driver after every event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outbox {
    queue: VecDeque<OutboundCommand>,
}

impl Outbox {
    /// Empty outbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take pending commands in send order.
    pub fn take(&mut self) -> Vec<OutboundCommand> {
        self.queue.drain(..).collect()
    }

    /// Pending commands, oldest first.
    pub fn pending(&self) -> impl Iterator<Item = &OutboundCommand> {
        self.queue.iter()
    }

    /// Number of pending commands.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// No pending commands.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Transport for Outbox {
    fn send(&mut self, command: OutboundCommand) {
        self.queue.push_back(command);
    }
}
