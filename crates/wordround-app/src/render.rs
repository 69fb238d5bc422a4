//! Render bracket around model mutations.
//!
//! Every mutation a view must observe atomically runs inside a
//! [`ModelUpdate`]. The guard opens a bracket on creation and closes it on
//! drop, so an early return cannot leave a bracket open. Brackets nest; only
//! closing the outermost one counts as a finished update, bumps the model
//! revision and leaves a render request for whoever draws the model.

use std::ops::{Deref, DerefMut};

use wordround_core::SessionModel;

/// Tracks open brackets and pending render requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderTracker {
    depth: u32,
    revision: u64,
    pending: Option<u64>,
}

impl RenderTracker {
    /// Tracker with no open brackets at revision 0.
    pub fn new() -> Self {
        Self::default()
    }

    fn begin(&mut self) {
        self.depth += 1;
    }

    fn end(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 {
            self.revision += 1;
            self.pending = Some(self.revision);
            tracing::trace!(revision = self.revision, "model update complete");
        }
    }

    /// A bracket is open.
    pub fn in_update(&self) -> bool {
        self.depth > 0
    }

    /// Number of completed updates.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Take the pending render request, if any.
    ///
    /// Returns the revision to render. Several updates between two calls
    /// collapse into one request for the latest revision.
    pub fn take_request(&mut self) -> Option<u64> {
        self.pending.take()
    }
}

/// Scoped mutable access to the model inside a render bracket.
pub struct ModelUpdate<'a> {
    model: &'a mut SessionModel,
    tracker: &'a mut RenderTracker,
}

impl<'a> ModelUpdate<'a> {
    /// Open a bracket over `model`.
    pub fn begin(model: &'a mut SessionModel, tracker: &'a mut RenderTracker) -> Self {
        tracker.begin();
        Self { model, tracker }
    }
}

impl Deref for ModelUpdate<'_> {
    type Target = SessionModel;

    fn deref(&self) -> &SessionModel {
        self.model
    }
}

impl DerefMut for ModelUpdate<'_> {
    fn deref_mut(&mut self) -> &mut SessionModel {
        self.model
    }
}

impl Drop for ModelUpdate<'_> {
    fn drop(&mut self) {
        self.tracker.end();
    }
}
