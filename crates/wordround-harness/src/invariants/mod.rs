//! Invariant checking for deterministic simulation testing.
//!
//! Invariants are properties of the session model that must hold after every
//! completed update, whatever sequence of intents and server messages led
//! there. Checks run against a [`ModelSnapshot`] rather than the live
//! controller so they see one consistent state.
//!
//! # Usage
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! let snapshot = ModelSnapshot::of(&controller);
//! registry.check_all(&snapshot)?;
//! ```

mod checks;
mod snapshot;

pub use checks::{
    PotentialScoreTurnGate, SelectionOccupied, SlotStampsMatchPosition, TileInOnePlace,
    TurnInteractivity,
};
pub use snapshot::ModelSnapshot;

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// Identifies an invariant in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvariantKind {
    /// See [`TurnInteractivity`].
    TurnInteractivity,
    /// See [`PotentialScoreTurnGate`].
    PotentialScoreTurnGate,
    /// See [`SlotStampsMatchPosition`].
    SlotStampsMatchPosition,
    /// See [`SelectionOccupied`].
    SelectionOccupied,
    /// See [`TileInOnePlace`].
    TileInOnePlace,
}

impl InvariantKind {
    /// Short name for reports.
    pub fn name(self) -> &'static str {
        match self {
            Self::TurnInteractivity => "turn_interactivity",
            Self::PotentialScoreTurnGate => "potential_score_turn_gate",
            Self::SlotStampsMatchPosition => "slot_stamps_match_position",
            Self::SelectionOccupied => "selection_occupied",
            Self::TileInOnePlace => "tile_in_one_place",
        }
    }
}

impl std::fmt::Display for InvariantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Invariant violation with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The violated invariant.
    pub invariant: InvariantKind,
    /// Description of what went wrong.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// An invariant that can be checked against a model snapshot.
pub trait Invariant: Send + Sync {
    /// Which invariant this is.
    fn kind(&self) -> InvariantKind;

    /// Check the invariant against `state`.
    fn check(&self, state: &ModelSnapshot) -> InvariantResult;
}

/// Registry of invariants to check.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Create a registry with every session model invariant.
    ///
    /// Includes:
    /// - [`TurnInteractivity`]: board accepts input iff it is the local turn
    /// - [`PotentialScoreTurnGate`]: no score preview off turn
    /// - [`SlotStampsMatchPosition`]: rack tiles know their slot
    /// - [`SelectionOccupied`]: only occupied slots are selected
    /// - [`TileInOnePlace`]: no tile is on the rack and the board at once
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(TurnInteractivity);
        registry.add(PotentialScoreTurnGate);
        registry.add(SlotStampsMatchPosition);
        registry.add(SelectionOccupied);
        registry.add(TileInOnePlace);
        registry
    }

    /// Add an invariant to the registry.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Check all invariants against `state`.
    ///
    /// Returns `Ok(())` if all invariants hold, or every violation found.
    pub fn check_all(&self, state: &ModelSnapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(state).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Check all invariants, panicking with every violation.
    #[allow(clippy::panic, reason = "Test assertion helper")]
    pub fn assert_all(&self, state: &ModelSnapshot, context: &str) {
        if let Err(violations) = self.check_all(state) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!("Invariant violation {context}:\n  {}", messages.join("\n  "));
        }
    }

    /// Number of registered invariants.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}
