//! Recorded round transcripts.
//!
//! A transcript is JSON lines, one step per line, in the order the events
//! happened:
//!
//! ```text
//! {"intent": {"type": "makePassMove"}}
//! {"drop": {"slot": 0, "x": 7, "y": 7}}
//! {"cancel": {"x": 7, "y": 7}}
//! {"server": {"command": "playerPassMove", "payload": {"nowPlaying": 2}}}
//! {"server": "raw text, delivered verbatim"}
//! ```
//!
//! Blank lines are skipped.

use std::collections::VecDeque;

use serde::Deserialize;
use wordround_app::Intent;

use crate::ReplayError;

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub enum Step {
    /// A local intent, delivered as-is.
    Intent(Intent),
    /// The user dragged a rack tile onto the board (0-indexed square).
    Drop {
        /// Rack slot the tile came from.
        slot: usize,
        /// Column.
        x: u32,
        /// Row.
        y: u32,
    },
    /// The user dragged a candidate off the board.
    Cancel {
        /// Column.
        x: u32,
        /// Row.
        y: u32,
    },
    /// A message from the server. Strings are delivered verbatim, anything
    /// else is re-encoded as JSON.
    Server(serde_json::Value),
}

impl Step {
    /// Step comes from the local side rather than the server.
    pub fn is_local(&self) -> bool {
        !matches!(self, Self::Server(_))
    }
}

/// Steps of a transcript, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    steps: VecDeque<Step>,
}

impl Transcript {
    /// Parse JSON-lines text.
    pub fn parse(text: &str) -> Result<Self, ReplayError> {
        let steps = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                serde_json::from_str(line).map_err(|e| ReplayError::Transcript {
                    line: index + 1,
                    reason: e.to_string(),
                })
            })
            .collect::<Result<_, _>>()?;

        Ok(Self { steps })
    }

    /// Number of remaining steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// No steps remain.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Next step, without consuming it.
    pub fn peek(&self) -> Option<&Step> {
        self.steps.front()
    }

    /// Consume the next step.
    pub fn next_step(&mut self) -> Option<Step> {
        self.steps.pop_front()
    }
}
