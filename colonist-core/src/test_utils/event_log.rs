//! EventLog: a shared, ordered record of strategy calls.

use crate::id::{Marker, SettlerId};
use std::sync::{Arc, Mutex};

/// One recorded strategy call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A selector ran for a group.
    Select(Marker),
    /// A producer ran for a settler.
    Produce(SettlerId),
    /// An acceptor ran for a settler.
    Accept(SettlerId),
}

/// Cloneable handle to one shared log. Hand clones to several doubles
/// to see how their calls interleave.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    steps: Arc<Mutex<Vec<Step>>>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step.
    pub fn record(&self, step: Step) {
        self.steps
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(step);
    }

    /// Snapshot of every step so far.
    pub fn steps(&self) -> Vec<Step> {
        self.steps
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}
