//! FixedSelector: returns a canned candidate list.

use super::event_log::{EventLog, Step};
use crate::error::DiscoveryError;
use crate::selector::{SelectionContext, Selector};
use crate::settler::Candidate;

/// A selector that always returns the same candidates, or always fails.
pub struct FixedSelector {
    candidates: Vec<Candidate>,
    unavailable: bool,
    log: EventLog,
}

impl FixedSelector {
    /// Select `ids`, in order.
    pub fn new<I, S>(ids: I, log: EventLog) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<crate::id::SettlerId>,
    {
        Self {
            candidates: ids.into_iter().map(Candidate::new).collect(),
            unavailable: false,
            log,
        }
    }

    /// Select prepared `candidates`, in order, overrides included.
    pub fn candidates(candidates: Vec<Candidate>, log: EventLog) -> Self {
        Self {
            candidates,
            unavailable: false,
            log,
        }
    }

    /// A selector whose scope can never be enumerated.
    pub fn unavailable(log: EventLog) -> Self {
        Self {
            candidates: Vec::new(),
            unavailable: true,
            log,
        }
    }
}

impl Selector for FixedSelector {
    fn select(&self, ctx: &SelectionContext<'_>) -> Result<Vec<Candidate>, DiscoveryError> {
        self.log.record(Step::Select(ctx.group.clone()));
        if self.unavailable {
            return Err(DiscoveryError::ScopeUnavailable("fixed selector".into()));
        }
        Ok(self.candidates.clone())
    }

    fn describe(&self) -> String {
        format!("fixed list of {}", self.candidates.len())
    }
}
