//! CountingProducer: produces the candidate's id as an instance.

use super::event_log::{EventLog, Step};
use crate::composition::ProductionMode;
use crate::error::ProductionError;
use crate::id::SettlerId;
use crate::produced::Produced;
use crate::producer::Producer;
use crate::settler::Candidate;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A producer that records each call and yields
/// `Produced::instance(candidate.id)`. Optionally fails for one settler.
pub struct CountingProducer {
    log: EventLog,
    calls: AtomicUsize,
    fail_on: Option<SettlerId>,
}

impl CountingProducer {
    /// Create a producer that records into `log`.
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            calls: AtomicUsize::new(0),
            fail_on: None,
        }
    }

    /// Fail with `ProductionError::Construction` when producing `settler`.
    pub fn failing_on(mut self, settler: impl Into<SettlerId>) -> Self {
        self.fail_on = Some(settler.into());
        self
    }

    /// How many times `produce` ran.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<C> Producer<C> for CountingProducer {
    fn mode(&self) -> ProductionMode {
        ProductionMode::Construct
    }

    fn produce(&self, _colony: &mut C, candidate: &Candidate) -> Result<Produced, ProductionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.log.record(Step::Produce(candidate.id.clone()));
        if self.fail_on.as_ref() == Some(&candidate.id) {
            return Err(ProductionError::Construction {
                settler: candidate.id.clone(),
                source: "counting producer told to fail".into(),
            });
        }
        Ok(Produced::instance(candidate.id.clone()))
    }
}
