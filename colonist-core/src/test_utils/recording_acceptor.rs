//! RecordingAcceptor: remembers what it accepted.

use super::event_log::{EventLog, Step};
use crate::acceptor::Acceptor;
use crate::composition::AcceptanceMode;
use crate::error::AcceptanceError;
use crate::id::SettlerId;
use crate::produced::Produced;
use crate::settler::Candidate;
use std::sync::Mutex;

/// An acceptor that records each accepted settler and whether its value
/// was an identity passthrough. Optionally fails for one settler.
pub struct RecordingAcceptor {
    log: EventLog,
    accepted: Mutex<Vec<(SettlerId, bool)>>,
    fail_on: Option<SettlerId>,
}

impl RecordingAcceptor {
    /// Create an acceptor that records into `log`.
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            accepted: Mutex::new(Vec::new()),
            fail_on: None,
        }
    }

    /// Fail with `AcceptanceError::Callback` when accepting `settler`.
    pub fn failing_on(mut self, settler: impl Into<SettlerId>) -> Self {
        self.fail_on = Some(settler.into());
        self
    }

    /// Accepted settlers, in order.
    pub fn accepted(&self) -> Vec<SettlerId> {
        self.entries().into_iter().map(|(id, _)| id).collect()
    }

    /// Accepted settlers paired with "was the value an identity".
    pub fn entries(&self) -> Vec<(SettlerId, bool)> {
        self.accepted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl<C> Acceptor<C> for RecordingAcceptor {
    fn mode(&self) -> AcceptanceMode {
        AcceptanceMode::Callback
    }

    fn accept(
        &self,
        _colony: &mut C,
        candidate: &Candidate,
        value: Produced,
    ) -> Result<(), AcceptanceError> {
        self.log.record(Step::Accept(candidate.id.clone()));
        if self.fail_on.as_ref() == Some(&candidate.id) {
            return Err(AcceptanceError::Callback {
                settler: candidate.id.clone(),
                source: "recording acceptor told to fail".into(),
            });
        }
        self.accepted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((candidate.id.clone(), value.is_identity()));
        Ok(())
    }
}
