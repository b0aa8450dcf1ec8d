#![deny(missing_docs)]
//! Built-in acceptors for colonist.
//!
//! Provides two [`Acceptor`] implementations:
//! - [`CallbackAcceptor`]: hands each value to the colony's accept callback
//! - [`ForgetAcceptor`]: drops each value
//!
//! `ForgetAcceptor` is a policy, not a gap: producers still run for every
//! candidate, so a colony can trigger construction-time side effects of
//! its settlers without keeping them.

use colonist_core::acceptor::Acceptor;
use colonist_core::callback::AcceptCallback;
use colonist_core::composition::AcceptanceMode;
use colonist_core::error::AcceptanceError;
use colonist_core::produced::Produced;
use colonist_core::settler::Candidate;

/// Delegates to the colony's accept callback. The callback's return
/// value, other than failure, is ignored.
pub struct CallbackAcceptor<C> {
    callback: AcceptCallback<C>,
}

impl<C> CallbackAcceptor<C> {
    /// Accept through `callback`.
    pub fn new(callback: AcceptCallback<C>) -> Self {
        Self { callback }
    }
}

impl<C> Acceptor<C> for CallbackAcceptor<C> {
    fn mode(&self) -> AcceptanceMode {
        AcceptanceMode::Callback
    }

    fn accept(
        &self,
        colony: &mut C,
        candidate: &Candidate,
        value: Produced,
    ) -> Result<(), AcceptanceError> {
        tracing::trace!(
            settler = %candidate.id,
            bound = self.callback.is_bound(),
            "colonist.accept.callback"
        );
        self.callback
            .invoke(colony, value)
            .map_err(|source| AcceptanceError::Callback {
                settler: candidate.id.clone(),
                source,
            })
    }
}

/// Drops every value. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForgetAcceptor;

impl<C> Acceptor<C> for ForgetAcceptor {
    fn mode(&self) -> AcceptanceMode {
        AcceptanceMode::Forget
    }

    fn accept(
        &self,
        _colony: &mut C,
        candidate: &Candidate,
        _value: Produced,
    ) -> Result<(), AcceptanceError> {
        tracing::trace!(settler = %candidate.id, "colonist.accept.forget");
        Ok(())
    }
}
