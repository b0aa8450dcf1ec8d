//! The Acceptor protocol: delivering a produced value to the colony.

use crate::composition::AcceptanceMode;
use crate::error::AcceptanceError;
use crate::produced::Produced;
use crate::settler::Candidate;

/// Protocol ③: Acceptance
///
/// Receives each produced value in candidate order. Ownership of the
/// value passes to the acceptor; the engine keeps nothing once
/// `accept` returns.
///
/// A failure stops the current `found` call, like a production failure.
pub trait Acceptor<C>: Send + Sync {
    /// The acceptance mode.
    fn mode(&self) -> AcceptanceMode;

    /// Deliver `value`, produced for `candidate`, to the colony.
    fn accept(
        &self,
        colony: &mut C,
        candidate: &Candidate,
        value: Produced,
    ) -> Result<(), AcceptanceError>;
}
