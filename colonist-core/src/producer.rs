//! The Producer protocol: turning a candidate into a value.

use crate::composition::ProductionMode;
use crate::error::ProductionError;
use crate::produced::Produced;
use crate::settler::Candidate;

/// Protocol ②: Production
///
/// Invoked once per candidate, immediately before the acceptor sees the
/// result. Producers may have side effects (constructing a settler is
/// one) but never touch the group that owns them.
///
/// A failure stops the current `found` call: later candidates and groups
/// are not processed, and earlier acceptances stand.
pub trait Producer<C>: Send + Sync {
    /// The production mode, reported to selectors.
    fn mode(&self) -> ProductionMode;

    /// Produce the value for one candidate.
    fn produce(&self, colony: &mut C, candidate: &Candidate) -> Result<Produced, ProductionError>;
}
