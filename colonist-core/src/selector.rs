//! The Selector protocol: which settlers apply to a group.

use crate::composition::ProductionMode;
use crate::error::DiscoveryError;
use crate::id::{ColonyId, Marker};
use crate::settler::Candidate;

/// What a selector knows about the group it is selecting for.
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext<'a> {
    /// The colony type being settled.
    pub colony: &'a ColonyId,
    /// The group's marker.
    pub group: &'a Marker,
    /// How the group will produce candidates. Selectors use this to
    /// leave out types that cannot be produced that way.
    pub production: ProductionMode,
}

/// Protocol ①: Selection
///
/// Enumerates candidate settlers for one group. Must be deterministic:
/// the same scope and context give the same candidates in the same
/// order, because colonies observe acceptance order.
///
/// Implementations:
/// - ByMarker: settlers carrying a capability marker
/// - BySupertype: settlers extending a supertype
/// - ByName: settlers whose identity matches a pattern
/// - Registered: an explicit list
pub trait Selector: Send + Sync {
    /// Candidates for this group, in delivery order.
    ///
    /// An error aborts the whole `found` call.
    fn select(&self, ctx: &SelectionContext<'_>) -> Result<Vec<Candidate>, DiscoveryError>;

    /// Short description for logs and errors, e.g. `marker ant`.
    fn describe(&self) -> String;
}
