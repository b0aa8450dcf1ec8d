//! The Founder capability: what a composed colony type exposes.

use crate::error::SettleError;
use crate::id::{ColonyId, Marker};
use std::any::Any;

/// Protocol ④: Founding
///
/// One founder per colony type. `found` runs every group declared on
/// the type, in declaration order, or only the group named by `filter`.
/// A filter that names no group is a no-op.
///
/// The colony is passed type-erased so founders for unrelated colony
/// types can share one table; implementations reject a colony of the
/// wrong type with `CompositionError::ColonyMismatch`.
///
/// Founders hold no per-call state. Settling two colonies at once,
/// from two threads, is safe as long as the colony's own callbacks are.
pub trait Founder: Send + Sync {
    /// The colony type this founder was composed for.
    fn colony(&self) -> &ColonyId;

    /// Declared group markers, in declaration order.
    fn groups(&self) -> Vec<Marker>;

    /// Select, produce and accept settlers into `colony`.
    fn found(&self, colony: &mut dyn Any, filter: Option<&Marker>) -> Result<(), SettleError>;
}
