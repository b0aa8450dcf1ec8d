//! The discovery seam: where settler types come from.

use crate::error::{DiscoveryError, ProductionError};
use crate::id::SettlerId;
use crate::produced::Produced;
use crate::settler::SettlerInfo;

/// The enumerable universe of settler types a selector scans.
///
/// Implementations:
/// - `SettlerRegistry`: in-process registration and JSON manifests
/// - a generated table emitted by a build step
/// - anything else that can list types deterministically
///
/// The only requirement is order: for an unchanged scope, `settlers()`
/// returns the same sequence every time. Colonies receive settlers in
/// this order.
pub trait DiscoveryScope: Send + Sync {
    /// Every settler type in the scope, in discovery order.
    fn settlers(&self) -> Result<Vec<SettlerInfo>, DiscoveryError>;

    /// Look up one settler type.
    fn settler(&self, id: &SettlerId) -> Result<Option<SettlerInfo>, DiscoveryError> {
        Ok(self.settlers()?.into_iter().find(|info| &info.id == id))
    }
}

/// Zero-argument factories keyed by settler identity.
///
/// Stands in for reflective construction: whoever registers a settler
/// type also registers how to make one.
pub trait Constructors: Send + Sync {
    /// Make an instance of `settler`.
    fn construct(&self, settler: &SettlerId) -> Result<Produced, ProductionError>;
}
