//! Error types for each protocol.

use crate::composition::{AcceptanceMode, ProductionMode};
use crate::id::{ColonyId, Marker, SettlerId};
use std::fmt;
use thiserror::Error;

/// Boxed error returned by colony callbacks and factories.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Which colony callback a composition error is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallbackKind {
    /// The produce callback.
    Produce,
    /// The accept callback.
    Accept,
}

impl fmt::Display for CallbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallbackKind::Produce => f.write_str("produce"),
            CallbackKind::Accept => f.write_str("accept"),
        }
    }
}

/// Setup errors: a colony type was never composed, or was composed
/// inconsistently. Raised before any settler is touched.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CompositionError {
    /// The colony's type has no founder.
    #[error("colony {colony} doesn't have a founder; was its composition registered?")]
    NoFounder {
        /// The colony type that was settled.
        colony: ColonyId,
    },

    /// The same group marker was declared twice on one colony type.
    #[error("colony {colony} declares group {group} more than once")]
    DuplicateGroup {
        /// The colony type.
        colony: ColonyId,
        /// The repeated marker.
        group: Marker,
    },

    /// More than one callback of a kind was registered for one group.
    #[error("colony {colony} has more than one {kind} callback for group {group}")]
    DuplicateCallback {
        /// The colony type.
        colony: ColonyId,
        /// The group marker.
        group: Marker,
        /// Which callback.
        kind: CallbackKind,
    },

    /// A group uses a callback strategy but the colony has no such callback.
    #[error("colony {colony} expected to have a {kind} callback for group {group}")]
    MissingCallback {
        /// The colony type.
        colony: ColonyId,
        /// The group marker.
        group: Marker,
        /// Which callback.
        kind: CallbackKind,
    },

    /// A callback was registered for a group that doesn't use it.
    #[error("colony {colony} has a {kind} callback for group {group}, which doesn't use one")]
    OrphanCallback {
        /// The colony type.
        colony: ColonyId,
        /// The marker the callback was registered for.
        group: Marker,
        /// Which callback.
        kind: CallbackKind,
    },

    /// A declared selector could not be built.
    #[error("invalid selector for group {group}: {source}")]
    InvalidSelector {
        /// The group marker.
        group: Marker,
        /// Why the selector was rejected.
        #[source]
        source: DiscoveryError,
    },

    /// The same colony type was given two founders.
    #[error("colony {colony} is composed more than once")]
    DuplicateColony {
        /// The colony type.
        colony: ColonyId,
    },

    /// A founder was handed a colony of a type it wasn't built for.
    #[error("founder for {expected} received a colony of another type")]
    ColonyMismatch {
        /// The type the founder was built for.
        expected: ColonyId,
    },

    /// A declarative composition could not be parsed.
    #[error("malformed composition: {0}")]
    Malformed(String),
}

/// Selection errors: the discovery scope could not be enumerated.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The scope is missing or unreadable.
    #[error("discovery scope unavailable: {0}")]
    ScopeUnavailable(String),

    /// A settler was named that the scope does not know.
    #[error("unknown settler: {0}")]
    UnknownSettler(SettlerId),

    /// A name pattern failed to compile.
    #[error("invalid settler pattern {pattern:?}: {message}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Compiler message.
        message: String,
    },

    /// A settler manifest could not be parsed.
    #[error("malformed settler manifest: {0}")]
    Manifest(String),

    /// A plain factory was bound to a singleton settler.
    #[error("settler {0} is a singleton; bind a shared instance instead of a factory")]
    SingletonFactory(SettlerId),

    /// Catch-all. Include context.
    #[error("{0}")]
    Other(#[from] BoxError),
}

/// Production errors for one candidate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ProductionError {
    /// The settler has no zero-argument factory.
    #[error("settler {0} has no zero-argument factory")]
    NoFactory(SettlerId),

    /// The settler's factory failed.
    #[error("constructing settler {settler} failed: {source}")]
    Construction {
        /// The settler being constructed.
        settler: SettlerId,
        /// What the factory reported.
        #[source]
        source: BoxError,
    },

    /// A singleton settler produced a fresh value instead of its shared instance.
    #[error("singleton settler {0} did not produce its shared instance")]
    NotShared(SettlerId),

    /// The settler asks for a production strategy its group can't provide.
    #[error("no {mode} producer available for settler {settler}")]
    NoStrategy {
        /// The settler being produced.
        settler: SettlerId,
        /// The strategy it asked for.
        mode: ProductionMode,
    },

    /// The colony's produce callback failed.
    #[error("produce callback failed for settler {settler}: {source}")]
    Callback {
        /// The settler being produced.
        settler: SettlerId,
        /// What the callback reported.
        #[source]
        source: BoxError,
    },

    /// Catch-all. Include context.
    #[error("{0}")]
    Other(#[from] BoxError),
}

/// Acceptance errors for one produced value.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AcceptanceError {
    /// The colony's accept callback failed.
    #[error("accept callback failed for settler {settler}: {source}")]
    Callback {
        /// The settler being accepted.
        settler: SettlerId,
        /// What the callback reported.
        #[source]
        source: BoxError,
    },

    /// The settler asks for an acceptance strategy its group can't provide.
    #[error("no {mode} acceptor available for settler {settler}")]
    NoStrategy {
        /// The settler being accepted.
        settler: SettlerId,
        /// The strategy it asked for.
        mode: AcceptanceMode,
    },

    /// Catch-all. Include context.
    #[error("{0}")]
    Other(#[from] BoxError),
}

/// The error a `settle` caller sees: the first failure, with the group
/// and settler it happened in.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SettleError {
    /// The colony was never composed, or composed inconsistently.
    #[error(transparent)]
    Composition(#[from] CompositionError),

    /// A group's selector could not enumerate candidates.
    #[error("discovery failed for group {group}: {source}")]
    Discovery {
        /// The group being processed.
        group: Marker,
        /// The selector's error.
        #[source]
        source: DiscoveryError,
    },

    /// A candidate could not be produced.
    #[error("production failed for settler {settler} in group {group}: {source}")]
    Production {
        /// The group being processed.
        group: Marker,
        /// The failing candidate.
        settler: SettlerId,
        /// The producer's error.
        #[source]
        source: ProductionError,
    },

    /// A produced value could not be accepted.
    #[error("acceptance failed for settler {settler} in group {group}: {source}")]
    Acceptance {
        /// The group being processed.
        group: Marker,
        /// The failing candidate.
        settler: SettlerId,
        /// The acceptor's error.
        #[source]
        source: AcceptanceError,
    },
}

impl SettleError {
    /// The group that was being processed, if the failure happened inside one.
    pub fn group(&self) -> Option<&Marker> {
        match self {
            SettleError::Composition(_) => None,
            SettleError::Discovery { group, .. }
            | SettleError::Production { group, .. }
            | SettleError::Acceptance { group, .. } => Some(group),
        }
    }

    /// The settler that was being processed, if any.
    pub fn settler(&self) -> Option<&SettlerId> {
        match self {
            SettleError::Production { settler, .. } | SettleError::Acceptance { settler, .. } => {
                Some(settler)
            }
            _ => None,
        }
    }
}
