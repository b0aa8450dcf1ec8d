#![deny(missing_docs)]
//! # colonist: umbrella crate
//!
//! A single import surface for colonist. Re-exports the protocol crate
//! and the built-in strategies behind feature flags, plus a `prelude`
//! for the happy path:
//!
//! ```ignore
//! use colonist::prelude::*;
//! use std::sync::Arc;
//!
//! let mut registry = SettlerRegistry::new();
//! registry.register::<Worker>(SettlerInfo::of::<Worker>().with_marker("ant"));
//!
//! let founder = Composition::<Anthill>::new()
//!     .with_scope(Arc::new(registry))
//!     .on_accept("workers", Callback::bound(Anthill::accept))
//!     .group_spec(GroupSpec::new(
//!         "workers",
//!         SelectorSpec::ByMarker { marker: "ant".into() },
//!         ProductionMode::Construct,
//!         AcceptanceMode::Callback,
//!     ))
//!     .build()?;
//!
//! let mut colonist = Colonist::new();
//! colonist.compose(founder)?;
//! colonist.settle(&mut anthill)?;
//! ```

#[cfg(feature = "core")]
pub use colonist_accept;
#[cfg(feature = "core")]
pub use colonist_core;
#[cfg(feature = "core")]
pub use colonist_founder;
#[cfg(feature = "orch")]
pub use colonist_orch;
#[cfg(feature = "core")]
pub use colonist_produce;
#[cfg(feature = "registry")]
pub use colonist_registry;
#[cfg(feature = "core")]
pub use colonist_select;

/// Happy-path imports for composing and settling colonies.
pub mod prelude {
    #[cfg(feature = "core")]
    pub use colonist_core::{
        AcceptCallback, AcceptanceError, AcceptanceMode, Acceptor, Callback, Candidate,
        ColonyId, CompositionError, CompositionSpec, Constructors, DiscoveryError,
        DiscoveryScope, Founder, GroupSpec, Marker, ProduceCallback, Produced, ProductionError,
        ProductionMode, Producer, Selector, SelectorSpec, SettleError, SettlerId, SettlerInfo,
        SettlerKind,
    };

    #[cfg(feature = "core")]
    pub use colonist_accept::{CallbackAcceptor, ForgetAcceptor};

    #[cfg(feature = "core")]
    pub use colonist_founder::{ColonyFounder, Composition};

    #[cfg(feature = "core")]
    pub use colonist_produce::{CallbackProducer, ConstructProducer, IdentityProducer};

    #[cfg(feature = "core")]
    pub use colonist_select::{ByMarker, ByName, BySupertype, Registered};

    #[cfg(feature = "registry")]
    pub use colonist_registry::{SettlerManifest, SettlerRegistry};

    #[cfg(feature = "orch")]
    pub use colonist_orch::Colonist;
}
