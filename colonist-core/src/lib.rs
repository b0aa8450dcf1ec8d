//! # colonist-core: Protocol traits for extension-point composition
//!
//! A *colony* is a host object that receives *settlers*: extension units
//! discovered elsewhere in the program. This crate defines the seams the
//! composition engine is built from.
//!
//! ## The Protocols
//!
//! | Protocol | Trait | What it does |
//! |----------|-------|-------------|
//! | ① Selection | [`Selector`] | Enumerate candidate settlers for one group |
//! | ② Production | [`Producer`] | Turn a candidate into a deliverable value |
//! | ③ Acceptance | [`Acceptor`] | Deliver (or discard) a produced value |
//! | ④ Founding | [`Founder`] | Run ①→②→③ for every group declared on a colony type |
//!
//! ## The Seams
//!
//! | Seam | Types | What it does |
//! |------|-------|-------------|
//! | Discovery | [`DiscoveryScope`], [`Constructors`] | The universe of settler types and their factories |
//! | Callbacks | [`Callback`], [`ProduceCallback`], [`AcceptCallback`] | Colony-declared hooks, bound or unbound |
//! | Declarations | [`CompositionSpec`], [`GroupSpec`], [`SelectorSpec`] | Serializable group declarations |
//!
//! ## Ordering
//!
//! Every protocol is synchronous. A founder processes groups in
//! declaration order and, within a group, produces and accepts each
//! candidate before touching the next one. Colonies observe settlers in
//! exactly the order the selector returned them.

#![deny(missing_docs)]

pub mod acceptor;
pub mod callback;
pub mod composition;
pub mod error;
pub mod founder;
pub mod id;
pub mod produced;
pub mod producer;
pub mod scope;
pub mod selector;
pub mod settler;

#[cfg(feature = "test-utils")]
pub mod test_utils;

// Re-exports for convenience
pub use acceptor::Acceptor;
pub use callback::{AcceptCallback, Callback, ProduceCallback};
pub use composition::{AcceptanceMode, CompositionSpec, GroupSpec, ProductionMode, SelectorSpec};
pub use error::{
    AcceptanceError, BoxError, CallbackKind, CompositionError, DiscoveryError, ProductionError,
    SettleError,
};
pub use founder::Founder;
pub use id::{ColonyId, Marker, SettlerId};
pub use produced::Produced;
pub use producer::Producer;
pub use scope::{Constructors, DiscoveryScope};
pub use selector::{SelectionContext, Selector};
pub use settler::{Candidate, SettlerInfo, SettlerKind, Visibility};
