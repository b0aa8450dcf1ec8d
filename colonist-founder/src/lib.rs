#![deny(missing_docs)]
//! Colony composition and the settler resolution algorithm.
//!
//! A colony type is composed once, up front: [`Composition`] collects its
//! strategy groups and callbacks, validates them, and builds a
//! [`ColonyFounder`]. The founder is immutable and implements
//! [`Founder`](colonist_core::Founder), so it can be shared across threads
//! and handed to an orchestrator.
//!
//! ## Resolution
//!
//! For each group, in declaration order (or only the group matching a
//! filter marker):
//! 1. the selector returns ordered candidates;
//! 2. each candidate is produced, then immediately accepted, before the
//!    next candidate is produced.
//!
//! The first failure stops everything. Nothing is rolled back: settlers
//! accepted before the failure stay accepted.

mod composition;
mod descriptor;
mod founder;

pub use composition::Composition;
pub use descriptor::CompositionDescriptor;
pub use founder::ColonyFounder;
