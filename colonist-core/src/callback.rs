//! Colony-declared callbacks, bound to a colony instance or not.

use crate::error::BoxError;
use crate::id::SettlerId;
use crate::produced::Produced;
use std::fmt;
use std::sync::Arc;

/// A function reference with an optional bound receiver.
///
/// A colony may expose its produce/accept hooks either as associated
/// functions that never see the colony, or as methods on the colony.
/// Both forms share this one type so strategies never special-case them:
/// [`Callback::invoke`] always takes the colony and drops it for the
/// unbound form.
pub enum Callback<C, A, R> {
    /// Independent of any colony instance.
    Unbound(Arc<dyn Fn(A) -> R + Send + Sync>),
    /// Receives the colony instance being settled.
    Bound(Arc<dyn Fn(&mut C, A) -> R + Send + Sync>),
}

impl<C, A, R> Callback<C, A, R> {
    /// Wrap a function that does not need the colony.
    pub fn unbound<F>(f: F) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        Callback::Unbound(Arc::new(f))
    }

    /// Wrap a method-like function that receives the colony.
    pub fn bound<F>(f: F) -> Self
    where
        F: Fn(&mut C, A) -> R + Send + Sync + 'static,
    {
        Callback::Bound(Arc::new(f))
    }

    /// Call through, passing the colony only to the bound form.
    pub fn invoke(&self, colony: &mut C, arg: A) -> R {
        match self {
            Callback::Unbound(f) => f(arg),
            Callback::Bound(f) => f(colony, arg),
        }
    }

    /// Whether the callback receives the colony.
    pub fn is_bound(&self) -> bool {
        matches!(self, Callback::Bound(_))
    }
}

impl<C, A, R> Clone for Callback<C, A, R> {
    fn clone(&self) -> Self {
        match self {
            Callback::Unbound(f) => Callback::Unbound(Arc::clone(f)),
            Callback::Bound(f) => Callback::Bound(Arc::clone(f)),
        }
    }
}

impl<C, A, R> fmt::Debug for Callback<C, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callback::Unbound(_) => f.write_str("Callback::Unbound"),
            Callback::Bound(_) => f.write_str("Callback::Bound"),
        }
    }
}

/// Produces a value for a settler identity.
pub type ProduceCallback<C> = Callback<C, SettlerId, Result<Produced, BoxError>>;

/// Receives one produced value.
pub type AcceptCallback<C> = Callback<C, Produced, Result<(), BoxError>>;
