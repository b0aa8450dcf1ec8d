//! The value a producer hands to an acceptor.

use crate::id::SettlerId;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Output of a [`Producer`](crate::Producer) for one candidate.
///
/// The engine never looks at the payload type; acceptors that care
/// downcast it themselves.
pub enum Produced {
    /// A freshly produced value owned by whoever accepts it.
    Instance(Box<dyn Any + Send>),
    /// The shared instance of a singleton settler.
    Shared(Arc<dyn Any + Send + Sync>),
    /// The settler's identity, passed through without instantiation.
    Identity(SettlerId),
}

impl Produced {
    /// Wrap an owned value.
    pub fn instance<T: Any + Send>(value: T) -> Self {
        Produced::Instance(Box::new(value))
    }

    /// Wrap a shared value.
    pub fn shared<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Produced::Shared(value)
    }

    /// The carried identity, if this is [`Produced::Identity`].
    pub fn identity(&self) -> Option<&SettlerId> {
        match self {
            Produced::Identity(id) => Some(id),
            _ => None,
        }
    }

    /// Whether this is an identity passthrough.
    pub fn is_identity(&self) -> bool {
        matches!(self, Produced::Identity(_))
    }

    /// Take an owned instance of `T`. Gives `self` back on mismatch.
    pub fn downcast<T: Any>(self) -> Result<Box<T>, Self> {
        match self {
            Produced::Instance(value) => value.downcast::<T>().map_err(Produced::Instance),
            other => Err(other),
        }
    }

    /// Take a shared instance of `T`. Gives `self` back on mismatch.
    pub fn downcast_shared<T: Any + Send + Sync>(self) -> Result<Arc<T>, Self> {
        match self {
            Produced::Shared(value) => value.downcast::<T>().map_err(Produced::Shared),
            other => Err(other),
        }
    }

    /// Borrow the payload as `T`, whether owned or shared.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Produced::Instance(value) => value.downcast_ref::<T>(),
            Produced::Shared(value) => value.downcast_ref::<T>(),
            Produced::Identity(_) => None,
        }
    }
}

impl fmt::Debug for Produced {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Produced::Instance(_) => f.write_str("Instance(..)"),
            Produced::Shared(_) => f.write_str("Shared(..)"),
            Produced::Identity(id) => f.debug_tuple("Identity").field(id).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Scout(u8);

    #[test]
    fn downcast_returns_value_on_match() {
        let produced = Produced::instance(Scout(3));
        assert_eq!(*produced.downcast::<Scout>().unwrap(), Scout(3));
    }

    #[test]
    fn downcast_gives_back_self_on_mismatch() {
        let produced = Produced::instance(Scout(3));
        let back = produced.downcast::<String>().unwrap_err();
        assert_eq!(back.downcast_ref::<Scout>(), Some(&Scout(3)));
    }

    #[test]
    fn identity_is_not_an_instance() {
        let produced = Produced::Identity(SettlerId::new("Scout"));
        assert!(produced.is_identity());
        assert_eq!(produced.identity().map(SettlerId::as_str), Some("Scout"));
        assert!(produced.downcast_ref::<Scout>().is_none());
    }

    #[test]
    fn shared_downcast_keeps_the_same_arc() {
        let scout = Arc::new(Scout(1));
        let produced = Produced::shared(Arc::clone(&scout));
        let back = produced.downcast_shared::<Scout>().unwrap();
        assert!(Arc::ptr_eq(&scout, &back));
    }
}
