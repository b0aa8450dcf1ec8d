#![deny(missing_docs)]
//! Built-in producers for colonist.
//!
//! Provides three [`Producer`] implementations:
//! - [`ConstructProducer`]: a new instance through the scope's factories
//! - [`CallbackProducer`]: the colony's own produce callback
//! - [`IdentityProducer`]: the candidate's identity, no instantiation

use colonist_core::callback::ProduceCallback;
use colonist_core::composition::ProductionMode;
use colonist_core::error::ProductionError;
use colonist_core::produced::Produced;
use colonist_core::producer::Producer;
use colonist_core::scope::Constructors;
use colonist_core::settler::Candidate;
use std::sync::Arc;

/// Constructs each candidate through its zero-argument factory.
///
/// Singleton settlers must yield their shared instance; a constructor
/// table handing out a fresh value for one fails with
/// [`ProductionError::NotShared`]. A candidate without a factory fails
/// with [`ProductionError::NoFactory`].
pub struct ConstructProducer {
    constructors: Arc<dyn Constructors>,
}

impl ConstructProducer {
    /// Construct through `constructors`.
    pub fn new(constructors: Arc<dyn Constructors>) -> Self {
        Self { constructors }
    }
}

impl<C> Producer<C> for ConstructProducer {
    fn mode(&self) -> ProductionMode {
        ProductionMode::Construct
    }

    fn produce(&self, _colony: &mut C, candidate: &Candidate) -> Result<Produced, ProductionError> {
        tracing::trace!(
            settler = %candidate.id,
            singleton = candidate.singleton,
            "colonist.produce.construct"
        );
        let value = self.constructors.construct(&candidate.id)?;
        if candidate.singleton && !matches!(value, Produced::Shared(_)) {
            return Err(ProductionError::NotShared(candidate.id.clone()));
        }
        Ok(value)
    }
}

/// Delegates to the colony's produce callback.
///
/// The callback receives the candidate's identity; whatever it returns
/// is delivered as-is.
pub struct CallbackProducer<C> {
    callback: ProduceCallback<C>,
}

impl<C> CallbackProducer<C> {
    /// Produce through `callback`.
    pub fn new(callback: ProduceCallback<C>) -> Self {
        Self { callback }
    }
}

impl<C> Producer<C> for CallbackProducer<C> {
    fn mode(&self) -> ProductionMode {
        ProductionMode::Callback
    }

    fn produce(&self, colony: &mut C, candidate: &Candidate) -> Result<Produced, ProductionError> {
        tracing::trace!(
            settler = %candidate.id,
            bound = self.callback.is_bound(),
            "colonist.produce.callback"
        );
        self.callback
            .invoke(colony, candidate.id.clone())
            .map_err(|source| ProductionError::Callback {
                settler: candidate.id.clone(),
                source,
            })
    }
}

/// Passes the candidate's identity through. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityProducer;

impl<C> Producer<C> for IdentityProducer {
    fn mode(&self) -> ProductionMode {
        ProductionMode::Identity
    }

    fn produce(&self, _colony: &mut C, candidate: &Candidate) -> Result<Produced, ProductionError> {
        Ok(Produced::Identity(candidate.id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colonist_core::callback::Callback;
    use colonist_core::error::BoxError;
    use colonist_core::id::SettlerId;
    use colonist_core::settler::SettlerInfo;
    use colonist_registry::SettlerRegistry;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Nest {
        built: Vec<SettlerId>,
    }

    fn nest() -> Nest {
        Nest { built: Vec::new() }
    }

    static CONSTRUCTED: AtomicUsize = AtomicUsize::new(0);

    #[derive(Debug)]
    struct Larva;

    impl Default for Larva {
        fn default() -> Self {
            CONSTRUCTED.fetch_add(1, Ordering::SeqCst);
            Larva
        }
    }

    #[test]
    fn construct_producer_builds_a_fresh_instance() {
        let mut registry = SettlerRegistry::new();
        registry.register::<Larva>(SettlerInfo::new("Larva"));
        let producer = ConstructProducer::new(Arc::new(registry));

        let before = CONSTRUCTED.load(Ordering::SeqCst);
        let value = Producer::<Nest>::produce(&producer, &mut nest(), &Candidate::new("Larva"))
            .unwrap();
        assert!(value.downcast::<Larva>().is_ok());
        assert_eq!(CONSTRUCTED.load(Ordering::SeqCst), before + 1);
    }

    #[test]
    fn construct_producer_reports_missing_factory() {
        let producer = ConstructProducer::new(Arc::new(SettlerRegistry::new()));
        let err = Producer::<Nest>::produce(&producer, &mut nest(), &Candidate::new("Egg"))
            .unwrap_err();
        assert!(matches!(err, ProductionError::NoFactory(_)));
    }

    #[test]
    fn construct_producer_shares_singletons() {
        let mut registry = SettlerRegistry::new();
        let info = SettlerInfo::new("Queen").as_singleton();
        registry.register_singleton(info.clone(), Arc::new(Larva));
        let producer = ConstructProducer::new(Arc::new(registry));
        let candidate = Candidate::from(&info);

        let first = Producer::<Nest>::produce(&producer, &mut nest(), &candidate).unwrap();
        let second = Producer::<Nest>::produce(&producer, &mut nest(), &candidate).unwrap();
        assert!(Arc::ptr_eq(
            &first.downcast_shared::<Larva>().unwrap(),
            &second.downcast_shared::<Larva>().unwrap()
        ));
    }

    struct FreshEveryTime;

    impl Constructors for FreshEveryTime {
        fn construct(&self, _settler: &SettlerId) -> Result<Produced, ProductionError> {
            Ok(Produced::instance(Larva))
        }
    }

    #[test]
    fn construct_producer_rejects_unshared_singleton() {
        let producer = ConstructProducer::new(Arc::new(FreshEveryTime));
        let candidate = Candidate::from(&SettlerInfo::new("Queen").as_singleton());
        let err = Producer::<Nest>::produce(&producer, &mut nest(), &candidate).unwrap_err();
        assert!(matches!(err, ProductionError::NotShared(id) if id.as_str() == "Queen"));

        let plain = Producer::<Nest>::produce(&producer, &mut nest(), &Candidate::new("Queen"));
        assert!(plain.is_ok());
    }

    #[test]
    fn bound_callback_producer_sees_the_colony() {
        let producer = CallbackProducer::new(Callback::bound(
            |nest: &mut Nest, id: SettlerId| -> Result<Produced, BoxError> {
                nest.built.push(id.clone());
                Ok(Produced::instance(id.to_string()))
            },
        ));
        let mut colony = nest();
        let value = producer.produce(&mut colony, &Candidate::new("Pupa")).unwrap();
        assert_eq!(*value.downcast::<String>().unwrap(), "Pupa");
        assert_eq!(colony.built, vec![SettlerId::new("Pupa")]);
    }

    #[test]
    fn unbound_callback_producer_wraps_failures() {
        let producer: CallbackProducer<Nest> =
            CallbackProducer::new(Callback::unbound(|_id| Err("no food".into())));
        let err = producer
            .produce(&mut nest(), &Candidate::new("Pupa"))
            .unwrap_err();
        match err {
            ProductionError::Callback { settler, source } => {
                assert_eq!(settler.as_str(), "Pupa");
                assert_eq!(source.to_string(), "no food");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn identity_producer_passes_identity_through() {
        let value =
            Producer::<Nest>::produce(&IdentityProducer, &mut nest(), &Candidate::new("Egg"))
                .unwrap();
        assert_eq!(value.identity(), Some(&SettlerId::new("Egg")));
    }
}
