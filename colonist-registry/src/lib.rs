#![deny(missing_docs)]
//! In-memory implementation of colonist-core's discovery seams.
//!
//! [`SettlerRegistry`] is both a [`DiscoveryScope`] (the list of settler
//! types, in registration order) and a [`Constructors`] table (one
//! zero-argument factory per type). Settlers can be registered in code,
//! loaded from a [`SettlerManifest`], or both: a manifest declares the
//! types and their markers, and code binds factories to them by id.

mod manifest;

pub use manifest::SettlerManifest;

use colonist_core::error::{BoxError, DiscoveryError, ProductionError};
use colonist_core::id::SettlerId;
use colonist_core::produced::Produced;
use colonist_core::scope::{Constructors, DiscoveryScope};
use colonist_core::settler::SettlerInfo;
use std::any::Any;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

type Factory = Arc<dyn Fn() -> Result<Produced, BoxError> + Send + Sync>;

/// How a settler's values are made.
enum Binding {
    /// A fresh value per construction.
    Factory(Factory),
    /// The one instance of a singleton.
    Shared(Arc<dyn Any + Send + Sync>),
}

impl Binding {
    fn is_shared(&self) -> bool {
        matches!(self, Binding::Shared(_))
    }
}

/// Settler types and their factories, held in memory.
///
/// Build it up front, then share it behind an `Arc`; it is read-only
/// once selectors and producers hold it.
///
/// Singleton settlers are bound to one shared instance, never to a factory,
/// so every construction of a singleton yields the same `Arc`.
#[derive(Default)]
pub struct SettlerRegistry {
    settlers: Vec<SettlerInfo>,
    index: HashMap<SettlerId, usize>,
    bindings: HashMap<SettlerId, Binding>,
}

impl SettlerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every type a manifest declares, without factories.
    pub fn from_manifest(manifest: SettlerManifest) -> Self {
        let mut registry = Self::new();
        for info in manifest.settlers {
            registry.declare(info);
        }
        registry
    }

    /// Parse a JSON manifest into a registry.
    pub fn from_json(json: &str) -> Result<Self, DiscoveryError> {
        SettlerManifest::from_json(json).map(Self::from_manifest)
    }

    /// Read a JSON manifest file into a registry.
    pub fn load_manifest(path: &Path) -> Result<Self, DiscoveryError> {
        let manifest = SettlerManifest::load(path)?;
        tracing::debug!(
            path = %path.display(),
            settlers = manifest.settlers.len(),
            "colonist.registry.manifest_loaded"
        );
        Ok(Self::from_manifest(manifest))
    }

    /// Declare a settler type without a factory.
    ///
    /// Declaring an id twice replaces its metadata but keeps its original
    /// discovery position. An id already bound to a shared instance stays
    /// a singleton; redeclaring a factory-bound id as a singleton drops
    /// its factory.
    pub fn declare(&mut self, mut info: SettlerInfo) {
        match self.bindings.get(&info.id).map(Binding::is_shared) {
            Some(true) if !info.singleton => {
                tracing::debug!(settler = %info.id, "colonist.registry.keeps_singleton");
                info.singleton = true;
            }
            Some(false) if info.singleton => {
                tracing::warn!(settler = %info.id, "colonist.registry.factory_dropped");
                self.bindings.remove(&info.id);
            }
            _ => {}
        }
        tracing::debug!(settler = %info.id, "colonist.registry.declare");
        match self.index.get(&info.id) {
            Some(&slot) => self.settlers[slot] = info,
            None => {
                self.index.insert(info.id.clone(), self.settlers.len());
                self.settlers.push(info);
            }
        }
    }

    /// Register a settler constructed through `T::default()`.
    pub fn register<T>(&mut self, info: SettlerInfo)
    where
        T: Default + Any + Send,
    {
        self.register_with(info, || Ok(T::default()));
    }

    /// Register a settler constructed by `factory`.
    ///
    /// A singleton `info` gets no factory: construction reports
    /// [`ProductionError::NoFactory`] until [`bind_singleton`](Self::bind_singleton)
    /// supplies its instance.
    pub fn register_with<T, F>(&mut self, info: SettlerInfo, factory: F)
    where
        T: Any + Send,
        F: Fn() -> Result<T, BoxError> + Send + Sync + 'static,
    {
        let id = info.id.clone();
        let singleton = info.singleton;
        self.declare(info);
        if let Err(err) = self.bind_factory(&id, factory) {
            tracing::warn!(
                settler = %id,
                singleton,
                error = %err,
                "colonist.registry.factory_rejected"
            );
        }
    }

    /// Register a singleton settler. Every construction yields `instance`.
    pub fn register_singleton<T>(&mut self, info: SettlerInfo, instance: Arc<T>)
    where
        T: Any + Send + Sync,
    {
        let id = info.id.clone();
        self.declare(info.as_singleton());
        self.bindings.insert(id, Binding::Shared(instance));
    }

    /// Attach a factory to a previously declared, non-singleton settler.
    pub fn bind_factory<T, F>(&mut self, id: &SettlerId, factory: F) -> Result<(), DiscoveryError>
    where
        T: Any + Send,
        F: Fn() -> Result<T, BoxError> + Send + Sync + 'static,
    {
        let info = self.declared(id)?;
        if info.singleton {
            return Err(DiscoveryError::SingletonFactory(id.clone()));
        }
        let factory: Factory = Arc::new(move || factory().map(Produced::instance));
        self.bindings.insert(id.clone(), Binding::Factory(factory));
        Ok(())
    }

    /// Attach the shared instance to a previously declared settler, marking
    /// it a singleton.
    pub fn bind_singleton<T>(
        &mut self,
        id: &SettlerId,
        instance: Arc<T>,
    ) -> Result<(), DiscoveryError>
    where
        T: Any + Send + Sync,
    {
        let slot = *self
            .index
            .get(id)
            .ok_or_else(|| DiscoveryError::UnknownSettler(id.clone()))?;
        self.settlers[slot].singleton = true;
        self.bindings.insert(id.clone(), Binding::Shared(instance));
        Ok(())
    }

    /// Whether `id` is declared.
    pub fn contains(&self, id: &SettlerId) -> bool {
        self.index.contains_key(id)
    }

    /// Whether `id` has a factory or a shared instance.
    pub fn has_factory(&self, id: &SettlerId) -> bool {
        self.bindings.contains_key(id)
    }

    /// Number of declared settler types.
    pub fn len(&self) -> usize {
        self.settlers.len()
    }

    /// Whether nothing is declared.
    pub fn is_empty(&self) -> bool {
        self.settlers.is_empty()
    }

    fn declared(&self, id: &SettlerId) -> Result<&SettlerInfo, DiscoveryError> {
        self.index
            .get(id)
            .map(|&slot| &self.settlers[slot])
            .ok_or_else(|| DiscoveryError::UnknownSettler(id.clone()))
    }
}

impl std::fmt::Debug for SettlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<&str> = self.settlers.iter().map(|s| s.id.as_str()).collect();
        f.debug_struct("SettlerRegistry")
            .field("settlers", &ids)
            .field("bound", &self.bindings.len())
            .finish()
    }
}

impl DiscoveryScope for SettlerRegistry {
    fn settlers(&self) -> Result<Vec<SettlerInfo>, DiscoveryError> {
        Ok(self.settlers.clone())
    }

    fn settler(&self, id: &SettlerId) -> Result<Option<SettlerInfo>, DiscoveryError> {
        Ok(self.index.get(id).map(|&slot| self.settlers[slot].clone()))
    }
}

impl Constructors for SettlerRegistry {
    fn construct(&self, settler: &SettlerId) -> Result<Produced, ProductionError> {
        let binding = self
            .bindings
            .get(settler)
            .ok_or_else(|| ProductionError::NoFactory(settler.clone()))?;
        tracing::trace!(
            settler = %settler,
            shared = binding.is_shared(),
            "colonist.registry.construct"
        );
        match binding {
            Binding::Shared(instance) => Ok(Produced::Shared(Arc::clone(instance))),
            Binding::Factory(factory) => factory().map_err(|source| ProductionError::Construction {
                settler: settler.clone(),
                source,
            }),
        }
    }
}
