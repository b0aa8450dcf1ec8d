#![deny(missing_docs)]
//! The colonist orchestrator.
//!
//! [`Colonist`] keeps one [`Founder`] per colony type in a
//! `HashMap<TypeId, Arc<dyn Founder>>` and settles colonies through it.
//! Fill it at program start, then share it: settling only reads the table,
//! so several threads may settle colonies at once.

use colonist_core::error::{CompositionError, SettleError};
use colonist_core::founder::Founder;
use colonist_core::id::{ColonyId, Marker};
use colonist_founder::ColonyFounder;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

/// Settles colonies through the founders composed for their types.
pub struct Colonist {
    founders: HashMap<TypeId, Arc<dyn Founder>>,
}

impl Colonist {
    /// Create an orchestrator with no composed colony types.
    pub fn new() -> Self {
        Self {
            founders: HashMap::new(),
        }
    }

    /// Add the founder built for colony type `C`.
    pub fn compose<C: Any>(&mut self, founder: ColonyFounder<C>) -> Result<(), CompositionError> {
        self.register::<C>(Arc::new(founder))
    }

    /// Add any founder for colony type `C`.
    ///
    /// `founder` must accept colonies of type `C` in [`Founder::found`].
    pub fn register<C: Any>(&mut self, founder: Arc<dyn Founder>) -> Result<(), CompositionError> {
        let key = TypeId::of::<C>();
        if let Some(existing) = self.founders.get(&key) {
            return Err(CompositionError::DuplicateColony {
                colony: existing.colony().clone(),
            });
        }
        tracing::debug!(
            colony = %founder.colony(),
            groups = founder.groups().len(),
            "colonist.orch.register"
        );
        self.founders.insert(key, founder);
        Ok(())
    }

    /// Settle every group declared on `C`.
    pub fn settle<C: Any>(&self, colony: &mut C) -> Result<(), SettleError> {
        let founder = self.founder_for(TypeId::of::<C>(), ColonyId::of::<C>)?;
        run(founder.as_ref(), colony, None)
    }

    /// Settle only the group of `C` named by `marker`.
    ///
    /// A marker naming no group of `C` settles nothing and succeeds.
    pub fn settle_group<C: Any>(&self, colony: &mut C, marker: &Marker) -> Result<(), SettleError> {
        let founder = self.founder_for(TypeId::of::<C>(), ColonyId::of::<C>)?;
        run(founder.as_ref(), colony, Some(marker))
    }

    /// Settle a colony whose type is only known at runtime.
    pub fn settle_dyn(
        &self,
        colony: &mut dyn Any,
        filter: Option<&Marker>,
    ) -> Result<(), SettleError> {
        let key = (*colony).type_id();
        let founder = self.founder_for(key, || ColonyId::new(format!("{key:?}")))?;
        run(founder.as_ref(), colony, filter)
    }

    /// Whether a founder was composed for `C`.
    pub fn is_composed<C: Any>(&self) -> bool {
        self.founders.contains_key(&TypeId::of::<C>())
    }

    /// The founder composed for `C`, if any.
    pub fn founder<C: Any>(&self) -> Option<Arc<dyn Founder>> {
        self.founders.get(&TypeId::of::<C>()).cloned()
    }

    /// Every composed colony type, sorted by identity.
    pub fn colonies(&self) -> Vec<ColonyId> {
        let mut colonies: Vec<ColonyId> = self
            .founders
            .values()
            .map(|founder| founder.colony().clone())
            .collect();
        colonies.sort();
        colonies
    }

    fn founder_for(
        &self,
        key: TypeId,
        colony: impl FnOnce() -> ColonyId,
    ) -> Result<&Arc<dyn Founder>, CompositionError> {
        self.founders.get(&key).ok_or_else(|| {
            let colony = colony();
            tracing::warn!(colony = %colony, "colonist.orch.no_founder");
            CompositionError::NoFounder { colony }
        })
    }
}

impl Default for Colonist {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Colonist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Colonist")
            .field("colonies", &self.colonies())
            .finish()
    }
}

fn run(
    founder: &dyn Founder,
    colony: &mut dyn Any,
    filter: Option<&Marker>,
) -> Result<(), SettleError> {
    tracing::info!(
        colony = %founder.colony(),
        filter = filter.map(Marker::as_str),
        "colonist.orch.settle"
    );
    founder.found(colony, filter).inspect_err(|err| {
        tracing::warn!(
            colony = %founder.colony(),
            group = err.group().map(Marker::as_str),
            settler = err.settler().map(|s| s.as_str()),
            error = %err,
            "colonist.orch.settle_failed"
        );
    })
}
