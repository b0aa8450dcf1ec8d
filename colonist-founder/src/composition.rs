use crate::descriptor::CompositionDescriptor;
use crate::founder::ColonyFounder;
use colonist_accept::{CallbackAcceptor, ForgetAcceptor};
use colonist_core::acceptor::Acceptor;
use colonist_core::callback::{AcceptCallback, ProduceCallback};
use colonist_core::composition::{AcceptanceMode, CompositionSpec, GroupSpec, ProductionMode};
use colonist_core::error::{CallbackKind, CompositionError};
use colonist_core::id::{ColonyId, Marker};
use colonist_core::producer::Producer;
use colonist_core::scope::{Constructors, DiscoveryScope};
use colonist_core::selector::{SelectionContext, Selector};
use colonist_produce::{CallbackProducer, ConstructProducer, IdentityProducer};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

enum Group<C> {
    Explicit(CompositionDescriptor<C>),
    Declared(GroupSpec),
}

impl<C> Group<C> {
    fn marker(&self) -> &Marker {
        match self {
            Group::Explicit(descriptor) => descriptor.marker(),
            Group::Declared(spec) => &spec.marker,
        }
    }
}

#[derive(Clone)]
struct Scope {
    discovery: Arc<dyn DiscoveryScope>,
    constructors: Arc<dyn Constructors>,
}

/// Builder for one colony type's founder.
///
/// Groups come in two flavors that can be mixed freely:
/// - explicit: strategy objects passed to [`group`](Self::group)
/// - declared: a [`GroupSpec`] resolved at [`build`](Self::build) time
///   against the scope given to [`with_scope`](Self::with_scope) and the
///   callbacks registered with [`on_produce`](Self::on_produce) /
///   [`on_accept`](Self::on_accept)
///
/// ```ignore
/// let founder = Composition::<Anthill>::new()
///     .with_scope(registry)
///     .on_accept("workers", Callback::bound(Anthill::accept_worker))
///     .group_spec(GroupSpec::new(
///         "workers",
///         SelectorSpec::ByMarker { marker: "ant".into() },
///         ProductionMode::Construct,
///         AcceptanceMode::Callback,
///     ))
///     .build()?;
/// ```
pub struct Composition<C> {
    colony: ColonyId,
    scope: Option<Scope>,
    groups: Vec<Group<C>>,
    produce_callbacks: Vec<(Marker, ProduceCallback<C>)>,
    accept_callbacks: Vec<(Marker, AcceptCallback<C>)>,
}

impl<C: 'static> Composition<C> {
    /// Start composing `C`, identified by its type name.
    pub fn new() -> Self {
        Self::named(ColonyId::of::<C>())
    }

    /// Start composing `C` under an explicit identity.
    pub fn named(colony: impl Into<ColonyId>) -> Self {
        Self {
            colony: colony.into(),
            scope: None,
            groups: Vec::new(),
            produce_callbacks: Vec::new(),
            accept_callbacks: Vec::new(),
        }
    }

    /// Start from a declarative composition. Its groups are appended in order.
    pub fn from_spec(spec: CompositionSpec) -> Self {
        let mut composition = match spec.colony {
            Some(colony) => Self::named(colony),
            None => Self::new(),
        };
        for group in spec.groups {
            composition = composition.group_spec(group);
        }
        composition
    }

    /// Parse a JSON composition and start from it.
    pub fn from_json(json: &str) -> Result<Self, CompositionError> {
        CompositionSpec::from_json(json).map(Self::from_spec)
    }

    /// The scope declared groups select from and construct with.
    pub fn with_scope<S>(mut self, scope: Arc<S>) -> Self
    where
        S: DiscoveryScope + Constructors + 'static,
    {
        self.scope = Some(Scope {
            discovery: Arc::clone(&scope) as Arc<dyn DiscoveryScope>,
            constructors: scope as Arc<dyn Constructors>,
        });
        self
    }

    /// Register the colony's produce callback for group `marker`.
    pub fn on_produce(mut self, marker: impl Into<Marker>, callback: ProduceCallback<C>) -> Self {
        self.produce_callbacks.push((marker.into(), callback));
        self
    }

    /// Register the colony's accept callback for group `marker`.
    pub fn on_accept(mut self, marker: impl Into<Marker>, callback: AcceptCallback<C>) -> Self {
        self.accept_callbacks.push((marker.into(), callback));
        self
    }

    /// Declare a group from explicit strategy objects.
    pub fn group(
        mut self,
        marker: impl Into<Marker>,
        selector: Arc<dyn Selector>,
        producer: Arc<dyn Producer<C>>,
        acceptor: Arc<dyn Acceptor<C>>,
    ) -> Self {
        self.groups.push(Group::Explicit(CompositionDescriptor::new(
            marker, selector, producer, acceptor,
        )));
        self
    }

    /// Declare a group from a [`GroupSpec`].
    pub fn group_spec(mut self, spec: GroupSpec) -> Self {
        self.groups.push(Group::Declared(spec));
        self
    }

    /// Declare a group from a prepared descriptor, alternative strategies
    /// included.
    pub fn descriptor(mut self, descriptor: CompositionDescriptor<C>) -> Self {
        self.groups.push(Group::Explicit(descriptor));
        self
    }

    /// Validate and freeze the composition.
    ///
    /// Declared groups are selected once against the scope so that
    /// settlers overriding their group's strategies are resolved here:
    /// a settler asking for a callback the colony doesn't register fails
    /// the build with [`CompositionError::MissingCallback`].
    pub fn build(self) -> Result<ColonyFounder<C>, CompositionError> {
        self.check_unique_groups()?;
        let produce = unique_callbacks(&self.colony, self.produce_callbacks, CallbackKind::Produce)?;
        let accept = unique_callbacks(&self.colony, self.accept_callbacks, CallbackKind::Accept)?;

        let mut strategies = Strategies {
            colony: &self.colony,
            produce: &produce,
            accept: &accept,
            used_produce: HashSet::new(),
            used_accept: HashSet::new(),
        };
        let mut descriptors = Vec::with_capacity(self.groups.len());

        for group in self.groups {
            let descriptor = match group {
                Group::Explicit(descriptor) => descriptor,
                Group::Declared(spec) => {
                    let scope = self.scope.as_ref().ok_or_else(|| {
                        CompositionError::Malformed(format!(
                            "group {} of colony {} is declared but the composition has no scope",
                            spec.marker, self.colony
                        ))
                    })?;
                    strategies.declared(spec, scope)?
                }
            };
            descriptors.push(descriptor);
        }

        check_all_used(&self.colony, &produce, &strategies.used_produce, CallbackKind::Produce)?;
        check_all_used(&self.colony, &accept, &strategies.used_accept, CallbackKind::Accept)?;

        tracing::debug!(
            colony = %self.colony,
            groups = descriptors.len(),
            "colonist.composition.built"
        );
        Ok(ColonyFounder::new(self.colony, descriptors))
    }

    fn check_unique_groups(&self) -> Result<(), CompositionError> {
        let mut seen = HashSet::new();
        for group in &self.groups {
            if !seen.insert(group.marker()) {
                return Err(CompositionError::DuplicateGroup {
                    colony: self.colony.clone(),
                    group: group.marker().clone(),
                });
            }
        }
        Ok(())
    }
}

impl<C> fmt::Debug for Composition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups: Vec<&Marker> = self.groups.iter().map(Group::marker).collect();
        f.debug_struct("Composition")
            .field("colony", &self.colony)
            .field("groups", &groups)
            .field("has_scope", &self.scope.is_some())
            .finish_non_exhaustive()
    }
}

impl<C: 'static> Default for Composition<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves declared groups into strategy objects, tracking which
/// callbacks some group or settler consumed.
struct Strategies<'a, C> {
    colony: &'a ColonyId,
    produce: &'a [(Marker, ProduceCallback<C>)],
    accept: &'a [(Marker, AcceptCallback<C>)],
    used_produce: HashSet<Marker>,
    used_accept: HashSet<Marker>,
}

impl<C: 'static> Strategies<'_, C> {
    fn declared(
        &mut self,
        spec: GroupSpec,
        scope: &Scope,
    ) -> Result<CompositionDescriptor<C>, CompositionError> {
        let selector = colonist_select::from_spec(&spec.selector, Arc::clone(&scope.discovery))
            .map_err(|source| CompositionError::InvalidSelector {
                group: spec.marker.clone(),
                source,
            })?;

        let (alt_producers, alt_acceptors) = self.overrides(&spec, selector.as_ref());

        let producer = self.producer(&spec.marker, spec.producer, scope)?;
        let acceptor = self.acceptor(&spec.marker, spec.acceptor)?;
        let mut descriptor =
            CompositionDescriptor::new(spec.marker.clone(), selector, producer, acceptor);
        for mode in alt_producers {
            descriptor = descriptor.with_alt_producer(self.producer(&spec.marker, mode, scope)?);
        }
        for mode in alt_acceptors {
            descriptor = descriptor.with_alt_acceptor(self.acceptor(&spec.marker, mode)?);
        }
        Ok(descriptor)
    }

    /// Modes the group's settlers ask for instead of the group's own, in
    /// first-seen order.
    fn overrides(
        &self,
        spec: &GroupSpec,
        selector: &dyn Selector,
    ) -> (Vec<ProductionMode>, Vec<AcceptanceMode>) {
        let ctx = SelectionContext {
            colony: self.colony,
            group: &spec.marker,
            production: spec.producer,
        };
        let candidates = match selector.select(&ctx) {
            Ok(candidates) => candidates,
            Err(err) => {
                // Settling this group reports the same discovery failure.
                tracing::debug!(
                    group = %spec.marker,
                    error = %err,
                    "colonist.composition.select_failed"
                );
                return (Vec::new(), Vec::new());
            }
        };

        let mut producers = Vec::new();
        let mut acceptors = Vec::new();
        for candidate in &candidates {
            let production = candidate.production(spec.producer);
            if production != spec.producer && !producers.contains(&production) {
                tracing::debug!(
                    group = %spec.marker,
                    settler = %candidate.id,
                    producer = %production,
                    "colonist.composition.producer_override"
                );
                producers.push(production);
            }
            let acceptance = candidate.acceptance(spec.acceptor);
            if acceptance != spec.acceptor && !acceptors.contains(&acceptance) {
                tracing::debug!(
                    group = %spec.marker,
                    settler = %candidate.id,
                    acceptor = %acceptance,
                    "colonist.composition.acceptor_override"
                );
                acceptors.push(acceptance);
            }
        }
        (producers, acceptors)
    }

    fn producer(
        &mut self,
        group: &Marker,
        mode: ProductionMode,
        scope: &Scope,
    ) -> Result<Arc<dyn Producer<C>>, CompositionError> {
        match mode {
            ProductionMode::Construct => Ok(Arc::new(ConstructProducer::new(Arc::clone(
                &scope.constructors,
            )))),
            ProductionMode::Callback => {
                let callback = find_callback(self.produce, group).ok_or_else(|| {
                    CompositionError::MissingCallback {
                        colony: self.colony.clone(),
                        group: group.clone(),
                        kind: CallbackKind::Produce,
                    }
                })?;
                self.used_produce.insert(group.clone());
                Ok(Arc::new(CallbackProducer::new(callback)))
            }
            ProductionMode::Identity => Ok(Arc::new(IdentityProducer)),
            other => Err(CompositionError::Malformed(format!(
                "unsupported production mode {other}"
            ))),
        }
    }

    fn acceptor(
        &mut self,
        group: &Marker,
        mode: AcceptanceMode,
    ) -> Result<Arc<dyn Acceptor<C>>, CompositionError> {
        match mode {
            AcceptanceMode::Callback => {
                let callback = find_callback(self.accept, group).ok_or_else(|| {
                    CompositionError::MissingCallback {
                        colony: self.colony.clone(),
                        group: group.clone(),
                        kind: CallbackKind::Accept,
                    }
                })?;
                self.used_accept.insert(group.clone());
                Ok(Arc::new(CallbackAcceptor::new(callback)))
            }
            AcceptanceMode::Forget => Ok(Arc::new(ForgetAcceptor)),
            other => Err(CompositionError::Malformed(format!(
                "unsupported acceptance mode {other}"
            ))),
        }
    }
}

/// At most one callback of each kind per group.
fn unique_callbacks<T>(
    colony: &ColonyId,
    callbacks: Vec<(Marker, T)>,
    kind: CallbackKind,
) -> Result<Vec<(Marker, T)>, CompositionError> {
    let mut seen = HashSet::new();
    for (marker, _) in &callbacks {
        if !seen.insert(marker) {
            return Err(CompositionError::DuplicateCallback {
                colony: colony.clone(),
                group: marker.clone(),
                kind,
            });
        }
    }
    Ok(callbacks)
}

fn find_callback<T: Clone>(callbacks: &[(Marker, T)], marker: &Marker) -> Option<T> {
    callbacks
        .iter()
        .find(|(m, _)| m == marker)
        .map(|(_, callback)| callback.clone())
}

/// Every registered callback must be consumed by some declared group.
fn check_all_used<T>(
    colony: &ColonyId,
    callbacks: &[(Marker, T)],
    used: &HashSet<Marker>,
    kind: CallbackKind,
) -> Result<(), CompositionError> {
    match callbacks.iter().find(|(marker, _)| !used.contains(marker)) {
        Some((marker, _)) => Err(CompositionError::OrphanCallback {
            colony: colony.clone(),
            group: marker.clone(),
            kind,
        }),
        None => Ok(()),
    }
}
