use colonist_core::acceptor::Acceptor;
use colonist_core::error::{AcceptanceError, ProductionError};
use colonist_core::id::Marker;
use colonist_core::producer::Producer;
use colonist_core::selector::Selector;
use colonist_core::settler::Candidate;
use std::fmt;
use std::sync::Arc;

/// One strategy group on a colony type: a marker plus exactly one
/// selector, one producer and one acceptor.
///
/// A group may also hold alternative producers and acceptors for settlers
/// that override the group's strategies. Immutable once built.
pub struct CompositionDescriptor<C> {
    marker: Marker,
    selector: Arc<dyn Selector>,
    producer: Arc<dyn Producer<C>>,
    acceptor: Arc<dyn Acceptor<C>>,
    alt_producers: Vec<Arc<dyn Producer<C>>>,
    alt_acceptors: Vec<Arc<dyn Acceptor<C>>>,
}

impl<C> CompositionDescriptor<C> {
    /// Bind a group's strategies.
    pub fn new(
        marker: impl Into<Marker>,
        selector: Arc<dyn Selector>,
        producer: Arc<dyn Producer<C>>,
        acceptor: Arc<dyn Acceptor<C>>,
    ) -> Self {
        Self {
            marker: marker.into(),
            selector,
            producer,
            acceptor,
            alt_producers: Vec::new(),
            alt_acceptors: Vec::new(),
        }
    }

    /// Offer `producer` to settlers overriding the group's production mode
    /// with `producer.mode()`. A later producer for the same mode replaces
    /// an earlier one.
    pub fn with_alt_producer(mut self, producer: Arc<dyn Producer<C>>) -> Self {
        let mode = producer.mode();
        self.alt_producers.retain(|p| p.mode() != mode);
        self.alt_producers.push(producer);
        self
    }

    /// Offer `acceptor` to settlers overriding the group's acceptance mode
    /// with `acceptor.mode()`. A later acceptor for the same mode replaces
    /// an earlier one.
    pub fn with_alt_acceptor(mut self, acceptor: Arc<dyn Acceptor<C>>) -> Self {
        let mode = acceptor.mode();
        self.alt_acceptors.retain(|a| a.mode() != mode);
        self.alt_acceptors.push(acceptor);
        self
    }

    /// The group's marker.
    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    /// The group's selector.
    pub fn selector(&self) -> &Arc<dyn Selector> {
        &self.selector
    }

    /// The group's producer.
    pub fn producer(&self) -> &Arc<dyn Producer<C>> {
        &self.producer
    }

    /// The group's acceptor.
    pub fn acceptor(&self) -> &Arc<dyn Acceptor<C>> {
        &self.acceptor
    }

    /// The producer `candidate` is settled with: the group's own, unless
    /// the candidate overrides it with another mode.
    pub fn producer_for(
        &self,
        candidate: &Candidate,
    ) -> Result<&Arc<dyn Producer<C>>, ProductionError> {
        let mode = candidate.production(self.producer.mode());
        if mode == self.producer.mode() {
            return Ok(&self.producer);
        }
        self.alt_producers
            .iter()
            .find(|p| p.mode() == mode)
            .ok_or_else(|| ProductionError::NoStrategy {
                settler: candidate.id.clone(),
                mode,
            })
    }

    /// The acceptor `candidate` is settled with: the group's own, unless
    /// the candidate overrides it with another mode.
    pub fn acceptor_for(
        &self,
        candidate: &Candidate,
    ) -> Result<&Arc<dyn Acceptor<C>>, AcceptanceError> {
        let mode = candidate.acceptance(self.acceptor.mode());
        if mode == self.acceptor.mode() {
            return Ok(&self.acceptor);
        }
        self.alt_acceptors
            .iter()
            .find(|a| a.mode() == mode)
            .ok_or_else(|| AcceptanceError::NoStrategy {
                settler: candidate.id.clone(),
                mode,
            })
    }
}

impl<C> Clone for CompositionDescriptor<C> {
    fn clone(&self) -> Self {
        Self {
            marker: self.marker.clone(),
            selector: Arc::clone(&self.selector),
            producer: Arc::clone(&self.producer),
            acceptor: Arc::clone(&self.acceptor),
            alt_producers: self.alt_producers.clone(),
            alt_acceptors: self.alt_acceptors.clone(),
        }
    }
}

impl<C> fmt::Debug for CompositionDescriptor<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositionDescriptor")
            .field("marker", &self.marker)
            .field("selector", &self.selector.describe())
            .field("producer", &self.producer.mode())
            .field("acceptor", &self.acceptor.mode())
            .field(
                "alt_producers",
                &self.alt_producers.iter().map(|p| p.mode()).collect::<Vec<_>>(),
            )
            .field(
                "alt_acceptors",
                &self.alt_acceptors.iter().map(|a| a.mode()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
