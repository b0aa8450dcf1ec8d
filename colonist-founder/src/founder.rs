use crate::descriptor::CompositionDescriptor;
use colonist_core::error::{CompositionError, SettleError};
use colonist_core::founder::Founder;
use colonist_core::id::{ColonyId, Marker};
use colonist_core::selector::SelectionContext;
use std::any::Any;
use std::fmt;

/// The composed founder for colony type `C`.
///
/// Built by [`Composition::build`](crate::Composition::build). Holds no
/// per-call state: every `found` selects fresh candidates, and nothing
/// produced outlives the acceptance step unless the colony keeps it.
pub struct ColonyFounder<C> {
    colony: ColonyId,
    descriptors: Vec<CompositionDescriptor<C>>,
}

impl<C: 'static> ColonyFounder<C> {
    pub(crate) fn new(colony: ColonyId, descriptors: Vec<CompositionDescriptor<C>>) -> Self {
        Self {
            colony,
            descriptors,
        }
    }

    /// Declared groups, in declaration order.
    pub fn descriptors(&self) -> &[CompositionDescriptor<C>] {
        &self.descriptors
    }

    /// Settle `colony`: every group, or only the one named by `filter`.
    ///
    /// A filter naming no declared group processes nothing and succeeds.
    pub fn found_typed(&self, colony: &mut C, filter: Option<&Marker>) -> Result<(), SettleError> {
        let span = tracing::info_span!(
            "colonist.found",
            colony = %self.colony,
            filter = filter.map(Marker::as_str),
        );
        let _enter = span.enter();

        let mut processed = 0usize;
        for descriptor in self
            .descriptors
            .iter()
            .filter(|d| filter.is_none_or(|marker| d.marker() == marker))
        {
            self.settle_group(colony, descriptor)?;
            processed += 1;
        }

        if processed == 0 && filter.is_some() {
            tracing::debug!("colonist.found.no_matching_group");
        }
        Ok(())
    }

    fn settle_group(
        &self,
        colony: &mut C,
        descriptor: &CompositionDescriptor<C>,
    ) -> Result<(), SettleError> {
        let group = descriptor.marker();
        let ctx = SelectionContext {
            colony: &self.colony,
            group,
            production: descriptor.producer().mode(),
        };

        let candidates = descriptor
            .selector()
            .select(&ctx)
            .map_err(|source| SettleError::Discovery {
                group: group.clone(),
                source,
            })?;
        tracing::debug!(
            group = %group,
            selector = %descriptor.selector().describe(),
            producer = %descriptor.producer().mode(),
            acceptor = %descriptor.acceptor().mode(),
            candidates = candidates.len(),
            "colonist.group.start"
        );

        for candidate in &candidates {
            let value = descriptor
                .producer_for(candidate)
                .and_then(|producer| producer.produce(colony, candidate))
                .map_err(|source| SettleError::Production {
                    group: group.clone(),
                    settler: candidate.id.clone(),
                    source,
                })?;
            descriptor
                .acceptor_for(candidate)
                .and_then(|acceptor| acceptor.accept(colony, candidate, value))
                .map_err(|source| SettleError::Acceptance {
                    group: group.clone(),
                    settler: candidate.id.clone(),
                    source,
                })?;
            tracing::trace!(group = %group, settler = %candidate.id, "colonist.settler.settled");
        }

        tracing::debug!(group = %group, settled = candidates.len(), "colonist.group.done");
        Ok(())
    }
}

impl<C: 'static> Founder for ColonyFounder<C> {
    fn colony(&self) -> &ColonyId {
        &self.colony
    }

    fn groups(&self) -> Vec<Marker> {
        self.descriptors.iter().map(|d| d.marker().clone()).collect()
    }

    fn found(&self, colony: &mut dyn Any, filter: Option<&Marker>) -> Result<(), SettleError> {
        let colony =
            colony
                .downcast_mut::<C>()
                .ok_or_else(|| CompositionError::ColonyMismatch {
                    expected: self.colony.clone(),
                })?;
        self.found_typed(colony, filter)
    }
}

impl<C> fmt::Debug for ColonyFounder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColonyFounder")
            .field("colony", &self.colony)
            .field("descriptors", &self.descriptors)
            .finish()
    }
}
