//! Visibility tracker: derives the single active section from intersection batches.
//!
//! The tracker subscribes every tracked id that the registry can currently resolve, then waits
//! for batches. Within a batch, entries apply in host order and the last intersecting entry
//! owned by a registered id wins. The active id changes only here; navigation never sets it.
//!
//! When the tracked ids or the registry change, every observation is torn down and rebuilt from
//! a fresh registry snapshot. Batches whose sequence is not newer than the last applied one are
//! dropped.

use crate::document::NodeHandle;
use crate::error::NavError;
use crate::observe::{AttentionWindow, IntersectionBatch, ObservationService};
use crate::registry::SectionRegistry;
use crate::section::SectionId;
use crate::watch::{self, Publisher, Subscriber};

/// Maintains the active section id for one navigation scope.
pub struct VisibilityTracker<S> {
    service: S,
    window: AttentionWindow,
    registry: SectionRegistry,
    ids: Vec<SectionId>,
    observed: Vec<(SectionId, NodeHandle)>,
    subscribed_revision: Option<u64>,
    last_sequence: Option<u64>,
    active: Publisher<Option<SectionId>>,
}

impl<S: ObservationService> VisibilityTracker<S> {
    /// Creates a tracker over `registry` that observes through `service`.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::ObservationUnsupported`] if the host cannot observe intersections.
    pub fn new(
        service: S,
        window: AttentionWindow,
        registry: SectionRegistry,
    ) -> Result<Self, NavError> {
        if !service.is_supported() {
            return Err(NavError::ObservationUnsupported);
        }
        let (active, _) = watch::channel(None);
        Ok(Self {
            service,
            window,
            registry,
            ids: Vec::new(),
            observed: Vec::new(),
            subscribed_revision: None,
            last_sequence: None,
            active,
        })
    }

    /// Tracks `ids` in order and returns a subscriber to the active id.
    ///
    /// An empty list is not an error; nothing is observed until ids arrive.
    ///
    /// # Errors
    ///
    /// Propagates a failure of the observation service.
    pub fn track(
        &mut self,
        ids: impl IntoIterator<Item = SectionId>,
    ) -> Result<Subscriber<Option<SectionId>>, NavError> {
        let ids: Vec<SectionId> = ids.into_iter().collect();
        if ids != self.ids {
            self.ids = ids;
            self.subscribed_revision = None;
        }
        self.refresh()?;
        Ok(self.active.subscribe())
    }

    /// Re-subscribes against the current registry if it changed since the last subscription.
    ///
    /// Returns whether a re-subscription happened.
    ///
    /// # Errors
    ///
    /// Propagates a failure of the observation service.
    pub fn refresh(&mut self) -> Result<bool, NavError> {
        let revision = self.registry.revision();
        if self.subscribed_revision == Some(revision) {
            return Ok(false);
        }
        self.service.disconnect();
        self.observed.clear();
        self.subscribed_revision = Some(revision);

        let snapshot = self.registry.snapshot();
        self.observed = self
            .ids
            .iter()
            .filter_map(|id| snapshot.get(id).map(|handle| (id.clone(), *handle)))
            .collect();
        tracing::debug!(
            tracked = self.ids.len(),
            observed = self.observed.len(),
            revision,
            "re-subscribed"
        );
        if self.observed.is_empty() {
            return Ok(true);
        }
        let targets: Vec<NodeHandle> = self.observed.iter().map(|(_, handle)| *handle).collect();
        self.service.observe(&targets, self.window)?;
        Ok(true)
    }

    /// Applies every batch the service has queued. Returns whether the active id changed.
    pub fn pump(&mut self) -> bool {
        let mut changed = false;
        for batch in self.service.take_batches() {
            changed |= self.apply_batch(&batch);
        }
        changed
    }

    /// Applies one batch. Returns whether the active id changed.
    pub fn apply_batch(&mut self, batch: &IntersectionBatch) -> bool {
        if self.last_sequence.is_some_and(|last| batch.sequence <= last) {
            tracing::debug!(
                sequence = batch.sequence,
                last = self.last_sequence,
                "dropping stale batch"
            );
            return false;
        }
        self.last_sequence = Some(batch.sequence);

        let winner = batch
            .entries
            .iter()
            .filter(|entry| entry.is_intersecting)
            .filter_map(|entry| self.registry.owner_of(entry.node))
            .last();
        match winner {
            Some(id) => self.active.publish(Some(id)),
            None => false,
        }
    }

    #[must_use]
    /// Current active id.
    pub fn active_id(&self) -> Option<SectionId> {
        self.active.get()
    }

    #[must_use]
    /// New subscriber to the active id.
    pub fn subscribe(&self) -> Subscriber<Option<SectionId>> {
        self.active.subscribe()
    }

    #[must_use]
    /// Ids being tracked, in order.
    pub fn tracked(&self) -> &[SectionId] {
        &self.ids
    }

    #[must_use]
    /// Ids with a live observation, paired with the node observed for each.
    pub fn observed(&self) -> &[(SectionId, NodeHandle)] {
        &self.observed
    }

    #[must_use]
    /// The attention window this tracker observes with.
    pub fn window(&self) -> AttentionWindow {
        self.window
    }

    /// Mutable access to the observation service, for hosts that drive measurement.
    pub fn service_mut(&mut self) -> &mut S {
        &mut self.service
    }
}

#[cfg(test)]
#[path = "tests/tracker.rs"]
mod tests;
