//! Viewport intersection observation.
//!
//! The tracker never measures geometry itself: it asks an [`ObservationService`] to watch a set
//! of nodes against an [`AttentionWindow`] and consumes the batches of intersection changes the
//! service reports. [`ViewportObserver`] is the geometric implementation used by the terminal
//! host; tests drive the tracker with scripted batches instead.

use crate::document::{Document, NodeHandle};
use crate::error::NavError;
use crate::viewport::Viewport;
use std::collections::{HashMap, VecDeque};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Band of the viewport that counts as "in view", as insets from its top and bottom edges.
pub struct AttentionWindow {
    top_percent: u8,
    bottom_percent: u8,
}

impl AttentionWindow {
    /// Builds a window from percentage insets.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::InvalidAttentionWindow`] if the insets leave no band.
    pub fn new(top_percent: u8, bottom_percent: u8) -> Result<Self, NavError> {
        if u16::from(top_percent) + u16::from(bottom_percent) >= 100 {
            return Err(NavError::InvalidAttentionWindow {
                top: top_percent,
                bottom: bottom_percent,
            });
        }
        Ok(Self {
            top_percent,
            bottom_percent,
        })
    }

    #[must_use]
    /// Inset from the top edge, in percent.
    pub fn top_percent(&self) -> u8 {
        self.top_percent
    }

    #[must_use]
    /// Inset from the bottom edge, in percent.
    pub fn bottom_percent(&self) -> u8 {
        self.bottom_percent
    }

    #[must_use]
    /// Band rows relative to the top of a viewport `height` rows tall, as `start..end`.
    ///
    /// The insets sum to less than 100%, so the band is at least one row whenever the viewport
    /// has any rows.
    pub fn band(&self, height: u32) -> (u32, u32) {
        let start = height * u32::from(self.top_percent) / 100;
        let end = height - height * u32::from(self.bottom_percent) / 100;
        (start, end)
    }
}

impl Default for AttentionWindow {
    fn default() -> Self {
        Self {
            top_percent: 10,
            bottom_percent: 60,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// One node's intersection state change.
pub struct IntersectionEntry {
    /// Observed node.
    pub node: NodeHandle,
    /// Whether the node now overlaps the attention window.
    pub is_intersecting: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Entries delivered together in one callback, in host order.
pub struct IntersectionBatch {
    /// Monotonic sequence number assigned by the service.
    pub sequence: u64,
    /// Changes in the order the host reported them.
    pub entries: Vec<IntersectionEntry>,
}

/// Host capability that reports when observed nodes enter or leave the attention window.
pub trait ObservationService {
    /// Whether the host can observe intersections at all.
    fn is_supported(&self) -> bool {
        true
    }

    /// Adds `targets` to the observed set, measured against `window`. Earlier targets stay
    /// observed until [`disconnect`](Self::disconnect).
    ///
    /// # Errors
    ///
    /// Returns [`NavError::ObservationUnsupported`] if the host cannot observe.
    fn observe(&mut self, targets: &[NodeHandle], window: AttentionWindow) -> Result<(), NavError>;

    /// Stops observing every target.
    fn disconnect(&mut self);

    /// Batches reported since the last call, oldest first.
    fn take_batches(&mut self) -> Vec<IntersectionBatch>;
}

#[derive(Default)]
/// Computes intersections from document geometry and the viewport's scroll offset.
///
/// The first measurement after `observe` reports every live target; later measurements report
/// only targets whose state flipped. Targets that were unmounted are dropped without an entry.
pub struct ViewportObserver {
    targets: Vec<NodeHandle>,
    window: Option<AttentionWindow>,
    states: HashMap<NodeHandle, bool>,
    pending: VecDeque<IntersectionBatch>,
    next_sequence: u64,
}

impl ViewportObserver {
    #[must_use]
    /// Observer with no targets.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    /// Targets currently observed.
    pub fn targets(&self) -> &[NodeHandle] {
        &self.targets
    }

    /// Measures every target against the viewport and queues a batch if anything changed.
    ///
    /// Returns whether a batch was queued.
    pub fn measure(&mut self, document: &Document, viewport: &Viewport) -> bool {
        let Some(window) = self.window else {
            return false;
        };
        let (band_start, band_end) = window.band(viewport.height());
        let band_start = viewport.offset() + band_start;
        let band_end = viewport.offset() + band_end;

        let mut entries = Vec::new();
        self.targets.retain(|handle| document.contains(*handle));
        self.states.retain(|handle, _| document.contains(*handle));
        for handle in &self.targets {
            let Some(node) = document.get(*handle) else {
                continue;
            };
            let is_intersecting = node.top < band_end && node.bottom() > band_start;
            if self.states.insert(*handle, is_intersecting) != Some(is_intersecting) {
                entries.push(IntersectionEntry {
                    node: *handle,
                    is_intersecting,
                });
            }
        }

        if entries.is_empty() {
            return false;
        }
        self.pending.push_back(IntersectionBatch {
            sequence: self.next_sequence,
            entries,
        });
        self.next_sequence += 1;
        true
    }
}

impl ObservationService for ViewportObserver {
    fn observe(&mut self, targets: &[NodeHandle], window: AttentionWindow) -> Result<(), NavError> {
        self.window = Some(window);
        for handle in targets {
            if !self.targets.contains(handle) {
                self.targets.push(*handle);
            }
        }
        Ok(())
    }

    fn disconnect(&mut self) {
        self.targets.clear();
        self.states.clear();
        self.window = None;
    }

    fn take_batches(&mut self) -> Vec<IntersectionBatch> {
        self.pending.drain(..).collect()
    }
}

#[cfg(test)]
#[path = "tests/observe.rs"]
mod tests;
