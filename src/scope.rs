//! One navigation scope: a live document, its section registry and its visibility tracker.
//!
//! Scopes are constructed explicitly and handed to whoever needs them; nothing here is global.
//! Mounting a page registers every section container under its logical id and re-tracks the
//! page's ids; unmounting detaches each container through the same registration handle it was
//! attached with.

use crate::document::{Document, Node, NodeHandle, NodeKind, ScrollMargin};
use crate::error::NavError;
use crate::input::Page;
use crate::navigator::{Navigator, ScrollHost};
use crate::observe::{AttentionWindow, ObservationService, ViewportObserver};
use crate::registry::{Registration, SectionRegistry};
use crate::resolver::{extract_id, legacy_element_id};
use crate::section::{Anchor, Section, SectionId};
use crate::tracker::VisibilityTracker;
use crate::viewport::Viewport;
use crate::watch::Subscriber;
use std::collections::HashMap;

/// Document, registry and tracker for one scrollable page.
pub struct NavScope<S> {
    document: Document,
    registry: SectionRegistry,
    tracker: VisibilityTracker<S>,
    registrations: HashMap<NodeHandle, Registration>,
    margin: ScrollMargin,
}

impl<S: ObservationService> NavScope<S> {
    /// Builds an empty scope observing through `service`.
    ///
    /// `margin` is given to every section container mounted later.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::ObservationUnsupported`] if the service cannot observe.
    pub fn new(service: S, window: AttentionWindow, margin: ScrollMargin) -> Result<Self, NavError> {
        let registry = SectionRegistry::new();
        let tracker = VisibilityTracker::new(service, window, registry.clone())?;
        Ok(Self {
            document: Document::default(),
            registry,
            tracker,
            registrations: HashMap::new(),
            margin,
        })
    }

    #[must_use]
    /// The live document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    /// The section registry.
    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    #[must_use]
    /// The visibility tracker.
    pub fn tracker(&self) -> &VisibilityTracker<S> {
        &self.tracker
    }

    /// Mutable access to the tracker.
    pub fn tracker_mut(&mut self) -> &mut VisibilityTracker<S> {
        &mut self.tracker
    }

    /// Mounts a section container and registers it under its id.
    pub fn mount_section(&mut self, section: &Section) -> NodeHandle {
        let handle = self.document.mount(Node {
            kind: NodeKind::Section {
                title: section.title.clone(),
                level: section.level,
            },
            element_id: Some(legacy_element_id(section.id.as_str())),
            nav_id: Some(section.id.clone()),
            top: section.line_start,
            height: section.rows(),
            scroll_margin: self.margin,
        });
        let registration = self.registry.register(section.id.clone());
        registration.call(Some(handle));
        self.registrations.insert(handle, registration);
        handle
    }

    /// Mounts an anchor. Anchors are reachable through the resolver but never registered.
    pub fn mount_anchor(&mut self, anchor: &Anchor) -> NodeHandle {
        self.document.mount(Node {
            kind: NodeKind::Anchor,
            element_id: anchor.element_id.clone(),
            nav_id: anchor.nav_id.clone(),
            top: anchor.line,
            height: 1,
            scroll_margin: self.margin,
        })
    }

    /// Unmounts a node, detaching its registration if it had one.
    pub fn unmount(&mut self, handle: NodeHandle) -> Option<Node> {
        let node = self.document.unmount(handle);
        if let Some(registration) = self.registrations.remove(&handle) {
            registration.call(None);
        }
        node
    }

    /// Unmounts every node.
    pub fn unmount_all(&mut self) {
        let handles: Vec<NodeHandle> = self
            .document
            .nodes_in_order()
            .into_iter()
            .map(|(handle, _)| handle)
            .collect();
        for handle in handles {
            self.unmount(handle);
        }
    }

    /// Replaces whatever is mounted with `page` and tracks its section ids in order.
    ///
    /// # Errors
    ///
    /// Propagates a failure of the observation service.
    pub fn mount_page(&mut self, page: &Page) -> Result<Subscriber<Option<SectionId>>, NavError> {
        self.unmount_all();
        self.document.set_rows(page.rows());
        for section in &page.sections {
            self.mount_section(section);
        }
        for anchor in &page.anchors {
            self.mount_anchor(anchor);
        }
        self.tracker
            .track(page.sections.iter().map(|section| section.id.clone()))
    }

    /// Scrolls `host` to `id`. Returns false if nothing resolves.
    pub fn scroll_to(&self, id: &str, host: &mut impl ScrollHost) -> bool {
        Navigator::new(&self.registry, &self.document).scroll_to(id, host)
    }

    /// Scrolls `host` to the section a URL fragment names.
    pub fn deep_link(&self, fragment: &str, host: &mut impl ScrollHost) -> bool {
        extract_id(fragment).is_some_and(|id| self.scroll_to(id.as_str(), host))
    }

    #[must_use]
    /// Current active id.
    pub fn active_id(&self) -> Option<SectionId> {
        self.tracker.active_id()
    }
}

impl NavScope<ViewportObserver> {
    /// Brings the tracker up to date with the viewport: re-subscribes if the registry changed,
    /// measures intersections, and applies the batches. Returns whether the active id changed.
    ///
    /// # Errors
    ///
    /// Propagates a failure of the observation service.
    pub fn sync(&mut self, viewport: &Viewport) -> Result<bool, NavError> {
        self.tracker.refresh()?;
        self.tracker
            .service_mut()
            .measure(&self.document, viewport);
        Ok(self.tracker.pump())
    }
}

#[cfg(test)]
#[path = "tests/scope.rs"]
mod tests;
