//! Programmatic navigation to a named section.
//!
//! The navigator looks the id up in the registry, falls back to the resolver's convention-based
//! rules, and hands the node to a [`ScrollHost`] as a smooth, start-aligned scroll. It does not
//! wait for the scroll to finish and does not touch the active section: that only ever changes
//! when the tracker sees the node arrive in the attention window.

use crate::document::{Document, NodeHandle, ScrollMargin};
use crate::registry::SectionRegistry;
use crate::resolver;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// A request to bring a node's top edge to the block start of the viewport.
pub struct ScrollRequest {
    /// Target node.
    pub node: NodeHandle,
    /// Top row of the node in document coordinates.
    pub top: u32,
    /// The node's scroll-stop margins.
    pub margin: ScrollMargin,
}

/// Something that can animate the viewport towards a node.
pub trait ScrollHost {
    /// Starts a smooth scroll. A call while a previous scroll is in flight retargets it.
    fn scroll_into_view(&mut self, request: ScrollRequest);
}

/// Resolves ids against one registry and document.
pub struct Navigator<'a> {
    registry: &'a SectionRegistry,
    document: &'a Document,
}

impl<'a> Navigator<'a> {
    #[must_use]
    /// Navigator over the given scope.
    pub fn new(registry: &'a SectionRegistry, document: &'a Document) -> Self {
        Self { registry, document }
    }

    #[must_use]
    /// Node for `id`: the registered node if it is still mounted, else the resolver chain.
    pub fn locate(&self, id: &str) -> Option<NodeHandle> {
        self.registry
            .get(id)
            .filter(|handle| self.document.contains(*handle))
            .or_else(|| resolver::resolve(self.document, id))
    }

    /// Scrolls to `id`. Returns false, leaving the viewport alone, if nothing resolves.
    pub fn scroll_to(&self, id: &str, host: &mut impl ScrollHost) -> bool {
        let Some((handle, node)) = self
            .locate(id)
            .and_then(|handle| self.document.get(handle).map(|node| (handle, node)))
        else {
            tracing::debug!(id, "scroll target did not resolve");
            return false;
        };
        host.scroll_into_view(ScrollRequest {
            node: handle,
            top: node.top,
            margin: node.scroll_margin,
        });
        true
    }
}

#[cfg(test)]
#[path = "tests/navigator.rs"]
mod tests;
