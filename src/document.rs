//! The live document: every node currently mounted in the viewport, with its geometry.
//!
//! Nodes are addressed by [`NodeHandle`]s that are never reused, so a handle held after its node
//! was unmounted can be detected (`contains` returns false) instead of silently aliasing a newer
//! node.

use crate::section::SectionId;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Opaque handle to a mounted node.
pub struct NodeHandle(u64);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Rows a programmatic scroll keeps around a section when it comes to rest.
pub struct ScrollMargin {
    /// Rows left above the node's top edge.
    pub top: u32,
    /// Rows of the node kept visible below its top edge on short viewports.
    pub bottom: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// What a node represents.
pub enum NodeKind {
    /// Container rendered for one section.
    Section {
        /// Heading text.
        title: String,
        /// Heading depth.
        level: usize,
    },
    /// Bare anchor with no content of its own.
    Anchor,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A mounted element and the attributes the resolver can match on.
pub struct Node {
    /// Section container or anchor.
    pub kind: NodeKind,
    /// Element identifier, e.g. `section-pricing`.
    pub element_id: Option<String>,
    /// Machine-readable nav-id attribute.
    pub nav_id: Option<SectionId>,
    /// First row of the node in document coordinates.
    pub top: u32,
    /// Rows the node spans.
    pub height: u32,
    /// Scroll-stop margins for programmatic scrolls to this node.
    pub scroll_margin: ScrollMargin,
}

impl Node {
    #[must_use]
    /// One past the last row of the node.
    pub fn bottom(&self) -> u32 {
        self.top.saturating_add(self.height)
    }
}

#[derive(Default)]
/// Mounted nodes plus the total content height.
pub struct Document {
    nodes: BTreeMap<NodeHandle, Node>,
    next_handle: u64,
    rows: u32,
}

impl Document {
    #[must_use]
    /// Empty document with the given content height.
    pub fn new(rows: u32) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    #[must_use]
    /// Total content height in rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Updates the content height after the underlying text changed.
    pub fn set_rows(&mut self, rows: u32) {
        self.rows = rows;
    }

    /// Mounts a node and returns a fresh handle for it.
    pub fn mount(&mut self, node: Node) -> NodeHandle {
        let handle = NodeHandle(self.next_handle);
        self.next_handle += 1;
        self.nodes.insert(handle, node);
        handle
    }

    /// Removes a node, returning it if it was mounted.
    pub fn unmount(&mut self, handle: NodeHandle) -> Option<Node> {
        self.nodes.remove(&handle)
    }

    #[must_use]
    /// The node behind a handle, if still mounted.
    pub fn get(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(&handle)
    }

    #[must_use]
    /// Whether the handle refers to a mounted node.
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.nodes.contains_key(&handle)
    }

    #[must_use]
    /// Number of mounted nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    /// Whether nothing is mounted.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    /// Mounted nodes in document order: by top row, then by mount order.
    pub fn nodes_in_order(&self) -> Vec<(NodeHandle, &Node)> {
        let mut nodes: Vec<_> = self.nodes.iter().map(|(h, n)| (*h, n)).collect();
        nodes.sort_by_key(|(handle, node)| (node.top, *handle));
        nodes
    }

    #[must_use]
    /// First node in document order whose nav-id attribute equals `id`.
    pub fn find_by_nav_id(&self, id: &str) -> Option<NodeHandle> {
        self.find(|node| node.nav_id.as_ref().is_some_and(|nav| nav.as_str() == id))
    }

    #[must_use]
    /// First node in document order whose element identifier equals `id`.
    pub fn find_by_element_id(&self, id: &str) -> Option<NodeHandle> {
        self.find(|node| node.element_id.as_deref() == Some(id))
    }

    fn find(&self, predicate: impl Fn(&Node) -> bool) -> Option<NodeHandle> {
        self.nodes_in_order()
            .into_iter()
            .find(|(_, node)| predicate(node))
            .map(|(handle, _)| handle)
    }
}

#[cfg(test)]
#[path = "tests/document.rs"]
mod tests;
