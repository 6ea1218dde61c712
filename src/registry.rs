//! Section registry: which node currently stands for each logical section.
//!
//! Sections register themselves when mounted and detach when unmounted through the same
//! [`Registration`] handle, so there is no separate unregister call. The registry is a cheap
//! cloneable handle over shared state; every clone sees the same mapping.

use crate::document::NodeHandle;
use crate::section::SectionId;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Default)]
struct Entries {
    nodes: HashMap<SectionId, NodeHandle>,
    revision: u64,
}

#[derive(Clone, Default)]
/// Mapping from logical id to the node registered under it.
pub struct SectionRegistry {
    inner: Rc<RefCell<Entries>>,
}

/// Attach-or-detach callback bound to one section id.
pub struct Registration {
    id: SectionId,
    registry: SectionRegistry,
}

impl Registration {
    #[must_use]
    /// The id this handle registers under.
    pub fn id(&self) -> &SectionId {
        &self.id
    }

    /// Attaches `node` under the bound id, or detaches the current association when `None`.
    ///
    /// A later attach replaces an earlier one (last write wins).
    pub fn call(&self, node: Option<NodeHandle>) {
        let mut entries = self.registry.inner.borrow_mut();
        let changed = match node {
            Some(handle) => entries.nodes.insert(self.id.clone(), handle) != Some(handle),
            None => entries.nodes.remove(&self.id).is_some(),
        };
        if changed {
            entries.revision += 1;
            tracing::trace!(id = %self.id, attached = node.is_some(), "registry changed");
        }
    }
}

impl SectionRegistry {
    #[must_use]
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    /// Returns the handle a section calls on mount and unmount.
    pub fn register(&self, id: impl Into<SectionId>) -> Registration {
        Registration {
            id: id.into(),
            registry: self.clone(),
        }
    }

    #[must_use]
    /// Node registered under `id`. Unknown ids are simply absent.
    pub fn get(&self, id: &str) -> Option<NodeHandle> {
        self.inner.borrow().nodes.get(id).copied()
    }

    #[must_use]
    /// Reverse lookup: which id currently owns `node`.
    pub fn owner_of(&self, node: NodeHandle) -> Option<SectionId> {
        self.inner
            .borrow()
            .nodes
            .iter()
            .find(|(_, handle)| **handle == node)
            .map(|(id, _)| id.clone())
    }

    #[must_use]
    /// Copy of the current mapping, detached from later mutation.
    pub fn snapshot(&self) -> HashMap<SectionId, NodeHandle> {
        self.inner.borrow().nodes.clone()
    }

    #[must_use]
    /// Counter bumped on every change to the mapping.
    pub fn revision(&self) -> u64 {
        self.inner.borrow().revision
    }

    #[must_use]
    /// Number of registered sections.
    pub fn len(&self) -> usize {
        self.inner.borrow().nodes.len()
    }

    #[must_use]
    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().nodes.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/registry.rs"]
mod tests;
