//! Turns a logical section id, or a URL fragment, into the node that represents it.
//!
//! Resolution tries, in order:
//!
//! 1. a node whose nav-id attribute equals the id,
//! 2. a node whose element id follows the legacy `section-<id>` convention,
//! 3. a node whose element id is exactly the id.
//!
//! The nav-id binding wins even when the other two would match different nodes: it is the only
//! one that does not depend on how containers happen to be named.

use crate::document::{Document, NodeHandle};
use crate::section::SectionId;

/// Prefix of the legacy element-id convention for section containers.
pub const LEGACY_PREFIX: &str = "section-";

#[must_use]
/// Element id a section container carries under the legacy convention.
pub fn legacy_element_id(id: &str) -> String {
    format!("{LEGACY_PREFIX}{id}")
}

#[must_use]
/// Resolves `id` against the live document, first matching rule wins.
pub fn resolve(document: &Document, id: &str) -> Option<NodeHandle> {
    if id.is_empty() {
        return None;
    }
    document
        .find_by_nav_id(id)
        .or_else(|| document.find_by_element_id(&legacy_element_id(id)))
        .or_else(|| document.find_by_element_id(id))
}

#[must_use]
/// Recovers the logical id from a URL fragment.
///
/// A leading `#` is stripped, then the legacy `section-` prefix if present. Empty fragments
/// yield `None`.
pub fn extract_id(fragment: &str) -> Option<SectionId> {
    let raw = fragment.strip_prefix('#').unwrap_or(fragment);
    let id = raw.strip_prefix(LEGACY_PREFIX).unwrap_or(raw);
    if id.is_empty() {
        None
    } else {
        Some(SectionId::from(id))
    }
}

#[cfg(test)]
#[path = "tests/resolver.rs"]
mod tests;
