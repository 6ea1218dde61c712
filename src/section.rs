//! Section representation for tree-sitter parsed documents.
//!
//! A section is a flat division of a document that starts at a heading and runs until the next
//! heading. Each section carries a logical identifier, a stable token that the navigation layer
//! uses to find it again regardless of how the markup names its containers.

use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
/// Opaque token naming a logical section, e.g. `pricing`.
pub struct SectionId(String);

impl SectionId {
    #[must_use]
    /// The token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SectionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SectionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Clone, Debug)]
/// Heading-delimited division with the coordinates needed to lay it out.
pub struct Section {
    /// Logical identifier derived from the heading text.
    pub id: SectionId,
    /// Section heading text without markup symbols.
    pub title: String,
    /// Heading depth (1 for `#`), used only for display.
    pub level: usize,
    /// Line of the heading (0-indexed).
    pub line_start: u32,
    /// Line where the next section begins or file ends.
    pub line_end: u32,
}

impl Section {
    #[must_use]
    /// Number of rows the section occupies, never less than one.
    pub fn rows(&self) -> u32 {
        self.line_end.saturating_sub(self.line_start).max(1)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Untagged or explicitly tagged html anchor found between sections.
pub struct Anchor {
    /// Value of the `id` attribute, if any.
    pub element_id: Option<String>,
    /// Value of the `data-nav-id` attribute, if any.
    pub nav_id: Option<SectionId>,
    /// Line the anchor sits on (0-indexed).
    pub line: u32,
}
