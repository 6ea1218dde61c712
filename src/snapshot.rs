//! Serialisable summary of a navigation session, printed on exit with `--dump`.
//!
//! This lets scripts see which section the reader ended on and how the page was split up
//! without scraping the terminal.

use crate::section::{Section, SectionId};
use serde::Serialize;

#[derive(Serialize, Clone, Debug)]
/// Final navigation state of one document.
pub struct NavSnapshot {
    /// Document that was navigated.
    pub path: String,
    /// Section active when the session ended.
    pub active: Option<SectionId>,
    /// First visible row when the session ended.
    pub offset: u32,
    /// Sections in document order.
    pub sections: Vec<SectionEntry>,
}

#[derive(Serialize, Clone, Debug)]
/// A section as listed in the snapshot.
pub struct SectionEntry {
    /// Logical id.
    pub id: SectionId,
    /// Heading text.
    pub title: String,
    /// Heading depth.
    pub level: usize,
    /// First row (0-indexed).
    pub line_start: u32,
    /// One past the last row.
    pub line_end: u32,
}

impl From<&Section> for SectionEntry {
    fn from(section: &Section) -> Self {
        Self {
            id: section.id.clone(),
            title: section.title.clone(),
            level: section.level,
            line_start: section.line_start,
            line_end: section.line_end,
        }
    }
}

impl NavSnapshot {
    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
