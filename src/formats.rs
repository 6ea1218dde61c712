//! Format trait and implementations for different document types.
//!
//! A format supplies the tree-sitter language and the queries that pick out section headings
//! and anchors, so ingestion stays the same whatever markup the page is written in.

pub mod markdown;

/// Tree-sitter language plus the queries ingestion runs against it.
pub trait Format {
    /// Grammar used to parse the document.
    fn language(&self) -> tree_sitter::Language;
    /// Query whose `@heading` captures start a new section.
    fn section_query(&self) -> &str;
    /// Query whose `@anchor` captures may carry `id` or `data-nav-id` attributes.
    fn anchor_query(&self) -> &str;
    /// Heading depth from the kind of a heading's marker child, e.g. `atx_h2_marker`.
    fn heading_level(&self, marker_kind: &str) -> Option<usize>;
}
