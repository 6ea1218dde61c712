//! Markdown format implementation using tree-sitter-md.
//!
//! Sections start at ATX-style headings (# syntax); html blocks may carry anchors.

use crate::formats::Format;

/// Tree-sitter queries for ATX-style markdown headings and html blocks.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn section_query(&self) -> &'static str {
        "(atx_heading) @heading"
    }

    fn anchor_query(&self) -> &'static str {
        "(html_block) @anchor"
    }

    fn heading_level(&self, marker_kind: &str) -> Option<usize> {
        marker_kind
            .strip_prefix("atx_h")?
            .strip_suffix("_marker")?
            .parse()
            .ok()
    }
}
