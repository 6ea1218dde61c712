//! Reading a document from disk and extracting its sections and anchors with tree-sitter.

use crate::error::NavError;
use crate::formats::Format;
use crate::section::{Anchor, Section, SectionId};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

/// A parsed document: its text plus everything navigation can target in it.
pub struct Page {
    /// Source lines, one per document row.
    pub lines: Vec<String>,
    /// Sections in document order.
    pub sections: Vec<Section>,
    /// Html anchors in document order.
    pub anchors: Vec<Anchor>,
}

impl Page {
    #[must_use]
    /// Document height in rows.
    pub fn rows(&self) -> u32 {
        u32::try_from(self.lines.len()).unwrap_or(u32::MAX)
    }
}

/// Reads and parses the document at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_page(path: &Path, format: &impl Format) -> Result<Page, NavError> {
    let source = fs::read_to_string(path)?;
    parse_page(&source, format)
}

/// Parses `source` into a [`Page`].
///
/// # Errors
///
/// Returns [`NavError::Parse`] if the grammar or a query fails to load.
pub fn parse_page(source: &str, format: &impl Format) -> Result<Page, NavError> {
    let language = format.language();
    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| NavError::Parse(e.to_string()))?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| NavError::Parse("parser returned no tree".to_string()))?;
    let bytes = source.as_bytes();
    let lines: Vec<String> = source.lines().map(str::to_string).collect();
    let total_lines = u32::try_from(lines.len()).unwrap_or(u32::MAX);

    let headings = captures(&language, format.section_query(), tree.root_node(), bytes)?;
    let mut used = HashSet::new();
    let mut sections: Vec<Section> = Vec::with_capacity(headings.len());
    for heading in &headings {
        let (title, level) = heading_parts(*heading, bytes, format);
        let id = unique_id(&slugify(&title), &mut used);
        let line_start = row(*heading);
        if let Some(prev) = sections.last_mut() {
            prev.line_end = line_start;
        }
        sections.push(Section {
            id,
            title,
            level,
            line_start,
            line_end: total_lines,
        });
    }

    let anchors = captures(&language, format.anchor_query(), tree.root_node(), bytes)?
        .into_iter()
        .filter_map(|node| {
            let html = node.utf8_text(bytes).ok()?;
            let element_id = attribute(html, "id");
            let nav_id = attribute(html, "data-nav-id").map(SectionId::from);
            if element_id.is_none() && nav_id.is_none() {
                return None;
            }
            Some(Anchor {
                element_id,
                nav_id,
                line: row(node),
            })
        })
        .collect();

    Ok(Page {
        lines,
        sections,
        anchors,
    })
}

/// Every node captured by `query_source`, in document order.
fn captures<'tree>(
    language: &tree_sitter::Language,
    query_source: &str,
    root: Node<'tree>,
    bytes: &[u8],
) -> Result<Vec<Node<'tree>>, NavError> {
    let query = Query::new(language, query_source).map_err(|e| NavError::Parse(e.to_string()))?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, root, bytes);
    let mut nodes = Vec::new();
    while let Some(m) = matches.next() {
        nodes.extend(m.captures.iter().map(|capture| capture.node));
    }
    nodes.sort_by_key(|node| node.start_byte());
    nodes.dedup_by_key(|node| node.id());
    Ok(nodes)
}

fn row(node: Node<'_>) -> u32 {
    u32::try_from(node.start_position().row).unwrap_or(u32::MAX)
}

/// Heading text and depth. Headings without text get an empty title.
fn heading_parts(heading: Node<'_>, bytes: &[u8], format: &impl Format) -> (String, usize) {
    let mut title = String::new();
    let mut level = 1;
    let mut walk = heading.walk();
    for child in heading.children(&mut walk) {
        if let Some(depth) = format.heading_level(child.kind()) {
            level = depth;
        } else if child.kind() == "inline" {
            title = child.utf8_text(bytes).unwrap_or_default().trim().to_string();
        }
    }
    (title, level)
}

#[must_use]
/// Logical id for a heading: lowercase alphanumerics, `-` and `_`, whitespace folded to `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.trim().chars() {
        if c.is_alphanumeric() || c == '_' || c == '-' {
            slug.extend(c.to_lowercase());
        } else if c.is_whitespace() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug.to_string()
    }
}

/// Suffixes `-1`, `-2`, ... until the id is unused.
fn unique_id(slug: &str, used: &mut HashSet<String>) -> SectionId {
    let mut candidate = slug.to_string();
    let mut n = 0;
    while used.contains(&candidate) {
        n += 1;
        candidate = format!("{slug}-{n}");
    }
    used.insert(candidate.clone());
    SectionId::from(candidate)
}

/// Value of a quoted html attribute, matched only at an attribute boundary.
fn attribute(html: &str, name: &str) -> Option<String> {
    let needle = format!("{name}=");
    let mut from = 0;
    while let Some(pos) = html[from..].find(&needle) {
        let at = from + pos;
        from = at + needle.len();
        if !html[..at].ends_with(char::is_whitespace) {
            continue;
        }
        let rest = &html[from..];
        let Some(quote) = rest.chars().next().filter(|q| *q == '"' || *q == '\'') else {
            continue;
        };
        let value = &rest[1..];
        let end = value.find(quote)?;
        let value = value[..end].trim();
        return (!value.is_empty()).then(|| value.to_string());
    }
    None
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
