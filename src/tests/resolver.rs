use super::{extract_id, legacy_element_id, resolve};
use crate::document::{Document, Node, NodeKind, ScrollMargin};
use crate::section::SectionId;

fn node(element_id: Option<&str>, nav_id: Option<&str>, top: u32) -> Node {
    Node {
        kind: NodeKind::Anchor,
        element_id: element_id.map(str::to_string),
        nav_id: nav_id.map(SectionId::from),
        top,
        height: 1,
        scroll_margin: ScrollMargin::default(),
    }
}

#[test]
fn test_nav_id_beats_conventions() {
    let mut doc = Document::new(40);
    let legacy = doc.mount(node(Some("section-pricing"), None, 0));
    let exact = doc.mount(node(Some("pricing"), None, 10));
    let tagged = doc.mount(node(Some("plans"), Some("pricing"), 30));

    assert_eq!(resolve(&doc, "pricing"), Some(tagged));

    doc.unmount(tagged);
    assert_eq!(resolve(&doc, "pricing"), Some(legacy));

    doc.unmount(legacy);
    assert_eq!(resolve(&doc, "pricing"), Some(exact));
}

#[test]
fn test_miss_is_absent() {
    let mut doc = Document::new(10);
    doc.mount(node(Some("section-hero"), Some("hero"), 0));

    assert_eq!(resolve(&doc, "missing"), None);
    assert_eq!(resolve(&doc, ""), None);
}

#[test]
fn test_legacy_element_id() {
    assert_eq!(legacy_element_id("faq"), "section-faq");
}

#[test]
fn test_extract_id_from_fragments() {
    assert_eq!(extract_id("#pricing"), Some(SectionId::from("pricing")));
    assert_eq!(extract_id("#section-pricing"), Some(SectionId::from("pricing")));
    assert_eq!(extract_id("pricing"), Some(SectionId::from("pricing")));
    assert_eq!(extract_id(""), None);
    assert_eq!(extract_id("#"), None);
    assert_eq!(extract_id("#section-"), None);
}

#[test]
fn test_fragment_and_registry_ids_agree() {
    let mut doc = Document::new(10);
    let container = doc.mount(node(Some("section-faq"), Some("faq"), 3));

    let id = extract_id("#section-faq").unwrap();
    assert_eq!(resolve(&doc, id.as_str()), Some(container));
}
