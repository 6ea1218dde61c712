use super::{Navigator, ScrollHost, ScrollRequest};
use crate::document::{Document, Node, NodeKind, ScrollMargin};
use crate::registry::SectionRegistry;
use crate::section::SectionId;

#[derive(Default)]
struct RecordingHost {
    requests: Vec<ScrollRequest>,
}

impl ScrollHost for RecordingHost {
    fn scroll_into_view(&mut self, request: ScrollRequest) {
        self.requests.push(request);
    }
}

const MARGIN: ScrollMargin = ScrollMargin { top: 3, bottom: 2 };

fn node(element_id: Option<&str>, nav_id: Option<&str>, top: u32) -> Node {
    Node {
        kind: NodeKind::Anchor,
        element_id: element_id.map(str::to_string),
        nav_id: nav_id.map(SectionId::from),
        top,
        height: 5,
        scroll_margin: MARGIN,
    }
}

#[test]
fn test_scroll_to_registered_section() {
    let mut doc = Document::new(50);
    let registry = SectionRegistry::new();
    let handle = doc.mount(node(Some("section-faq"), Some("faq"), 20));
    registry.register("faq").call(Some(handle));
    let mut host = RecordingHost::default();

    assert!(Navigator::new(&registry, &doc).scroll_to("faq", &mut host));
    assert_eq!(
        host.requests,
        vec![ScrollRequest {
            node: handle,
            top: 20,
            margin: MARGIN,
        }]
    );
}

#[test]
fn test_miss_returns_false_without_scrolling() {
    let mut doc = Document::new(50);
    let registry = SectionRegistry::new();
    doc.mount(node(Some("section-faq"), Some("faq"), 20));
    let mut host = RecordingHost::default();

    assert!(!Navigator::new(&registry, &doc).scroll_to("missing", &mut host));
    assert!(host.requests.is_empty());
}

#[test]
fn test_unregistered_section_resolves_through_conventions() {
    let mut doc = Document::new(50);
    let registry = SectionRegistry::new();
    let legacy = doc.mount(node(Some("section-team"), None, 12));
    let anchor = doc.mount(node(Some("contact"), None, 40));
    let navigator = Navigator::new(&registry, &doc);

    assert_eq!(navigator.locate("team"), Some(legacy));
    assert_eq!(navigator.locate("contact"), Some(anchor));
}

#[test]
fn test_registered_node_no_longer_mounted_is_skipped() {
    let mut doc = Document::new(50);
    let registry = SectionRegistry::new();
    let stale = doc.mount(node(None, None, 0));
    registry.register("hero").call(Some(stale));
    doc.unmount(stale);
    let fresh = doc.mount(node(Some("section-hero"), None, 4));

    assert_eq!(Navigator::new(&registry, &doc).locate("hero"), Some(fresh));
}

#[test]
fn test_repeat_calls_each_issue_a_scroll() {
    let mut doc = Document::new(50);
    let registry = SectionRegistry::new();
    doc.mount(node(None, Some("a"), 0));
    doc.mount(node(None, Some("b"), 30));
    let navigator = Navigator::new(&registry, &doc);
    let mut host = RecordingHost::default();

    assert!(navigator.scroll_to("b", &mut host));
    assert!(navigator.scroll_to("a", &mut host));
    let tops: Vec<_> = host.requests.iter().map(|r| r.top).collect();
    assert_eq!(tops, vec![30, 0]);
}
