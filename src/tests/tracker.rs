use super::VisibilityTracker;
use crate::document::{Document, Node, NodeHandle, NodeKind, ScrollMargin};
use crate::error::NavError;
use crate::observe::{AttentionWindow, IntersectionBatch, IntersectionEntry, ObservationService};
use crate::registry::SectionRegistry;
use crate::section::SectionId;

/// Replays batches pushed by the test and records subscriptions.
#[derive(Default)]
struct ScriptedObserver {
    unsupported: bool,
    observed: Vec<Vec<NodeHandle>>,
    disconnects: usize,
    queue: Vec<IntersectionBatch>,
}

impl ObservationService for ScriptedObserver {
    fn is_supported(&self) -> bool {
        !self.unsupported
    }

    fn observe(&mut self, targets: &[NodeHandle], _window: AttentionWindow) -> Result<(), NavError> {
        self.observed.push(targets.to_vec());
        Ok(())
    }

    fn disconnect(&mut self) {
        self.disconnects += 1;
    }

    fn take_batches(&mut self) -> Vec<IntersectionBatch> {
        std::mem::take(&mut self.queue)
    }
}

fn nodes(n: u32) -> Vec<NodeHandle> {
    let mut doc = Document::new(n * 10);
    (0..n)
        .map(|i| {
            doc.mount(Node {
                kind: NodeKind::Anchor,
                element_id: None,
                nav_id: None,
                top: i * 10,
                height: 10,
                scroll_margin: ScrollMargin::default(),
            })
        })
        .collect()
}

fn ids(names: &[&str]) -> Vec<SectionId> {
    names.iter().copied().map(SectionId::from).collect()
}

fn batch(sequence: u64, entries: &[(NodeHandle, bool)]) -> IntersectionBatch {
    IntersectionBatch {
        sequence,
        entries: entries
            .iter()
            .map(|(node, is_intersecting)| IntersectionEntry {
                node: *node,
                is_intersecting: *is_intersecting,
            })
            .collect(),
    }
}

fn tracker_with(
    names: &[&str],
    handles: &[NodeHandle],
) -> (VisibilityTracker<ScriptedObserver>, SectionRegistry) {
    let registry = SectionRegistry::new();
    for (name, handle) in names.iter().zip(handles) {
        registry.register(*name).call(Some(*handle));
    }
    let mut tracker = VisibilityTracker::new(
        ScriptedObserver::default(),
        AttentionWindow::default(),
        registry.clone(),
    )
    .unwrap();
    tracker.track(ids(names)).unwrap();
    (tracker, registry)
}

fn active(tracker: &VisibilityTracker<ScriptedObserver>) -> Option<String> {
    tracker.active_id().map(|id| id.to_string())
}

#[test]
fn test_unsupported_host_is_fatal() {
    let service = ScriptedObserver {
        unsupported: true,
        ..ScriptedObserver::default()
    };
    let result = VisibilityTracker::new(service, AttentionWindow::default(), SectionRegistry::new());
    assert!(matches!(result, Err(NavError::ObservationUnsupported)));
}

#[test]
fn test_no_ids_is_a_noop() {
    let mut tracker = VisibilityTracker::new(
        ScriptedObserver::default(),
        AttentionWindow::default(),
        SectionRegistry::new(),
    )
    .unwrap();

    let subscriber = tracker.track(Vec::new()).unwrap();
    assert!(tracker.service_mut().observed.is_empty(), "Nothing to observe");
    assert_eq!(subscriber.get(), None);
}

#[test]
fn test_subscribes_registered_nodes_in_order() {
    let handles = nodes(3);
    let (mut tracker, _registry) = tracker_with(&["a", "b", "c"], &handles);

    assert_eq!(tracker.service_mut().observed, vec![handles.clone()]);
    assert_eq!(tracker.active_id(), None, "Absent until the first batch");
}

#[test]
fn test_last_intersecting_entry_in_batch_wins() {
    let handles = nodes(3);
    let (mut tracker, _registry) = tracker_with(&["a", "b", "c"], &handles);

    let changed = tracker.apply_batch(&batch(
        0,
        &[(handles[0], true), (handles[1], true), (handles[2], false)],
    ));

    assert!(changed);
    assert_eq!(active(&tracker).as_deref(), Some("b"));
}

#[test]
fn test_leaving_entries_do_not_clear_active() {
    let handles = nodes(2);
    let (mut tracker, _registry) = tracker_with(&["a", "b"], &handles);
    tracker.apply_batch(&batch(0, &[(handles[1], true)]));

    assert!(!tracker.apply_batch(&batch(1, &[(handles[1], false)])));
    assert_eq!(active(&tracker).as_deref(), Some("b"));
}

#[test]
fn test_pump_applies_queued_batches_in_order() {
    let handles = nodes(3);
    let (mut tracker, _registry) = tracker_with(&["a", "b", "c"], &handles);
    let mut subscriber = tracker.subscribe();

    tracker.service_mut().queue = vec![
        batch(0, &[(handles[0], true)]),
        batch(1, &[(handles[0], false), (handles[1], true)]),
        batch(2, &[(handles[1], false), (handles[2], true)]),
    ];

    assert!(tracker.pump());
    assert_eq!(active(&tracker).as_deref(), Some("c"));
    assert_eq!(subscriber.changed(), Some(Some(SectionId::from("c"))));
}

#[test]
fn test_stale_batch_is_dropped() {
    let handles = nodes(2);
    let (mut tracker, _registry) = tracker_with(&["a", "b"], &handles);

    tracker.apply_batch(&batch(5, &[(handles[1], true)]));
    assert!(!tracker.apply_batch(&batch(3, &[(handles[0], true)])));
    assert!(!tracker.apply_batch(&batch(5, &[(handles[0], true)])));

    assert_eq!(active(&tracker).as_deref(), Some("b"));
}

#[test]
fn test_unregistered_ids_are_skipped_then_picked_up() {
    let handles = nodes(2);
    let registry = SectionRegistry::new();
    registry.register("a").call(Some(handles[0]));
    let mut tracker = VisibilityTracker::new(
        ScriptedObserver::default(),
        AttentionWindow::default(),
        registry.clone(),
    )
    .unwrap();

    tracker.track(ids(&["a", "b"])).unwrap();
    assert_eq!(tracker.observed().len(), 1, "b has no node yet");

    assert!(!tracker.refresh().unwrap(), "Registry unchanged");
    registry.register("b").call(Some(handles[1]));
    assert!(tracker.refresh().unwrap());

    assert_eq!(tracker.observed().len(), 2);
    let service = tracker.service_mut();
    assert_eq!(service.observed.last(), Some(&handles));
    assert_eq!(service.disconnects, 2, "Every re-subscription tears down first");
}

#[test]
fn test_unregistering_active_section_keeps_it_until_next_batch() {
    let handles = nodes(2);
    let (mut tracker, registry) = tracker_with(&["a", "b"], &handles);
    tracker.apply_batch(&batch(0, &[(handles[1], true)]));

    registry.register("b").call(None);
    tracker.refresh().unwrap();
    assert_eq!(active(&tracker).as_deref(), Some("b"), "Stale until next batch");
    assert_eq!(tracker.observed().len(), 1);

    assert!(!tracker.apply_batch(&batch(1, &[(handles[1], true)])));
    assert_eq!(active(&tracker).as_deref(), Some("b"), "Detached node has no owner");

    assert!(tracker.apply_batch(&batch(2, &[(handles[0], true)])));
    assert_eq!(active(&tracker).as_deref(), Some("a"));
}

#[test]
fn test_remount_uses_new_node_exclusively() {
    let handles = nodes(2);
    let (mut tracker, registry) = tracker_with(&["a"], &handles[..1]);

    registry.register("a").call(Some(handles[1]));
    tracker.refresh().unwrap();
    assert_eq!(tracker.observed(), &[(SectionId::from("a"), handles[1])]);

    assert!(!tracker.apply_batch(&batch(0, &[(handles[0], true)])));
    assert_eq!(tracker.active_id(), None);

    assert!(tracker.apply_batch(&batch(1, &[(handles[1], true)])));
    assert_eq!(active(&tracker).as_deref(), Some("a"));
}

#[test]
fn test_changing_ids_resubscribes() {
    let handles = nodes(3);
    let (mut tracker, _registry) = tracker_with(&["a", "b", "c"], &handles);

    tracker.track(ids(&["c", "a"])).unwrap();
    let service = tracker.service_mut();
    assert_eq!(service.observed.last(), Some(&vec![handles[2], handles[0]]));
    assert_eq!(tracker.tracked(), ids(&["c", "a"]).as_slice());
}
