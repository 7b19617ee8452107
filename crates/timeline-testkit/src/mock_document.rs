//! In-memory host document implementing every timeline effect trait
//!
//! `MockDocument` records every visual write per node, keeps the observed set,
//! logs scroll requests and runs timer tasks against a virtual clock that only
//! moves when a test calls [`MockDocument::advance`].
//!
//! # Borrowing
//!
//! State lives in `RefCell`s because the effect traits take `&self` on a
//! single-threaded loop. Timer tasks are removed from the queue before they
//! run, so a task may freely call back into the document.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use timeline_core::{
    Cursor, DocumentEffects, GeometryEffects, ItemNodes, NodeId, Rect, ScrollEffects, Selectors,
    StyleEffects, TimelineError, TimelineResult, TimerEffects, Transform, Transition,
    VisibilityEffects,
};

/// Everything written to a single node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeState {
    pub classes: BTreeSet<String>,
    pub opacity: Option<f64>,
    pub transform: Option<Transform>,
    pub transition: Option<Transition>,
    pub cursor: Option<Cursor>,
    pub custom_properties: BTreeMap<String, String>,
    pub rect: Option<Rect>,
}

struct ScheduledTask {
    due: Duration,
    seq: u64,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct TimerQueue {
    now: Duration,
    next_seq: u64,
    tasks: Vec<ScheduledTask>,
    requested: Vec<Duration>,
}

impl TimerQueue {
    /// Remove the earliest task due at or before `now`
    fn pop_due(&mut self) -> Option<ScheduledTask> {
        let now = self.now;
        let index = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= now)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(i, _)| i)?;
        Some(self.tasks.swap_remove(index))
    }
}

/// In-memory document. Build one with [`crate::MockDocumentBuilder`].
pub struct MockDocument {
    nodes: RefCell<Vec<NodeState>>,
    items: Vec<ItemNodes>,
    container: Option<NodeId>,
    viewport_height: Cell<f64>,
    observed: RefCell<BTreeSet<NodeId>>,
    unobserve_log: RefCell<Vec<NodeId>>,
    scroll_requests: RefCell<Vec<NodeId>>,
    timers: RefCell<TimerQueue>,
    fail_writes: Cell<bool>,
}

impl MockDocument {
    pub(crate) fn new(
        nodes: Vec<NodeState>,
        items: Vec<ItemNodes>,
        container: Option<NodeId>,
        viewport_height: f64,
    ) -> Self {
        Self {
            nodes: RefCell::new(nodes),
            items,
            container,
            viewport_height: Cell::new(viewport_height),
            observed: RefCell::new(BTreeSet::new()),
            unobserve_log: RefCell::new(Vec::new()),
            scroll_requests: RefCell::new(Vec::new()),
            timers: RefCell::new(TimerQueue::default()),
            fail_writes: Cell::new(false),
        }
    }

    /// Items in document order, as the builder created them
    pub fn items(&self) -> &[ItemNodes] {
        &self.items
    }

    /// The container node, if the builder added one
    pub fn container(&self) -> Option<NodeId> {
        self.container
    }

    /// Card of the item at `index`
    ///
    /// # Panics
    ///
    /// If the item does not exist or has no card.
    pub fn card(&self, index: usize) -> NodeId {
        self.items[index].card.expect("item has no card")
    }

    /// Snapshot of one node's state
    pub fn node(&self, node: NodeId) -> NodeState {
        self.nodes.borrow()[node.index()].clone()
    }

    pub fn opacity(&self, node: NodeId) -> Option<f64> {
        self.nodes.borrow()[node.index()].opacity
    }

    pub fn transform(&self, node: NodeId) -> Option<Transform> {
        self.nodes.borrow()[node.index()].transform
    }

    pub fn custom_property(&self, node: NodeId, name: &str) -> Option<String> {
        self.nodes.borrow()[node.index()]
            .custom_properties
            .get(name)
            .cloned()
    }

    /// Nodes carrying `class`
    pub fn nodes_with_class(&self, class: &str) -> Vec<NodeId> {
        self.nodes
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, n)| n.classes.contains(class))
            .map(|(i, _)| NodeId::new(i as u32))
            .collect()
    }

    /// Put a class on a node directly, bypassing the controllers
    pub fn force_class(&self, node: NodeId, class: &str) {
        self.nodes.borrow_mut()[node.index()]
            .classes
            .insert(class.to_string());
    }

    pub fn set_rect(&self, node: NodeId, rect: Rect) {
        self.nodes.borrow_mut()[node.index()].rect = Some(rect);
    }

    pub fn set_viewport_height(&self, height: f64) {
        self.viewport_height.set(height);
    }

    pub fn is_observed(&self, node: NodeId) -> bool {
        self.observed.borrow().contains(&node)
    }

    /// Every `unobserve` call, in order
    pub fn unobserved(&self) -> Vec<NodeId> {
        self.unobserve_log.borrow().clone()
    }

    /// Every centering scroll request, in order
    pub fn scroll_requests(&self) -> Vec<NodeId> {
        self.scroll_requests.borrow().clone()
    }

    /// Make every fallible write return a host error
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Delays passed to `schedule`, in call order
    pub fn scheduled_delays(&self) -> Vec<Duration> {
        self.timers.borrow().requested.clone()
    }

    /// Tasks not yet run
    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().tasks.len()
    }

    /// Virtual time elapsed since creation
    pub fn now(&self) -> Duration {
        self.timers.borrow().now
    }

    /// Move the virtual clock forward, running every task that falls due in
    /// deadline order. Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now().saturating_add(by);
        let mut ran = 0;
        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                let earliest = timers
                    .tasks
                    .iter()
                    .map(|t| t.due)
                    .filter(|due| *due <= target)
                    .min();
                match earliest {
                    Some(due) => {
                        timers.now = timers.now.max(due);
                        timers.pop_due()
                    }
                    None => {
                        timers.now = target;
                        None
                    }
                }
            };
            match next {
                Some(scheduled) => {
                    (scheduled.task)();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }

    /// Run every queued task regardless of deadline
    pub fn run_all_timers(&self) -> usize {
        let latest = self
            .timers
            .borrow()
            .tasks
            .iter()
            .map(|t| t.due)
            .max()
            .unwrap_or_default();
        let now = self.now();
        self.advance(latest.saturating_sub(now))
    }

    fn write(&self, node: NodeId, f: impl FnOnce(&mut NodeState)) -> TimelineResult<()> {
        if self.fail_writes.get() {
            return Err(TimelineError::host("write rejected by mock document"));
        }
        let mut nodes = self.nodes.borrow_mut();
        let state = nodes
            .get_mut(node.index())
            .ok_or(TimelineError::unknown_node(node))?;
        f(state);
        Ok(())
    }
}

impl DocumentEffects for MockDocument {
    fn timeline_items(&self, _selectors: &Selectors) -> Vec<ItemNodes> {
        self.items.clone()
    }

    fn timeline_container(&self, _selectors: &Selectors) -> Option<NodeId> {
        self.container
    }
}

impl VisibilityEffects for MockDocument {
    fn observe(&self, node: NodeId) -> TimelineResult<()> {
        self.observed.borrow_mut().insert(node);
        Ok(())
    }

    fn unobserve(&self, node: NodeId) -> TimelineResult<()> {
        self.observed.borrow_mut().remove(&node);
        self.unobserve_log.borrow_mut().push(node);
        Ok(())
    }
}

impl GeometryEffects for MockDocument {
    fn bounding_rect(&self, node: NodeId) -> Option<Rect> {
        self.nodes.borrow().get(node.index()).and_then(|n| n.rect)
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height.get()
    }
}

impl StyleEffects for MockDocument {
    fn set_opacity(&self, node: NodeId, opacity: f64) -> TimelineResult<()> {
        self.write(node, |n| n.opacity = Some(opacity))
    }

    fn set_transform(&self, node: NodeId, transform: &Transform) -> TimelineResult<()> {
        self.write(node, |n| n.transform = Some(*transform))
    }

    fn clear_transform(&self, node: NodeId) -> TimelineResult<()> {
        self.write(node, |n| n.transform = None)
    }

    fn set_transition(&self, node: NodeId, transition: &Transition) -> TimelineResult<()> {
        self.write(node, |n| n.transition = Some(transition.clone()))
    }

    fn set_cursor(&self, node: NodeId, cursor: Cursor) -> TimelineResult<()> {
        self.write(node, |n| n.cursor = Some(cursor))
    }

    fn add_class(&self, node: NodeId, class: &str) -> TimelineResult<()> {
        self.write(node, |n| {
            n.classes.insert(class.to_string());
        })
    }

    fn remove_class(&self, node: NodeId, class: &str) -> TimelineResult<()> {
        self.write(node, |n| {
            n.classes.remove(class);
        })
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes
            .borrow()
            .get(node.index())
            .is_some_and(|n| n.classes.contains(class))
    }

    fn set_custom_property(&self, node: NodeId, name: &str, value: &str) -> TimelineResult<()> {
        self.write(node, |n| {
            n.custom_properties
                .insert(name.to_string(), value.to_string());
        })
    }
}

impl ScrollEffects for MockDocument {
    fn scroll_into_view_centered(&self, node: NodeId) -> TimelineResult<()> {
        self.scroll_requests.borrow_mut().push(node);
        Ok(())
    }
}

impl TimerEffects for MockDocument {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let mut timers = self.timers.borrow_mut();
        let due = timers.now.saturating_add(delay);
        let seq = timers.next_seq;
        timers.next_seq += 1;
        timers.requested.push(delay);
        timers.tasks.push(ScheduledTask { due, seq, task });
    }
}
