//! Time-ordered event queue driving the growth simulation
//!
//! Stale entries are never removed from the heap. Each event carries the
//! version stamp of the edge or cluster it was scheduled for, and the
//! consumer discards events whose stamp no longer matches.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Event kinds; the declaration order is the tie-break order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    /// An edge's cost becomes fully paid
    EdgeTight,
    /// A cluster's growth reaches its prize sum
    Saturation,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    pub time: f64,
    pub kind: EventKind,
    /// Edge index or cluster representative, depending on `kind`
    pub id: usize,
    pub version: u64,
}

impl Event {
    pub fn edge_tight(time: f64, edge: usize, version: u64) -> Self {
        Self {
            time,
            kind: EventKind::EdgeTight,
            id: edge,
            version,
        }
    }

    pub fn saturation(time: f64, cluster: usize, version: u64) -> Self {
        Self {
            time,
            kind: EventKind::Saturation,
            id: cluster,
            version,
        }
    }

    /// Exact ordering: time, then kind, then identifier
    fn exact_cmp(&self, other: &Self) -> Ordering {
        self.time
            .total_cmp(&other.time)
            .then(self.kind.cmp(&other.kind))
            .then(self.id.cmp(&other.id))
            .then(self.version.cmp(&other.version))
    }

    /// Ordering among events already known to be simultaneous
    fn tie_cmp(&self, other: &Self) -> Ordering {
        self.kind
            .cmp(&other.kind)
            .then(self.id.cmp(&other.id))
            .then(self.time.total_cmp(&other.time))
            .then(self.version.cmp(&other.version))
    }
}

/// Heap entry reversing the exact ordering so BinaryHeap pops the earliest event
#[derive(Debug, Clone, Copy)]
struct Entry(Event);

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.0.exact_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.exact_cmp(&self.0)
    }
}

/// Heap entry ordering simultaneous events by kind, then identifier
#[derive(Debug, Clone, Copy)]
struct TieEntry(Event);

impl PartialEq for TieEntry {
    fn eq(&self, other: &Self) -> bool {
        self.0.tie_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for TieEntry {}

impl PartialOrd for TieEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TieEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.tie_cmp(&self.0)
    }
}

/// Min-queue of events with tolerance-aware tie-breaking.
///
/// Events whose times lie within `tolerance` of the earliest pending event
/// count as simultaneous: edge-tight events come out before saturation
/// events, and ascending identifiers break the remaining ties. Once such a
/// window is open it stays open until drained, and events pushed meanwhile
/// with a time inside it join it.
#[derive(Debug)]
pub struct EventQueue {
    heap: BinaryHeap<Entry>,
    window: BinaryHeap<TieEntry>,
    window_limit: f64,
    tolerance: f64,
    pushed: usize,
}

impl EventQueue {
    pub fn new(tolerance: f64) -> Self {
        Self::with_capacity(0, tolerance)
    }

    pub fn with_capacity(capacity: usize, tolerance: f64) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            window: BinaryHeap::new(),
            window_limit: f64::NEG_INFINITY,
            tolerance,
            pushed: 0,
        }
    }

    pub fn push(&mut self, event: Event) {
        debug_assert!(!event.time.is_nan());
        self.pushed += 1;
        self.heap.push(Entry(event));
    }

    /// Remove and return the next event to process
    pub fn pop(&mut self) -> Option<Event> {
        if self.window.is_empty() {
            let Entry(first) = self.heap.peek()?;
            self.window_limit = first.time + self.tolerance;
        }

        while let Some(Entry(next)) = self.heap.peek() {
            if next.time > self.window_limit {
                break;
            }
            if let Some(Entry(event)) = self.heap.pop() {
                self.window.push(TieEntry(event));
            }
        }

        self.window.pop().map(|TieEntry(event)| event)
    }

    pub fn len(&self) -> usize {
        self.heap.len() + self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty() && self.window.is_empty()
    }

    /// Total number of events ever scheduled
    pub fn pushed(&self) -> usize {
        self.pushed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(queue: &mut EventQueue) -> Vec<(EventKind, usize)> {
        std::iter::from_fn(|| queue.pop())
            .map(|e| (e.kind, e.id))
            .collect()
    }

    #[test]
    fn pops_in_time_order() {
        let mut queue = EventQueue::new(1e-9);
        queue.push(Event::saturation(3.0, 0, 0));
        queue.push(Event::edge_tight(1.0, 5, 0));
        queue.push(Event::edge_tight(2.0, 1, 0));

        let times: Vec<f64> = std::iter::from_fn(|| queue.pop()).map(|e| e.time).collect();
        assert_eq!(times, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn edge_events_precede_saturation_at_equal_time() {
        let mut queue = EventQueue::new(1e-9);
        queue.push(Event::saturation(0.5, 0, 0));
        queue.push(Event::edge_tight(0.5, 7, 0));
        queue.push(Event::saturation(0.5, 1, 0));
        queue.push(Event::edge_tight(0.5, 2, 0));

        assert_eq!(
            drain(&mut queue),
            vec![
                (EventKind::EdgeTight, 2),
                (EventKind::EdgeTight, 7),
                (EventKind::Saturation, 0),
                (EventKind::Saturation, 1),
            ]
        );
    }

    #[test]
    fn near_equal_times_count_as_simultaneous() {
        let mut queue = EventQueue::new(1e-6);
        queue.push(Event::saturation(1.0, 0, 0));
        queue.push(Event::edge_tight(1.0 + 1e-8, 3, 0));

        assert_eq!(queue.pop().map(|e| e.kind), Some(EventKind::EdgeTight));
        assert_eq!(queue.pop().map(|e| e.kind), Some(EventKind::Saturation));
        assert!(queue.is_empty());
    }

    #[test]
    fn times_outside_tolerance_keep_time_order() {
        let mut queue = EventQueue::new(1e-9);
        queue.push(Event::edge_tight(1.0 + 1e-3, 0, 0));
        queue.push(Event::saturation(1.0, 9, 0));

        assert_eq!(queue.pop().map(|e| e.kind), Some(EventKind::Saturation));
        assert_eq!(queue.pushed(), 2);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn events_pushed_into_an_open_window_join_it() {
        let mut queue = EventQueue::new(1e-9);
        queue.push(Event::saturation(2.0, 0, 0));
        queue.push(Event::edge_tight(2.0, 4, 0));

        assert_eq!(queue.pop().map(|e| (e.kind, e.id)), Some((EventKind::EdgeTight, 4)));
        queue.push(Event::edge_tight(2.0, 1, 1));
        queue.push(Event::edge_tight(3.0, 0, 0));

        assert_eq!(
            drain(&mut queue),
            vec![
                (EventKind::EdgeTight, 1),
                (EventKind::Saturation, 0),
                (EventKind::EdgeTight, 0),
            ]
        );
    }

    #[test]
    fn large_windows_drain_in_tie_order() {
        let mut queue = EventQueue::new(1e-9);
        for id in (0..500).rev() {
            queue.push(Event::saturation(0.5, id, 0));
            queue.push(Event::edge_tight(0.5, id, 0));
        }

        let order = drain(&mut queue);
        assert_eq!(order.len(), 1000);
        assert_eq!(order[0], (EventKind::EdgeTight, 0));
        assert_eq!(order[499], (EventKind::EdgeTight, 499));
        assert_eq!(order[500], (EventKind::Saturation, 0));
        assert_eq!(queue.pushed(), 1000);
    }
}
