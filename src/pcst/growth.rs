//! Primal-dual growth phase
//!
//! Every active cluster grows at unit rate. An edge becomes tight once the
//! growth of the clusters on both of its sides has paid its cost; the two
//! clusters then merge and the edge joins the candidate forest. A cluster
//! whose growth reaches its prize sum goes inactive, except the cluster
//! holding the root, which grows for as long as it has boundary edges.
//!
//! Edge payments are settled lazily: each edge remembers how much had been
//! paid at its last settlement and its current rate is derived from the
//! activity of its endpoint clusters. Whenever that rate changes the edge
//! is settled and rescheduled under a new version stamp; merges that leave
//! the rate alone leave the pending event valid.

use crate::cluster::{Cluster, ClusterArena};
use crate::graph::IndexedGraph;
use crate::pcst::events::{Event, EventKind, EventQueue};

/// Result of the growth phase
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrowthOutcome {
    /// Edge indices in the order they became tight
    pub selected: Vec<usize>,

    /// Events that changed the simulation state
    pub events_processed: usize,

    /// Events discarded because a newer one superseded them
    pub stale_events: usize,

    /// Simulation time of the last processed event
    pub final_time: f64,
}

#[derive(Debug, Clone, Copy, Default)]
struct EdgeState {
    /// Amount of the cost paid as of `stamp`
    paid: f64,
    stamp: f64,
    version: u64,
}

struct Growth<'a> {
    graph: &'a IndexedGraph,
    arena: ClusterArena,
    queue: EventQueue,
    edges: Vec<EdgeState>,
    tolerance: f64,
    now: f64,
    outcome: GrowthOutcome,
}

/// Run the growth phase on a normalized graph
pub fn grow(graph: &IndexedGraph, root: Option<usize>, tolerance: f64) -> GrowthOutcome {
    let mut growth = Growth::new(graph, root, tolerance);
    growth.run();

    log::debug!(
        "Growth selected {} of {} edges ({} events, {} stale, final time {})",
        growth.outcome.selected.len(),
        graph.edge_count(),
        growth.outcome.events_processed,
        growth.outcome.stale_events,
        growth.outcome.final_time
    );

    growth.outcome
}

impl<'a> Growth<'a> {
    fn new(graph: &'a IndexedGraph, root: Option<usize>, tolerance: f64) -> Self {
        let node_count = graph.node_count();

        let clusters = (0..node_count)
            .map(|node| {
                let prize = graph.prizes[node];
                let is_root = root == Some(node);
                // A zero-prize node without edges can never take part in an event
                let dormant = !is_root && graph.degree(node) == 0 && prize <= tolerance;
                Cluster {
                    id: node,
                    members: vec![node],
                    active: !dormant,
                    never_saturating: is_root,
                    prize_sum: prize,
                    grown: 0.0,
                    updated_at: 0.0,
                    boundary: graph.incident_edges(node).to_vec(),
                    version: 0,
                }
            })
            .collect();

        let mut growth = Self {
            graph,
            arena: ClusterArena::new(clusters),
            queue: EventQueue::with_capacity(node_count + graph.edge_count(), tolerance),
            edges: vec![EdgeState::default(); graph.edge_count()],
            tolerance,
            now: 0.0,
            outcome: GrowthOutcome::default(),
        };

        for node in 0..node_count {
            growth.schedule_saturation(node);
        }
        for edge in 0..graph.edge_count() {
            growth.schedule_edge(edge);
        }

        growth
    }

    fn run(&mut self) {
        while let Some(event) = self.queue.pop() {
            let now = event.time.max(self.now);
            let handled = match event.kind {
                EventKind::EdgeTight => self.on_edge_tight(event, now),
                EventKind::Saturation => self.on_saturation(event, now),
            };
            if handled {
                self.now = now;
                self.outcome.events_processed += 1;
            } else {
                self.outcome.stale_events += 1;
            }
        }
        self.outcome.final_time = self.now;
    }

    /// Current representatives of an edge's endpoints and its payment rate
    fn edge_sides(&mut self, edge: usize) -> (usize, usize, f64) {
        let e = &self.graph.edges[edge];
        let (source, target) = (e.source, e.target);
        let cu = self.arena.find(source);
        let cv = self.arena.find(target);
        let rate = if cu == cv {
            0.0
        } else {
            self.arena.get(cu).rate() + self.arena.get(cv).rate()
        };
        (cu, cv, rate)
    }

    /// Time at which the edge becomes tight under its current rate
    fn edge_due_time(&mut self, edge: usize) -> Option<f64> {
        let (cu, cv, rate) = self.edge_sides(edge);
        if cu == cv || rate <= 0.0 {
            return None;
        }
        let state = self.edges[edge];
        let remaining = self.graph.edges[edge].cost - state.paid;
        if remaining <= self.tolerance {
            Some(state.stamp)
        } else {
            Some(state.stamp + remaining / rate)
        }
    }

    /// Record payment accrued up to `now` under the rate in effect so far
    fn settle_edge(&mut self, edge: usize, now: f64) {
        let (_, _, rate) = self.edge_sides(edge);
        let state = &mut self.edges[edge];
        state.paid += rate * (now - state.stamp);
        state.stamp = now;
    }

    /// Invalidate any pending event for the edge and schedule a fresh one
    fn schedule_edge(&mut self, edge: usize) {
        self.edges[edge].version += 1;
        if let Some(time) = self.edge_due_time(edge) {
            self.queue
                .push(Event::edge_tight(time, edge, self.edges[edge].version));
        }
    }

    fn schedule_saturation(&mut self, cluster: usize) {
        let record = self.arena.get(cluster);
        if let Some(time) = record.saturation_time() {
            let version = record.version;
            self.queue.push(Event::saturation(time, cluster, version));
        }
    }

    fn on_edge_tight(&mut self, event: Event, now: f64) -> bool {
        let edge = event.id;
        if self.edges[edge].version != event.version {
            return false;
        }

        let (cu, cv, _) = self.edge_sides(edge);
        if cu == cv {
            return false;
        }

        match self.edge_due_time(edge) {
            Some(due) if due <= now + self.tolerance => {}
            _ => {
                self.settle_edge(edge, now);
                self.schedule_edge(edge);
                return false;
            }
        }

        self.merge_along(edge, cu, cv, now);
        true
    }

    fn on_saturation(&mut self, event: Event, now: f64) -> bool {
        let cluster = event.id;
        if !self.arena.is_representative(cluster) {
            return false;
        }

        let record = self.arena.get(cluster);
        if !record.active || record.never_saturating || record.version != event.version {
            return false;
        }

        if record.grown_at(now) + self.tolerance < record.prize_sum {
            self.arena.get_mut(cluster).version += 1;
            self.schedule_saturation(cluster);
            return false;
        }

        self.deactivate(cluster, now);
        true
    }

    fn merge_along(&mut self, edge: usize, cu: usize, cv: usize, now: f64) {
        self.outcome.selected.push(edge);

        self.arena.get_mut(cu).advance(now);
        self.arena.get_mut(cv).advance(now);

        // A boundary edge changes rate only if its side's activity flips
        let sides = [cu, cv].map(|side| (side, self.arena.get(side).active));
        let merged_active = sides.iter().any(|&(_, active)| active);
        let mut changed = Vec::new();
        for (side, active) in sides {
            if active != merged_active {
                changed.extend_from_slice(&self.arena.get(side).boundary);
            }
        }

        // Settle under the pre-merge rates before the activity flags change
        for &e in &changed {
            self.settle_edge(e as usize, now);
        }

        let merged = self.arena.merge(cu, cv, now);

        let boundary = std::mem::take(&mut self.arena.get_mut(merged).boundary);
        let mut crossing = Vec::with_capacity(boundary.len());
        for e in boundary {
            let (a, b, _) = self.edge_sides(e as usize);
            if a != b {
                crossing.push(e);
            } else {
                // Internal now; any pending event is dead
                self.edges[e as usize].version += 1;
            }
        }
        self.arena.get_mut(merged).boundary = crossing;

        for e in changed {
            let (a, b, _) = self.edge_sides(e as usize);
            if a != b {
                self.schedule_edge(e as usize);
            }
        }

        self.schedule_saturation(merged);
    }

    fn deactivate(&mut self, cluster: usize, now: f64) {
        self.arena.get_mut(cluster).advance(now);

        let boundary = self.arena.get(cluster).boundary.clone();
        for &e in &boundary {
            self.settle_edge(e as usize, now);
        }

        let record = self.arena.get_mut(cluster);
        record.active = false;
        record.grown = record.grown.min(record.prize_sum);
        record.version += 1;

        for &e in &boundary {
            self.schedule_edge(e as usize);
        }
    }
}
