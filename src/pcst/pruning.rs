//! Pruning of the candidate forest produced by growth

use std::collections::VecDeque;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::config::PruningStrategy;
use crate::graph::IndexedGraph;

/// Candidate forest over the full node index range; edge weights are edge indices
struct Forest<'a> {
    graph: &'a IndexedGraph,
    tree: UnGraph<(), usize>,
}

/// Rooted view of one component: preorder plus the edge to each node's parent
struct RootedTree {
    order: Vec<usize>,
    parent_edge: Vec<Option<(usize, usize)>>,
}

impl<'a> Forest<'a> {
    fn new(graph: &'a IndexedGraph, edges: &[usize]) -> Self {
        let mut tree = UnGraph::with_capacity(graph.node_count(), edges.len());
        for _ in 0..graph.node_count() {
            tree.add_node(());
        }
        for &edge in edges {
            let e = &graph.edges[edge];
            tree.add_edge(NodeIndex::new(e.source), NodeIndex::new(e.target), edge);
        }
        Self { graph, tree }
    }

    /// (neighbour, edge index) pairs around `node`, skipping removed edges
    fn neighbours<'b>(
        &'b self,
        node: usize,
        removed: &'b [bool],
    ) -> impl Iterator<Item = (usize, usize)> + 'b {
        self.tree
            .edges(NodeIndex::new(node))
            .filter(move |e| !removed[*e.weight()])
            .map(move |e| {
                let other = if e.source().index() == node {
                    e.target().index()
                } else {
                    e.source().index()
                };
                (other, *e.weight())
            })
    }

    /// Nodes touched by at least one candidate edge, grouped by component in
    /// ascending order of each component's smallest node
    fn components(&self) -> Vec<Vec<usize>> {
        let no_removals = vec![false; self.graph.edge_count()];
        let mut seen = vec![false; self.graph.node_count()];
        let mut components = Vec::new();

        for start in 0..self.graph.node_count() {
            if seen[start] || self.tree.neighbors(NodeIndex::new(start)).next().is_none() {
                continue;
            }
            seen[start] = true;
            let mut members = vec![start];
            let mut stack = vec![start];
            while let Some(node) = stack.pop() {
                for (next, _) in self.neighbours(node, &no_removals) {
                    if !seen[next] {
                        seen[next] = true;
                        members.push(next);
                        stack.push(next);
                    }
                }
            }
            components.push(members);
        }

        components
    }

    fn rooted_at(&self, anchor: usize) -> RootedTree {
        let no_removals = vec![false; self.graph.edge_count()];
        let mut parent_edge = vec![None; self.graph.node_count()];
        let mut visited = vec![false; self.graph.node_count()];
        let mut order = Vec::new();
        let mut stack = vec![anchor];
        visited[anchor] = true;

        while let Some(node) = stack.pop() {
            order.push(node);
            for (next, edge) in self.neighbours(node, &no_removals) {
                if !visited[next] {
                    visited[next] = true;
                    parent_edge[next] = Some((node, edge));
                    stack.push(next);
                }
            }
        }

        RootedTree { order, parent_edge }
    }

    /// Net value of every subtree when the component hangs from the tree's anchor
    fn subtree_values(&self, rooted: &RootedTree, tolerance: f64) -> Vec<f64> {
        let mut value = vec![0.0; self.graph.node_count()];
        for &node in &rooted.order {
            value[node] = self.graph.prizes[node];
        }
        for &node in rooted.order.iter().rev() {
            if let Some((parent, edge)) = rooted.parent_edge[node] {
                let gain = positive_part(value[node] - self.graph.edges[edge].cost, tolerance);
                value[parent] += gain;
            }
        }
        value
    }
}

fn positive_part(gain: f64, tolerance: f64) -> f64 {
    if gain > tolerance {
        gain
    } else {
        0.0
    }
}

/// Apply `strategy` to the candidate edges; the result is sorted by edge index
pub fn prune(
    graph: &IndexedGraph,
    candidate: &[usize],
    root: Option<usize>,
    strategy: PruningStrategy,
    tolerance: f64,
) -> Vec<usize> {
    let forest = Forest::new(graph, candidate);

    let mut kept = match strategy {
        PruningStrategy::None => candidate.to_vec(),
        PruningStrategy::Simple | PruningStrategy::Gw => {
            strip_zero_prize_leaves(&forest, candidate, root, tolerance)
        }
        PruningStrategy::Strong => strong_prune(&forest, root, tolerance),
    };

    if let Some(root) = root {
        kept = restrict_to_component(&forest, &kept, root);
    }

    kept.sort_unstable();
    log::debug!(
        "Pruning ({}) kept {} of {} candidate edges",
        strategy,
        kept.len(),
        candidate.len()
    );
    kept
}

/// Repeatedly remove non-root leaves whose prize is zero
fn strip_zero_prize_leaves(
    forest: &Forest<'_>,
    candidate: &[usize],
    root: Option<usize>,
    tolerance: f64,
) -> Vec<usize> {
    let graph = forest.graph;
    let mut removed = vec![false; graph.edge_count()];
    let mut degree = vec![0usize; graph.node_count()];
    for &edge in candidate {
        degree[graph.edges[edge].source] += 1;
        degree[graph.edges[edge].target] += 1;
    }

    let strippable = |node: usize, degree: &[usize]| {
        degree[node] == 1 && Some(node) != root && graph.prizes[node] <= tolerance
    };

    let mut leaves: VecDeque<usize> = (0..graph.node_count())
        .filter(|&node| strippable(node, &degree))
        .collect();

    while let Some(leaf) = leaves.pop_front() {
        if !strippable(leaf, &degree) {
            continue;
        }
        let Some((neighbour, edge)) = forest.neighbours(leaf, &removed).next() else {
            continue;
        };
        removed[edge] = true;
        degree[leaf] -= 1;
        degree[neighbour] -= 1;
        if strippable(neighbour, &degree) {
            leaves.push_back(neighbour);
        }
    }

    candidate.iter().copied().filter(|&e| !removed[e]).collect()
}

/// Drop every edge whose hanging subtree is not worth its cost
fn strong_prune(forest: &Forest<'_>, root: Option<usize>, tolerance: f64) -> Vec<usize> {
    let mut kept = Vec::new();

    for members in forest.components() {
        let anchor = match root {
            Some(root) if members.contains(&root) => root,
            // Only the root's tree can survive in rooted mode
            Some(_) => continue,
            None => best_anchor(forest, &members, tolerance),
        };

        let rooted = forest.rooted_at(anchor);
        let value = forest.subtree_values(&rooted, tolerance);

        if root.is_none() && value[anchor] <= tolerance {
            continue;
        }

        // Walk down from the anchor through profitable edges only, so a
        // dropped edge takes its whole subtree with it
        let mut reached = vec![false; forest.graph.node_count()];
        reached[anchor] = true;
        for &node in &rooted.order {
            if let Some((parent, edge)) = rooted.parent_edge[node] {
                let gain = value[node] - forest.graph.edges[edge].cost;
                if reached[parent] && gain > tolerance {
                    reached[node] = true;
                    kept.push(edge);
                }
            }
        }
    }

    kept
}

/// Node of the component whose pruned tree has the largest net value.
///
/// One bottom-up pass from the smallest node gives every subtree value, and a
/// top-down rerooting pass turns those into whole-tree values per anchor.
fn best_anchor(forest: &Forest<'_>, members: &[usize], tolerance: f64) -> usize {
    // Components are discovered from their smallest node
    let start = members[0];
    let rooted = forest.rooted_at(start);
    let down = forest.subtree_values(&rooted, tolerance);

    let mut full = vec![0.0; forest.graph.node_count()];
    full[start] = down[start];
    for &node in &rooted.order {
        if let Some((parent, edge)) = rooted.parent_edge[node] {
            let cost = forest.graph.edges[edge].cost;
            let contribution = positive_part(down[node] - cost, tolerance);
            let rest = full[parent] - contribution;
            full[node] = down[node] + positive_part(rest - cost, tolerance);
        }
    }

    let mut sorted = members.to_vec();
    sorted.sort_unstable();
    let mut best = sorted[0];
    for &node in &sorted[1..] {
        if full[node] > full[best] + tolerance {
            best = node;
        }
    }
    best
}

/// Keep only the edges reachable from `root`
fn restrict_to_component(forest: &Forest<'_>, kept: &[usize], root: usize) -> Vec<usize> {
    let graph = forest.graph;
    let mut removed = vec![true; graph.edge_count()];
    for &edge in kept {
        removed[edge] = false;
    }

    let mut visited = vec![false; graph.node_count()];
    visited[root] = true;
    let mut stack = vec![root];
    let mut reachable = Vec::new();
    while let Some(node) = stack.pop() {
        for (next, edge) in forest.neighbours(node, &removed) {
            if !visited[next] {
                visited[next] = true;
                reachable.push(edge);
                stack.push(next);
            }
        }
    }

    reachable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::indexed::IndexedEdge;

    fn graph(prizes: &[f64], edges: &[(usize, usize, f64)]) -> IndexedGraph {
        let ids = (0..prizes.len()).map(|i| format!("n{:02}", i)).collect();
        let edges = edges
            .iter()
            .enumerate()
            .map(|(i, &(source, target, cost))| IndexedEdge {
                id: format!("e{:02}", i),
                source,
                target,
                cost,
            })
            .collect();
        IndexedGraph::from_parts(ids, prizes.to_vec(), edges)
    }

    fn all_edges(g: &IndexedGraph) -> Vec<usize> {
        (0..g.edge_count()).collect()
    }

    #[test]
    fn none_keeps_every_candidate_edge() {
        let g = graph(&[0.0, 0.0, 0.0], &[(0, 1, 5.0), (1, 2, 5.0)]);
        let kept = prune(&g, &all_edges(&g), None, PruningStrategy::None, 1e-9);
        assert_eq!(kept, vec![0, 1]);
    }

    #[test]
    fn simple_strips_zero_prize_leaf_chains() {
        // 0(5) - 1(0) - 2(0) and 0 - 3(1)
        let g = graph(&[5.0, 0.0, 0.0, 1.0], &[(0, 1, 1.0), (1, 2, 1.0), (0, 3, 1.0)]);
        let kept = prune(&g, &all_edges(&g), None, PruningStrategy::Simple, 1e-9);
        assert_eq!(kept, vec![2]);
    }

    #[test]
    fn gw_matches_simple_and_spares_the_root() {
        let g = graph(&[0.0, 0.0, 2.0], &[(0, 1, 1.0), (1, 2, 1.0)]);
        let kept = prune(&g, &all_edges(&g), Some(0), PruningStrategy::Gw, 1e-9);
        assert_eq!(kept, vec![0, 1]);
        // Without a root the zero-prize chain unravels completely
        let unrooted = prune(&g, &all_edges(&g), None, PruningStrategy::Gw, 1e-9);
        assert!(unrooted.is_empty());
    }

    #[test]
    fn strong_drops_unprofitable_leaves() {
        // Star around 0 with cheap profitable leaf 1 and costly leaf 2
        let g = graph(&[10.0, 3.0, 0.5], &[(0, 1, 1.0), (0, 2, 1.0)]);
        let kept = prune(&g, &all_edges(&g), None, PruningStrategy::Strong, 1e-9);
        assert_eq!(kept, vec![0]);
    }

    #[test]
    fn strong_drops_whole_subtree_under_a_losing_edge() {
        // 0(10) -[20]- 1(1) - 2(5): subtree under e0 is worth 1 + 4 - 20 < 0
        let g = graph(&[10.0, 1.0, 5.0], &[(0, 1, 20.0), (1, 2, 1.0)]);
        let kept = prune(&g, &all_edges(&g), Some(0), PruningStrategy::Strong, 1e-9);
        assert!(kept.is_empty());
    }

    #[test]
    fn strong_unrooted_picks_the_best_anchor() {
        // Anchoring at the zero-prize node 0 would keep the costly edge e0
        let g = graph(&[0.0, 10.0, 4.0], &[(0, 1, 5.0), (1, 2, 1.0)]);
        let kept = prune(&g, &all_edges(&g), None, PruningStrategy::Strong, 1e-9);
        assert_eq!(kept, vec![1]);
    }

    #[test]
    fn strong_unrooted_drops_worthless_components() {
        let g = graph(&[1.0, 1.0, 5.0, 5.0], &[(0, 1, 3.0), (2, 3, 1.0)]);
        let kept = prune(&g, &all_edges(&g), None, PruningStrategy::Strong, 1e-9);
        assert_eq!(kept, vec![1]);
    }

    #[test]
    fn strong_rejects_zero_value_edges() {
        let g = graph(&[1.0, 1.0], &[(0, 1, 1.0)]);
        let kept = prune(&g, &all_edges(&g), None, PruningStrategy::Strong, 1e-9);
        assert!(kept.is_empty());
    }

    #[test]
    fn rooted_mode_discards_other_components_for_every_strategy() {
        let g = graph(&[1.0, 9.0, 5.0, 5.0], &[(0, 1, 1.0), (2, 3, 1.0)]);
        for strategy in [
            PruningStrategy::None,
            PruningStrategy::Simple,
            PruningStrategy::Gw,
            PruningStrategy::Strong,
        ] {
            let kept = prune(&g, &all_edges(&g), Some(0), strategy, 1e-9);
            assert_eq!(kept, vec![0], "strategy {}", strategy);
        }
    }
}
