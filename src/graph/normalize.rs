//! Input validation and edge normalization
//!
//! Turns any [`GraphSource`] plus a prize mapping into an [`IndexedGraph`]:
//! self-loops are dropped, parallel edges between the same unordered pair
//! are coalesced to the cheapest one, and every prize and cost is checked.

use std::collections::{BTreeSet, HashMap};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::{PcstError, PcstResult};
use crate::graph::indexed::{IndexedEdge, IndexedGraph};
use crate::graph::GraphSource;

/// Counts of what normalization removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeStats {
    pub input_edges: usize,
    pub self_loops: usize,
    pub parallel_edges: usize,
    /// Nodes that only appeared as edge endpoints
    pub implicit_nodes: usize,
}

fn valid_amount(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Check every prize; the lexicographically smallest offender is reported
pub fn validate_prizes(prizes: &HashMap<String, f64>) -> PcstResult<()> {
    let offender = prizes
        .iter()
        .filter(|(_, &prize)| !valid_amount(prize))
        .min_by(|a, b| a.0.cmp(b.0));

    match offender {
        Some((node, &prize)) => Err(PcstError::InvalidPrize {
            node: node.clone(),
            prize,
        }),
        None => Ok(()),
    }
}

/// Build the indexed, normalized form of `graph`
pub fn build_indexed<G: GraphSource + ?Sized>(
    graph: &G,
    prizes: &HashMap<String, f64>,
) -> PcstResult<(IndexedGraph, NormalizeStats)> {
    validate_prizes(prizes)?;

    let mut stats = NormalizeStats::default();

    let declared: BTreeSet<&str> = graph.node_ids().collect();
    let mut all_nodes = declared.clone();
    for edge in graph.edges() {
        stats.input_edges += 1;
        if !valid_amount(edge.cost) {
            return Err(PcstError::InvalidEdgeCost {
                edge: edge.id.into_owned(),
                cost: edge.cost,
            });
        }
        all_nodes.insert(edge.source);
        all_nodes.insert(edge.target);
    }
    stats.implicit_nodes = all_nodes.len() - declared.len();

    let node_ids: Vec<String> = all_nodes.iter().map(|id| id.to_string()).collect();
    let index: HashMap<&str, usize> = all_nodes
        .iter()
        .enumerate()
        .map(|(i, &id)| (id, i))
        .collect();

    // Cheapest edge per unordered pair; ties keep the smallest identifier
    let mut best: HashMap<(usize, usize), IndexedEdge> = HashMap::new();
    for edge in graph.edges() {
        let u = index[edge.source];
        let v = index[edge.target];
        if u == v {
            stats.self_loops += 1;
            continue;
        }
        let key = (u.min(v), u.max(v));
        let candidate = IndexedEdge {
            id: edge.id.into_owned(),
            source: key.0,
            target: key.1,
            cost: edge.cost,
        };
        match best.get_mut(&key) {
            Some(current) => {
                stats.parallel_edges += 1;
                let cheaper = candidate.cost < current.cost
                    || (candidate.cost == current.cost && candidate.id < current.id);
                if cheaper {
                    *current = candidate;
                }
            }
            None => {
                best.insert(key, candidate);
            }
        }
    }

    let edges: Vec<IndexedEdge> = best
        .into_values()
        .sorted_by(|a, b| {
            a.id.cmp(&b.id)
                .then(a.source.cmp(&b.source))
                .then(a.target.cmp(&b.target))
        })
        .collect();

    let node_prizes: Vec<f64> = node_ids
        .iter()
        .map(|id| prizes.get(id).copied().unwrap_or(0.0))
        .collect();

    log::debug!(
        "Normalized {} input edges to {} ({} self-loops, {} parallel dropped, {} implicit nodes)",
        stats.input_edges,
        edges.len(),
        stats.self_loops,
        stats.parallel_edges,
        stats.implicit_nodes
    );

    Ok((IndexedGraph::from_parts(node_ids, node_prizes, edges), stats))
}
