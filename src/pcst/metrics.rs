//! Summary statistics for a solved subgraph

use serde::{Deserialize, Serialize};

use crate::cluster::DisjointSet;
use crate::graph::IndexedGraph;

/// Value accounting for a selected subgraph
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SolutionMetrics {
    /// Sum of the prizes of selected nodes
    pub total_prize: f64,

    /// Sum of the costs of selected edges
    pub total_cost: f64,

    /// `total_prize - total_cost`
    pub net_value: f64,

    pub node_count: usize,
    pub edge_count: usize,

    /// Number of trees in the selected forest
    pub component_count: usize,
}

impl SolutionMetrics {
    /// Calculate metrics for the given node and edge indices
    pub fn calculate(graph: &IndexedGraph, nodes: &[usize], edges: &[usize]) -> Self {
        let total_prize: f64 = nodes.iter().map(|&n| graph.prizes[n]).sum();
        let total_cost: f64 = edges.iter().map(|&e| graph.edges[e].cost).sum();

        let mut sets = DisjointSet::new(graph.node_count());
        let mut merges = 0;
        for &edge in edges {
            let e = &graph.edges[edge];
            if !sets.same_set(e.source, e.target) {
                sets.union(e.source, e.target);
                merges += 1;
            }
        }

        Self {
            total_prize,
            total_cost,
            net_value: total_prize - total_cost,
            node_count: nodes.len(),
            edge_count: edges.len(),
            component_count: nodes.len() - merges,
        }
    }
}
