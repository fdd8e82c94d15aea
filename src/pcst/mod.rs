//! Prize-collecting Steiner tree solver
//!
//! A solve runs in three steps:
//!
//! 1. Validate the input and normalize it into an [`IndexedGraph`]: prizes
//!    default to zero, self-loops are dropped and parallel edges collapse to
//!    the cheapest one.
//! 2. Growth: a primal-dual simulation in which clusters of nodes grow until
//!    the edges between them are paid for, yielding an acyclic candidate
//!    forest.
//! 3. Pruning: remove the parts of the forest that do not pay for
//!    themselves, according to the configured [`PruningStrategy`].
//!
//! Each call allocates its own state and keeps nothing afterwards, so calls
//! on independent inputs can run concurrently (see [`batch`]).
//!
//! [`PruningStrategy`]: crate::config::PruningStrategy

pub mod batch;
pub mod events;
pub mod growth;
pub mod metrics;
pub mod pruning;

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::config::SolverConfig;
use crate::error::{PcstError, PcstResult};
use crate::graph::{normalize, GraphSource, IndexedGraph, NormalizeStats};

pub use batch::{solve_batch, PrizeQuery};
pub use metrics::SolutionMetrics;

/// Selected subgraph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PcstSolution {
    /// Endpoints of the selected edges, plus the root when one was given
    pub nodes: BTreeSet<String>,

    /// Identifiers of the selected edges
    pub edges: BTreeSet<String>,

    pub metrics: SolutionMetrics,

    /// What input normalization dropped or added
    pub normalization: NormalizeStats,
}

impl PcstSolution {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains(id)
    }

    pub fn contains_edge(&self, id: &str) -> bool {
        self.edges.contains(id)
    }
}

/// Solve with the default configuration
pub fn solve_default<G: GraphSource + ?Sized>(
    graph: &G,
    prizes: &HashMap<String, f64>,
    root: Option<&str>,
) -> PcstResult<PcstSolution> {
    solve(graph, prizes, root, &SolverConfig::default())
}

/// Select a prize-collecting subgraph of `graph`.
///
/// Without a root (or with an empty one) the result is a forest in which
/// every tree pays for itself. With a root the result is a single tree
/// containing the root, possibly the root alone.
pub fn solve<G: GraphSource + ?Sized>(
    graph: &G,
    prizes: &HashMap<String, f64>,
    root: Option<&str>,
    config: &SolverConfig,
) -> PcstResult<PcstSolution> {
    config.validate()?;

    let (indexed, normalization) = normalize::build_indexed(graph, prizes)?;

    let root = match root.filter(|id| !id.is_empty()) {
        Some(id) => Some(
            indexed
                .node_index(id)
                .ok_or_else(|| PcstError::InvalidRoot(id.to_string()))?,
        ),
        None => None,
    };

    if indexed.node_count() == 0 {
        return Ok(PcstSolution {
            normalization,
            ..PcstSolution::default()
        });
    }

    let tolerance = config.scaled_tolerance(indexed.magnitude());

    log::debug!(
        "Solving PCST on {} nodes and {} edges, {} bytes indexed (root: {:?}, pruning: {}, tolerance: {:e})",
        indexed.node_count(),
        indexed.edge_count(),
        indexed.memory_usage(),
        root.map(|r| indexed.node_ids[r].as_str()),
        config.pruning,
        tolerance
    );

    let growth = growth::grow(&indexed, root, tolerance);
    let kept = pruning::prune(&indexed, &growth.selected, root, config.pruning, tolerance);

    Ok(assemble(&indexed, &kept, root, normalization))
}

fn assemble(
    graph: &IndexedGraph,
    kept: &[usize],
    root: Option<usize>,
    normalization: NormalizeStats,
) -> PcstSolution {
    let mut node_indices: BTreeSet<usize> = kept
        .iter()
        .flat_map(|&e| [graph.edges[e].source, graph.edges[e].target])
        .collect();
    if let Some(root) = root {
        node_indices.insert(root);
    }
    let node_indices: Vec<usize> = node_indices.into_iter().collect();

    let metrics = SolutionMetrics::calculate(graph, &node_indices, kept);

    PcstSolution {
        nodes: node_indices
            .iter()
            .map(|&n| graph.node_ids[n].clone())
            .collect(),
        edges: kept.iter().map(|&e| graph.edges[e].id.clone()).collect(),
        metrics,
        normalization,
    }
}
