//! Parallel solving of independent prize queries over one graph
//!
//! Context retrieval typically asks many questions of the same graph with
//! different prize assignments. Each query is an ordinary [`solve`] call
//! with its own state, so they parallelize without any locking.

use std::collections::HashMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::SolverConfig;
use crate::error::PcstResult;
use crate::graph::GraphSource;
use crate::pcst::{solve, PcstSolution};

/// One prize assignment plus an optional root
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrizeQuery {
    pub prizes: HashMap<String, f64>,
    #[serde(default)]
    pub root: Option<String>,
}

impl PrizeQuery {
    pub fn new(prizes: HashMap<String, f64>, root: Option<String>) -> Self {
        Self { prizes, root }
    }
}

/// Solve every query against `graph`; results are in query order
pub fn solve_batch<G: GraphSource + Sync + ?Sized>(
    graph: &G,
    queries: &[PrizeQuery],
    config: &SolverConfig,
) -> Vec<PcstResult<PcstSolution>> {
    log::debug!("Solving batch of {} queries", queries.len());

    queries
        .par_iter()
        .map(|query| solve(graph, &query.prizes, query.root.as_deref(), config))
        .collect()
}
