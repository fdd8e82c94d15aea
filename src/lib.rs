//! Prize-collecting Steiner tree extraction of relevant subgraphs

pub mod cluster;
pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod pcst;
pub mod storage;
pub mod viz;

pub use anyhow::{anyhow, Result};

pub use config::{PruningStrategy, SolverConfig};
pub use error::PcstError;
pub use graph::{Edge, Graph, GraphBuilder, GraphSource, Node};
pub use pcst::{solve, solve_batch, solve_default, PcstSolution, PrizeQuery, SolutionMetrics};
