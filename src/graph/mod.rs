//! Graph representation consumed by the solver
//!
//! The solver reads graphs through [`GraphSource`] and never mutates them.
//! [`Graph`] is the owned implementation used by the loaders and the CLI.

pub mod builder;
pub mod indexed;
pub mod normalize;

use std::borrow::Cow;

use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef as _;
use serde::{Deserialize, Serialize};

pub use builder::GraphBuilder;
pub use indexed::IndexedGraph;
pub use normalize::NormalizeStats;

/// Borrowed view of one undirected edge
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRef<'a> {
    pub id: Cow<'a, str>,
    pub source: &'a str,
    pub target: &'a str,
    pub cost: f64,
}

/// Read-only access to a graph held by some storage component
pub trait GraphSource {
    /// Identifiers of every node
    fn node_ids(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    /// Every edge, parallel edges and self-loops included
    fn edges(&self) -> Box<dyn Iterator<Item = EdgeRef<'_>> + '_>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub cost: f64,
}

/// Owned graph with string-keyed nodes and edges
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Look up an edge by identifier
    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }
}

impl GraphSource for Graph {
    fn node_ids(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.nodes.iter().map(|n| n.id.as_str()))
    }

    fn edges(&self) -> Box<dyn Iterator<Item = EdgeRef<'_>> + '_> {
        Box::new(self.edges.iter().map(|e| EdgeRef {
            id: Cow::Borrowed(e.id.as_str()),
            source: e.source.as_str(),
            target: e.target.as_str(),
            cost: e.cost,
        }))
    }
}

/// petgraph graphs whose node weights are identifiers and edge weights are
/// costs; edge identifiers are `e<index>`
impl GraphSource for UnGraph<String, f64> {
    fn node_ids(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.node_indices().map(move |idx| self[idx].as_str()))
    }

    fn edges(&self) -> Box<dyn Iterator<Item = EdgeRef<'_>> + '_> {
        Box::new(self.edge_references().map(move |e| EdgeRef {
            id: Cow::Owned(format!("e{}", e.id().index())),
            source: self[e.source()].as_str(),
            target: self[e.target()].as_str(),
            cost: *e.weight(),
        }))
    }
}
