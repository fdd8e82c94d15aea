//! Graph construction module

use std::collections::HashMap;

use crate::graph::{Edge, Graph, Node};

/// Builder for incrementally constructing a [`Graph`]
pub struct GraphBuilder {
    /// Mapping from string IDs to node positions
    id_to_index: HashMap<String, usize>,

    /// Nodes in insertion order
    nodes: Vec<Node>,

    /// Edges in insertion order
    edges: Vec<Edge>,
}

impl GraphBuilder {
    /// Create a new graph builder with the given node capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id_to_index: HashMap::with_capacity(capacity),
            nodes: Vec::with_capacity(capacity),
            edges: Vec::new(),
        }
    }

    /// Get or create the node position for the given string ID
    pub fn get_or_create_node(&mut self, id: &str) -> usize {
        if let Some(&idx) = self.id_to_index.get(id) {
            return idx;
        }

        let idx = self.nodes.len();
        self.id_to_index.insert(id.to_string(), idx);
        self.nodes.push(Node { id: id.to_string() });

        idx
    }

    /// Add an undirected edge, creating missing endpoints
    pub fn add_edge(&mut self, id: &str, source: &str, target: &str, cost: f64) {
        self.get_or_create_node(source);
        self.get_or_create_node(target);

        self.edges.push(Edge {
            id: id.to_string(),
            source: source.to_string(),
            target: target.to_string(),
            cost,
        });
    }

    /// Add an edge named `<source>-<target>`
    pub fn add_named_edge(&mut self, source: &str, target: &str, cost: f64) {
        let id = format!("{}-{}", source, target);
        self.add_edge(&id, source, target, cost);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Build the graph
    pub fn build(self) -> Graph {
        Graph {
            nodes: self.nodes,
            edges: self.edges,
        }
    }
}
