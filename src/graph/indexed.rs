//! Dense, index-addressed graph used inside a single solve
//!
//! Nodes are sorted by identifier and edges by edge identifier, so index
//! order and identifier order agree. Incidence lists are stored in a
//! compressed sparse layout: `offsets[i]..offsets[i + 1]` is the range of
//! `incidence` holding the edges touching node `i`.

use std::mem;

/// One normalized undirected edge
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedEdge {
    pub id: String,
    pub source: usize,
    pub target: usize,
    pub cost: f64,
}

#[derive(Debug, Clone)]
pub struct IndexedGraph {
    /// Node identifiers in ascending order
    pub node_ids: Vec<String>,

    /// Prize per node index
    pub prizes: Vec<f64>,

    /// Normalized edges in ascending identifier order
    pub edges: Vec<IndexedEdge>,

    offsets: Vec<u32>,
    incidence: Vec<u32>,
}

impl IndexedGraph {
    /// Assemble the graph and its incidence lists.
    ///
    /// `node_ids` must be sorted and unique, and every edge endpoint must be
    /// a valid index into it.
    pub fn from_parts(node_ids: Vec<String>, prizes: Vec<f64>, edges: Vec<IndexedEdge>) -> Self {
        debug_assert_eq!(node_ids.len(), prizes.len());
        debug_assert!(node_ids.windows(2).all(|w| w[0] < w[1]));

        let node_count = node_ids.len();
        let mut degrees = vec![0u32; node_count];
        for edge in &edges {
            degrees[edge.source] += 1;
            degrees[edge.target] += 1;
        }

        let mut offsets = Vec::with_capacity(node_count + 1);
        offsets.push(0);
        let mut offset = 0;
        for &degree in &degrees {
            offset += degree;
            offsets.push(offset);
        }

        let mut incidence = vec![0u32; offset as usize];
        let mut cursor = vec![0u32; node_count];
        for (edge_idx, edge) in edges.iter().enumerate() {
            for node in [edge.source, edge.target] {
                let pos = (offsets[node] + cursor[node]) as usize;
                incidence[pos] = edge_idx as u32;
                cursor[node] += 1;
            }
        }

        Self {
            node_ids,
            prizes,
            edges,
            offsets,
            incidence,
        }
    }

    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Index of the node with the given identifier
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.node_ids
            .binary_search_by(|probe| probe.as_str().cmp(id))
            .ok()
    }

    /// Indices of the edges touching `node`, in ascending edge order
    pub fn incident_edges(&self, node: usize) -> &[u32] {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        &self.incidence[start..end]
    }

    pub fn degree(&self, node: usize) -> usize {
        (self.offsets[node + 1] - self.offsets[node]) as usize
    }

    /// Largest prize or edge cost, zero for an empty or all-zero graph
    pub fn magnitude(&self) -> f64 {
        self.prizes
            .iter()
            .copied()
            .chain(self.edges.iter().map(|e| e.cost))
            .fold(0.0, f64::max)
    }

    /// Estimate memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        let base = mem::size_of::<Self>();
        let ids: usize = self.node_ids.iter().map(|s| s.capacity()).sum();
        let prizes = self.prizes.capacity() * mem::size_of::<f64>();
        let edges = self.edges.capacity() * mem::size_of::<IndexedEdge>()
            + self.edges.iter().map(|e| e.id.capacity()).sum::<usize>();
        let csr = (self.offsets.capacity() + self.incidence.capacity()) * mem::size_of::<u32>();

        base + ids + prizes + edges + csr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> IndexedGraph {
        let ids = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let edges = vec![
            IndexedEdge { id: "ab".into(), source: 0, target: 1, cost: 1.0 },
            IndexedEdge { id: "ac".into(), source: 0, target: 2, cost: 2.0 },
            IndexedEdge { id: "bc".into(), source: 1, target: 2, cost: 3.0 },
        ];
        IndexedGraph::from_parts(ids, vec![0.0; 3], edges)
    }

    #[test]
    fn incidence_lists_cover_both_endpoints() {
        let graph = triangle();
        assert_eq!(graph.incident_edges(0), &[0, 1]);
        assert_eq!(graph.incident_edges(1), &[0, 2]);
        assert_eq!(graph.incident_edges(2), &[1, 2]);
        assert_eq!(graph.degree(2), 2);
    }

    #[test]
    fn node_lookup_uses_sorted_ids() {
        let graph = triangle();
        assert_eq!(graph.node_index("b"), Some(1));
        assert_eq!(graph.node_index("z"), None);
        assert!(graph.memory_usage() > 0);
    }

    #[test]
    fn magnitude_covers_prizes_and_costs() {
        let mut graph = triangle();
        assert_eq!(graph.magnitude(), 3.0);
        graph.prizes[1] = 7.5;
        assert_eq!(graph.magnitude(), 7.5);

        let empty = IndexedGraph::from_parts(Vec::new(), Vec::new(), Vec::new());
        assert_eq!(empty.magnitude(), 0.0);
    }
}
