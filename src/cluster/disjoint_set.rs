//! Union-Find structure tracking which nodes share a growth cluster

/// Disjoint sets over dense indices `0..n` with path compression and union by size
#[derive(Debug, Clone)]
pub struct DisjointSet {
    /// Parent pointers (parent[i] = parent of node i)
    parent: Vec<u32>,

    /// Size of each set, only meaningful at representatives
    size: Vec<u32>,
}

impl DisjointSet {
    /// Create a new DisjointSet with `size` singleton sets
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size as u32).collect(),
            size: vec![1; size],
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Find the representative of the set containing x with path compression
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] as usize != root {
            root = self.parent[root] as usize;
        }

        // Point every node on the path straight at the root
        let mut node = x;
        while self.parent[node] as usize != root {
            let next = self.parent[node] as usize;
            self.parent[node] = root as u32;
            node = next;
        }

        root
    }

    /// Union the sets containing x and y, returning the surviving representative.
    ///
    /// The larger set absorbs the smaller; on equal sizes the lower index
    /// survives, so the outcome does not depend on argument order.
    pub fn union(&mut self, x: usize, y: usize) -> usize {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return root_x;
        }

        let size_x = self.size[root_x];
        let size_y = self.size[root_y];
        let (survivor, absorbed) = if size_x > size_y || (size_x == size_y && root_x < root_y) {
            (root_x, root_y)
        } else {
            (root_y, root_x)
        };

        self.parent[absorbed] = survivor as u32;
        self.size[survivor] += self.size[absorbed];
        survivor
    }

    /// Get the size of the set containing x
    pub fn size(&mut self, x: usize) -> usize {
        let root = self.find(x);
        self.size[root] as usize
    }

    pub fn same_set(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }
}
