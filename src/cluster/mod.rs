//! Growth clusters and their bookkeeping
//!
//! Clusters live in a flat arena addressed by the index of their
//! representative node; the [`DisjointSet`] maps any node to that index.

pub mod disjoint_set;

pub use disjoint_set::DisjointSet;

/// State of one growth cluster
#[derive(Debug, Clone)]
pub struct Cluster {
    /// Representative node index
    pub id: usize,

    /// Member node indices
    pub members: Vec<usize>,

    /// Whether the cluster is still growing
    pub active: bool,

    /// Set for the cluster holding the root; it never saturates
    pub never_saturating: bool,

    /// Sum of member prizes
    pub prize_sum: f64,

    /// Amount grown as of `updated_at`, including every merged sub-cluster
    pub grown: f64,

    /// Simulation time `grown` refers to
    pub updated_at: f64,

    /// Edges that may cross the cluster boundary; internal ones are pruned on merge
    pub boundary: Vec<u32>,

    /// Stamp of the newest saturation event scheduled for this cluster
    pub version: u64,
}

impl Cluster {
    /// Amount grown at time `now`
    pub fn grown_at(&self, now: f64) -> f64 {
        if self.active {
            self.grown + (now - self.updated_at)
        } else {
            self.grown
        }
    }

    /// Fold growth up to `now` into `grown`
    pub fn advance(&mut self, now: f64) {
        self.grown = self.grown_at(now);
        self.updated_at = now;
    }

    /// Growth rate contributed to incident edges
    pub fn rate(&self) -> f64 {
        if self.active {
            1.0
        } else {
            0.0
        }
    }

    /// Time at which the cluster saturates, if it ever does
    pub fn saturation_time(&self) -> Option<f64> {
        if !self.active || self.never_saturating {
            return None;
        }
        let remaining = (self.prize_sum - self.grown).max(0.0);
        Some(self.updated_at + remaining)
    }
}

/// Arena of clusters plus the disjoint-set mapping nodes onto them
#[derive(Debug)]
pub struct ClusterArena {
    clusters: Vec<Cluster>,
    sets: DisjointSet,
}

impl ClusterArena {
    pub fn new(clusters: Vec<Cluster>) -> Self {
        let sets = DisjointSet::new(clusters.len());
        Self { clusters, sets }
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Representative cluster of `node`
    pub fn find(&mut self, node: usize) -> usize {
        self.sets.find(node)
    }

    pub fn is_representative(&mut self, cluster: usize) -> bool {
        self.sets.find(cluster) == cluster
    }

    pub fn get(&self, cluster: usize) -> &Cluster {
        &self.clusters[cluster]
    }

    pub fn get_mut(&mut self, cluster: usize) -> &mut Cluster {
        &mut self.clusters[cluster]
    }

    /// Merge two distinct representative clusters at time `now`.
    ///
    /// Both sides must already be advanced to `now`. The merged record keeps
    /// the combined prize and growth and is active if either side was; the
    /// absorbed record is emptied. Returns the surviving representative.
    pub fn merge(&mut self, a: usize, b: usize, now: f64) -> usize {
        debug_assert_ne!(a, b);
        debug_assert!(self.is_representative(a) && self.is_representative(b));

        let survivor = self.sets.union(a, b);
        let absorbed = if survivor == a { b } else { a };

        let taken = std::mem::replace(
            &mut self.clusters[absorbed],
            Cluster {
                id: absorbed,
                members: Vec::new(),
                active: false,
                never_saturating: false,
                prize_sum: 0.0,
                grown: 0.0,
                updated_at: now,
                boundary: Vec::new(),
                version: 0,
            },
        );

        let merged = &mut self.clusters[survivor];
        merged.active = merged.active || taken.active;
        merged.never_saturating = merged.never_saturating || taken.never_saturating;
        merged.prize_sum += taken.prize_sum;
        merged.grown += taken.grown;
        merged.updated_at = now;
        merged.members.extend(taken.members);
        merged.boundary.extend(taken.boundary);
        merged.version += 1;

        survivor
    }
}
