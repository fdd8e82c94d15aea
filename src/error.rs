//! Error types surfaced by the solver

use thiserror::Error;

/// Input validation failures reported by [`crate::pcst::solve`].
///
/// All of these are detected before any growth work starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PcstError {
    /// A non-empty root identifier that is not a node of the graph
    #[error("root node '{0}' is not present in the graph")]
    InvalidRoot(String),

    /// A prize that is negative or not a finite number
    #[error("invalid prize {prize} for node '{node}': prizes must be finite and non-negative")]
    InvalidPrize { node: String, prize: f64 },

    /// An edge cost that is negative or not a finite number
    #[error("invalid cost {cost} for edge '{edge}': costs must be finite and non-negative")]
    InvalidEdgeCost { edge: String, cost: f64 },

    /// A comparison tolerance that is negative or not finite
    #[error("invalid tolerance {0}: must be finite and non-negative")]
    InvalidTolerance(f64),
}

pub type PcstResult<T> = std::result::Result<T, PcstError>;
