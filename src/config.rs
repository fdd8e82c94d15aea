//! Configuration management for the PCST solver

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PcstError, PcstResult};

/// Default tolerance for near-equality comparisons of times and costs
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Post-processing applied to the candidate forest produced by growth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PruningStrategy {
    /// Keep every candidate edge
    None,
    /// Strip zero-prize leaves
    Simple,
    /// Strip zero-prize leaves (Goemans-Williamson style cleanup)
    Gw,
    /// Drop every subtree whose net value is not positive
    #[default]
    Strong,
}

impl PruningStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PruningStrategy::None => "none",
            PruningStrategy::Simple => "simple",
            PruningStrategy::Gw => "gw",
            PruningStrategy::Strong => "strong",
        }
    }
}

impl fmt::Display for PruningStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PruningStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(PruningStrategy::None),
            "simple" => Ok(PruningStrategy::Simple),
            "gw" => Ok(PruningStrategy::Gw),
            "strong" => Ok(PruningStrategy::Strong),
            other => Err(format!(
                "unknown pruning strategy '{}' (expected none, simple, gw or strong)",
                other
            )),
        }
    }
}

/// Solver configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Pruning applied after the growth phase
    pub pruning: PruningStrategy,

    /// Tolerance relative to the largest prize or edge cost of the input
    pub tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            pruning: PruningStrategy::Strong,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with custom values
    pub fn new(pruning: PruningStrategy, tolerance: f64) -> Self {
        Self { pruning, tolerance }
    }

    pub fn with_pruning(mut self, pruning: PruningStrategy) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Absolute tolerance for an input whose largest prize or cost is `magnitude`.
    ///
    /// All-zero inputs fall back to the configured value.
    pub fn scaled_tolerance(&self, magnitude: f64) -> f64 {
        if magnitude > 0.0 {
            self.tolerance * magnitude
        } else {
            self.tolerance
        }
    }

    /// Reject tolerances that would make every comparison meaningless
    pub fn validate(&self) -> PcstResult<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(PcstError::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }
}
