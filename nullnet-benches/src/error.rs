//! Benchmark setup error type.
//!
//! Lets setup functions propagate failures with `?` instead of calling
//! `.expect()` inside benchmark bodies.

use nullnet_core::{GenerateError, LatticeError};

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Random graph generation rejected the configuration.
    #[error("graph generation failed: {0}")]
    Generate(#[from] GenerateError),
    /// Rewiring failed while preparing an input.
    #[error("lattice rewiring failed: {0}")]
    Lattice(#[from] LatticeError),
    /// No connected graph appeared within the retry budget.
    #[error("no connected graph with {nodes} nodes after {attempts} draws")]
    Disconnected {
        /// Requested node count.
        nodes: usize,
        /// Number of graphs drawn.
        attempts: usize,
    },
}
