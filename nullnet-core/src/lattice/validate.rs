//! Input checks performed before any rewiring.

use tracing::warn;

use crate::{
    connectivity::{Connectivity, classify},
    error::LatticeError,
    matrix::Adjacency,
};

/// Rejects empty, malformed or disconnected graphs and reports how the
/// accepted graph is connected.
pub(crate) fn validate_input(adjacency: &Adjacency) -> Result<Connectivity, LatticeError> {
    let result = check(adjacency);
    if let Err(error) = &result {
        warn!(code = error.code().as_str(), %error, "rejecting lattice input");
    }
    result
}

fn check(adjacency: &Adjacency) -> Result<Connectivity, LatticeError> {
    if adjacency.is_empty() {
        return Err(LatticeError::EmptyGraph);
    }
    if let Some((row, col)) = adjacency.first_non_finite() {
        return Err(LatticeError::NonFiniteWeight { row, col });
    }
    if let Some(node) = adjacency.first_self_loop() {
        return Err(LatticeError::NonZeroDiagonal { node });
    }
    match classify(adjacency) {
        Connectivity::Disconnected { components } => {
            Err(LatticeError::Disconnected { components })
        }
        connected => Ok(connected),
    }
}
