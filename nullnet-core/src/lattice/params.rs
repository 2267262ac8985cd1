//! Parameter handling for the lattice rewiring.

use std::num::NonZeroUsize;

use crate::error::LatticeError;

/// Seed used when the caller does not pick one.
const DEFAULT_RNG_SEED: u64 = 0x1A77_1CE5;

/// Which existing edges are eligible for rewiring.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum EdgeSelection {
    /// Only entries strictly below the diagonal (`row > col`), one
    /// representative direction per node pair.
    #[default]
    LowerTriangle,
    /// Every nonzero entry of the directed graph.
    All,
}

/// Configuration for a [`crate::Latticizer`] run.
///
/// # Examples
/// ```
/// use nullnet_core::{EdgeSelection, LatticeParams};
///
/// let params = LatticeParams::new(5)
///     .with_rng_seed(42)
///     .with_edge_selection(EdgeSelection::All);
/// assert_eq!(params.iterations(), 5);
/// assert_eq!(params.rng_seed(), 42);
/// assert!(params.max_consecutive_rejections().is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LatticeParams {
    iterations: usize,
    rng_seed: u64,
    edge_selection: EdgeSelection,
    max_consecutive_rejections: Option<NonZeroUsize>,
}

impl LatticeParams {
    /// Creates parameters that attempt `iterations` rewires per eligible
    /// edge. Zero iterations is a valid no-op.
    #[must_use]
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            rng_seed: DEFAULT_RNG_SEED,
            edge_selection: EdgeSelection::default(),
            max_consecutive_rejections: None,
        }
    }

    /// Seeds the call-local RNG used by [`crate::Latticizer::run`].
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Chooses which edges the sampler draws from.
    #[must_use]
    pub fn with_edge_selection(mut self, selection: EdgeSelection) -> Self {
        self.edge_selection = selection;
        self
    }

    /// Fails the run with [`LatticeError::RewireBudgetExhausted`] once this
    /// many candidates in a row have been rejected.
    ///
    /// # Errors
    /// Returns [`LatticeError::InvalidParameters`] when `cap` is zero.
    pub fn with_max_consecutive_rejections(mut self, cap: usize) -> Result<Self, LatticeError> {
        let cap = NonZeroUsize::new(cap).ok_or_else(|| LatticeError::InvalidParameters {
            reason: "max_consecutive_rejections must be greater than zero".into(),
        })?;
        self.max_consecutive_rejections = Some(cap);
        Ok(self)
    }

    /// Returns the rewire passes per eligible edge.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Returns the seed used by [`crate::Latticizer::run`].
    #[must_use]
    pub fn rng_seed(&self) -> u64 {
        self.rng_seed
    }

    /// Returns the edge selection policy.
    #[must_use]
    pub fn edge_selection(&self) -> EdgeSelection {
        self.edge_selection
    }

    /// Returns the rejection-streak cap, if any.
    #[must_use]
    pub fn max_consecutive_rejections(&self) -> Option<NonZeroUsize> {
        self.max_consecutive_rejections
    }

    /// Total attempts for a run over `edge_count` eligible edges.
    pub(crate) fn attempt_budget(&self, edge_count: usize) -> Result<usize, LatticeError> {
        self.iterations
            .checked_mul(edge_count)
            .ok_or_else(|| LatticeError::InvalidParameters {
                reason: format!(
                    "iterations ({}) x edges ({edge_count}) overflows the attempt counter",
                    self.iterations
                ),
            })
    }
}

impl Default for LatticeParams {
    fn default() -> Self {
        Self::new(1)
    }
}
