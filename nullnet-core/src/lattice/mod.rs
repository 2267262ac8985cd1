//! Connectivity-preserving lattice rewiring.
//!
//! [`latticize_connected`] repeatedly swaps the targets of two edges,
//! `a -> b, c -> d` becoming `a -> d, c -> b`, whenever the swap keeps
//! edges at least as close to a ring lattice as before and leaves the graph
//! connected. Degrees, weights, and the number of links are preserved; the
//! ring cost reported by [`RingDistance::cost`] never increases.

mod distance;
mod driver;
mod edges;
mod feasibility;
mod params;
mod sampler;
mod validate;
mod verifier;

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{Span, debug, field, info, instrument};

pub use self::{
    distance::RingDistance,
    driver::RewireStats,
    edges::{Edge, EdgeList},
    params::{EdgeSelection, LatticeParams},
};
use self::{driver::RewireDriver, validate::validate_input};
use crate::{connectivity::Connectivity, error::Result, matrix::Adjacency};

/// Rewires `adjacency` towards a ring lattice while keeping it connected.
///
/// Attempts `iterations` rewires per edge in the strict lower triangle,
/// drawing randomness from `rng`. The input is never modified.
///
/// # Errors
/// Returns [`crate::LatticeError::EmptyGraph`],
/// [`crate::LatticeError::NonFiniteWeight`],
/// [`crate::LatticeError::NonZeroDiagonal`], or
/// [`crate::LatticeError::Disconnected`] when the input cannot be rewired.
///
/// # Examples
/// ```
/// use nullnet_core::{Adjacency, latticize_connected};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let cycle = Adjacency::from_rows(vec![
///     vec![0.0, 1.0, 0.0, 0.0],
///     vec![0.0, 0.0, 1.0, 0.0],
///     vec![0.0, 0.0, 0.0, 1.0],
///     vec![1.0, 0.0, 0.0, 0.0],
/// ])
/// .expect("square");
/// let mut rng = SmallRng::seed_from_u64(1);
/// let lattice = latticize_connected(&cycle, 10, &mut rng).expect("cycle is connected");
/// assert_eq!(lattice, cycle);
/// ```
pub fn latticize_connected<R: Rng + ?Sized>(
    adjacency: &Adjacency,
    iterations: usize,
    rng: &mut R,
) -> Result<Adjacency> {
    Latticizer::new(LatticeParams::new(iterations))
        .run_with_rng(adjacency, rng)
        .map(Latticized::into_matrix)
}

/// Rewired matrix together with run statistics.
#[derive(Clone, Debug, PartialEq)]
pub struct Latticized {
    matrix: Adjacency,
    stats: RewireStats,
    input_connectivity: Connectivity,
}

impl Latticized {
    /// Returns the rewired matrix.
    #[must_use]
    pub fn matrix(&self) -> &Adjacency {
        &self.matrix
    }

    /// Consumes the result, returning the rewired matrix.
    #[must_use]
    pub fn into_matrix(self) -> Adjacency {
        self.matrix
    }

    /// Returns the attempt and rejection counters.
    #[must_use]
    pub fn stats(&self) -> RewireStats {
        self.stats
    }

    /// Returns how the input graph was connected.
    #[must_use]
    pub fn input_connectivity(&self) -> Connectivity {
        self.input_connectivity
    }
}

/// Configured entry point for lattice rewiring.
///
/// # Examples
/// ```
/// use nullnet_core::{Adjacency, LatticeParams, Latticizer, RingDistance};
///
/// let mut rows = vec![vec![0.0; 8]; 8];
/// for node in 0..8 {
///     rows[node][(node + 1) % 8] = 1.0;
///     rows[node][(node + 4) % 8] = 2.0;
/// }
/// let graph = Adjacency::from_rows(rows).expect("square");
/// let result = Latticizer::new(LatticeParams::new(20).with_rng_seed(3))
///     .run(&graph)
///     .expect("graph is connected");
///
/// let ring = RingDistance::new(8);
/// assert!(ring.cost(result.matrix()) <= ring.cost(&graph));
/// assert_eq!(result.matrix().edge_count(), graph.edge_count());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Latticizer {
    params: LatticeParams,
}

impl Latticizer {
    /// Creates a latticizer with the given parameters.
    #[must_use]
    pub fn new(params: LatticeParams) -> Self {
        Self { params }
    }

    /// Returns the configured parameters.
    #[must_use]
    pub fn params(&self) -> &LatticeParams {
        &self.params
    }

    /// Runs with a fresh generator seeded from [`LatticeParams::rng_seed`].
    ///
    /// # Errors
    /// See [`Latticizer::run_with_rng`].
    pub fn run(&self, adjacency: &Adjacency) -> Result<Latticized> {
        let mut rng = SmallRng::seed_from_u64(self.params.rng_seed());
        self.run_with_rng(adjacency, &mut rng)
    }

    /// Runs using the caller's random source.
    ///
    /// # Errors
    /// Returns an input error for empty, non-finite, self-looped, or
    /// disconnected graphs, [`crate::LatticeError::InvalidParameters`] when
    /// the attempt budget overflows, and
    /// [`crate::LatticeError::RewireBudgetExhausted`] when the configured
    /// rejection streak is reached.
    #[instrument(
        name = "lattice.latticize",
        err,
        skip(self, adjacency, rng),
        fields(
            nodes = adjacency.node_count(),
            iterations = self.params.iterations(),
            selection = ?self.params.edge_selection(),
            edges = field::Empty,
        ),
    )]
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        adjacency: &Adjacency,
        rng: &mut R,
    ) -> Result<Latticized> {
        let input_connectivity = validate_input(adjacency)?;
        let edges = EdgeList::enumerate(adjacency, self.params.edge_selection());
        Span::current().record("edges", edges.len());

        if edges.len() < 2 || self.params.iterations() == 0 {
            debug!(
                edges = edges.len(),
                "nothing to rewire; returning the input unchanged"
            );
            return Ok(Latticized {
                matrix: adjacency.clone(),
                stats: RewireStats::default(),
                input_connectivity,
            });
        }

        let budget = self.params.attempt_budget(edges.len())?;
        let outcome = RewireDriver::new(
            adjacency.clone(),
            edges,
            rng,
            budget,
            self.params.max_consecutive_rejections(),
        )
        .run()?;

        info!(
            attempts = outcome.stats.attempts,
            accepted = outcome.stats.accepted,
            rejected = outcome.stats.rejected(),
            "lattice rewiring completed"
        );
        Ok(Latticized {
            matrix: outcome.matrix,
            stats: outcome.stats,
            input_connectivity,
        })
    }
}


#[cfg(test)]
mod property;
