//! Seeded connected graphs for benchmarks.

use nullnet_core::{Adjacency, classify, random_directed_weighted};
use rand::{SeedableRng, rngs::SmallRng};

use crate::{error::BenchSetupError, params::GraphBenchParams};

/// Number of graphs drawn before [`connected_graph`] gives up.
pub const MAX_DRAWS: usize = 64;

/// Draws weighted random digraphs from a generator seeded with `seed` until
/// one is weakly connected.
///
/// # Errors
/// Returns [`BenchSetupError::Generate`] when the shape cannot be realised
/// and [`BenchSetupError::Disconnected`] when no draw connects.
pub fn connected_graph(params: GraphBenchParams, seed: u64) -> Result<Adjacency, BenchSetupError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    for _ in 0..MAX_DRAWS {
        let graph =
            random_directed_weighted(params.node_count, params.edge_count(), 0.5..1.5, &mut rng)?;
        if classify(&graph).is_connected() {
            return Ok(graph);
        }
    }
    Err(BenchSetupError::Disconnected {
        nodes: params.node_count,
        attempts: MAX_DRAWS,
    })
}
