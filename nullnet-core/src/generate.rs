//! Random directed weighted graphs.
//!
//! Edges are placed uniformly without replacement among the `n * (n - 1)`
//! off-diagonal slots, so generated graphs never carry self-loops. The random
//! source is always supplied by the caller.

use std::ops::Range;

use rand::{Rng, seq::index};
use tracing::instrument;

use crate::{error::GenerateError, matrix::Adjacency};

/// Generates a directed graph with `nodes` nodes and `edges` links whose
/// weights are drawn uniformly from `weights`.
///
/// # Errors
/// Returns [`GenerateError::InvalidWeightRange`] when the range is empty,
/// not finite, or admits zero, and [`GenerateError::TooManyEdges`] when
/// `edges` exceeds the off-diagonal capacity.
///
/// # Examples
/// ```
/// use nullnet_core::random_directed_weighted;
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let graph = random_directed_weighted(6, 10, 0.5..1.5, &mut rng)
///     .expect("10 edges fit in a 6-node graph");
/// assert_eq!(graph.edge_count(), 10);
/// assert_eq!(graph.first_self_loop(), None);
/// ```
#[instrument(name = "generate.random", skip(rng), err)]
pub fn random_directed_weighted<R: Rng + ?Sized>(
    nodes: usize,
    edges: usize,
    weights: Range<f64>,
    rng: &mut R,
) -> Result<Adjacency, GenerateError> {
    let Range { start, end } = weights;
    if !(start.is_finite() && end.is_finite() && start < end) || (start <= 0.0 && end > 0.0) {
        return Err(GenerateError::InvalidWeightRange {
            min: start,
            max: end,
        });
    }
    ensure_capacity(nodes, edges)?;
    let pool: Vec<f64> = (0..edges).map(|_| rng.gen_range(start..end)).collect();
    random_directed_from_weights(nodes, &pool, rng)
}

/// Places every weight of `pool` on a distinct random off-diagonal slot of
/// an `nodes x nodes` matrix.
///
/// # Errors
/// Returns [`GenerateError::UnplaceableWeight`] for zero or non-finite
/// weights and [`GenerateError::TooManyEdges`] when the pool does not fit.
pub fn random_directed_from_weights<R: Rng + ?Sized>(
    nodes: usize,
    pool: &[f64],
    rng: &mut R,
) -> Result<Adjacency, GenerateError> {
    if let Some((index, &weight)) = pool
        .iter()
        .enumerate()
        .find(|&(_, w)| *w == 0.0 || !w.is_finite())
    {
        return Err(GenerateError::UnplaceableWeight { index, weight });
    }
    let capacity = ensure_capacity(nodes, pool.len())?;

    let mut graph = Adjacency::zeros(nodes);
    let slots = index::sample(rng, capacity, pool.len());
    for (slot, &weight) in slots.iter().zip(pool) {
        let (row, col) = off_diagonal_slot(nodes, slot);
        graph.put(row, col, weight);
    }
    Ok(graph)
}

/// Generates a random directed graph with the node count, link count, and
/// weight multiset of `template`.
///
/// # Errors
/// Propagates [`random_directed_from_weights`] failures, which only occur
/// when `template` holds non-finite weights or self-loops that overflow the
/// off-diagonal capacity.
pub fn random_directed_like<R: Rng + ?Sized>(
    template: &Adjacency,
    rng: &mut R,
) -> Result<Adjacency, GenerateError> {
    random_directed_from_weights(template.node_count(), &template.nonzero_weights(), rng)
}

fn ensure_capacity(nodes: usize, requested: usize) -> Result<usize, GenerateError> {
    let capacity = nodes.saturating_mul(nodes.saturating_sub(1));
    if requested > capacity {
        return Err(GenerateError::TooManyEdges {
            requested,
            nodes,
            capacity,
        });
    }
    Ok(capacity)
}

/// Maps `slot` in `0..n * (n - 1)` onto the off-diagonal cell it indexes,
/// skipping the diagonal entry of each row.
fn off_diagonal_slot(nodes: usize, slot: usize) -> (usize, usize) {
    let per_row = nodes - 1;
    let row = slot / per_row;
    let mut col = slot % per_row;
    if col >= row {
        col += 1;
    }
    (row, col)
}

#[cfg(test)]
mod tests {
    //! Tests for random graph generation.

    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    use super::*;

    #[test]
    fn off_diagonal_slots_cover_every_cell_once() {
        let n = 4;
        let mut cells: Vec<(usize, usize)> =
            (0..n * (n - 1)).map(|slot| off_diagonal_slot(n, slot)).collect();
        assert!(cells.iter().all(|&(r, c)| r != c && r < n && c < n));
        cells.sort_unstable();
        cells.dedup();
        assert_eq!(cells.len(), n * (n - 1));
    }

    #[test]
    fn places_the_whole_weight_pool() {
        let mut rng = SmallRng::seed_from_u64(11);
        let pool = [0.25, 1.0, 3.5, 3.5, 7.0];
        let graph = random_directed_from_weights(5, &pool, &mut rng).expect("pool fits");
        let mut placed = graph.nonzero_weights();
        placed.sort_by(f64::total_cmp);
        assert_eq!(placed, pool.to_vec());
        assert_eq!(graph.first_self_loop(), None);
    }

    #[test]
    fn complete_graph_fills_every_off_diagonal_slot() {
        let mut rng = SmallRng::seed_from_u64(3);
        let graph = random_directed_weighted(4, 12, 1.0..2.0, &mut rng).expect("capacity is 12");
        assert_eq!(graph.edge_count(), 12);
        assert_eq!(graph.first_self_loop(), None);
    }

    #[test]
    fn same_seed_gives_same_graph() {
        let left = random_directed_weighted(8, 20, 0.1..1.0, &mut SmallRng::seed_from_u64(9))
            .expect("valid request");
        let right = random_directed_weighted(8, 20, 0.1..1.0, &mut SmallRng::seed_from_u64(9))
            .expect("valid request");
        assert_eq!(left, right);
    }

    #[test]
    fn like_preserves_weight_multiset() {
        let mut rng = SmallRng::seed_from_u64(5);
        let template =
            random_directed_weighted(7, 15, 0.5..4.0, &mut rng).expect("valid request");
        let shuffled = random_directed_like(&template, &mut rng).expect("template is valid");
        let mut expected = template.nonzero_weights();
        let mut actual = shuffled.nonzero_weights();
        expected.sort_by(f64::total_cmp);
        actual.sort_by(f64::total_cmp);
        assert_eq!(actual, expected);
    }

    #[rstest]
    #[case::range_admits_zero(3, 2, -1.0..1.0, "GENERATE_INVALID_WEIGHT_RANGE")]
    #[case::over_capacity(3, 7, 0.5..1.0, "GENERATE_TOO_MANY_EDGES")]
    #[case::empty_range(3, 2, 1.0..1.0, "GENERATE_INVALID_WEIGHT_RANGE")]
    #[case::infinite(3, 2, 1.0..f64::INFINITY, "GENERATE_INVALID_WEIGHT_RANGE")]
    fn rejects_invalid_requests(
        #[case] nodes: usize,
        #[case] edges: usize,
        #[case] weights: Range<f64>,
        #[case] code: &str,
    ) {
        let mut rng = SmallRng::seed_from_u64(1);
        let err = random_directed_weighted(nodes, edges, weights, &mut rng)
            .expect_err("request must be rejected");
        assert_eq!(err.code().as_str(), code);
    }

    #[test]
    fn rejects_zero_weights_in_pool() {
        let mut rng = SmallRng::seed_from_u64(1);
        let err = random_directed_from_weights(3, &[1.0, 0.0], &mut rng)
            .expect_err("zero weight cannot form an edge");
        assert_eq!(
            err,
            GenerateError::UnplaceableWeight {
                index: 1,
                weight: 0.0
            }
        );
    }
}
