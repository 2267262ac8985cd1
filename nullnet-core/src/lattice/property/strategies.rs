//! Proptest strategies producing connected directed graphs.

use proptest::prelude::*;
use rand::{Rng, SeedableRng, rngs::SmallRng, seq::SliceRandom};

use super::types::{GraphFamily, LatticeFixture, WeightProfile};
use crate::{EdgeSelection, matrix::Adjacency};

const MIN_NODES: usize = 4;
const MAX_NODES: usize = 14;
const PALETTE: [f64; 3] = [0.5, 1.0, 2.0];

/// Strategy producing a connected graph with a rewiring configuration.
pub(super) fn lattice_fixture_strategy() -> impl Strategy<Value = LatticeFixture> {
    (
        any::<GraphFamily>(),
        any::<WeightProfile>(),
        MIN_NODES..=MAX_NODES,
        1_usize..=5,
        any::<bool>(),
        any::<u64>(),
    )
        .prop_map(|(family, weights, nodes, iterations, all_edges, seed)| {
            let mut rng = SmallRng::seed_from_u64(seed);
            let pairs = generate_pairs(family, nodes, &mut rng);
            let graph = assign_weights(nodes, &pairs, weights, &mut rng);
            let selection = if all_edges {
                EdgeSelection::All
            } else {
                EdgeSelection::LowerTriangle
            };
            LatticeFixture {
                family,
                graph,
                iterations,
                selection,
                seed,
            }
        })
}

/// Strategy producing strongly connected graphs only.
pub(super) fn strong_graph_strategy() -> impl Strategy<Value = (Adjacency, u64)> {
    (MIN_NODES..=MAX_NODES, any::<bool>(), any::<u64>()).prop_map(|(nodes, dense, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        let family = if dense {
            GraphFamily::DenseStrong
        } else {
            GraphFamily::CycleWithChords
        };
        let pairs = generate_pairs(family, nodes, &mut rng);
        let graph = assign_weights(nodes, &pairs, WeightProfile::Unit, &mut rng);
        (graph, seed)
    })
}

fn generate_pairs(family: GraphFamily, nodes: usize, rng: &mut SmallRng) -> Vec<(usize, usize)> {
    let mut pairs = match family {
        GraphFamily::CycleWithChords => {
            let mut pairs = shuffled_cycle(nodes, rng);
            pairs.extend(random_pairs(nodes, 0.15, rng));
            pairs
        }
        GraphFamily::DenseStrong => {
            let mut pairs = shuffled_cycle(nodes, rng);
            pairs.extend(random_pairs(nodes, 0.45, rng));
            pairs
        }
        GraphFamily::SpanningTree => {
            let mut pairs: Vec<(usize, usize)> = (1..nodes)
                .map(|node| {
                    let parent = rng.gen_range(0..node);
                    if rng.gen_bool(0.5) {
                        (node, parent)
                    } else {
                        (parent, node)
                    }
                })
                .collect();
            pairs.extend(random_pairs(nodes, 0.1, rng));
            pairs
        }
    };
    pairs.sort_unstable();
    pairs.dedup();
    pairs
}

fn shuffled_cycle(nodes: usize, rng: &mut SmallRng) -> Vec<(usize, usize)> {
    let mut order: Vec<usize> = (0..nodes).collect();
    order.shuffle(rng);
    (0..nodes)
        .map(|idx| (order[idx], order[(idx + 1) % nodes]))
        .collect()
}

fn random_pairs(nodes: usize, density: f64, rng: &mut SmallRng) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for row in 0..nodes {
        for col in 0..nodes {
            if row != col && rng.gen_bool(density) {
                pairs.push((row, col));
            }
        }
    }
    pairs
}

#[expect(
    clippy::cast_precision_loss,
    reason = "edge counts in fixtures are tiny"
)]
fn assign_weights(
    nodes: usize,
    pairs: &[(usize, usize)],
    profile: WeightProfile,
    rng: &mut SmallRng,
) -> Adjacency {
    let mut graph = Adjacency::zeros(nodes);
    for (idx, &(row, col)) in pairs.iter().enumerate() {
        let weight = match profile {
            WeightProfile::Unit => 1.0,
            WeightProfile::Distinct => 1.0 + idx as f64 * 0.25,
            WeightProfile::Palette => PALETTE[rng.gen_range(0..PALETTE.len())],
        };
        graph.put(row, col, weight);
    }
    graph
}
