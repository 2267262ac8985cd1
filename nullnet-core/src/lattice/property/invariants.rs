//! Invariants every rewiring run must uphold.
//!
//! 1. Node count, in-degrees and out-degrees are unchanged.
//! 2. The weight multiset is unchanged and no self-loop appears.
//! 3. Strongly connected inputs stay strongly connected; weakly connected
//!    inputs stay connected.
//! 4. The ring cost never increases.
//! 5. The attempt counter matches `iterations x eligible edges`.
//! 6. The same seed reproduces the same output.

use proptest::test_runner::{TestCaseError, TestCaseResult};
use rand::{SeedableRng, rngs::SmallRng};

use super::types::LatticeFixture;
use crate::{
    Connectivity, EdgeList, LatticeParams, Latticizer, RingDistance, classify, degrees_directed,
    lattice::{
        sampler::{self, Draw},
        verifier,
    },
    matrix::Adjacency,
};

fn sorted_weights(graph: &Adjacency) -> Vec<f64> {
    let mut weights = graph.nonzero_weights();
    weights.sort_by(f64::total_cmp);
    weights
}

fn fail(fixture: &LatticeFixture, what: impl std::fmt::Display) -> TestCaseError {
    TestCaseError::fail(format!(
        "{:?} with {} nodes (seed {}): {what}",
        fixture.family,
        fixture.graph.node_count(),
        fixture.seed
    ))
}

pub(super) fn run_rewiring_invariants(fixture: &LatticeFixture) -> TestCaseResult {
    let input = &fixture.graph;
    let params = LatticeParams::new(fixture.iterations)
        .with_rng_seed(fixture.seed)
        .with_edge_selection(fixture.selection);
    let latticizer = Latticizer::new(params);
    let result = latticizer
        .run(input)
        .map_err(|err| fail(fixture, format!("run failed: {err}")))?;
    let output = result.matrix();

    if output.node_count() != input.node_count() {
        return Err(fail(fixture, "node count changed"));
    }
    if degrees_directed(output) != degrees_directed(input) {
        return Err(fail(fixture, "degree sequence changed"));
    }
    if sorted_weights(output) != sorted_weights(input) {
        return Err(fail(fixture, "weight multiset changed"));
    }
    if let Some(node) = output.first_self_loop() {
        return Err(fail(fixture, format!("self-loop introduced at node {node}")));
    }

    let before = classify(input);
    let after = classify(output);
    let preserved = match before {
        Connectivity::Strong => after == Connectivity::Strong,
        _ => after.is_connected(),
    };
    if !preserved {
        return Err(fail(fixture, format!("connectivity went from {before:?} to {after:?}")));
    }

    let ring = RingDistance::new(input.node_count());
    if ring.cost(output) > ring.cost(input) {
        return Err(fail(fixture, "ring cost increased"));
    }

    let eligible = EdgeList::enumerate(input, fixture.selection).len();
    let expected_attempts = if eligible < 2 {
        0
    } else {
        fixture.iterations * eligible
    };
    let stats = result.stats();
    if stats.attempts != expected_attempts || stats.accepted + stats.rejected() != stats.attempts {
        return Err(fail(fixture, format!("inconsistent counters {stats:?}")));
    }

    let replay = latticizer
        .run(input)
        .map_err(|err| fail(fixture, format!("replay failed: {err}")))?;
    if replay != result {
        return Err(fail(fixture, "same seed produced a different result"));
    }
    Ok(())
}

/// Draws candidates from a strongly connected graph and checks that every
/// swap the verifier accepts really keeps the graph strongly connected.
pub(super) fn run_verifier_soundness(graph: &Adjacency, seed: u64) -> TestCaseResult {
    let edges = EdgeList::enumerate(graph, crate::EdgeSelection::All);
    if edges.len() < 2 {
        return Ok(());
    }
    let mut rng = SmallRng::seed_from_u64(seed);
    for _ in 0..32 {
        let Draw::Candidate(candidate) = sampler::draw(&edges, &mut rng) else {
            continue;
        };
        if graph.has_edge(candidate.a, candidate.d) || graph.has_edge(candidate.c, candidate.b) {
            continue;
        }
        if !verifier::verify(graph, &candidate).is_preserved() {
            continue;
        }
        let mut swapped = graph.clone();
        swapped.put(candidate.a, candidate.b, 0.0);
        swapped.put(candidate.c, candidate.d, 0.0);
        swapped.put(candidate.a, candidate.d, 1.0);
        swapped.put(candidate.c, candidate.b, 1.0);
        if classify(&swapped) != Connectivity::Strong {
            return Err(TestCaseError::fail(format!(
                "verifier accepted {candidate:?} but the swap disconnects the graph"
            )));
        }
    }
    Ok(())
}
