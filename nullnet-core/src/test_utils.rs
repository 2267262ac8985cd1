//! Shared test utilities for `nullnet-core`.

use nullnet_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::matrix::Adjacency;

/// Builds a proptest configuration honouring `PROGTEST_CASES` and
/// `NULLNET_PBT_FORK`.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Builds an `n`-node graph with unit weights on `edges`.
#[must_use]
pub(crate) fn unit_graph(n: usize, edges: &[(usize, usize)]) -> Adjacency {
    let mut graph = Adjacency::zeros(n);
    for &(row, col) in edges {
        graph.put(row, col, 1.0);
    }
    graph
}

/// Directed ring `0 -> 1 -> ... -> n-1 -> 0` with unit weights.
#[must_use]
pub(crate) fn directed_ring(n: usize) -> Adjacency {
    let edges: Vec<(usize, usize)> = (0..n).map(|node| (node, (node + 1) % n)).collect();
    unit_graph(n, &edges)
}
