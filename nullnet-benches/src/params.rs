//! Benchmark parameter types.

use std::fmt;

/// Shape of the random graph a benchmark runs on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphBenchParams {
    /// Number of nodes.
    pub node_count: usize,
    /// Mean out-degree; the graph carries `node_count * out_degree` edges.
    pub out_degree: usize,
}

impl GraphBenchParams {
    /// Number of directed edges implied by the parameters.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.node_count.saturating_mul(self.out_degree)
    }
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},k={}", self.node_count, self.out_degree)
    }
}
