//! Fixture types for lattice property tests.

use test_strategy::Arbitrary;

use crate::{EdgeSelection, matrix::Adjacency};

/// Shape of the generated input graph.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum GraphFamily {
    /// A Hamiltonian cycle over a shuffled node order plus sparse chords.
    #[weight(3)]
    CycleWithChords,
    /// Uniformly placed random edges overlaid on a shuffled cycle.
    #[weight(2)]
    DenseStrong,
    /// A random spanning tree with random edge directions plus extras.
    #[weight(2)]
    SpanningTree,
}

/// How weights are assigned to generated edges.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum WeightProfile {
    /// Every edge weighs one.
    #[weight(1)]
    Unit,
    /// Every edge carries a distinct weight.
    #[weight(2)]
    Distinct,
    /// Weights drawn from a small palette, so many repeat.
    #[weight(2)]
    Palette,
}

/// A generated input plus the rewiring configuration applied to it.
#[derive(Clone, Debug)]
pub(super) struct LatticeFixture {
    pub(super) family: GraphFamily,
    pub(super) graph: Adjacency,
    pub(super) iterations: usize,
    pub(super) selection: EdgeSelection,
    pub(super) seed: u64,
}
