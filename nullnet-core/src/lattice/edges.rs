//! The working list of rewirable edges.

use super::params::EdgeSelection;
use crate::matrix::Adjacency;

/// A directed edge `source -> target`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Edge {
    /// Tail node.
    pub source: usize,
    /// Head node.
    pub target: usize,
}

/// Ordered list of the edges eligible for rewiring.
///
/// The list is enumerated once, in column-major order, and afterwards kept
/// in step with the matrix: an accepted rewire retargets the two edges it
/// touched in place. Indices stay stable for the whole run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EdgeList {
    edges: Vec<Edge>,
}

impl EdgeList {
    /// Enumerates the edges of `adjacency` that `selection` admits.
    #[must_use]
    pub fn enumerate(adjacency: &Adjacency, selection: EdgeSelection) -> Self {
        let pairs = match selection {
            EdgeSelection::LowerTriangle => adjacency.lower_triangle(-1).nonzero_pairs(),
            EdgeSelection::All => adjacency.nonzero_pairs(),
        };
        Self {
            edges: pairs
                .into_iter()
                .map(|(source, target)| Edge { source, target })
                .collect(),
        }
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` when no edge is eligible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns the edge at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Edge> {
        self.edges.get(index).copied()
    }

    /// Iterates over the edges in list order.
    pub fn iter(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges.iter().copied()
    }

    pub(crate) fn at(&self, index: usize) -> Edge {
        self.edges[index]
    }

    pub(crate) fn retarget(&mut self, index: usize, target: usize) {
        self.edges[index].target = target;
    }
}
