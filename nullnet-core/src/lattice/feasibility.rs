//! Local acceptance checks applied before the connectivity test.

use super::{distance::RingDistance, sampler::Candidate};
use crate::matrix::Adjacency;

/// Why a candidate was turned down.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Rejection {
    /// The two edges share an endpoint.
    NodeOverlap,
    /// `a -> d` or `c -> b` already exists.
    DuplicateEdge,
    /// The swap would move edges further from the ring.
    LatticeCost,
    /// The swap could break reachability.
    Connectivity,
}

impl Rejection {
    /// Short label used in traces.
    #[must_use]
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::NodeOverlap => "node_overlap",
            Self::DuplicateEdge => "duplicate_edge",
            Self::LatticeCost => "lattice_cost",
            Self::Connectivity => "connectivity",
        }
    }
}

/// Rejects swaps that would duplicate an edge or increase the ring cost.
/// Ties in cost are accepted.
pub(crate) fn check(
    adjacency: &Adjacency,
    ring: &RingDistance,
    candidate: &Candidate,
) -> Result<(), Rejection> {
    let Candidate { a, b, c, d, .. } = *candidate;
    if adjacency.at(a, d) != 0.0 || adjacency.at(c, b) != 0.0 {
        return Err(Rejection::DuplicateEdge);
    }
    if ring.at(a, b) + ring.at(c, d) < ring.at(a, d) + ring.at(c, b) {
        return Err(Rejection::LatticeCost);
    }
    Ok(())
}
