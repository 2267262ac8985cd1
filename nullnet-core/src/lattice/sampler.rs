//! Draws pairs of distinct edges as rewiring candidates.

use rand::Rng;

use super::edges::EdgeList;

/// Two edges `a -> b` and `c -> d` proposed for the swap
/// `a -> d`, `c -> b`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Candidate {
    pub(crate) first: usize,
    pub(crate) second: usize,
    pub(crate) a: usize,
    pub(crate) b: usize,
    pub(crate) c: usize,
    pub(crate) d: usize,
}

/// Outcome of a single draw.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Draw {
    /// The two edges touch four distinct nodes.
    Candidate(Candidate),
    /// The edges share an endpoint and cannot be swapped.
    Overlap,
}

/// Picks two distinct edge indices uniformly and reads their endpoints.
///
/// The list must hold at least two edges.
pub(crate) fn draw<R: Rng + ?Sized>(edges: &EdgeList, rng: &mut R) -> Draw {
    let len = edges.len();
    debug_assert!(len >= 2, "sampling needs at least two edges");
    let first = rng.gen_range(0..len);
    let mut second = rng.gen_range(0..len - 1);
    if second >= first {
        second += 1;
    }

    let one = edges.at(first);
    let two = edges.at(second);
    let candidate = Candidate {
        first,
        second,
        a: one.source,
        b: one.target,
        c: two.source,
        d: two.target,
    };
    if candidate.shares_endpoint() {
        Draw::Overlap
    } else {
        Draw::Candidate(candidate)
    }
}

impl Candidate {
    fn shares_endpoint(&self) -> bool {
        [self.c, self.d].iter().any(|n| *n == self.a || *n == self.b)
    }
}
