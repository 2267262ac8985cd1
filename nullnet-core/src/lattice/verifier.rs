//! Reachability check for a proposed swap.
//!
//! Replacing `a -> b, c -> d` with `a -> d, c -> b` keeps the graph
//! connected as long as `a` can still reach `b` (directly or via `c`) and
//! `c` can still reach `d` (directly or via `a`) in the rewired graph. The
//! check runs on the current matrix with the swap applied only to the two
//! seed rows, and never mutates anything.

use super::sampler::Candidate;
use crate::matrix::Adjacency;

/// Result of verifying a candidate.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Reachability {
    /// Neighbouring edges already bridge both sides.
    Bridged,
    /// Propagation reached the targets after `rounds` expansions.
    Reconnected { rounds: usize },
    /// Both frontiers died out after `rounds` expansions.
    Severed { rounds: usize },
}

impl Reachability {
    pub(crate) const fn is_preserved(self) -> bool {
        !matches!(self, Self::Severed { .. })
    }

    pub(crate) const fn rounds(self) -> usize {
        match self {
            Self::Bridged => 0,
            Self::Reconnected { rounds } | Self::Severed { rounds } => rounds,
        }
    }
}

pub(crate) fn verify(adjacency: &Adjacency, candidate: &Candidate) -> Reachability {
    if locally_bridged(adjacency, candidate) {
        return Reachability::Bridged;
    }

    let mut search = Propagation::seed(adjacency, candidate);
    let mut rounds = 0;
    loop {
        if search.reconnected(candidate) {
            return Reachability::Reconnected { rounds };
        }
        if !search.expand(adjacency) {
            return Reachability::Severed { rounds };
        }
        rounds += 1;
    }
}

/// Cheap sufficient test: one existing edge closes the `a` side
/// (`a -> c`, `d -> b` or `d -> c`) and another closes the `c` side
/// (`c -> a`, `b -> d` or `b -> a`).
fn locally_bridged(adjacency: &Adjacency, candidate: &Candidate) -> bool {
    let Candidate { a, b, c, d, .. } = *candidate;
    let linked = |row: usize, col: usize| adjacency.at(row, col) != 0.0;
    let forward = linked(a, c) || linked(d, b) || linked(d, c);
    let backward = linked(c, a) || linked(b, d) || linked(b, a);
    forward && backward
}

/// Two breadth-first searches, one from `a` and one from `c`, over the
/// graph with the swap applied to their first hop.
struct Propagation {
    frontier: [Vec<bool>; 2],
    visited: [Vec<bool>; 2],
}

impl Propagation {
    fn seed(adjacency: &Adjacency, candidate: &Candidate) -> Self {
        let Candidate { a, b, c, d, .. } = *candidate;
        let from_a = swapped_row(adjacency, a, b, d);
        let from_c = swapped_row(adjacency, c, d, b);

        let mut visited_a = from_a.clone();
        visited_a[a] = true;
        let mut visited_c = from_c.clone();
        visited_c[c] = true;
        Self {
            frontier: [from_a, from_c],
            visited: [visited_a, visited_c],
        }
    }

    fn reconnected(&self, candidate: &Candidate) -> bool {
        let [from_a, from_c] = &self.visited;
        (from_a[candidate.b] || from_a[candidate.c]) && (from_c[candidate.d] || from_c[candidate.a])
    }

    /// Advances both frontiers one hop. Returns `false` once neither
    /// search discovers a new node.
    fn expand(&mut self, adjacency: &Adjacency) -> bool {
        let mut grew = false;
        for (frontier, visited) in self.frontier.iter_mut().zip(self.visited.iter_mut()) {
            grew |= advance(adjacency, frontier, visited);
        }
        grew
    }
}

fn swapped_row(adjacency: &Adjacency, node: usize, old: usize, new: usize) -> Vec<bool> {
    let mut row: Vec<bool> = adjacency
        .row(node)
        .map(|weights| weights.iter().map(|w| *w != 0.0).collect())
        .unwrap_or_else(|| vec![false; adjacency.node_count()]);
    row[old] = false;
    row[new] = true;
    row
}

fn advance(adjacency: &Adjacency, frontier: &mut Vec<bool>, visited: &mut [bool]) -> bool {
    let mut next = vec![false; frontier.len()];
    let active = frontier
        .iter()
        .enumerate()
        .filter_map(|(node, on)| on.then_some(node));
    for node in active {
        let Some(weights) = adjacency.row(node) else {
            continue;
        };
        for (target, weight) in weights.iter().enumerate() {
            if *weight != 0.0 && !visited[target] {
                next[target] = true;
            }
        }
    }

    let mut grew = false;
    for (seen, fresh) in visited.iter_mut().zip(&next) {
        if *fresh {
            *seen = true;
            grew = true;
        }
    }
    *frontier = next;
    grew
}
