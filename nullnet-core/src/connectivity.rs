//! Connectivity classification for directed adjacency matrices.
//!
//! Strong connectivity is decided with a forward and a reverse breadth-first
//! traversal from node 0. Weak components are counted with a union-find over
//! every nonzero entry, ignoring direction.

use std::collections::VecDeque;

use crate::matrix::Adjacency;

/// How well connected a directed graph is.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Connectivity {
    /// Every node reaches every other node along directed edges.
    Strong,
    /// Connected once edge direction is ignored, but not strongly.
    Weak,
    /// More than one weak component.
    Disconnected {
        /// Number of weakly connected components.
        components: usize,
    },
}

impl Connectivity {
    /// Returns `true` for [`Connectivity::Strong`] and [`Connectivity::Weak`].
    #[must_use]
    pub const fn is_connected(self) -> bool {
        !matches!(self, Self::Disconnected { .. })
    }
}

/// Classifies `adjacency` as strongly, weakly, or not connected.
///
/// Graphs with zero or one node are treated as strongly connected.
///
/// # Examples
/// ```
/// use nullnet_core::{Adjacency, Connectivity, classify};
///
/// let path = Adjacency::from_rows(vec![
///     vec![0.0, 1.0, 0.0],
///     vec![0.0, 0.0, 1.0],
///     vec![0.0, 0.0, 0.0],
/// ])
/// .expect("square");
/// assert_eq!(classify(&path), Connectivity::Weak);
/// ```
#[must_use]
pub fn classify(adjacency: &Adjacency) -> Connectivity {
    let components = weak_component_count(adjacency);
    if components > 1 {
        return Connectivity::Disconnected { components };
    }
    if is_strongly_connected(adjacency) {
        Connectivity::Strong
    } else {
        Connectivity::Weak
    }
}

/// Counts weakly connected components.
#[must_use]
pub fn weak_component_count(adjacency: &Adjacency) -> usize {
    let mut components = UnionFind::new(adjacency.node_count());
    for (row, values) in adjacency.rows().enumerate() {
        for (col, &weight) in values.iter().enumerate() {
            if weight != 0.0 {
                components.union(row, col);
            }
        }
    }
    components.components()
}

/// Returns `true` when every node reaches every other node.
#[must_use]
pub fn is_strongly_connected(adjacency: &Adjacency) -> bool {
    let n = adjacency.node_count();
    if n <= 1 {
        return true;
    }
    let forward = reachable_from(n, 0, |node, next| adjacency.at(node, next) != 0.0);
    let reverse = reachable_from(n, 0, |node, prev| adjacency.at(prev, node) != 0.0);
    forward.iter().all(|&seen| seen) && reverse.iter().all(|&seen| seen)
}

fn reachable_from(n: usize, start: usize, linked: impl Fn(usize, usize) -> bool) -> Vec<bool> {
    let mut context = BfsContext::new(n);
    context.visit(start);
    while let Some(node) = context.queue.pop_front() {
        for other in 0..n {
            if !context.visited[other] && linked(node, other) {
                context.visit(other);
            }
        }
    }
    context.visited
}

struct BfsContext {
    visited: Vec<bool>,
    queue: VecDeque<usize>,
}

impl BfsContext {
    fn new(capacity: usize) -> Self {
        Self {
            visited: vec![false; capacity],
            queue: VecDeque::new(),
        }
    }

    fn visit(&mut self, node: usize) {
        self.visited[node] = true;
        self.queue.push_back(node);
    }
}

/// Sequential union-find with union by rank and path halving.
struct UnionFind {
    parents: Vec<usize>,
    ranks: Vec<usize>,
    components: usize,
}

impl UnionFind {
    fn new(node_count: usize) -> Self {
        Self {
            parents: (0..node_count).collect(),
            ranks: vec![0; node_count],
            components: node_count,
        }
    }

    fn components(&self) -> usize {
        self.components
    }

    fn find(&mut self, node: usize) -> usize {
        let mut current = node;
        while self.parents[current] != current {
            let grandparent = self.parents[self.parents[current]];
            self.parents[current] = grandparent;
            current = grandparent;
        }
        current
    }

    fn union(&mut self, left: usize, right: usize) -> bool {
        let left_root = self.find(left);
        let right_root = self.find(right);
        if left_root == right_root {
            return false;
        }

        let (parent, child) = match self.ranks[left_root].cmp(&self.ranks[right_root]) {
            std::cmp::Ordering::Greater => (left_root, right_root),
            std::cmp::Ordering::Less => (right_root, left_root),
            std::cmp::Ordering::Equal => {
                self.ranks[left_root] += 1;
                (left_root, right_root)
            }
        };
        self.parents[child] = parent;
        self.components -= 1;
        true
    }
}
