//! Ring-lattice distance template.
//!
//! Nodes are placed on a cycle in index order; the distance between two
//! nodes is the shorter of the clockwise and counter-clockwise offsets. The
//! table depends only on the node count and is read-only once built.

use crate::matrix::Adjacency;

/// Precomputed `n x n` ring distances.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingDistance {
    size: usize,
    table: Vec<usize>,
}

impl RingDistance {
    /// Builds the table for `size` nodes.
    ///
    /// Each row is a rotation of the base sequence `[0, 1, 2, ..., 2, 1]`.
    /// Rows `v` and `n - 1 - v` are written together for the first half of
    /// the rows.
    ///
    /// # Examples
    /// ```
    /// use nullnet_core::RingDistance;
    ///
    /// let ring = RingDistance::new(6);
    /// assert_eq!(ring.get(0, 3), Some(3));
    /// assert_eq!(ring.get(1, 5), Some(2));
    /// assert_eq!(ring.get(4, 4), Some(0));
    /// ```
    #[must_use]
    pub fn new(size: usize) -> Self {
        let mut table = vec![0; size * size];
        if size == 0 {
            return Self { size, table };
        }

        let base: Vec<usize> = (0..size).map(|k| k.min(size - k)).collect();
        for v in 0..=(size - 1) / 2 {
            let rotated: Vec<usize> = base[v + 1..]
                .iter()
                .chain(&base[..=v])
                .copied()
                .collect();
            let bottom = size - 1 - v;
            table[bottom * size..(bottom + 1) * size].copy_from_slice(&rotated);
            for (slot, value) in table[v * size..(v + 1) * size]
                .iter_mut()
                .zip(rotated.iter().rev())
            {
                *slot = *value;
            }
        }
        Self { size, table }
    }

    /// Returns the number of nodes on the ring.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.size
    }

    /// Returns the ring distance between `v` and `w`.
    #[must_use]
    pub fn get(&self, v: usize, w: usize) -> Option<usize> {
        (v < self.size && w < self.size).then(|| self.table[v * self.size + w])
    }

    pub(crate) fn at(&self, v: usize, w: usize) -> usize {
        self.table[v * self.size + w]
    }

    /// Sums the ring distance over every edge of `adjacency`.
    ///
    /// Accepted rewires never increase this value. Returns `None` when the
    /// matrix size differs from the ring.
    #[must_use]
    pub fn cost(&self, adjacency: &Adjacency) -> Option<usize> {
        if adjacency.node_count() != self.size {
            return None;
        }
        Some(
            adjacency
                .nonzero_pairs()
                .into_iter()
                .map(|(row, col)| self.at(row, col))
                .sum(),
        )
    }
}

#[cfg(test)]
mod tests {
    //! Tests for the ring distance template.

    use rstest::rstest;

    use super::*;

    fn direct(n: usize, v: usize, w: usize) -> usize {
        let offset = v.abs_diff(w);
        offset.min(n - offset)
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(4)]
    #[case(7)]
    #[case(10)]
    fn rotated_rows_match_shorter_arc(#[case] n: usize) {
        let ring = RingDistance::new(n);
        for v in 0..n {
            for w in 0..n {
                assert_eq!(ring.get(v, w), Some(direct(n, v, w)), "n={n} v={v} w={w}");
            }
        }
    }

    #[test]
    fn table_is_symmetric_with_zero_diagonal() {
        let ring = RingDistance::new(9);
        for v in 0..9 {
            assert_eq!(ring.at(v, v), 0);
            for w in 0..9 {
                assert_eq!(ring.at(v, w), ring.at(w, v));
            }
        }
    }

    #[test]
    fn five_node_first_row() {
        let ring = RingDistance::new(5);
        let row: Vec<usize> = (0..5).map(|w| ring.at(0, w)).collect();
        assert_eq!(row, vec![0, 1, 2, 2, 1]);
    }

    #[test]
    fn empty_ring_has_no_entries() {
        let ring = RingDistance::new(0);
        assert_eq!(ring.get(0, 0), None);
        assert_eq!(ring.cost(&Adjacency::zeros(0)), Some(0));
    }

    #[test]
    fn cost_sums_edge_distances() {
        let mut graph = Adjacency::zeros(6);
        graph.put(0, 1, 1.0);
        graph.put(0, 3, 2.0);
        graph.put(5, 0, 0.5);
        let ring = RingDistance::new(6);
        assert_eq!(ring.cost(&graph), Some(1 + 3 + 1));
        assert_eq!(ring.cost(&Adjacency::zeros(5)), None);
    }
}
