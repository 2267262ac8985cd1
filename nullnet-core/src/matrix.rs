//! Dense square adjacency matrices and the elementwise primitives the graph
//! routines build on.
//!
//! Entry `(i, j)` holds the weight of the directed edge `i -> j`; zero means
//! no edge. Storage is row-major so that out-neighbour scans touch one
//! contiguous slice.

use crate::error::MatrixError;

/// Elementwise comparison applied by [`Adjacency::compare`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Comparison {
    /// `entry > value`
    Greater,
    /// `entry >= value`
    GreaterOrEqual,
    /// `entry < value`
    Less,
    /// `entry <= value`
    LessOrEqual,
    /// `entry == value`
    Equal,
    /// `entry != value`
    NotEqual,
}

impl Comparison {
    fn holds(self, entry: f64, value: f64) -> bool {
        match self {
            Self::Greater => entry > value,
            Self::GreaterOrEqual => entry >= value,
            Self::Less => entry < value,
            Self::LessOrEqual => entry <= value,
            Self::Equal => entry == value,
            Self::NotEqual => entry != value,
        }
    }
}

/// A dense `n x n` weighted adjacency matrix.
///
/// # Examples
/// ```
/// use nullnet_core::Adjacency;
///
/// let cycle = Adjacency::from_rows(vec![
///     vec![0.0, 1.0, 0.0],
///     vec![0.0, 0.0, 1.0],
///     vec![1.0, 0.0, 0.0],
/// ])
/// .expect("rows form a square matrix");
/// assert_eq!(cycle.node_count(), 3);
/// assert_eq!(cycle.edge_count(), 3);
/// assert!(cycle.has_edge(2, 0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Adjacency {
    size: usize,
    weights: Vec<f64>,
}

impl Adjacency {
    /// Creates an `n x n` matrix with no edges.
    #[must_use]
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            weights: vec![0.0; size * size],
        }
    }

    /// Builds a matrix from its rows.
    ///
    /// # Errors
    /// Returns [`MatrixError::NotSquare`] when any row length differs from
    /// the number of rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        let size = rows.len();
        let mut weights = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(MatrixError::NotSquare {
                    row,
                    expected: size,
                    found: values.len(),
                });
            }
            weights.extend(values);
        }
        Ok(Self { size, weights })
    }

    /// Returns the number of nodes (the side length).
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.size
    }

    /// Returns `true` when the matrix has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the weight at `(row, col)`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.offset(row, col).map(|idx| self.weights[idx])
    }

    /// Stores `weight` at `(row, col)`.
    ///
    /// # Errors
    /// Returns [`MatrixError::OutOfBounds`] when the index is outside the
    /// matrix.
    pub fn set(&mut self, row: usize, col: usize, weight: f64) -> Result<(), MatrixError> {
        let idx = self.offset(row, col).ok_or(MatrixError::OutOfBounds {
            row,
            col,
            size: self.size,
        })?;
        self.weights[idx] = weight;
        Ok(())
    }

    /// Returns row `row` as a slice of outgoing weights.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        (row < self.size).then(|| &self.weights[row * self.size..(row + 1) * self.size])
    }

    /// Iterates over the rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // `max(1)` keeps `chunks_exact` valid for the empty matrix.
        self.weights.chunks_exact(self.size.max(1))
    }

    /// Returns `true` when `row -> col` carries a nonzero weight.
    #[must_use]
    pub fn has_edge(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some_and(|w| w != 0.0)
    }

    /// Weight lookup for indices already validated against the matrix size.
    pub(crate) fn at(&self, row: usize, col: usize) -> f64 {
        self.weights[row * self.size + col]
    }

    pub(crate) fn put(&mut self, row: usize, col: usize, weight: f64) {
        self.weights[row * self.size + col] = weight;
    }

    fn offset(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.size && col < self.size).then(|| row * self.size + col)
    }

    /// Keeps entries on or below the `offset`-th diagonal (MATLAB `tril`).
    ///
    /// `offset = 0` keeps the main diagonal, `offset = -1` keeps only the
    /// strictly lower triangle.
    #[must_use]
    pub fn lower_triangle(&self, offset: isize) -> Self {
        self.mask(|row, col| col.cast_signed() - row.cast_signed() <= offset)
    }

    /// Keeps entries on or above the `offset`-th diagonal (MATLAB `triu`).
    #[must_use]
    pub fn upper_triangle(&self, offset: isize) -> Self {
        self.mask(|row, col| col.cast_signed() - row.cast_signed() >= offset)
    }

    fn mask(&self, keep: impl Fn(usize, usize) -> bool) -> Self {
        let mut out = self.clone();
        for row in 0..self.size {
            for col in 0..self.size {
                if !keep(row, col) {
                    out.put(row, col, 0.0);
                }
            }
        }
        out
    }

    /// Returns a 0/1 indicator matrix of entries satisfying `cmp` against
    /// `value`.
    ///
    /// # Examples
    /// ```
    /// use nullnet_core::{Adjacency, Comparison};
    ///
    /// let m = Adjacency::from_rows(vec![vec![0.0, -2.0], vec![3.0, 0.0]])
    ///     .expect("square");
    /// let positive = m.compare(Comparison::Greater, 0.0);
    /// assert_eq!(positive.get(1, 0), Some(1.0));
    /// assert_eq!(positive.get(0, 1), Some(0.0));
    /// ```
    #[must_use]
    pub fn compare(&self, cmp: Comparison, value: f64) -> Self {
        Self {
            size: self.size,
            weights: self
                .weights
                .iter()
                .map(|&w| if cmp.holds(w, value) { 1.0 } else { 0.0 })
                .collect(),
        }
    }

    /// Returns the 0/1 indicator of zero entries.
    #[must_use]
    pub fn logical_not(&self) -> Self {
        self.compare(Comparison::Equal, 0.0)
    }

    /// Lists `(row, col)` of every nonzero entry in column-major order, the
    /// order MATLAB's `find` produces.
    #[must_use]
    pub fn nonzero_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for col in 0..self.size {
            for row in 0..self.size {
                if self.at(row, col) != 0.0 {
                    pairs.push((row, col));
                }
            }
        }
        pairs
    }

    /// Lists every nonzero weight in the order of [`Self::nonzero_pairs`].
    #[must_use]
    pub fn nonzero_weights(&self) -> Vec<f64> {
        self.nonzero_pairs()
            .into_iter()
            .map(|(row, col)| self.at(row, col))
            .collect()
    }

    /// Counts nonzero entries.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.weights.iter().filter(|&&w| w != 0.0).count()
    }

    /// Returns the first node with a nonzero diagonal entry.
    #[must_use]
    pub fn first_self_loop(&self) -> Option<usize> {
        (0..self.size).find(|&node| self.at(node, node) != 0.0)
    }

    /// Returns the first entry that is NaN or infinite.
    #[must_use]
    pub fn first_non_finite(&self) -> Option<(usize, usize)> {
        self.weights
            .iter()
            .position(|w| !w.is_finite())
            .map(|idx| (idx / self.size, idx % self.size))
    }
}
