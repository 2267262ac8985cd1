//! Structural metrics: degrees, link counts, and degree assortativity.
//!
//! Weights are ignored throughout; an entry counts as a link when it is
//! nonzero.

use crate::{error::MetricError, matrix::Adjacency};

/// In- and out-degree of every node in a directed graph.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DirectedDegrees {
    /// Number of incoming links per node (nonzero entries per column).
    pub in_degree: Vec<usize>,
    /// Number of outgoing links per node (nonzero entries per row).
    pub out_degree: Vec<usize>,
}

impl DirectedDegrees {
    /// Returns `in + out` for every node.
    #[must_use]
    pub fn total(&self) -> Vec<usize> {
        self.in_degree
            .iter()
            .zip(&self.out_degree)
            .map(|(i, o)| i + o)
            .collect()
    }
}

/// Computes in- and out-degrees of a directed graph.
#[must_use]
pub fn degrees_directed(adjacency: &Adjacency) -> DirectedDegrees {
    let n = adjacency.node_count();
    let mut degrees = DirectedDegrees {
        in_degree: vec![0; n],
        out_degree: vec![0; n],
    };
    for (row, values) in adjacency.rows().enumerate() {
        for (col, &weight) in values.iter().enumerate() {
            if weight != 0.0 {
                degrees.out_degree[row] += 1;
                degrees.in_degree[col] += 1;
            }
        }
    }
    degrees
}

/// Computes the degree of every node of an undirected graph.
///
/// The matrix is expected to be symmetric; each row's nonzero count is
/// reported.
#[must_use]
pub fn degrees_undirected(adjacency: &Adjacency) -> Vec<usize> {
    adjacency
        .rows()
        .map(|values| values.iter().filter(|&&w| w != 0.0).count())
        .collect()
}

/// Returns the number of nodes.
#[must_use]
pub fn number_of_nodes(adjacency: &Adjacency) -> usize {
    adjacency.node_count()
}

/// Returns the number of links in a directed graph.
#[must_use]
pub fn number_of_links_directed(adjacency: &Adjacency) -> usize {
    adjacency.edge_count()
}

/// Returns the number of links in an undirected graph, counting the upper
/// triangle including the diagonal.
#[must_use]
pub fn number_of_links_undirected(adjacency: &Adjacency) -> usize {
    adjacency.upper_triangle(0).edge_count()
}

/// Degree assortativity of a directed graph.
///
/// Correlates the total degree (`in + out`) at both ends of every link.
///
/// # Errors
/// Returns [`MetricError::NoEdges`] for a graph without links and
/// [`MetricError::ZeroVariance`] when every link joins nodes of equal degree.
///
/// # Examples
/// ```
/// use nullnet_core::{Adjacency, assortativity_directed};
///
/// // Hub 0 links both ways to three leaves.
/// let star = Adjacency::from_rows(vec![
///     vec![0.0, 1.0, 1.0, 1.0],
///     vec![1.0, 0.0, 0.0, 0.0],
///     vec![1.0, 0.0, 0.0, 0.0],
///     vec![1.0, 0.0, 0.0, 0.0],
/// ])
/// .expect("square");
/// let r = assortativity_directed(&star).expect("star has degree variance");
/// assert!(r < 0.0);
/// ```
pub fn assortativity_directed(adjacency: &Adjacency) -> Result<f64, MetricError> {
    let degrees = degrees_directed(adjacency).total();
    let links = adjacency.compare(crate::Comparison::Greater, 0.0).nonzero_pairs();
    assortativity(&degrees, &links)
}

/// Degree assortativity of an undirected graph.
///
/// Each link in the strict upper triangle contributes once.
///
/// # Errors
/// Returns [`MetricError::NoEdges`] for a graph without links and
/// [`MetricError::ZeroVariance`] when every link joins nodes of equal degree.
pub fn assortativity_undirected(adjacency: &Adjacency) -> Result<f64, MetricError> {
    let degrees = degrees_undirected(adjacency);
    let links = adjacency
        .upper_triangle(1)
        .compare(crate::Comparison::Greater, 0.0)
        .nonzero_pairs();
    assortativity(&degrees, &links)
}

#[expect(
    clippy::cast_precision_loss,
    reason = "degree sums stay far below 2^52"
)]
fn assortativity(degrees: &[usize], links: &[(usize, usize)]) -> Result<f64, MetricError> {
    if links.is_empty() {
        return Err(MetricError::NoEdges);
    }
    let k = links.len() as f64;
    let (mut product, mut mean, mut square) = (0.0_f64, 0.0_f64, 0.0_f64);
    for &(i, j) in links {
        let di = degrees[i] as f64;
        let dj = degrees[j] as f64;
        product += di * dj;
        mean += 0.5 * (di + dj);
        square += 0.5 * (di * di + dj * dj);
    }
    let mean_sq = (mean / k).powi(2);
    let numerator = product / k - mean_sq;
    let denominator = square / k - mean_sq;
    if denominator == 0.0 {
        return Err(MetricError::ZeroVariance);
    }
    Ok(numerator / denominator)
}

#[cfg(test)]
mod tests {
    //! Tests for degree, link, and assortativity metrics.

    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn path() -> Adjacency {
        Adjacency::from_rows(vec![
            vec![0.0, 2.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.5, 0.0],
            vec![0.0, 0.0, 0.0, 1.0],
            vec![0.0, 0.0, 0.0, 0.0],
        ])
        .expect("square")
    }

    #[rstest]
    fn directed_degrees_count_rows_and_columns(path: Adjacency) {
        let degrees = degrees_directed(&path);
        assert_eq!(degrees.out_degree, vec![1, 1, 1, 0]);
        assert_eq!(degrees.in_degree, vec![0, 1, 1, 1]);
        assert_eq!(degrees.total(), vec![1, 2, 2, 1]);
    }

    #[rstest]
    fn link_counts(path: Adjacency) {
        assert_eq!(number_of_nodes(&path), 4);
        assert_eq!(number_of_links_directed(&path), 3);
        assert_eq!(number_of_links_undirected(&path), 3);
    }

    #[test]
    fn undirected_links_count_upper_triangle_once() {
        let triangle = Adjacency::from_rows(vec![
            vec![0.0, 1.0, 1.0],
            vec![1.0, 0.0, 1.0],
            vec![1.0, 1.0, 0.0],
        ])
        .expect("square");
        assert_eq!(degrees_undirected(&triangle), vec![2, 2, 2]);
        assert_eq!(number_of_links_undirected(&triangle), 3);
    }

    #[rstest]
    fn directed_path_is_disassortative(path: Adjacency) {
        // Links: 1-2 (deg 1,2), 2-2, 2-1 => r = -0.5
        let r = assortativity_directed(&path).expect("path has variance");
        assert!((r + 0.5).abs() < 1e-12, "unexpected coefficient {r}");
    }

    #[test]
    fn undirected_star_is_perfectly_disassortative() {
        let star = Adjacency::from_rows(vec![
            vec![0.0, 1.0, 1.0, 1.0],
            vec![1.0, 0.0, 0.0, 0.0],
            vec![1.0, 0.0, 0.0, 0.0],
            vec![1.0, 0.0, 0.0, 0.0],
        ])
        .expect("square");
        let r = assortativity_undirected(&star).expect("star has variance");
        assert!((r + 1.0).abs() < 1e-12, "unexpected coefficient {r}");
    }

    #[rstest]
    #[case::no_edges(Adjacency::zeros(3), MetricError::NoEdges)]
    #[case::regular(
        Adjacency::from_rows(vec![
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
            vec![1.0, 0.0, 0.0],
        ]).expect("square"),
        MetricError::ZeroVariance,
    )]
    fn assortativity_reports_degenerate_inputs(
        #[case] graph: Adjacency,
        #[case] expected: MetricError,
    ) {
        assert_eq!(assortativity_directed(&graph), Err(expected));
    }
}
