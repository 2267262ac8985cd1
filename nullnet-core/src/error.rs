//! Error types for the nullnet core library.
//!
//! Defines the error enums exposed by the public API, their stable
//! machine-readable codes, and a convenient result alias for the rewiring
//! entry points.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? $( ( $($tuple:tt)* ) )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? $( ( $($tuple)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while building or indexing an [`crate::Adjacency`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MatrixError {
    /// A row had a different length from the number of rows.
    #[error("adjacency must be square: row {row} has {found} columns but there are {expected} rows")]
    NotSquare {
        /// Index of the offending row.
        row: usize,
        /// Required row length (the number of rows).
        expected: usize,
        /// Actual row length.
        found: usize,
    },
    /// A `(row, col)` index fell outside the matrix.
    #[error("index ({row}, {col}) is out of bounds for a {size}x{size} matrix")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Side length of the matrix.
        size: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`MatrixError`] variants.
    enum MatrixErrorCode for MatrixError {
        /// A row had a different length from the number of rows.
        NotSquare => NotSquare { .. } => "MATRIX_NOT_SQUARE",
        /// A `(row, col)` index fell outside the matrix.
        OutOfBounds => OutOfBounds { .. } => "MATRIX_OUT_OF_BOUNDS",
    }
}

/// Error type produced when validating input for, or running, the lattice
/// rewiring.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum LatticeError {
    /// A matrix primitive failed while preparing or applying a rewire.
    #[error(transparent)]
    Matrix(#[from] MatrixError),
    /// The adjacency matrix has no nodes.
    #[error("cannot latticize an empty graph")]
    EmptyGraph,
    /// The adjacency matrix carries a self-loop.
    #[error("node {node} has a self-loop; the diagonal must be zero")]
    NonZeroDiagonal {
        /// Node whose diagonal entry is nonzero.
        node: usize,
    },
    /// An entry is NaN or infinite.
    #[error("entry ({row}, {col}) is not a finite weight")]
    NonFiniteWeight {
        /// Row of the offending entry.
        row: usize,
        /// Column of the offending entry.
        col: usize,
    },
    /// The graph is not even weakly connected.
    #[error("graph must be connected but has {components} weak components")]
    Disconnected {
        /// Number of weakly connected components found.
        components: usize,
    },
    /// Rewiring parameters were rejected.
    #[error("invalid lattice parameters: {reason}")]
    InvalidParameters {
        /// Human-readable description of the invalid parameter.
        reason: String,
    },
    /// Too many consecutive candidates were rejected.
    #[error(
        "rewire budget exhausted after {attempts} attempts ({consecutive_rejections} consecutive rejections)"
    )]
    RewireBudgetExhausted {
        /// Attempts consumed when the cap was hit.
        attempts: usize,
        /// Length of the rejection streak that triggered the cap.
        consecutive_rejections: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`LatticeError`] variants.
    enum LatticeErrorCode for LatticeError {
        /// A matrix primitive failed.
        MatrixFailure => Matrix(..) => "LATTICE_MATRIX_FAILURE",
        /// The adjacency matrix has no nodes.
        EmptyGraph => EmptyGraph => "LATTICE_EMPTY_GRAPH",
        /// The adjacency matrix carries a self-loop.
        NonZeroDiagonal => NonZeroDiagonal { .. } => "LATTICE_NONZERO_DIAGONAL",
        /// An entry is NaN or infinite.
        NonFiniteWeight => NonFiniteWeight { .. } => "LATTICE_NON_FINITE_WEIGHT",
        /// The graph is disconnected.
        Disconnected => Disconnected { .. } => "LATTICE_DISCONNECTED",
        /// Rewiring parameters were rejected.
        InvalidParameters => InvalidParameters { .. } => "LATTICE_INVALID_PARAMETERS",
        /// Too many consecutive candidates were rejected.
        RewireBudgetExhausted => RewireBudgetExhausted { .. } => "LATTICE_REWIRE_BUDGET_EXHAUSTED",
    }
}

impl LatticeError {
    /// Retrieve the inner [`MatrixErrorCode`] when a matrix primitive failed.
    #[must_use]
    pub const fn matrix_code(&self) -> Option<MatrixErrorCode> {
        match self {
            Self::Matrix(error) => Some(error.code()),
            _ => None,
        }
    }

    /// Returns `true` when the error reports a precondition violation on the
    /// input graph rather than a failure during rewiring.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::Matrix(_)
                | Self::EmptyGraph
                | Self::NonZeroDiagonal { .. }
                | Self::NonFiniteWeight { .. }
                | Self::Disconnected { .. }
        )
    }
}

/// An error produced while computing structural metrics.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MetricError {
    /// The graph has no edges to correlate.
    #[error("graph has no edges")]
    NoEdges,
    /// Every edge joins nodes of identical degree, so the coefficient is
    /// undefined.
    #[error("degree variance across edges is zero")]
    ZeroVariance,
}

define_error_codes! {
    /// Stable codes describing [`MetricError`] variants.
    enum MetricErrorCode for MetricError {
        /// The graph has no edges to correlate.
        NoEdges => NoEdges => "METRIC_NO_EDGES",
        /// Degree variance across edges is zero.
        ZeroVariance => ZeroVariance => "METRIC_ZERO_VARIANCE",
    }
}

/// An error produced while generating random graphs.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GenerateError {
    /// More edges were requested than there are off-diagonal slots.
    #[error("cannot place {requested} edges among {nodes} nodes (capacity {capacity})")]
    TooManyEdges {
        /// Number of edges requested.
        requested: usize,
        /// Number of nodes in the graph.
        nodes: usize,
        /// Number of off-diagonal slots, `n * (n - 1)`.
        capacity: usize,
    },
    /// The weight range is empty or not finite.
    #[error("weight range [{min}, {max}) is invalid")]
    InvalidWeightRange {
        /// Lower bound supplied by the caller.
        min: f64,
        /// Upper bound supplied by the caller.
        max: f64,
    },
    /// A pooled weight is zero or not finite and would not form an edge.
    #[error("weight at index {index} ({weight}) cannot be placed as an edge")]
    UnplaceableWeight {
        /// Position of the weight in the pool.
        index: usize,
        /// The offending weight.
        weight: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`GenerateError`] variants.
    enum GenerateErrorCode for GenerateError {
        /// More edges were requested than there are off-diagonal slots.
        TooManyEdges => TooManyEdges { .. } => "GENERATE_TOO_MANY_EDGES",
        /// The weight range is empty or not finite.
        InvalidWeightRange => InvalidWeightRange { .. } => "GENERATE_INVALID_WEIGHT_RANGE",
        /// A pooled weight cannot be placed as an edge.
        UnplaceableWeight => UnplaceableWeight { .. } => "GENERATE_UNPLACEABLE_WEIGHT",
    }
}

/// Convenient alias for results returned by the rewiring API.
pub type Result<T> = core::result::Result<T, LatticeError>;
