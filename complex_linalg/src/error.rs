//! Error and outcome types for the linear-algebra engine
//!
//! Failures come through two channels:
//!
//! - [`LinalgError`]: a structural precondition was violated (non-square input,
//!   incompatible shapes, division by a zero-modulus scalar, ...). These are
//!   reported before any computation runs.
//! - [`Outcome::Absent`]: the input was valid but the requested object does not
//!   exist numerically (singular matrix, no LU/Cholesky factorization,
//!   projection onto the zero vector). The [`Absence`] tag says why.

use thiserror::Error;

/// Structural error raised at the API boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LinalgError {
    /// A square-only operation received a non-square matrix
    #[error("NotSquare: expected a square matrix, got {rows}x{cols}")]
    NotSquare {
        /// Row count of the offending matrix
        rows: usize,
        /// Column count of the offending matrix
        cols: usize,
    },

    /// Operands have incompatible shapes
    #[error("DimensionMismatch: cannot {operation} shapes {lhs:?} and {rhs:?}")]
    DimensionMismatch {
        /// Operation that was attempted
        operation: &'static str,
        /// Shape of the left operand (`[len]` for vectors)
        lhs: Vec<usize>,
        /// Shape of the right operand
        rhs: Vec<usize>,
    },

    /// Scalar division by a divisor whose modulus is below tolerance
    #[error("DivisionByZero: divisor modulus {modulus:e} is below tolerance")]
    DivisionByZero {
        /// Modulus of the rejected divisor
        modulus: f64,
    },

    /// Element access outside the matrix
    #[error("BoundsError: index ({row}, {col}) outside {rows}x{cols} matrix")]
    IndexOutOfBounds {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
        /// Row count
        rows: usize,
        /// Column count
        cols: usize,
    },

    /// Construction from empty data
    #[error("ArgumentError: {0} must contain at least one element")]
    EmptyInput(&'static str),

    /// Construction from rows of unequal length
    #[error("ArgumentError: row {row} has {got} entries, expected {expected}")]
    RaggedRows {
        /// Index of the first ragged row
        row: usize,
        /// Length of row 0
        expected: usize,
        /// Length of the ragged row
        got: usize,
    },

    /// The eigenvalue iteration ran out of sweeps on an active window
    #[error("NoConvergence: eigenvalue iteration on a {size}x{size} window exceeded {sweeps} sweeps")]
    NoConvergence {
        /// Size of the window that failed to deflate
        size: usize,
        /// Sweep budget that was exhausted
        sweeps: usize,
    },

    /// Invalid configuration value or unreadable configuration source
    #[error("ConfigError: {0}")]
    Config(String),

    /// A numerical non-existence collapsed into the error channel
    #[error("NoResult: {0}")]
    NoResult(#[from] Absence),
}

impl LinalgError {
    /// Create a not-square error from a shape
    pub fn not_square(rows: usize, cols: usize) -> Self {
        LinalgError::NotSquare { rows, cols }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch(operation: &'static str, lhs: &[usize], rhs: &[usize]) -> Self {
        LinalgError::DimensionMismatch {
            operation,
            lhs: lhs.to_vec(),
            rhs: rhs.to_vec(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        LinalgError::Config(msg.into())
    }
}

/// Result type alias for structural failures
pub type LinalgResult<T> = Result<T, LinalgError>;

/// Reason a numerically valid input has no result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Absence {
    /// The matrix has no inverse
    #[error("matrix is singular")]
    Singular,

    /// Crout LU elimination met a zero pivot before the final row
    #[error("zero pivot at index {index}, no LU factorization exists")]
    ZeroPivot {
        /// Diagonal index of the zero pivot
        index: usize,
    },

    /// Cholesky requires a Hermitian matrix
    #[error("matrix is not Hermitian")]
    NotHermitian,

    /// Cholesky met a non-positive radicand
    #[error("matrix is not positive definite (radicand at index {index})")]
    NotPositiveDefinite {
        /// Diagonal index of the failing radicand
        index: usize,
    },

    /// Gram-Schmidt found a column in the span of the previous ones
    #[error("column {column} is linearly dependent on the preceding columns")]
    DependentColumns {
        /// Index of the first dependent column
        column: usize,
    },

    /// The operation needs a nonzero vector
    #[error("vector is zero")]
    ZeroVector,
}

/// Value-or-absence result of a numerical routine.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Outcome<T> {
    /// The requested object exists
    Found(T),
    /// The requested object does not exist for this input
    Absent(Absence),
}

impl<T> Outcome<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Outcome::Found(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Outcome::Absent(_))
    }

    /// Discard the absence reason
    pub fn found(self) -> Option<T> {
        match self {
            Outcome::Found(value) => Some(value),
            Outcome::Absent(_) => None,
        }
    }

    pub fn absence(&self) -> Option<Absence> {
        match self {
            Outcome::Found(_) => None,
            Outcome::Absent(reason) => Some(*reason),
        }
    }

    pub fn as_ref(&self) -> Outcome<&T> {
        match self {
            Outcome::Found(value) => Outcome::Found(value),
            Outcome::Absent(reason) => Outcome::Absent(*reason),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Found(value) => Outcome::Found(f(value)),
            Outcome::Absent(reason) => Outcome::Absent(reason),
        }
    }

    pub fn and_then<U, F: FnOnce(T) -> Outcome<U>>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Found(value) => f(value),
            Outcome::Absent(reason) => Outcome::Absent(reason),
        }
    }

    /// Collapse into the structural error channel as [`LinalgError::NoResult`]
    pub fn into_result(self) -> LinalgResult<T> {
        match self {
            Outcome::Found(value) => Ok(value),
            Outcome::Absent(reason) => Err(LinalgError::NoResult(reason)),
        }
    }
}

impl<T> From<Result<T, Absence>> for Outcome<T> {
    fn from(result: Result<T, Absence>) -> Self {
        match result {
            Ok(value) => Outcome::Found(value),
            Err(reason) => Outcome::Absent(reason),
        }
    }
}
