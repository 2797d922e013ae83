// Library code reports through `log`; only bin/ may write to stderr.
#![deny(clippy::print_stderr)]
//! Dense complex-valued linear algebra.
//!
//! Complex scalars, vectors and matrices with tolerance-based equality, plus
//! the algorithms built on them: determinant, inverse, powers, eigenvalues and
//! eigenvectors, structural predicates, Hessenberg reduction and the QR, LU,
//! Cholesky, Schur and singular-value factorizations.
//!
//! ```ignore
//! use complex_linalg::prelude::*;
//!
//! let a = SquareMatrix::from_real_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]])?;
//! assert_eq!(a.determinant(), C64::new(-2.0, 0.0));
//! let values = a.eigenvalues()?;
//! ```

pub mod config;
pub mod error;
pub mod factorization;
pub mod matrix;
pub mod pattern;
pub mod scalar;
pub mod square;
pub mod vector;

pub use config::{LinalgConfig, Tolerance};
pub use error::{Absence, LinalgError, LinalgResult, Outcome};
pub use matrix::Matrix;
pub use scalar::{format_scalar, real, ComplexScalar, ScalarDisplay, C64};
pub use square::SquareMatrix;
pub use vector::Vector;

/// Everything a client typically needs in one import.
pub mod prelude {
    pub use crate::config::{LinalgConfig, Tolerance};
    pub use crate::error::{Absence, LinalgError, LinalgResult, Outcome};
    pub use crate::factorization::{
        cholesky_decompose, lu_decompose, qr_decompose, schur_decompose,
        singular_value_decomposition, Cholesky, Lu, Qr, Schur, Svd,
    };
    pub use crate::matrix::Matrix;
    pub use crate::pattern;
    pub use crate::scalar::{real, ComplexScalar, C64};
    pub use crate::square::SquareMatrix;
    pub use crate::vector::Vector;
}
