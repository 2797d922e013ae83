//! Matrix factorizations
//!
//! - **QR**: `A = QR`, `Q` with orthonormal columns (Gram-Schmidt), `R = Q*A`
//! - **LU**: Crout form `A = LU`, general lower `L`, unit-diagonal upper `U`
//! - **Cholesky**: `A = LL*` for Hermitian positive-definite `A`
//! - **Schur**: `A = UTU*` with `U` unitary and `T` upper triangular
//! - **SVD**: the singular values of `A` and their diagonal matrix `Σ`
//!
//! A factorization that does not exist for a valid input is reported as
//! [`Outcome::Absent`](crate::Outcome::Absent); shape errors come back as
//! [`LinalgError`](crate::LinalgError).

mod cholesky;
mod lu;
mod qr;
mod schur;
mod svd;

pub use cholesky::{cholesky_decompose, Cholesky};
pub use lu::{lu_decompose, Lu};
pub use qr::{qr_decompose, Qr};
pub use schur::{schur_decompose, Schur};
pub use svd::{singular_value_decomposition, Svd};
