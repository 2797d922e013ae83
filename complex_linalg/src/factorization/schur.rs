use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::error::{LinalgError, LinalgResult};
use crate::matrix::Matrix;
use crate::scalar::C64;
use crate::square::eigen;
use crate::square::SquareMatrix;
use crate::vector::Vector;

/// `A = U·T·U*`
#[derive(Debug, Clone, PartialEq)]
pub struct Schur {
    pub unitary: SquareMatrix,
    /// `U*·A·U`, upper triangular within tolerance
    pub triangular: SquareMatrix,
}

impl Schur {
    /// Diagonal of `T`, the eigenvalues of `A`.
    pub fn eigenvalues(&self) -> Vec<C64> {
        (0..self.triangular.size())
            .map(|i| self.triangular[(i, i)])
            .collect()
    }
}

/// Schur decomposition by repeated eigenvector deflation.
///
/// Step `k` takes one eigenpair `(λ, v)` of the trailing `(n-k)×(n-k)` block
/// of the working matrix, completes `v` to a block unitary `P` whose first
/// column is `v/|v|`, and replaces the working matrix with
/// `diag(I, P)*·T·diag(I, P)`. Column `k` is then `λ` on the diagonal and zero
/// below it. The block unitaries are accumulated into `U`.
pub fn schur_decompose(m: &Matrix) -> LinalgResult<Schur> {
    if !m.is_square() {
        return Err(LinalgError::not_square(m.rows(), m.cols()));
    }
    let tol = m.tolerance();
    let n = m.rows();
    let mut t = m.storage().clone();
    let mut u = DMatrix::<C64>::identity(n, n);

    for k in 0..n.saturating_sub(1) {
        let size = n - k;
        let block = t.view((k, k), (size, size)).clone_owned();
        let values = eigen::eigenvalues(&block, tol)?;
        let lambda = values[0];
        let v = eigen::eigenvector(&block, lambda, tol);
        let p = Vector::from_storage(DVector::from_vec(v), tol)
            .unitary_completion()
            .into_result()?;
        let p = p.storage();

        let rows = p.adjoint() * t.rows(k, size);
        t.rows_mut(k, size).copy_from(&rows);
        let cols = t.columns(k, size) * p;
        t.columns_mut(k, size).copy_from(&cols);
        let acc = u.columns(k, size) * p;
        u.columns_mut(k, size).copy_from(&acc);

        debug!("schur step {}: deflated eigenvalue {}", k, lambda);
    }

    Ok(Schur {
        unitary: SquareMatrix::from_storage(u, tol),
        triangular: SquareMatrix::from_storage(t, tol),
    })
}
