use nalgebra::DMatrix;

use crate::error::{Absence, LinalgError, LinalgResult, Outcome};
use crate::matrix::Matrix;
use crate::scalar::{C64, ONE, ZERO};
use crate::square::SquareMatrix;

/// Crout factorization `A = LU`.
#[derive(Debug, Clone, PartialEq)]
pub struct Lu {
    /// Lower triangular, general diagonal
    pub l: SquareMatrix,
    /// Upper triangular, unit diagonal
    pub u: SquareMatrix,
}

impl Lu {
    /// Product of `L`'s diagonal, since `det(U) = 1`.
    pub fn determinant(&self) -> C64 {
        (0..self.l.size()).map(|i| self.l[(i, i)]).product()
    }

    pub fn reconstruct(&self) -> SquareMatrix {
        SquareMatrix::from_storage(self.l.storage() * self.u.storage(), self.l.tolerance())
    }
}

/// LU decomposition without pivoting (Crout).
///
/// Column `n` of `L` and then row `n` of `U` are computed from the ones
/// before them:
///
/// ```text
/// L[i][n] = A[i][n] - Σ_{k<n} L[i][k]·U[k][n]          (i ≥ n)
/// U[n][j] = (A[n][j] - Σ_{k<n} L[n][k]·U[k][j]) / L[n][n]  (j > n)
/// ```
///
/// `Absent(ZeroPivot)` when `A[0][0]` or any `L[n][n]` before the last row
/// is zero within tolerance (`|p| < ε`); the matrix may still be invertible.
pub fn lu_decompose(m: &Matrix) -> LinalgResult<Outcome<Lu>> {
    if !m.is_square() {
        return Err(LinalgError::not_square(m.rows(), m.cols()));
    }
    let a = m.storage();
    let tol = m.tolerance();
    let size = a.nrows();

    let mut l = DMatrix::<C64>::zeros(size, size);
    let mut u = DMatrix::<C64>::identity(size, size);

    for n in 0..size {
        for i in n..size {
            let partial = (0..n).fold(ZERO, |acc, k| acc + l[(i, k)] * u[(k, n)]);
            l[(i, n)] = a[(i, n)] - partial;
        }

        let pivot = l[(n, n)];
        if tol.is_zero(pivot) && (n == 0 || n + 1 < size) {
            return Ok(Outcome::Absent(Absence::ZeroPivot { index: n }));
        }

        for j in (n + 1)..size {
            let partial = (0..n).fold(ZERO, |acc, k| acc + l[(n, k)] * u[(k, j)]);
            u[(n, j)] = (a[(n, j)] - partial) / pivot;
        }
        u[(n, n)] = ONE;
    }

    Ok(Outcome::Found(Lu {
        l: SquareMatrix::from_storage(l, tol),
        u: SquareMatrix::from_storage(u, tol),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern;
    use crate::scalar::real;

    #[test]
    fn test_lu_reconstructs_and_u_is_unit() {
        let m = Matrix::from_real_rows(&[
            vec![2.0, -1.0, 0.0],
            vec![-1.0, 2.0, -1.0],
            vec![0.0, -1.0, 2.0],
        ])
        .unwrap();
        let lu = lu_decompose(&m).unwrap().found().unwrap();
        assert!(pattern::is_lower_triangular(&lu.l));
        assert!(pattern::is_upper_triangular(&lu.u));
        for i in 0..3 {
            assert_eq!(lu.u[(i, i)], real(1.0));
        }
        assert_eq!(*lu.reconstruct(), m);
        assert!((lu.determinant() - real(4.0)).norm() < 1e-12);
    }

    #[test]
    fn test_lu_zero_leading_entry_is_absent() {
        let m = Matrix::from_real_rows(&[vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        assert_eq!(
            lu_decompose(&m).unwrap(),
            Outcome::Absent(Absence::ZeroPivot { index: 0 })
        );
    }

    #[test]
    fn test_lu_zero_intermediate_pivot_is_absent() {
        // L[1][1] = 2 - 1·2 = 0
        let m = Matrix::from_real_rows(&[
            vec![1.0, 2.0, 3.0],
            vec![1.0, 2.0, 4.0],
            vec![2.0, 1.0, 1.0],
        ])
        .unwrap();
        assert_eq!(
            lu_decompose(&m).unwrap().absence(),
            Some(Absence::ZeroPivot { index: 1 })
        );
    }

    #[test]
    fn test_lu_of_badly_scaled_diagonal() {
        let m = Matrix::from_real_rows(&[
            vec![1e6, 0.0, 0.0],
            vec![0.0, 1e-4, 0.0],
            vec![0.0, 0.0, 1.0],
        ])
        .unwrap();
        let lu = lu_decompose(&m).unwrap().found().unwrap();
        assert_eq!(*lu.reconstruct(), m);
        assert!((lu.determinant() - real(100.0)).norm() < 1e-9);
    }

    #[test]
    fn test_lu_singular_last_pivot_is_allowed() {
        let m = Matrix::from_real_rows(&[vec![1.0, 2.0], vec![2.0, 4.0]]).unwrap();
        let lu = lu_decompose(&m).unwrap().found().unwrap();
        assert_eq!(lu.determinant(), real(0.0));
    }

    #[test]
    fn test_lu_rejects_rectangular() {
        let m = Matrix::zeros(2, 3).unwrap();
        assert!(matches!(lu_decompose(&m), Err(LinalgError::NotSquare { .. })));
    }
}
