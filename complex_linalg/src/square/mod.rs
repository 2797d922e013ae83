//! Square matrices: determinant, inverse, powers and eigenpairs.

pub(crate) mod eigen;
pub(crate) mod elimination;

use std::fmt;
use std::ops::Deref;

use nalgebra::{DMatrix, DVector};

use crate::config::Tolerance;
use crate::error::{Absence, LinalgError, LinalgResult, Outcome};
use crate::matrix::Matrix;
use crate::scalar::C64;
use crate::vector::Vector;

/// A [`Matrix`] with as many rows as columns.
///
/// Every read-only [`Matrix`] operation is available through `Deref`.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareMatrix(Matrix);

impl SquareMatrix {
    pub fn new(matrix: Matrix) -> LinalgResult<Self> {
        if !matrix.is_square() {
            return Err(LinalgError::not_square(matrix.rows(), matrix.cols()));
        }
        Ok(Self(matrix))
    }

    pub fn from_rows(rows: &[Vec<C64>]) -> LinalgResult<Self> {
        Self::new(Matrix::from_rows(rows)?)
    }

    pub fn from_rows_with_tolerance(rows: &[Vec<C64>], tol: Tolerance) -> LinalgResult<Self> {
        Self::new(Matrix::from_rows_with_tolerance(rows, tol)?)
    }

    pub fn from_real_rows(rows: &[Vec<f64>]) -> LinalgResult<Self> {
        Self::new(Matrix::from_real_rows(rows)?)
    }

    pub fn identity(n: usize) -> LinalgResult<Self> {
        Ok(Self(Matrix::identity(n)?))
    }

    pub(crate) fn from_storage(data: DMatrix<C64>, tol: Tolerance) -> Self {
        debug_assert_eq!(data.nrows(), data.ncols());
        Self(Matrix::from_storage(data, tol))
    }

    pub fn size(&self) -> usize {
        self.0.rows()
    }

    pub fn as_matrix(&self) -> &Matrix {
        &self.0
    }

    pub fn into_matrix(self) -> Matrix {
        self.0
    }

    /// Same entries, different tolerance.
    pub fn with_tolerance(self, tol: Tolerance) -> Self {
        Self(self.0.with_tolerance(tol))
    }

    pub fn determinant(&self) -> C64 {
        let data = self.storage();
        if self.size() == 1 {
            return data[(0, 0)];
        }
        elimination::determinant(data.clone(), self.tolerance())
    }

    /// `Absent(Singular)` when elimination meets a pivot that is zero within
    /// tolerance.
    pub fn inverse(&self) -> Outcome<SquareMatrix> {
        match elimination::gauss_jordan_inverse(self.storage(), self.tolerance()) {
            Some(inverse) => Outcome::Found(Self::from_storage(inverse, self.tolerance())),
            None => Outcome::Absent(Absence::Singular),
        }
    }

    /// `self^k` by repeated multiplication; `k == 0` gives the identity.
    pub fn pow(&self, k: u32) -> SquareMatrix {
        let n = self.size();
        let base = self.storage();
        let mut acc = DMatrix::<C64>::identity(n, n);
        for _ in 0..k {
            acc = &acc * base;
        }
        Self::from_storage(acc, self.tolerance())
    }

    pub fn trace(&self) -> C64 {
        (0..self.size()).map(|i| self[(i, i)]).sum()
    }

    /// All eigenvalues with multiplicity, ordered by the diagonal position at
    /// which they deflated.
    pub fn eigenvalues(&self) -> LinalgResult<Vec<C64>> {
        eigen::eigenvalues(self.storage(), self.tolerance())
    }

    /// One unit eigenvector per target eigenvalue, in the same order.
    pub fn eigenvectors(&self, eigenvalues: &[C64]) -> Vec<Vector> {
        eigenvalues
            .iter()
            .map(|&lambda| {
                self.vector(eigen::eigenvector(self.storage(), lambda, self.tolerance()))
            })
            .collect()
    }

    /// Basis of the eigenspace of `lambda`; empty when `lambda` is not an
    /// eigenvalue within tolerance.
    pub fn eigenspace(&self, lambda: C64) -> Vec<Vector> {
        eigen::eigenspace(self.storage(), lambda, self.tolerance())
            .into_iter()
            .map(|entries| self.vector(entries))
            .collect()
    }

    /// Eigenvalues paired with one unit eigenvector each.
    pub fn eigenpairs(&self) -> LinalgResult<Vec<(C64, Vector)>> {
        let values = self.eigenvalues()?;
        let vectors = self.eigenvectors(&values);
        Ok(values.into_iter().zip(vectors).collect())
    }

    fn vector(&self, entries: Vec<C64>) -> Vector {
        Vector::from_storage(DVector::from_vec(entries), self.tolerance())
    }

    /// `self - λI`
    pub fn shift(&self, lambda: C64) -> SquareMatrix {
        let mut data = self.storage().clone();
        for i in 0..self.size() {
            data[(i, i)] -= lambda;
        }
        Self::from_storage(data, self.tolerance())
    }
}

impl Deref for SquareMatrix {
    type Target = Matrix;

    fn deref(&self) -> &Matrix {
        &self.0
    }
}

impl AsRef<Matrix> for SquareMatrix {
    fn as_ref(&self) -> &Matrix {
        &self.0
    }
}

impl TryFrom<Matrix> for SquareMatrix {
    type Error = LinalgError;

    fn try_from(matrix: Matrix) -> LinalgResult<Self> {
        Self::new(matrix)
    }
}

impl From<SquareMatrix> for Matrix {
    fn from(square: SquareMatrix) -> Matrix {
        square.0
    }
}

impl fmt::Display for SquareMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> C64 {
        C64::new(re, im)
    }

    // ── construction ─────────────────────────────────────────────────────────

    #[test]
    fn test_new_rejects_rectangular() {
        let m = Matrix::from_real_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(
            SquareMatrix::new(m).unwrap_err(),
            LinalgError::NotSquare { rows: 2, cols: 3 }
        );
    }

    // ── determinant ──────────────────────────────────────────────────────────

    #[test]
    fn test_determinant_1x1() {
        let m = SquareMatrix::from_rows(&[vec![c(2.0, -3.0)]]).unwrap();
        assert_eq!(m.determinant(), c(2.0, -3.0));
    }

    #[test]
    fn test_determinant_singular_is_zero() {
        let m = SquareMatrix::from_real_rows(&[vec![1.0, 2.0], vec![2.0, 4.0]]).unwrap();
        assert_eq!(m.determinant(), c(0.0, 0.0));
    }

    #[test]
    fn test_determinant_2x2() {
        let m = SquareMatrix::from_real_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert!((m.determinant() - c(-2.0, 0.0)).norm() < 1e-12);
    }

    // ── inverse ──────────────────────────────────────────────────────────────

    #[test]
    fn test_inverse_complex_2x2() {
        let m = SquareMatrix::from_rows(&[
            vec![c(1.0, 1.0), c(2.0, 0.0)],
            vec![c(0.0, -1.0), c(3.0, 0.0)],
        ])
        .unwrap();
        let inv = m.inverse().found().unwrap();
        let product = m.multiply(&inv).unwrap();
        assert_eq!(product, Matrix::identity(2).unwrap());
    }

    #[test]
    fn test_inverse_of_badly_scaled_diagonal() {
        let m = SquareMatrix::from_real_rows(&[vec![1e6, 0.0], vec![0.0, 1e-4]]).unwrap();
        assert!((m.determinant() - c(100.0, 0.0)).norm() < 1e-9);
        let inv = m.inverse().found().unwrap();
        let expected = SquareMatrix::from_real_rows(&[vec![1e-6, 0.0], vec![0.0, 1e4]]).unwrap();
        assert_eq!(inv, expected);
    }

    #[test]
    fn test_inverse_of_singular_is_absent() {
        let m = SquareMatrix::from_real_rows(&[vec![1.0, 2.0], vec![2.0, 4.0]]).unwrap();
        assert_eq!(m.inverse(), Outcome::Absent(Absence::Singular));
    }

    // ── pow ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_pow_zero_and_one() {
        let m = SquareMatrix::from_real_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(m.pow(0), SquareMatrix::identity(2).unwrap());
        assert_eq!(m.pow(1), m);
    }

    // ── eigenpairs ───────────────────────────────────────────────────────────

    #[test]
    fn test_eigenpairs_satisfy_definition() {
        let m = SquareMatrix::from_rows(&[
            vec![c(0.0, 1.0), c(2.0, 0.0)],
            vec![c(1.0, 0.0), c(1.0, 1.0)],
        ])
        .unwrap();
        for (lambda, v) in m.eigenpairs().unwrap() {
            let column = Matrix::from_columns(&[v.clone()]).unwrap();
            let av = m.multiply(&column).unwrap().column(0);
            assert_eq!(av, v.scale(lambda));
            assert!((v.norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_eigenspace_of_identity_is_whole_space() {
        let m = SquareMatrix::identity(3).unwrap();
        assert_eq!(m.eigenspace(c(1.0, 0.0)).len(), 3);
        assert!(m.eigenspace(c(2.0, 0.0)).is_empty());
    }

    #[test]
    fn test_shift_and_trace() {
        let m = SquareMatrix::from_real_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(m.trace(), c(5.0, 0.0));
        assert_eq!(m.shift(c(1.0, 0.0)).trace(), c(3.0, 0.0));
    }
}
