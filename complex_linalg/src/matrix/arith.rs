use crate::error::{LinalgError, LinalgResult};
use crate::scalar::C64;

use super::Matrix;

impl Matrix {
    /// R×C → C×R
    pub fn transpose(&self) -> Matrix {
        Matrix::from_storage(self.data.transpose(), self.tol)
    }

    /// Transpose with every entry conjugated (`A*`).
    pub fn conjugate_transpose(&self) -> Matrix {
        Matrix::from_storage(self.data.adjoint(), self.tol)
    }

    /// Matrix product; requires `self.cols() == other.rows()`.
    pub fn multiply(&self, other: &Matrix) -> LinalgResult<Matrix> {
        if self.cols() != other.rows() {
            return Err(LinalgError::dimension_mismatch(
                "multiply",
                &[self.rows(), self.cols()],
                &[other.rows(), other.cols()],
            ));
        }
        Ok(Matrix::from_storage(&self.data * &other.data, self.tol))
    }

    pub fn add(&self, other: &Matrix) -> LinalgResult<Matrix> {
        self.check_same_shape(other, "add")?;
        Ok(Matrix::from_storage(&self.data + &other.data, self.tol))
    }

    pub fn sub(&self, other: &Matrix) -> LinalgResult<Matrix> {
        self.check_same_shape(other, "subtract")?;
        Ok(Matrix::from_storage(&self.data - &other.data, self.tol))
    }

    pub fn scale(&self, factor: C64) -> Matrix {
        Matrix::from_storage(self.data.map(|z| z * factor), self.tol)
    }

    fn check_same_shape(&self, other: &Matrix, operation: &'static str) -> LinalgResult<()> {
        if self.shape() != other.shape() {
            return Err(LinalgError::dimension_mismatch(
                operation,
                &[self.rows(), self.cols()],
                &[other.rows(), other.cols()],
            ));
        }
        Ok(())
    }
}
