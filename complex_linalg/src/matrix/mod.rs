//! Dense rectangular complex matrices.
//!
//! `Matrix` wraps an `nalgebra::DMatrix<C64>` together with the [`Tolerance`]
//! used for every equality and zero test on it. Operations never mutate the
//! receiver; they return new matrices carrying the receiver's tolerance.

mod arith;
mod gram_schmidt;

use std::fmt;
use std::ops::Index;

use nalgebra::DMatrix;

use crate::config::Tolerance;
use crate::error::{LinalgError, LinalgResult};
use crate::scalar::{real, ComplexScalar, ScalarDisplay, C64};
use crate::vector::Vector;

/// Rectangular R×C grid of complex scalars, R, C ≥ 1.
#[derive(Debug, Clone)]
pub struct Matrix {
    data: DMatrix<C64>,
    tol: Tolerance,
}

impl Matrix {
    /// Build from complex rows using the global tolerance.
    pub fn from_rows(rows: &[Vec<C64>]) -> LinalgResult<Self> {
        Self::from_rows_with_tolerance(rows, Tolerance::global())
    }

    pub fn from_rows_with_tolerance(rows: &[Vec<C64>], tol: Tolerance) -> LinalgResult<Self> {
        let (nrows, ncols) = validate_rows(rows)?;
        let data = DMatrix::from_fn(nrows, ncols, |i, j| rows[i][j]);
        Ok(Self { data, tol })
    }

    /// Build from real rows; imaginary parts are zero.
    pub fn from_real_rows(rows: &[Vec<f64>]) -> LinalgResult<Self> {
        let (nrows, ncols) = validate_rows(rows)?;
        let data = DMatrix::from_fn(nrows, ncols, |i, j| real(rows[i][j]));
        Ok(Self {
            data,
            tol: Tolerance::global(),
        })
    }

    /// Build from column vectors of equal length.
    pub fn from_columns(columns: &[Vector]) -> LinalgResult<Self> {
        let first = columns.first().ok_or(LinalgError::EmptyInput("matrix"))?;
        let nrows = first.len();
        for (j, column) in columns.iter().enumerate() {
            if column.len() != nrows {
                return Err(LinalgError::RaggedRows {
                    row: j,
                    expected: nrows,
                    got: column.len(),
                });
            }
        }
        let data = DMatrix::from_fn(nrows, columns.len(), |i, j| columns[j].storage()[i]);
        Ok(Self {
            data,
            tol: first.tolerance(),
        })
    }

    pub fn zeros(rows: usize, cols: usize) -> LinalgResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(LinalgError::EmptyInput("matrix"));
        }
        Ok(Self::from_storage(
            DMatrix::zeros(rows, cols),
            Tolerance::global(),
        ))
    }

    /// The n×n identity.
    pub fn identity(n: usize) -> LinalgResult<Self> {
        if n == 0 {
            return Err(LinalgError::EmptyInput("matrix"));
        }
        Ok(Self::from_storage(
            DMatrix::identity(n, n),
            Tolerance::global(),
        ))
    }

    pub(crate) fn from_storage(data: DMatrix<C64>, tol: Tolerance) -> Self {
        debug_assert!(data.nrows() > 0 && data.ncols() > 0);
        Self { data, tol }
    }

    /// Same entries, different tolerance.
    pub fn with_tolerance(mut self, tol: Tolerance) -> Self {
        self.tol = tol;
        self
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.data.shape()
    }

    pub fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tol
    }

    /// Bounds-checked element access.
    pub fn get(&self, row: usize, col: usize) -> LinalgResult<C64> {
        self.data
            .get((row, col))
            .copied()
            .ok_or(LinalgError::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            })
    }

    /// Row `i` as a vector.
    ///
    /// # Panics
    ///
    /// Panics when `i >= self.rows()`, like indexing; use [`Matrix::get`] for
    /// checked access.
    pub fn row(&self, i: usize) -> Vector {
        let entries = self.data.row(i).iter().copied().collect::<Vec<_>>();
        Vector::from_storage(nalgebra::DVector::from_vec(entries), self.tol)
    }

    /// Column `j` as a vector.
    ///
    /// # Panics
    ///
    /// Panics when `j >= self.cols()`.
    pub fn column(&self, j: usize) -> Vector {
        Vector::from_storage(self.data.column(j).clone_owned(), self.tol)
    }

    /// Row-major copy of the entries.
    pub fn to_rows(&self) -> Vec<Vec<C64>> {
        (0..self.rows())
            .map(|i| (0..self.cols()).map(|j| self.data[(i, j)]).collect())
            .collect()
    }

    pub(crate) fn storage(&self) -> &DMatrix<C64> {
        &self.data
    }

    /// Element-wise equality within this matrix's tolerance; a shape
    /// mismatch is simply unequal.
    pub fn equals(&self, other: &Matrix) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| a.approx_eq(*b, self.tol))
    }
}

fn validate_rows<T>(rows: &[Vec<T>]) -> LinalgResult<(usize, usize)> {
    let first = rows.first().ok_or(LinalgError::EmptyInput("matrix"))?;
    let ncols = first.len();
    if ncols == 0 {
        return Err(LinalgError::EmptyInput("matrix row"));
    }
    for (i, row) in rows.iter().enumerate() {
        if row.len() != ncols {
            return Err(LinalgError::RaggedRows {
                row: i,
                expected: ncols,
                got: row.len(),
            });
        }
    }
    Ok((rows.len(), ncols))
}

pub(crate) fn max_modulus(data: &DMatrix<C64>) -> f64 {
    data.iter().map(|z| z.norm()).fold(0.0_f64, f64::max)
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = C64;

    fn index(&self, index: (usize, usize)) -> &C64 {
        &self.data[index]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[")?;
            for j in 0..self.cols() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", ScalarDisplay(self.data[(i, j)]))?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_real_rows_shape_and_entries() {
        let m = Matrix::from_real_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m[(1, 2)], real(6.0));
        assert_eq!(m.get(0, 1).unwrap(), real(2.0));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = Matrix::from_real_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            LinalgError::RaggedRows {
                row: 1,
                expected: 2,
                got: 1
            }
        );
        assert_eq!(
            Matrix::from_real_rows(&[]).unwrap_err(),
            LinalgError::EmptyInput("matrix")
        );
    }

    #[test]
    fn test_get_out_of_bounds() {
        let m = Matrix::identity(2).unwrap();
        assert_eq!(
            m.get(2, 0).unwrap_err(),
            LinalgError::IndexOutOfBounds {
                row: 2,
                col: 0,
                rows: 2,
                cols: 2
            }
        );
    }

    #[test]
    fn test_equality_within_tolerance_and_shape() {
        let a = Matrix::from_real_rows(&[vec![1.0, 2.0]]).unwrap();
        let b = Matrix::from_real_rows(&[vec![1.0 + 1e-12, 2.0]]).unwrap();
        let c = Matrix::from_real_rows(&[vec![1.0], vec![2.0]]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_rows_columns_roundtrip() {
        let m = Matrix::from_real_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(m.row(1), Vector::from_real(&[3.0, 4.0]).unwrap());
        assert_eq!(m.column(1), Vector::from_real(&[2.0, 4.0]).unwrap());
        let rebuilt = Matrix::from_columns(&[m.column(0), m.column(1)]).unwrap();
        assert_eq!(rebuilt, m);
    }

    #[test]
    #[should_panic]
    fn test_row_out_of_range_panics() {
        let m = Matrix::identity(2).unwrap();
        let _ = m.row(2);
    }

    #[test]
    #[should_panic]
    fn test_column_out_of_range_panics() {
        let m = Matrix::identity(2).unwrap();
        let _ = m.column(5);
    }

    #[test]
    fn test_display() {
        let m = Matrix::from_rows(&[
            vec![C64::new(1.0, 0.0), C64::new(1.0, 1.0)],
            vec![C64::new(2.0, -1.0), C64::new(0.0, 3.0)],
        ])
        .unwrap();
        assert_eq!(m.to_string(), "[1, 1+1i]\n[2-1i, 3i]");
    }
}
