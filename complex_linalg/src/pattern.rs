//! Structural predicates and the Hessenberg similarity reduction.
//!
//! Every predicate answers `false` for a non-square matrix and compares
//! entries with the matrix's own tolerance.

use log::trace;
use nalgebra::DMatrix;

use crate::config::Tolerance;
use crate::error::{LinalgError, LinalgResult};
use crate::matrix::Matrix;
use crate::scalar::{ComplexScalar, C64, ZERO};
use crate::square::elimination::pivot_row;

fn all_zero_where(m: &Matrix, below: impl Fn(usize, usize) -> bool) -> bool {
    let tol = m.tolerance();
    m.is_square()
        && (0..m.rows())
            .flat_map(|i| (0..m.cols()).map(move |j| (i, j)))
            .filter(|&(i, j)| below(i, j))
            .all(|(i, j)| m[(i, j)].is_zero_within(tol))
}

pub fn is_upper_triangular(m: &Matrix) -> bool {
    all_zero_where(m, |i, j| i > j)
}

pub fn is_lower_triangular(m: &Matrix) -> bool {
    is_upper_triangular(&m.transpose())
}

pub fn is_diagonal(m: &Matrix) -> bool {
    is_upper_triangular(m) && is_lower_triangular(m)
}

/// Zero below the first sub-diagonal.
pub fn is_upper_hessenberg(m: &Matrix) -> bool {
    all_zero_where(m, |i, j| i > j + 1)
}

/// `A == Aᵗ`
pub fn is_symmetric(m: &Matrix) -> bool {
    m.is_square() && m.equals(&m.transpose())
}

/// `A == -Aᵗ`
pub fn is_anti_symmetric(m: &Matrix) -> bool {
    m.is_square() && m.equals(&m.transpose().scale(C64::new(-1.0, 0.0)))
}

/// `A == A*`
pub fn is_hermitian(m: &Matrix) -> bool {
    m.is_square() && m.equals(&m.conjugate_transpose())
}

/// `A·Aᵗ == I`
pub fn is_orthogonal(m: &Matrix) -> bool {
    m.is_square()
        && m.multiply(&m.transpose())
            .map(|product| is_identity(&product))
            .unwrap_or(false)
}

/// `A·A* == I`
pub fn is_unitary(m: &Matrix) -> bool {
    m.is_square()
        && m.multiply(&m.conjugate_transpose())
            .map(|product| is_identity(&product))
            .unwrap_or(false)
}

pub fn is_identity(m: &Matrix) -> bool {
    let tol = m.tolerance();
    m.is_square()
        && (0..m.rows()).all(|i| {
            (0..m.cols()).all(|j| {
                let expected = if i == j { C64::new(1.0, 0.0) } else { ZERO };
                m[(i, j)].approx_eq(expected, tol)
            })
        })
}

/// Upper Hessenberg matrix similar to `m`.
///
/// Gaussian elimination below the sub-diagonal, column by column: the
/// largest-modulus candidate is swapped onto the sub-diagonal (rows and the
/// matching columns), and each row elimination is paired with the inverse
/// column operation so the eigenvalues are preserved.
pub fn hessenberg(m: &Matrix) -> LinalgResult<Matrix> {
    if !m.is_square() {
        return Err(LinalgError::not_square(m.rows(), m.cols()));
    }
    let mut h = m.storage().clone();
    reduce_to_hessenberg(&mut h, m.tolerance());
    Ok(Matrix::from_storage(h, m.tolerance()))
}

/// In-place Hessenberg reduction of a square buffer.
pub(crate) fn reduce_to_hessenberg(h: &mut DMatrix<C64>, tol: Tolerance) {
    let n = h.nrows();

    for r in 0..n.saturating_sub(2) {
        let sub = r + 1;
        let p = pivot_row(h, r, sub);
        if tol.is_zero(h[(p, r)]) {
            for i in sub + 1..n {
                h[(i, r)] = ZERO;
            }
            continue;
        }
        if p != sub {
            h.swap_rows(p, sub);
            h.swap_columns(p, sub);
        }

        let pivot = h[(sub, r)];
        for i in sub + 1..n {
            let factor = h[(i, r)] / pivot;
            if factor == ZERO {
                continue;
            }
            // row_i -= factor · row_sub
            for j in 0..n {
                let delta = factor * h[(sub, j)];
                h[(i, j)] -= delta;
            }
            // col_sub += factor · col_i
            for k in 0..n {
                let delta = factor * h[(k, i)];
                h[(k, sub)] += delta;
            }
            h[(i, r)] = ZERO;
        }
        trace!("hessenberg column {} reduced with pivot {}", r, pivot);
    }
}
