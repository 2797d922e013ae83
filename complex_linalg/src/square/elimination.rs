//! Gaussian elimination kernels with partial pivoting.
//!
//! All kernels work on a caller-owned buffer and choose, in each column, the
//! candidate of largest modulus. Determinant and inverse treat a pivot as
//! zero only when `|p| < ε`; the rank decisions behind null spaces compare
//! against `ε·max(scale, 1)` with `scale` the largest entry modulus.

use nalgebra::DMatrix;

use crate::config::Tolerance;
use crate::scalar::{C64, ONE, ZERO};

/// Row in `from..` holding the largest-modulus entry of column `col`.
pub(crate) fn pivot_row(a: &DMatrix<C64>, col: usize, from: usize) -> usize {
    let mut best = from;
    let mut best_modulus = a[(from, col)].norm();
    for row in (from + 1)..a.nrows() {
        let modulus = a[(row, col)].norm();
        if modulus > best_modulus {
            best_modulus = modulus;
            best = row;
        }
    }
    best
}

/// Subtract `factor · row[src]` from `row[dst]`, columns `from..`.
fn eliminate_row(a: &mut DMatrix<C64>, dst: usize, src: usize, factor: C64, from: usize) {
    for j in from..a.ncols() {
        let delta = factor * a[(src, j)];
        a[(dst, j)] -= delta;
    }
}

/// Determinant as the signed product of pivots; zero as soon as a pivot
/// column is zero within tolerance.
pub(crate) fn determinant(mut a: DMatrix<C64>, tol: Tolerance) -> C64 {
    let n = a.nrows();
    let mut det = ONE;
    for col in 0..n {
        let p = pivot_row(&a, col, col);
        if tol.is_zero(a[(p, col)]) {
            return ZERO;
        }
        if p != col {
            a.swap_rows(p, col);
            det = -det;
        }
        let pivot = a[(col, col)];
        det *= pivot;
        for row in (col + 1)..n {
            let factor = a[(row, col)] / pivot;
            eliminate_row(&mut a, row, col, factor, col);
        }
    }
    det
}

/// Gauss-Jordan inversion; `None` when a pivot is zero within tolerance.
pub(crate) fn gauss_jordan_inverse(a: &DMatrix<C64>, tol: Tolerance) -> Option<DMatrix<C64>> {
    let n = a.nrows();
    // augmented [A | I]
    let mut aug = DMatrix::from_fn(n, 2 * n, |i, j| {
        if j < n {
            a[(i, j)]
        } else if j - n == i {
            ONE
        } else {
            ZERO
        }
    });

    for col in 0..n {
        let p = pivot_row(&aug, col, col);
        if tol.is_zero(aug[(p, col)]) {
            return None;
        }
        aug.swap_rows(p, col);

        let pivot = aug[(col, col)];
        for j in col..2 * n {
            aug[(col, j)] /= pivot;
        }
        for row in 0..n {
            if row != col {
                let factor = aug[(row, col)];
                eliminate_row(&mut aug, row, col, factor, col);
            }
        }
    }

    Some(DMatrix::from_fn(n, n, |i, j| aug[(i, j + n)]))
}

/// Reduced row echelon form in place. Returns the pivot columns in row order;
/// the remaining columns are free.
pub(crate) fn reduced_row_echelon(a: &mut DMatrix<C64>, tol: Tolerance, scale: f64) -> Vec<usize> {
    let (rows, cols) = a.shape();
    let mut pivots = Vec::new();
    let mut row = 0;
    for col in 0..cols {
        if row == rows {
            break;
        }
        let p = pivot_row(a, col, row);
        if tol.is_negligible(a[(p, col)], scale) {
            for r in row..rows {
                a[(r, col)] = ZERO;
            }
            continue;
        }
        a.swap_rows(p, row);
        let pivot = a[(row, col)];
        for j in col..cols {
            a[(row, j)] /= pivot;
        }
        for r in 0..rows {
            if r != row {
                let factor = a[(r, col)];
                eliminate_row(a, r, row, factor, col);
            }
        }
        pivots.push(col);
        row += 1;
    }
    pivots
}

/// Null-space basis of `a` (not normalized), one vector per free column.
pub(crate) fn null_space(a: &DMatrix<C64>, tol: Tolerance, scale: f64) -> Vec<Vec<C64>> {
    let mut reduced = a.clone();
    let pivots = reduced_row_echelon(&mut reduced, tol, scale);
    let cols = a.ncols();
    (0..cols)
        .filter(|col| !pivots.contains(col))
        .map(|free| {
            let mut x = vec![ZERO; cols];
            x[free] = ONE;
            for (r, &pc) in pivots.iter().enumerate() {
                x[pc] = -reduced[(r, free)];
            }
            x
        })
        .collect()
}

/// Solve `a·x = b` by elimination with partial pivoting. Negligible pivots
/// are nudged to `ε·scale` so a nearly singular system still yields a
/// (large) solution, which is what inverse iteration needs.
pub(crate) fn solve_perturbed(a: &DMatrix<C64>, b: &[C64], tol: Tolerance, scale: f64) -> Vec<C64> {
    let n = b.len();
    let mut aug = DMatrix::from_fn(n, n + 1, |i, j| if j < n { a[(i, j)] } else { b[i] });
    let nudge = C64::new(tol.epsilon() * scale.max(1.0), 0.0);

    for col in 0..n {
        let p = pivot_row(&aug, col, col);
        aug.swap_rows(p, col);
        if tol.is_negligible(aug[(col, col)], scale) {
            aug[(col, col)] += nudge;
        }
        let pivot = aug[(col, col)];
        for row in (col + 1)..n {
            let factor = aug[(row, col)] / pivot;
            eliminate_row(&mut aug, row, col, factor, col);
        }
    }

    let mut x = vec![ZERO; n];
    for i in (0..n).rev() {
        let mut sum = aug[(i, n)];
        for j in (i + 1)..n {
            sum -= aug[(i, j)] * x[j];
        }
        x[i] = sum / aug[(i, i)];
    }
    x
}
