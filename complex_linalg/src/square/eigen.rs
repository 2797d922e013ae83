//! Eigen-solver.
//!
//! Eigenvalues: the matrix is first reduced to upper Hessenberg form (see
//! [`pattern::hessenberg`](crate::pattern::hessenberg)); complex single-shift
//! QR sweeps then run on an active window `[lo, hi)` of that one working
//! buffer. Whenever a sub-diagonal entry becomes negligible the window
//! splits; trailing 1×1 and 2×2 windows are solved directly and removed, so
//! the problem shrinks until no window is left.
//!
//! Eigenvectors: null space of `A - λI` by reduced row echelon form, with
//! inverse iteration as the fallback when `λ` is only approximate enough that
//! elimination finds no free column.

use log::{debug, trace, warn};
use nalgebra::DMatrix;

use crate::config::Tolerance;
use crate::error::{LinalgError, LinalgResult};
use crate::matrix::max_modulus;
use crate::pattern::reduce_to_hessenberg;
use crate::scalar::{ComplexScalar, C64, ONE, ZERO};

use super::elimination::{null_space, solve_perturbed};

const EXCEPTIONAL_SHIFT_PERIOD: usize = 10;
const EXCEPTIONAL_SHIFT_FACTOR: f64 = 0.75;
const INVERSE_ITERATION_LIMIT: usize = 20;

/// All eigenvalues, in the diagonal position at which each one deflated.
pub(crate) fn eigenvalues(a: &DMatrix<C64>, tol: Tolerance) -> LinalgResult<Vec<C64>> {
    let n = a.nrows();
    let mut h = a.clone();
    reduce_to_hessenberg(&mut h, tol);

    let mut values = vec![ZERO; n];
    let mut hi = n;
    let mut sweeps = 0;

    while hi > 0 {
        let lo = window_start(&mut h, hi, tol);
        match hi - lo {
            1 => {
                values[lo] = h[(lo, lo)];
                trace!("deflated 1x1 at {}: {}", lo, values[lo]);
                hi -= 1;
                sweeps = 0;
            }
            2 => {
                let (first, second) = solve_2x2(
                    h[(lo, lo)],
                    h[(lo, lo + 1)],
                    h[(lo + 1, lo)],
                    h[(lo + 1, lo + 1)],
                );
                values[lo] = first;
                values[lo + 1] = second;
                trace!("deflated 2x2 at {}: {}, {}", lo, first, second);
                hi -= 2;
                sweeps = 0;
            }
            size => {
                if sweeps >= tol.max_sweeps() {
                    return Err(LinalgError::NoConvergence {
                        size,
                        sweeps: tol.max_sweeps(),
                    });
                }
                sweeps += 1;
                let shift = if sweeps % EXCEPTIONAL_SHIFT_PERIOD == 0 {
                    exceptional_shift(&h, hi)
                } else {
                    wilkinson_shift(&h, hi)
                };
                qr_sweep(&mut h, lo, hi, shift);
            }
        }
    }

    debug!("eigenvalues of {}x{} matrix: {:?}", n, n, values);
    Ok(values)
}

/// Start of the unreduced window ending at `hi`. Negligible sub-diagonal
/// entries found on the way are set to zero.
fn window_start(h: &mut DMatrix<C64>, hi: usize, tol: Tolerance) -> usize {
    for k in (1..hi).rev() {
        let scale = h[(k, k)].norm() + h[(k - 1, k - 1)].norm();
        if tol.is_negligible(h[(k, k - 1)], scale) {
            h[(k, k - 1)] = ZERO;
            return k;
        }
    }
    0
}

/// Roots of `λ² - (a+d)λ + (ad - bc)` for the block `[[a, b], [c, d]]`.
pub(crate) fn solve_2x2(a: C64, b: C64, c: C64, d: C64) -> (C64, C64) {
    let mean = (a + d) * 0.5;
    let half_gap = (a - d) * 0.5;
    let root = (half_gap * half_gap + b * c).principal_sqrt();
    (mean + root, mean - root)
}

/// Eigenvalue of the trailing 2×2 block closest to its last diagonal entry.
fn wilkinson_shift(h: &DMatrix<C64>, hi: usize) -> C64 {
    let last = h[(hi - 1, hi - 1)];
    let (first, second) = solve_2x2(
        h[(hi - 2, hi - 2)],
        h[(hi - 2, hi - 1)],
        h[(hi - 1, hi - 2)],
        last,
    );
    if (first - last).norm() <= (second - last).norm() {
        first
    } else {
        second
    }
}

fn exceptional_shift(h: &DMatrix<C64>, hi: usize) -> C64 {
    let last = h[(hi - 1, hi - 1)];
    last + C64::new(EXCEPTIONAL_SHIFT_FACTOR * h[(hi - 1, hi - 2)].norm(), 0.0)
}

/// One explicit shifted QR step `H - μI = QR`, `H ← RQ + μI` on the window
/// `[lo, hi)`, with `Q` a product of complex Givens rotations. The window is
/// decoupled from the rest, so only its rows and columns are touched.
fn qr_sweep(h: &mut DMatrix<C64>, lo: usize, hi: usize, shift: C64) {
    for k in lo..hi {
        h[(k, k)] -= shift;
    }

    let mut rotations = Vec::with_capacity(hi - lo - 1);
    for k in lo..(hi - 1) {
        let (c, s) = givens(h[(k, k)], h[(k + 1, k)]);
        // rows k, k+1 ← [[c̄, s̄], [-s, c]] · rows
        for j in k..hi {
            let (u, v) = (h[(k, j)], h[(k + 1, j)]);
            h[(k, j)] = c.conj() * u + s.conj() * v;
            h[(k + 1, j)] = c * v - s * u;
        }
        rotations.push((c, s));
    }

    for (offset, (c, s)) in rotations.into_iter().enumerate() {
        let k = lo + offset;
        // columns k, k+1 ← columns · [[c, -s̄], [s, c̄]]
        for i in lo..(k + 2).min(hi) {
            let (u, v) = (h[(i, k)], h[(i, k + 1)]);
            h[(i, k)] = u * c + v * s;
            h[(i, k + 1)] = v * c.conj() - u * s.conj();
        }
    }

    for k in lo..hi {
        h[(k, k)] += shift;
    }
}

/// `(c, s)` with `[[c̄, s̄], [-s, c]] · [x; y] = [r; 0]`.
fn givens(x: C64, y: C64) -> (C64, C64) {
    let r = (x.norm_sqr() + y.norm_sqr()).sqrt();
    if r == 0.0 {
        return (ONE, ZERO);
    }
    (x / r, y / r)
}

/// Null-space basis of `A - λI`, each vector normalized.
pub(crate) fn eigenspace(a: &DMatrix<C64>, lambda: C64, tol: Tolerance) -> Vec<Vec<C64>> {
    let shifted = shift_diagonal(a, lambda);
    let scale = max_modulus(a).max(lambda.norm());
    null_space(&shifted, tol, scale)
        .into_iter()
        .map(normalized)
        .collect()
}

/// One unit eigenvector for `lambda`.
pub(crate) fn eigenvector(a: &DMatrix<C64>, lambda: C64, tol: Tolerance) -> Vec<C64> {
    if let Some(v) = eigenspace(a, lambda, tol).into_iter().next() {
        return v;
    }
    warn!(
        "no exact null space for eigenvalue {}, falling back to inverse iteration",
        lambda
    );
    inverse_iteration(a, lambda, tol)
}

/// Repeatedly solve `(A - λI)w = v` and normalize.
fn inverse_iteration(a: &DMatrix<C64>, lambda: C64, tol: Tolerance) -> Vec<C64> {
    let n = a.nrows();
    let shifted = shift_diagonal(a, lambda);
    let scale = max_modulus(a).max(lambda.norm());
    let mut v = normalized(vec![ONE; n]);

    for _ in 0..INVERSE_ITERATION_LIMIT {
        let w = solve_perturbed(&shifted, &v, tol, scale);
        let w_norm = norm(&w);
        if !w_norm.is_finite() || tol.is_negligible_norm(w_norm, 0.0) {
            break;
        }
        v = w.into_iter().map(|z| z / w_norm).collect();
    }
    v
}

fn shift_diagonal(a: &DMatrix<C64>, lambda: C64) -> DMatrix<C64> {
    let mut shifted = a.clone();
    for i in 0..a.nrows() {
        shifted[(i, i)] -= lambda;
    }
    shifted
}

fn norm(v: &[C64]) -> f64 {
    v.iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt()
}

fn normalized(v: Vec<C64>) -> Vec<C64> {
    let n = norm(&v);
    v.into_iter().map(|z| z / n).collect()
}
