//! Fixed-length complex vectors.

use std::fmt;

use nalgebra::{DMatrix, DVector};

use crate::config::Tolerance;
use crate::error::{Absence, LinalgError, LinalgResult, Outcome};
use crate::scalar::{real, ComplexScalar, ScalarDisplay, C64, ONE, ZERO};
use crate::square::SquareMatrix;

/// Ordered sequence of N ≥ 1 complex scalars.
///
/// The length is fixed at construction. Equality is element-wise within the
/// left operand's tolerance.
#[derive(Debug, Clone)]
pub struct Vector {
    data: DVector<C64>,
    tol: Tolerance,
}

impl Vector {
    pub fn new(entries: Vec<C64>) -> LinalgResult<Self> {
        Self::with_tolerance(entries, Tolerance::global())
    }

    pub fn with_tolerance(entries: Vec<C64>, tol: Tolerance) -> LinalgResult<Self> {
        if entries.is_empty() {
            return Err(LinalgError::EmptyInput("vector"));
        }
        Ok(Self {
            data: DVector::from_vec(entries),
            tol,
        })
    }

    pub fn from_real(entries: &[f64]) -> LinalgResult<Self> {
        Self::new(entries.iter().copied().map(real).collect())
    }

    pub(crate) fn from_storage(data: DVector<C64>, tol: Tolerance) -> Self {
        debug_assert!(!data.is_empty());
        Self { data, tol }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: vectors hold at least one entry
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<C64> {
        self.data.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &C64> {
        self.data.iter()
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tol
    }

    pub fn to_vec(&self) -> Vec<C64> {
        self.data.iter().copied().collect()
    }

    pub(crate) fn storage(&self) -> &DVector<C64> {
        &self.data
    }

    fn check_len(&self, other: &Vector, operation: &'static str) -> LinalgResult<()> {
        if self.len() != other.len() {
            return Err(LinalgError::dimension_mismatch(
                operation,
                &[self.len()],
                &[other.len()],
            ));
        }
        Ok(())
    }

    /// Inner product `Σ self_i · conj(other_i)`.
    pub fn dot(&self, other: &Vector) -> LinalgResult<C64> {
        self.check_len(other, "dot")?;
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .fold(ZERO, |acc, (a, b)| acc + a * b.conj()))
    }

    /// Euclidean norm `sqrt(v·v)`.
    pub fn norm(&self) -> f64 {
        self.data.iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt()
    }

    pub fn scale(&self, factor: C64) -> Vector {
        Self::from_storage(self.data.map(|z| z * factor), self.tol)
    }

    pub fn add(&self, other: &Vector) -> LinalgResult<Vector> {
        self.check_len(other, "add")?;
        Ok(Self::from_storage(&self.data + &other.data, self.tol))
    }

    /// Projection of `self` onto `other`: `(self·other / other·other) · other`.
    pub fn proj(&self, other: &Vector) -> LinalgResult<Outcome<Vector>> {
        let numerator = self.dot(other)?;
        let denominator = other.dot(other)?;
        Ok(match numerator.checked_div(denominator, self.tol) {
            Ok(coefficient) => Outcome::Found(other.scale(coefficient).with_tol(self.tol)),
            Err(_) => Outcome::Absent(Absence::ZeroVector),
        })
    }

    /// Unit vector in the direction of `self`.
    pub fn normalize(&self) -> Outcome<Vector> {
        let norm = self.norm();
        if self.tol.is_negligible_norm(norm, 0.0) {
            return Outcome::Absent(Absence::ZeroVector);
        }
        Outcome::Found(Self::from_storage(self.data.map(|z| z / norm), self.tol))
    }

    /// A unitary matrix whose first column is `self / |self|`.
    ///
    /// Built as `H·D` where `H = I - 2ww*/(w*w)` is the complex Householder
    /// reflector sending the unit vector `x` to `α·e₁` (`α = -x₀/|x₀|`) and
    /// `D = diag(α, 1, …, 1)`.
    pub fn unitary_completion(&self) -> Outcome<SquareMatrix> {
        let unit = match self.normalize() {
            Outcome::Found(unit) => unit,
            Outcome::Absent(reason) => return Outcome::Absent(reason),
        };
        let x = &unit.data;
        let n = x.len();
        let head = x[0];
        let phase = if head.norm() == 0.0 {
            ONE
        } else {
            head / head.norm()
        };
        let alpha = -phase;

        let mut w = x.clone();
        w[0] -= alpha;
        // |w₀| = |x₀| + 1, so w*w ≥ 1
        let w_norm_sqr: f64 = w.iter().map(|z| z.norm_sqr()).sum();

        let reflector = DMatrix::from_fn(n, n, |i, j| {
            let identity = if i == j { ONE } else { ZERO };
            identity - w[i] * w[j].conj() * (2.0 / w_norm_sqr)
        });
        let unitary = DMatrix::from_fn(n, n, |i, j| {
            if j == 0 {
                reflector[(i, 0)] * alpha
            } else {
                reflector[(i, j)]
            }
        });
        Outcome::Found(SquareMatrix::from_storage(unitary, self.tol))
    }

    fn with_tol(mut self, tol: Tolerance) -> Self {
        self.tol = tol;
        self
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| a.approx_eq(*b, self.tol))
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, z) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", ScalarDisplay(*z))?;
        }
        write!(f, ")")
    }
}
