//! Complex scalar arithmetic.
//!
//! Entries are `nalgebra::Complex<f64>` values; this module adds the
//! tolerance-aware operations the engine relies on.

use std::fmt;

use crate::config::Tolerance;
use crate::error::{LinalgError, LinalgResult};

/// Complex scalar used by every container in the crate.
pub type C64 = nalgebra::Complex<f64>;

pub(crate) const ZERO: C64 = C64::new(0.0, 0.0);
pub(crate) const ONE: C64 = C64::new(1.0, 0.0);

/// Tolerance-aware operations on [`C64`].
pub trait ComplexScalar: Copy {
    /// Principal square root: non-negative real part, and non-negative
    /// imaginary part when the real part is zero.
    fn principal_sqrt(self) -> Self;

    /// Division that fails when the divisor's modulus is below `tol`.
    fn checked_div(self, divisor: Self, tol: Tolerance) -> LinalgResult<Self>;

    /// `|z| < ε`
    fn is_zero_within(self, tol: Tolerance) -> bool;

    /// Component-wise equality within `tol`.
    fn approx_eq(self, other: Self, tol: Tolerance) -> bool;
}

impl ComplexScalar for C64 {
    fn principal_sqrt(self) -> Self {
        let modulus = self.norm();
        let re = ((modulus + self.re) / 2.0).max(0.0).sqrt();
        let im = ((modulus - self.re) / 2.0).max(0.0).sqrt();
        // a signed zero imaginary part must not flip the branch
        if self.im < 0.0 {
            C64::new(re, -im)
        } else {
            C64::new(re, im)
        }
    }

    fn checked_div(self, divisor: Self, tol: Tolerance) -> LinalgResult<Self> {
        let modulus = divisor.norm();
        if modulus < tol.epsilon() {
            return Err(LinalgError::DivisionByZero { modulus });
        }
        Ok(self / divisor)
    }

    fn is_zero_within(self, tol: Tolerance) -> bool {
        tol.is_zero(self)
    }

    fn approx_eq(self, other: Self, tol: Tolerance) -> bool {
        tol.approx_eq(self, other)
    }
}

/// Lift a real number.
#[inline]
pub fn real(re: f64) -> C64 {
    C64::new(re, 0.0)
}

/// Display wrapper: `3`, `2i`, `1+2i`, `1-2i`.
#[derive(Debug, Clone, Copy)]
pub struct ScalarDisplay(pub C64);

impl fmt::Display for ScalarDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ScalarDisplay(z) = *self;
        if z.im == 0.0 {
            write!(f, "{}", z.re + 0.0)
        } else if z.re == 0.0 {
            write!(f, "{}i", z.im)
        } else if z.im < 0.0 {
            write!(f, "{}-{}i", z.re, -z.im)
        } else {
            write!(f, "{}+{}i", z.re, z.im)
        }
    }
}

pub fn format_scalar(z: C64) -> String {
    ScalarDisplay(z).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: C64, expected: C64) {
        assert!(
            (actual - expected).norm() < 1e-12,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    // ── principal_sqrt ────────────────────────────────────────────────────────

    #[test]
    fn test_sqrt_of_positive_real() {
        assert_close(real(9.0).principal_sqrt(), real(3.0));
    }

    #[test]
    fn test_sqrt_of_negative_real_has_positive_imaginary() {
        // -4 -> 2i, also for a negative-zero imaginary part
        assert_close(real(-4.0).principal_sqrt(), C64::new(0.0, 2.0));
        assert_close(C64::new(-4.0, -0.0).principal_sqrt(), C64::new(0.0, 2.0));
    }

    #[test]
    fn test_sqrt_of_complex_squares_back() {
        for z in [C64::new(3.0, 4.0), C64::new(-5.0, -12.0), C64::new(0.0, 2.0)] {
            let root = z.principal_sqrt();
            assert!(root.re >= 0.0);
            assert_close(root * root, z);
        }
        // sqrt(3 + 4i) = 2 + i
        assert_close(C64::new(3.0, 4.0).principal_sqrt(), C64::new(2.0, 1.0));
    }

    // ── checked_div ──────────────────────────────────────────────────────────

    #[test]
    fn test_checked_div_standard() {
        // (1 + 2i) / (3 + 4i) = (11 + 2i) / 25
        let tol = Tolerance::default();
        let q = C64::new(1.0, 2.0).checked_div(C64::new(3.0, 4.0), tol).unwrap();
        assert_close(q, C64::new(11.0 / 25.0, 2.0 / 25.0));
    }

    #[test]
    fn test_checked_div_by_near_zero_fails() {
        let tol = Tolerance::default();
        let err = real(1.0).checked_div(C64::new(1e-12, 0.0), tol).unwrap_err();
        assert!(matches!(err, LinalgError::DivisionByZero { .. }));
    }

    // ── equality and zero tests ──────────────────────────────────────────────

    #[test]
    fn test_is_zero_within_and_approx_eq() {
        let tol = Tolerance::default();
        assert!(C64::new(1e-11, 1e-11).is_zero_within(tol));
        assert!(C64::new(2.0, -1.0).approx_eq(C64::new(2.0 + 1e-11, -1.0), tol));
        assert!(!C64::new(2.0, -1.0).approx_eq(C64::new(2.0, 1.0), tol));
    }

    // ── display ──────────────────────────────────────────────────────────────

    #[test]
    fn test_format_scalar() {
        assert_eq!(format_scalar(real(37.0)), "37");
        assert_eq!(format_scalar(C64::new(-0.0, 0.0)), "0");
        assert_eq!(format_scalar(C64::new(0.0, 2.0)), "2i");
        assert_eq!(format_scalar(C64::new(1.0, 2.0)), "1+2i");
        assert_eq!(format_scalar(C64::new(1.5, -0.5)), "1.5-0.5i");
    }
}
