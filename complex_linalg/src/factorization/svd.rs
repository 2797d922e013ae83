use nalgebra::DMatrix;

use crate::error::LinalgResult;
use crate::matrix::Matrix;
use crate::scalar::{real, C64};
use crate::square::{eigen, SquareMatrix};

/// Singular values of `A` and the diagonal matrix `Σ`.
///
/// Only `Σ` is produced; the singular vectors are not assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct Svd {
    /// Non-negative, descending, `min(rows, cols)` of them
    pub singular_values: Vec<f64>,
    /// `diag(singular_values)`
    pub sigma: SquareMatrix,
}

impl Svd {
    /// Number of singular values above `epsilon · σ_max`.
    pub fn rank(&self) -> usize {
        let eps = self.sigma.tolerance().epsilon();
        let threshold = eps * self.singular_values.first().copied().unwrap_or(0.0).max(1.0);
        self.singular_values.iter().filter(|&&s| s > threshold).count()
    }

    /// `σ_max / σ_min`, infinite for a rank-deficient matrix.
    pub fn condition_number(&self) -> f64 {
        match (self.singular_values.first(), self.singular_values.last()) {
            (Some(&max), Some(&min)) if min > 0.0 => max / min,
            _ => f64::INFINITY,
        }
    }
}

/// Singular values as the square roots of the eigenvalues of `A*·A`.
pub fn singular_value_decomposition(m: &Matrix) -> LinalgResult<Svd> {
    let tol = m.tolerance();
    let gram = m.storage().adjoint() * m.storage();
    let mut values: Vec<f64> = eigen::eigenvalues(&gram, tol)?
        .into_iter()
        .map(|lambda| lambda.re.max(0.0).sqrt())
        .collect();
    values.sort_by(|a, b| b.total_cmp(a));
    values.truncate(m.rows().min(m.cols()));

    let k = values.len();
    let sigma = DMatrix::<C64>::from_fn(k, k, |i, j| if i == j { real(values[i]) } else { real(0.0) });

    Ok(Svd {
        singular_values: values,
        sigma: SquareMatrix::from_storage(sigma, tol),
    })
}
