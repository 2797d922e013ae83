use nalgebra::DMatrix;

use crate::error::{Absence, Outcome};
use crate::scalar::{C64, ZERO};

use super::Matrix;

impl Matrix {
    /// Column-wise Gram-Schmidt: an isometry with orthonormal columns spanning
    /// the columns of `self`.
    ///
    /// Column `k` has its component along each already-orthonormalized column
    /// `0..k` removed (against the running residual, i.e. the modified
    /// variant) and is then divided by its norm. When that norm is negligible
    /// relative to the original column the input is rank deficient and the
    /// result is `Absent(DependentColumns { column: k })`; a matrix with more
    /// columns than rows always ends that way.
    pub fn orthonormalize(&self) -> Outcome<Matrix> {
        let (rows, cols) = self.shape();
        let mut q = DMatrix::<C64>::zeros(rows, cols);

        for k in 0..cols {
            let mut residual = self.data.column(k).clone_owned();
            let original_norm = column_norm(residual.iter());

            for prev in 0..k {
                // ⟨residual, q_prev⟩ = Σ r_i · conj(q_i)
                let coefficient = (0..rows).fold(ZERO, |acc, i| {
                    acc + residual[i] * q[(i, prev)].conj()
                });
                for i in 0..rows {
                    residual[i] -= coefficient * q[(i, prev)];
                }
            }

            let norm = column_norm(residual.iter());
            if self.tol.is_negligible_norm(norm, original_norm) {
                return Outcome::Absent(Absence::DependentColumns { column: k });
            }
            for i in 0..rows {
                q[(i, k)] = residual[i] / norm;
            }
        }

        Outcome::Found(Matrix::from_storage(q, self.tol))
    }
}

fn column_norm<'a>(entries: impl Iterator<Item = &'a C64>) -> f64 {
    entries.map(|z| z.norm_sqr()).sum::<f64>().sqrt()
}
