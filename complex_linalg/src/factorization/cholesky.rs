use log::trace;
use nalgebra::DMatrix;

use crate::error::{Absence, Outcome};
use crate::matrix::Matrix;
use crate::pattern;
use crate::scalar::{ComplexScalar, C64, ZERO};
use crate::square::SquareMatrix;

/// `A = LL*`
#[derive(Debug, Clone, PartialEq)]
pub struct Cholesky {
    /// Lower triangular with positive real diagonal
    pub l: SquareMatrix,
}

impl Cholesky {
    /// `L*`
    pub fn l_adjoint(&self) -> SquareMatrix {
        SquareMatrix::from_storage(self.l.storage().adjoint(), self.l.tolerance())
    }

    pub fn reconstruct(&self) -> SquareMatrix {
        let l = self.l.storage();
        SquareMatrix::from_storage(l * l.adjoint(), self.l.tolerance())
    }

    /// `det(A) = Π L[i][i]²`
    pub fn determinant(&self) -> C64 {
        (0..self.l.size())
            .map(|i| self.l[(i, i)] * self.l[(i, i)])
            .product()
    }
}

/// Cholesky decomposition of a Hermitian positive-definite matrix.
///
/// `Absent(NotHermitian)` for anything that is not Hermitian (rectangular
/// input included); `Absent(NotPositiveDefinite)` when a diagonal radicand
/// `A[j][j] - Σ|L[j][k]|²` has real part at or below ε.
pub fn cholesky_decompose(m: &Matrix) -> Outcome<Cholesky> {
    if !pattern::is_hermitian(m) {
        return Outcome::Absent(Absence::NotHermitian);
    }
    let a = m.storage();
    let tol = m.tolerance();
    let n = a.nrows();
    let mut l = DMatrix::<C64>::zeros(n, n);

    for j in 0..n {
        let radicand = (0..j).fold(a[(j, j)], |acc, k| acc - l[(j, k)].norm_sqr());
        if radicand.re <= tol.epsilon() {
            trace!("cholesky radicand {} at {} is not positive", radicand, j);
            return Outcome::Absent(Absence::NotPositiveDefinite { index: j });
        }
        let diagonal = radicand.principal_sqrt();
        l[(j, j)] = diagonal;

        for i in (j + 1)..n {
            let partial = (0..j).fold(ZERO, |acc, k| acc + l[(i, k)] * l[(j, k)].conj());
            l[(i, j)] = (a[(i, j)] - partial) / diagonal;
        }
    }

    Outcome::Found(Cholesky {
        l: SquareMatrix::from_storage(l, tol),
    })
}
