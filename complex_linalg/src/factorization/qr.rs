use crate::error::Outcome;
use crate::matrix::Matrix;

/// `A = QR`
#[derive(Debug, Clone, PartialEq)]
pub struct Qr {
    /// Orthonormal columns spanning the columns of `A`
    pub q: Matrix,
    /// `Q*·A`, upper triangular
    pub r: Matrix,
}

impl Qr {
    pub fn reconstruct(&self) -> Matrix {
        Matrix::from_storage(self.q.storage() * self.r.storage(), self.q.tolerance())
    }
}

/// QR decomposition by Gram-Schmidt orthonormalization of the columns.
///
/// Linearly dependent columns (including any matrix wider than it is tall)
/// give `Absent(DependentColumns)`.
pub fn qr_decompose(m: &Matrix) -> Outcome<Qr> {
    m.orthonormalize().map(|q| {
        let r = Matrix::from_storage(q.storage().adjoint() * m.storage(), m.tolerance());
        Qr { q, r }
    })
}
