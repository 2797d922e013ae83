//! Eigenvalues and eigenvectors.

mod common;

use common::{assert_close, assert_eigenpair, c, complex_square, sorted, square};
use complex_linalg::prelude::*;

#[test]
fn test_eigenvalues_complex_2x2() {
    let m = complex_square(&[&[c(0.0, 1.0), c(2.0, 0.0)], &[c(1.0, 0.0), c(1.0, 1.0)]]);
    let values = m.eigenvalues().unwrap();
    assert_eq!(values.len(), 2);
    assert_close(values[0], c(2.0, 1.0), 1e-12);
    assert_close(values[1], c(-1.0, 1.0), 1e-12);
}

#[test]
fn test_eigenvalues_with_defective_repeated_value() {
    // eigenvalues 3, 2, 2 with a single eigenvector for 2
    let m = square(&[&[3.0, 0.0, 0.0], &[1.0, 3.0, 1.0], &[2.0, -1.0, 1.0]]);
    let values = m.eigenvalues().unwrap();
    let sum: C64 = values.iter().sum();
    let product: C64 = values.iter().product();
    assert_close(sum, m.trace(), 1e-9);
    assert_close(product, m.determinant(), 1e-6);
    assert!(values.iter().any(|v| (v - c(3.0, 0.0)).norm() < 1e-6));
    assert_eq!(
        values.iter().filter(|v| (*v - c(2.0, 0.0)).norm() < 1e-6).count(),
        2
    );
}

#[test]
fn test_eigenvalues_circulant_4x4() {
    let m = square(&[
        &[1.0, 2.0, 3.0, 4.0],
        &[4.0, 1.0, 2.0, 3.0],
        &[3.0, 4.0, 1.0, 2.0],
        &[2.0, 3.0, 4.0, 1.0],
    ]);
    let values = sorted(m.eigenvalues().unwrap());
    let expected = [c(-2.0, -2.0), c(-2.0, 0.0), c(-2.0, 2.0), c(10.0, 0.0)];
    for (actual, expected) in values.into_iter().zip(expected) {
        assert_close(actual, expected, 1e-8);
    }
}

#[test]
fn test_eigenvalues_of_triangular_are_its_diagonal() {
    let m = complex_square(&[
        &[c(1.0, 1.0), c(5.0, 0.0), c(0.0, 2.0)],
        &[c(0.0, 0.0), c(-2.0, 0.0), c(3.0, 3.0)],
        &[c(0.0, 0.0), c(0.0, 0.0), c(0.0, -4.0)],
    ]);
    let values = sorted(m.eigenvalues().unwrap());
    assert_close(values[0], c(-2.0, 0.0), 1e-12);
    assert_close(values[1], c(0.0, -4.0), 1e-12);
    assert_close(values[2], c(1.0, 1.0), 1e-12);
}

#[test]
fn test_eigenpairs_satisfy_definition() {
    let matrices = [
        complex_square(&[&[c(0.0, 1.0), c(2.0, 0.0)], &[c(1.0, 0.0), c(1.0, 1.0)]]),
        square(&[&[2.0, -1.0, 0.0], &[-1.0, 2.0, -1.0], &[0.0, -1.0, 2.0]]),
        square(&[&[1.0, 2.0, 0.0], &[0.0, 3.0, 1.0], &[1.0, 0.0, 2.0]]),
    ];
    for m in &matrices {
        for (lambda, v) in m.eigenpairs().unwrap() {
            assert!((v.norm() - 1.0).abs() < 1e-9);
            assert_eigenpair(m, lambda, &v);
        }
    }
}

#[test]
fn test_eigenvectors_of_defective_matrix() {
    let m = square(&[&[3.0, 0.0, 0.0], &[1.0, 3.0, 1.0], &[2.0, -1.0, 1.0]]);
    let values = m.eigenvalues().unwrap();
    for (lambda, v) in values.iter().zip(m.eigenvectors(&values)) {
        let column = Matrix::from_columns(&[v.clone()]).unwrap();
        let av = m.multiply(&column).unwrap().column(0);
        let residual = av.add(&v.scale(-lambda)).unwrap();
        assert!(residual.norm() < 1e-6, "residual {} for {}", residual.norm(), lambda);
    }
}

#[test]
fn test_eigenspace_dimension() {
    let m = square(&[&[2.0, 1.0, 0.0], &[0.0, 2.0, 0.0], &[0.0, 0.0, 2.0]]);
    // geometric multiplicity 2, algebraic 3
    let basis = m.eigenspace(c(2.0, 0.0));
    assert_eq!(basis.len(), 2);
    for v in &basis {
        assert_eigenpair(&m, c(2.0, 0.0), v);
    }
}

#[test]
fn test_no_convergence_with_tiny_sweep_budget() {
    let tol = Tolerance::new(1e-300, 1).unwrap();
    let m = square(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &[7.0, 8.0, 10.0]]).with_tolerance(tol);
    let err = m.eigenvalues().unwrap_err();
    assert_eq!(
        err,
        LinalgError::NoConvergence { size: 3, sweeps: 1 }
    );
}
