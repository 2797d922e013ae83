//! Shared helpers for integration tests
#![allow(dead_code)]

use complex_linalg::prelude::*;

pub fn c(re: f64, im: f64) -> C64 {
    C64::new(re, im)
}

pub fn square(rows: &[&[f64]]) -> SquareMatrix {
    let rows: Vec<Vec<f64>> = rows.iter().map(|row| row.to_vec()).collect();
    SquareMatrix::from_real_rows(&rows).unwrap()
}

pub fn complex_square(rows: &[&[C64]]) -> SquareMatrix {
    let rows: Vec<Vec<C64>> = rows.iter().map(|row| row.to_vec()).collect();
    SquareMatrix::from_rows(&rows).unwrap()
}

/// `|actual - expected| < eps`, with both values in the failure message.
pub fn assert_close(actual: C64, expected: C64, eps: f64) {
    assert!(
        (actual - expected).norm() < eps,
        "expected {}, got {} (eps = {:e})",
        expected,
        actual,
        eps
    );
}

/// `A·v == λ·v` within the matrix tolerance.
pub fn assert_eigenpair(m: &SquareMatrix, lambda: C64, v: &Vector) {
    let column = Matrix::from_columns(&[v.clone()]).unwrap();
    let av = m.multiply(&column).unwrap().column(0);
    assert_eq!(av, v.scale(lambda), "A·v != {}·v", lambda);
}

pub fn sorted(mut values: Vec<C64>) -> Vec<C64> {
    values.sort_by(|a, b| a.re.total_cmp(&b.re).then(a.im.total_cmp(&b.im)));
    values
}
