// Integration tests across the numan-solve routines

use approx::assert_abs_diff_eq;
use nalgebra::{DMatrix, DVector};
use numan_core::{IterationConfig, NumanError};
use numan_solve::*;

/// Symmetric positive-definite tridiagonal test matrix.
fn laplacian(n: usize) -> DMatrix<f64> {
    DMatrix::from_fn(n, n, |i, j| match i.abs_diff(j) {
        0 => 4.0,
        1 => -1.0,
        _ => 0.0,
    })
}

#[test]
fn iterative_solvers_agree_with_direct_solve() {
    let a = laplacian(6);
    let b = DVector::from_fn(6, |i, _| i as f64 + 1.0);
    let direct = a.clone().lu().solve(&b).unwrap();

    let config = IterationConfig::new(500, 1e-13);
    for x in [
        jacobi_method(&a, &b, IterationConfig::new(500, 0.0)).unwrap(),
        gauss_seidel_method(&a, &b, IterationConfig::default()).unwrap(),
        conjugate_gradient(&a, &b, config).unwrap(),
        preconditioned_conjugate_gradient(&a, &b, &jacobi_preconditioner(&a), config).unwrap(),
        steepest_descent(&a, &b, config).unwrap(),
    ] {
        assert_abs_diff_eq!((x - &direct).norm(), 0.0, epsilon = 1e-9);
    }
}

#[test]
fn cholesky_reconstructs_the_matrix() {
    let a = laplacian(5);
    let r = cholesky_factorization(&a).unwrap();
    assert_abs_diff_eq!((r.transpose() * &r - &a).norm(), 0.0, epsilon = 1e-12);
    for i in 0..5 {
        for j in 0..i {
            assert_eq!(r[(i, j)], 0.0);
        }
    }
}

#[test]
fn qr_factorizations_reconstruct_the_matrix() {
    let a = DMatrix::from_row_slice(4, 3, &[
        1.0, 2.0, 0.0, //
        0.0, 1.0, 1.0, //
        1.0, 0.0, 1.0, //
        2.0, 1.0, 3.0,
    ]);
    let (q, r) = householder_qr(&a);
    assert_abs_diff_eq!((&q * &r - &a).norm(), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!((q.transpose() * &q - DMatrix::identity(4, 4)).norm(), 0.0, epsilon = 1e-12);

    let (q, r) = gram_schmidt_orthogonalization(&a, false).unwrap();
    assert_abs_diff_eq!((&q * &r - &a).norm(), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!((q.transpose() * &q - DMatrix::identity(3, 3)).norm(), 0.0, epsilon = 1e-12);
}

#[test]
fn dependent_columns_are_singular() {
    let a = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
    assert!(matches!(
        gram_schmidt_orthogonalization(&a, true),
        Err(NumanError::Singular(_))
    ));
}

#[test]
fn root_finders_agree() {
    let f = |x: f64| x.exp() - 3.0;
    let expected = 3f64.ln();
    let bracketing = IterationConfig::bracketing();
    assert_abs_diff_eq!(bisection_method(f, 0.0, 2.0, bracketing).unwrap().unwrap(), expected, epsilon = 1e-7);
    assert_abs_diff_eq!(false_position_method(f, 0.0, 2.0, bracketing).unwrap().unwrap(), expected, epsilon = 1e-7);
    assert_abs_diff_eq!(brent_method(f, 0.0, 2.0, bracketing).unwrap().unwrap(), expected, epsilon = 1e-7);
    assert_abs_diff_eq!(newton_method(f, f64::exp, 1.0, IterationConfig::default()), expected, epsilon = 1e-12);
}

#[test]
fn eigenvalues_of_symmetric_matrix() {
    // eigenvalues (5 +- sqrt 5) / 2
    let a = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]);
    let (largest, _) = power_iteration_method(&a, IterationConfig::eigen()).unwrap();
    let (smallest, _) = inverse_power_iteration_method(&a, 0.0, IterationConfig::eigen()).unwrap();
    let v0 = DVector::from_column_slice(&[1.0, -0.2]);
    let (rayleigh, _) = rayleigh_quotient_iteration_method(&a, v0, IterationConfig::eigen()).unwrap();
    assert_abs_diff_eq!(largest, (5.0 + 5f64.sqrt()) / 2.0, epsilon = 1e-4);
    assert_abs_diff_eq!(smallest, (5.0 - 5f64.sqrt()) / 2.0, epsilon = 1e-4);
    assert_abs_diff_eq!(rayleigh, (5.0 - 5f64.sqrt()) / 2.0, epsilon = 1e-8);
}
