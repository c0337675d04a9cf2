//! Conjugate gradient and steepest descent for symmetric definite systems.
//!
//! All solvers start from the all-ones vector and stop after
//! `config.max_steps` steps, when the residual norm drops to
//! `config.tolerance`, or when the residual becomes exactly zero.

use nalgebra::{DMatrix, DVector};
use numan_core::config::IterationConfig;
use numan_core::error::{NumanError, Result};

use crate::system::{check_square, check_system};

fn check_symmetric(a: &DMatrix<f64>, what: &str) -> Result<()> {
    check_square(a, what)?;
    if a != &a.transpose() {
        return Err(NumanError::InvalidInput(format!(
            "{} needs a symmetric matrix",
            what
        )));
    }
    Ok(())
}

fn converged(delta: f64, config: IterationConfig) -> bool {
    delta == 0.0 || delta.sqrt() <= config.tolerance
}

pub fn conjugate_gradient(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    config: IterationConfig,
) -> Result<DVector<f64>> {
    check_system(a, b, "conjugate gradient")?;
    check_symmetric(a, "conjugate gradient")?;

    let mut x = DVector::from_element(b.len(), 1.0);
    let mut r = b - a * &x;
    let mut d = r.clone();
    let mut delta = r.dot(&r);
    for _ in 0..config.max_steps {
        if converged(delta, config) {
            break;
        }
        let q = a * &d;
        let curvature = d.dot(&q);
        if curvature == 0.0 {
            break;
        }
        let alpha = delta / curvature;
        let next = &x + &d * alpha;
        if next == x {
            break;
        }
        x = next;
        r -= &q * alpha;
        let old_delta = delta;
        delta = r.dot(&r);
        d = &r + &d * (delta / old_delta);
    }
    Ok(x)
}

/// Diagonal preconditioner `M = diag(A)`.
pub fn jacobi_preconditioner(a: &DMatrix<f64>) -> DMatrix<f64> {
    DMatrix::from_diagonal(&a.diagonal())
}

/// Conjugate gradient on `M^-1 A x = M^-1 b` for a symmetric positive-definite
/// preconditioner `m`.
pub fn preconditioned_conjugate_gradient(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    m: &DMatrix<f64>,
    config: IterationConfig,
) -> Result<DVector<f64>> {
    check_system(a, b, "preconditioned conjugate gradient")?;
    check_symmetric(a, "preconditioned conjugate gradient")?;
    check_system(m, b, "preconditioner")?;
    let m_lu = m.clone().lu();
    let precondition = |r: &DVector<f64>| {
        m_lu.solve(r)
            .ok_or_else(|| NumanError::Singular("preconditioner is singular".into()))
    };

    let mut x = DVector::from_element(b.len(), 1.0);
    let mut r = b - a * &x;
    let mut z = precondition(&r)?;
    let mut d = z.clone();
    let mut delta = r.dot(&z);
    for _ in 0..config.max_steps {
        if converged(r.dot(&r), config) {
            break;
        }
        let q = a * &d;
        let curvature = d.dot(&q);
        if curvature == 0.0 {
            break;
        }
        let alpha = delta / curvature;
        x += &d * alpha;
        r -= &q * alpha;
        z = precondition(&r)?;
        let old_delta = delta;
        delta = r.dot(&z);
        d = &z + &d * (delta / old_delta);
    }
    Ok(x)
}

pub fn steepest_descent(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    config: IterationConfig,
) -> Result<DVector<f64>> {
    check_system(a, b, "steepest descent")?;
    Ok(steepest_descent_general(|v| a * v, b, config))
}

/// Steepest descent with the matrix given only through its action
/// `v -> A v`. Every 50th step the residual is recomputed from scratch to
/// shed accumulated round-off.
pub fn steepest_descent_general(
    apply: impl Fn(&DVector<f64>) -> DVector<f64>,
    b: &DVector<f64>,
    config: IterationConfig,
) -> DVector<f64> {
    let mut x = DVector::from_element(b.len(), 1.0);
    let mut r = b - apply(&x);
    let mut delta = r.dot(&r);
    for i in 0..config.max_steps {
        if converged(delta, config) {
            break;
        }
        let q = apply(&r);
        let alpha = delta / r.dot(&q);
        x += &r * alpha;
        r = if i % 50 == 0 {
            b - apply(&x)
        } else {
            &r - &q * alpha
        };
        delta = r.dot(&r);
    }
    x
}
