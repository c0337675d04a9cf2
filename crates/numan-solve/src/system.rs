//! Stationary iterative solvers, factorizations, and Broyden's methods for
//! nonlinear systems.

use nalgebra::{DMatrix, DVector};
use numan_core::config::IterationConfig;
use numan_core::error::{NumanError, Result};

use crate::iterative::{fixed_point_iteration, try_fixed_point_iteration};

pub(crate) fn check_square(a: &DMatrix<f64>, what: &str) -> Result<()> {
    if !a.is_square() {
        return Err(NumanError::InvalidInput(format!(
            "{} needs a square matrix, got {}x{}",
            what,
            a.nrows(),
            a.ncols()
        )));
    }
    Ok(())
}

pub(crate) fn check_system(a: &DMatrix<f64>, b: &DVector<f64>, what: &str) -> Result<()> {
    check_square(a, what)?;
    if a.nrows() != b.len() {
        return Err(NumanError::InvalidInput(format!(
            "{}: matrix has {} rows but right-hand side has {} entries",
            what,
            a.nrows(),
            b.len()
        )));
    }
    Ok(())
}

/// Diagonal of `a` and `a` with its diagonal zeroed.
fn split_diagonal(a: &DMatrix<f64>, what: &str) -> Result<(DVector<f64>, DMatrix<f64>)> {
    let diagonal = a.diagonal();
    if let Some(i) = diagonal.iter().position(|&d| d == 0.0) {
        return Err(NumanError::InvalidInput(format!(
            "{}: zero on the diagonal at row {}",
            what, i
        )));
    }
    let mut off_diagonal = a.clone();
    off_diagonal.fill_diagonal(0.0);
    Ok((diagonal, off_diagonal))
}

/// Jacobi iteration `x <- D^-1 (b - (L + U) x)` from `x = 0`.
pub fn jacobi_method(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    config: IterationConfig,
) -> Result<DVector<f64>> {
    check_system(a, b, "Jacobi method")?;
    let (diagonal, off_diagonal) = split_diagonal(a, "Jacobi method")?;
    Ok(fixed_point_iteration(
        |x: &DVector<f64>| (b - &off_diagonal * x).component_div(&diagonal),
        DVector::zeros(b.len()),
        config,
    ))
}

/// Successive over-relaxation: each component becomes `w` times its
/// Gauss–Seidel update plus `1 - w` times its current value.
pub fn successive_over_relaxation_method(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    w: f64,
    config: IterationConfig,
) -> Result<DVector<f64>> {
    check_system(a, b, "SOR")?;
    let (diagonal, off_diagonal) = split_diagonal(a, "SOR")?;
    Ok(fixed_point_iteration(
        |x: &DVector<f64>| {
            let mut x = x.clone();
            for i in 0..x.len() {
                let sum = off_diagonal.row(i).transpose().dot(&x);
                x[i] = (1.0 - w) * x[i] + w * (b[i] - sum) / diagonal[i];
            }
            x
        },
        DVector::zeros(b.len()),
        config,
    ))
}

/// Jacobi iteration that uses each updated component immediately.
pub fn gauss_seidel_method(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    config: IterationConfig,
) -> Result<DVector<f64>> {
    successive_over_relaxation_method(a, b, 1.0, config)
}

/// Upper-triangular `R` with `A = R^T R` for a symmetric positive-definite
/// `A`.
pub fn cholesky_factorization(a: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    check_square(a, "Cholesky factorization")?;
    if a != &a.transpose() {
        return Err(NumanError::InvalidInput("matrix is not symmetric".into()));
    }
    let n = a.nrows();
    let mut a = a.clone();
    let mut r = DMatrix::<f64>::zeros(n, n);
    for i in 0..n {
        let pivot = a[(i, i)];
        if pivot <= 0.0 {
            return Err(NumanError::Singular("matrix is not positive definite".into()));
        }
        r[(i, i)] = pivot.sqrt();
        for j in i + 1..n {
            r[(i, j)] = a[(i, j)] / r[(i, i)];
        }
        for j in i + 1..n {
            for k in i + 1..n {
                a[(j, k)] -= a[(i, j)] * a[(i, k)] / pivot;
            }
        }
    }
    Ok(r)
}

/// Reduced QR factorization by Gram–Schmidt.
///
/// The classical variant projects the original column onto each earlier
/// `q`; the modified variant projects the partially orthogonalized column,
/// which loses less orthogonality in floating point.
pub fn gram_schmidt_orthogonalization(
    a: &DMatrix<f64>,
    classical: bool,
) -> Result<(DMatrix<f64>, DMatrix<f64>)> {
    let (m, n) = a.shape();
    let mut q = DMatrix::<f64>::zeros(m, n);
    let mut r = DMatrix::<f64>::zeros(n, n);
    for j in 0..n {
        let mut y = a.column(j).clone_owned();
        for i in 0..j {
            r[(i, j)] = if classical {
                q.column(i).dot(&a.column(j))
            } else {
                q.column(i).dot(&y)
            };
            y -= q.column(i) * r[(i, j)];
        }
        let norm = y.norm();
        if norm == 0.0 {
            return Err(NumanError::Singular(format!(
                "column {} is linearly dependent on the previous columns",
                j
            )));
        }
        r[(j, j)] = norm;
        q.set_column(j, &(y / norm));
    }
    Ok((q, r))
}

/// Full QR factorization by Householder reflections; returns `(Q, R)`.
pub fn householder_qr(a: &DMatrix<f64>) -> (DMatrix<f64>, DMatrix<f64>) {
    let (m, n) = a.shape();
    let mut q = DMatrix::<f64>::identity(m, m);
    let mut r = a.clone();
    for i in 0..n.min(m) {
        let x = r.view((i, i), (m - i, 1)).column(0).clone_owned();
        let norm = x.norm();
        let mut v = -x.clone();
        v[0] += if x[0] >= 0.0 { -norm } else { norm };
        let vv = v.dot(&v);
        if vv == 0.0 {
            continue;
        }
        let mut h = DMatrix::<f64>::identity(m, m);
        let reflector = DMatrix::<f64>::identity(m - i, m - i) - (&v * v.transpose()) * (2.0 / vv);
        h.view_mut((i, i), (m - i, m - i)).copy_from(&reflector);
        q = &q * &h;
        r = &h * &r;
    }
    (q, r)
}

/// Broyden's method with a Jacobian approximation `A`, updated by rank one
/// after every step. `a0` is the starting approximation.
pub fn broyden_method_1(
    f: impl Fn(&DVector<f64>) -> DVector<f64>,
    x0: DVector<f64>,
    a0: DMatrix<f64>,
    config: IterationConfig,
) -> Result<DVector<f64>> {
    check_system(&a0, &x0, "Broyden's method")?;
    let mut a = a0;
    try_fixed_point_iteration(
        |x: &DVector<f64>| {
            let fx = f(x);
            let step = a.clone().lu().solve(&fx).ok_or_else(|| {
                NumanError::Singular("Broyden Jacobian approximation is singular".into())
            })?;
            let next = x - step;
            let dx = &next - x;
            let dx_norm2 = dx.dot(&dx);
            if dx_norm2 == 0.0 {
                return Ok(next);
            }
            let df = f(&next) - fx;
            let update = (df - &a * &dx) * dx.transpose() / dx_norm2;
            a += update;
            Ok(next)
        },
        x0,
        config,
    )
}

/// Broyden's method that updates an approximation `B` of the inverse
/// Jacobian directly, so no linear solve is needed. `b0` is the starting
/// approximation.
pub fn broyden_method_2(
    f: impl Fn(&DVector<f64>) -> DVector<f64>,
    x0: DVector<f64>,
    b0: DMatrix<f64>,
    config: IterationConfig,
) -> Result<DVector<f64>> {
    check_system(&b0, &x0, "Broyden's method")?;
    let mut b = b0;
    Ok(fixed_point_iteration(
        |x: &DVector<f64>| {
            let fx = f(x);
            let next = x - &b * &fx;
            let dx = &next - x;
            if dx.iter().all(|&d| d == 0.0) {
                return next;
            }
            let df = f(&next) - fx;
            let b_df = &b * &df;
            let denominator = dx.dot(&b_df);
            if denominator == 0.0 {
                log::debug!("Broyden inverse update skipped: zero denominator");
                return next;
            }
            let update = (dx.clone() - b_df) * (dx.transpose() * &b) / denominator;
            b += update;
            next
        },
        x0,
        config,
    ))
}
