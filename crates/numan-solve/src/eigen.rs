//! Eigenvalue iteration. Each method returns `(eigenvalue, eigenvector)` and
//! stops once two successive eigenvalue estimates differ by less than
//! `config.tolerance`.

use nalgebra::{DMatrix, DVector};
use numan_core::config::IterationConfig;
use numan_core::error::{NumanError, Result};

use crate::system::check_square;

/// The entry of largest magnitude.
fn dominant_entry(v: &DVector<f64>) -> f64 {
    v.iter()
        .copied()
        .fold(0.0, |best: f64, x| if x.abs() > best.abs() { x } else { best })
}

/// Dominant eigenvalue by repeated multiplication from the all-ones vector,
/// scaling the iterate by its largest entry.
pub fn power_iteration_method(
    a: &DMatrix<f64>,
    config: IterationConfig,
) -> Result<(f64, DVector<f64>)> {
    check_square(a, "power iteration")?;
    let mut v = DVector::from_element(a.nrows(), 1.0);
    let mut eigenvalue: Option<f64> = None;
    for _ in 0..config.max_steps {
        let w = a * &v;
        let scale = dominant_entry(&w);
        if scale == 0.0 {
            return Err(NumanError::Singular(
                "power iteration collapsed to the zero vector".into(),
            ));
        }
        v = w / scale;
        let last = eigenvalue.replace(scale);
        if last.is_some_and(|last| (scale - last).abs() < config.tolerance) {
            break;
        }
    }
    Ok((eigenvalue.unwrap_or(f64::NAN), v))
}

/// Eigenvalue closest to `shift`, by power iteration on `(A - shift I)^-1`.
pub fn inverse_power_iteration_method(
    a: &DMatrix<f64>,
    shift: f64,
    config: IterationConfig,
) -> Result<(f64, DVector<f64>)> {
    check_square(a, "inverse power iteration")?;
    let n = a.nrows();
    let shifted = (a - DMatrix::<f64>::identity(n, n) * shift).lu();
    let mut v = DVector::from_element(n, 1.0);
    let mut eigenvalue: Option<f64> = None;
    for _ in 0..config.max_steps {
        let w = shifted.solve(&v).ok_or_else(|| {
            NumanError::Singular(format!("shift {} is an exact eigenvalue", shift))
        })?;
        let scale = dominant_entry(&w);
        if scale == 0.0 {
            return Err(NumanError::Singular(
                "inverse power iteration collapsed to the zero vector".into(),
            ));
        }
        v = w / scale;
        let estimate = 1.0 / scale + shift;
        let last = eigenvalue.replace(estimate);
        if last.is_some_and(|last| (estimate - last).abs() < config.tolerance) {
            break;
        }
    }
    Ok((eigenvalue.unwrap_or(f64::NAN), v))
}

/// Inverse iteration whose shift is the Rayleigh quotient of the current
/// iterate, starting from `v0`.
///
/// If the shift lands exactly on an eigenvalue the shifted system is
/// singular and the current estimate is returned.
pub fn rayleigh_quotient_iteration_method(
    a: &DMatrix<f64>,
    v0: DVector<f64>,
    config: IterationConfig,
) -> Result<(f64, DVector<f64>)> {
    check_square(a, "Rayleigh quotient iteration")?;
    if v0.len() != a.nrows() || v0.norm() == 0.0 {
        return Err(NumanError::InvalidInput(format!(
            "starting vector must be a nonzero vector of length {}",
            a.nrows()
        )));
    }
    let n = a.nrows();
    let mut v = v0.normalize();
    let mut eigenvalue = v.dot(&(a * &v));
    for _ in 0..config.max_steps {
        let shifted = a - DMatrix::<f64>::identity(n, n) * eigenvalue;
        let Some(w) = shifted.lu().solve(&v) else {
            log::debug!("Rayleigh shift {} is an exact eigenvalue", eigenvalue);
            break;
        };
        let norm = w.norm();
        if norm == 0.0 || !norm.is_finite() {
            log::debug!("Rayleigh iterate degenerated at shift {}", eigenvalue);
            break;
        }
        v = w / norm;
        let last = eigenvalue;
        eigenvalue = v.dot(&(a * &v));
        if (eigenvalue - last).abs() < config.tolerance {
            break;
        }
    }
    Ok((eigenvalue, v))
}
