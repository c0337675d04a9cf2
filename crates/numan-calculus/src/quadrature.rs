//! Newton–Cotes quadrature, Romberg integration and adaptive quadrature.

use numan_core::error::{NumanError, Result};
use numan_math::Interval;

pub fn trapezoid_rule(f: impl Fn(f64) -> f64, a: f64, b: f64) -> f64 {
    (b - a) * (f(a) + f(b)) / 2.0
}

pub fn simpson_rule(f: impl Fn(f64) -> f64, a: f64, b: f64) -> f64 {
    let h = (b - a) / 2.0;
    h * (f(a) + 4.0 * f(a + h) + f(b)) / 3.0
}

pub fn midpoint_rule(f: impl Fn(f64) -> f64, a: f64, b: f64) -> f64 {
    let h = b - a;
    h * f(a + h / 2.0)
}

/// Open Newton–Cotes rule on the three interior quarter points. Never
/// evaluates `f` at the endpoints.
pub fn three_point_rule(f: impl Fn(f64) -> f64, a: f64, b: f64) -> f64 {
    let h = (b - a) / 4.0;
    (2.0 * f(a + h) - f(a + 2.0 * h) + 2.0 * f(a + 3.0 * h)) * 4.0 * h / 3.0
}

fn check_panels(m: usize) -> Result<()> {
    if m == 0 {
        return Err(NumanError::InvalidInput(
            "composite rule needs at least one panel".into(),
        ));
    }
    Ok(())
}

pub fn composite_trapezoid_rule(f: impl Fn(f64) -> f64, a: f64, b: f64, m: usize) -> Result<f64> {
    check_panels(m)?;
    let h = (b - a) / m as f64;
    let interior: f64 = (1..m).map(|i| f(a + h * i as f64)).sum();
    Ok((f(a) + f(b) + 2.0 * interior) * h / 2.0)
}

/// Composite Simpson's rule over `m` panels (`2m` subintervals).
pub fn composite_simpson_rule(f: impl Fn(f64) -> f64, a: f64, b: f64, m: usize) -> Result<f64> {
    check_panels(m)?;
    let h = (b - a) / (2 * m) as f64;
    let odd: f64 = (1..=m).map(|i| f(a + h * (2 * i - 1) as f64)).sum();
    let even: f64 = (1..m).map(|i| f(a + h * (2 * i) as f64)).sum();
    Ok((f(a) + f(b) + 4.0 * odd + 2.0 * even) * h / 3.0)
}

/// Apply `rule` on each of `m` equal subintervals of `[a, b]` and sum.
pub fn composite_integration<F>(
    f: F,
    a: f64,
    b: f64,
    m: usize,
    rule: impl Fn(&F, f64, f64) -> f64,
) -> Result<f64>
where
    F: Fn(f64) -> f64,
{
    check_panels(m)?;
    let whole = Interval::new(a, b);
    Ok((0..m)
        .map(|i| {
            let piece = whole.subinterval(i, m);
            rule(&f, piece.start, piece.end)
        })
        .sum())
}

pub fn composite_midpoint_rule(f: impl Fn(f64) -> f64, a: f64, b: f64, m: usize) -> Result<f64> {
    composite_integration(f, a, b, m, |g, a, b| midpoint_rule(g, a, b))
}

/// Romberg integration: trapezoid estimates on halving step sizes, refined
/// by Richardson extrapolation. Returns the `step`-th diagonal entry.
pub fn romberg_integration(f: impl Fn(f64) -> f64, a: f64, b: f64, step: usize) -> Result<f64> {
    if step == 0 {
        return Err(NumanError::InvalidInput(
            "Romberg integration needs at least one step".into(),
        ));
    }
    let mut row = vec![(b - a) * (f(a) + f(b)) / 2.0];
    for j in 2..=step {
        let h = (b - a) / 2f64.powi(j as i32 - 1);
        let new_points: f64 = (1..=1usize << (j - 2))
            .map(|i| f(a + (2 * i - 1) as f64 * h))
            .sum();
        let mut next = Vec::with_capacity(j);
        next.push(row[0] / 2.0 + h * new_points);
        for k in 1..j {
            let scale = 4f64.powi(k as i32);
            next.push((scale * next[k - 1] - row[k - 1]) / (scale - 1.0));
        }
        row = next;
    }
    Ok(row[step - 1])
}

/// Adaptive trapezoid quadrature.
///
/// A subinterval is accepted when the two-panel estimate differs from the
/// one-panel estimate by less than `3 * tol` scaled by its share of
/// `[a, b]`; otherwise it is bisected. Subintervals too short to bisect in
/// floating point are accepted as they are.
pub fn adaptive_quadrature(f: impl Fn(f64) -> f64, a: f64, b: f64, tol: f64) -> Result<f64> {
    if !(tol > 0.0) {
        return Err(NumanError::InvalidInput(format!(
            "adaptive quadrature tolerance must be positive, got {}",
            tol
        )));
    }
    if !a.is_finite() || !b.is_finite() || a >= b {
        return Err(NumanError::InvalidInput(format!(
            "adaptive quadrature needs a finite interval with a < b, got [{}, {}]",
            a, b
        )));
    }

    let total = b - a;
    let mut pending = vec![Interval::new(a, b)];
    let mut result = 0.0;
    let mut accepted = 0usize;
    while let Some(piece) = pending.pop() {
        let (left, right) = piece.bisect();
        let refined = trapezoid_rule(&f, left.start, left.end) + trapezoid_rule(&f, right.start, right.end);
        let coarse = trapezoid_rule(&f, piece.start, piece.end);
        let splittable = left.length() > 0.0 && right.length() > 0.0;
        if (coarse - refined).abs() < 3.0 * tol * piece.length() / total || !splittable {
            result += refined;
            accepted += 1;
        } else {
            pending.push(left);
            pending.push(right);
        }
    }
    log::debug!("adaptive quadrature accepted {} subintervals", accepted);
    Ok(result)
}
