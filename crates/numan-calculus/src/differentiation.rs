//! Finite-difference derivatives and Richardson extrapolation.

/// Step size used when the caller has no better choice.
pub const DEFAULT_STEP: f64 = 1e-4;

pub fn two_point_forward_difference(f: impl Fn(f64) -> f64, x: f64, h: f64) -> f64 {
    (f(x + h) - f(x)) / h
}

pub fn three_point_centered_difference(f: impl Fn(f64) -> f64, x: f64, h: f64) -> f64 {
    (f(x + h) - f(x - h)) / (2.0 * h)
}

pub fn three_point_centered_difference_for_second_derivative(
    f: impl Fn(f64) -> f64,
    x: f64,
    h: f64,
) -> f64 {
    (f(x - h) - 2.0 * f(x) + f(x + h)) / (h * h)
}

/// Combine `estimate(h)` and `estimate(h / 2)` of a formula whose error is
/// `O(h^error_order)` to cancel the leading error term.
pub fn richardson_extrapolation(estimate: impl Fn(f64) -> f64, error_order: i32, h: f64) -> f64 {
    let scale = 2f64.powi(error_order);
    (scale * estimate(h / 2.0) - estimate(h)) / (scale - 1.0)
}
