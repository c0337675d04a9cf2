//! Scalar root finding.
//!
//! The bracketing methods return `Ok(None)` when `f(a)` and `f(b)` have the
//! same sign; the open methods are plain fixed-point iterations and return
//! their last iterate.

use numan_core::config::IterationConfig;
use numan_core::error::{NumanError, Result};

use crate::iterative::{fixed_point_iteration, n_guess_iteration};

/// Shrink `[a, b]` around a sign change, picking the next point with `next`.
fn interval_method(
    f: &impl Fn(f64) -> f64,
    mut next: impl FnMut(f64, f64) -> f64,
    mut a: f64,
    mut b: f64,
    config: IterationConfig,
) -> Result<Option<f64>> {
    if a > b {
        return Err(NumanError::InvalidInput(format!(
            "bracket [{}, {}] is reversed",
            a, b
        )));
    }
    if f(a) * f(b) > 0.0 {
        return Ok(None);
    }
    for _ in 0..config.max_steps {
        if b - a < config.tolerance {
            break;
        }
        let c = next(a, b);
        let fc = f(c);
        if fc == 0.0 {
            return Ok(Some(c));
        }
        if f(a) * fc < 0.0 {
            b = c;
        } else {
            a = c;
        }
    }
    Ok(Some(next(a, b)))
}

pub fn bisection_method(
    f: impl Fn(f64) -> f64,
    a: f64,
    b: f64,
    config: IterationConfig,
) -> Result<Option<f64>> {
    interval_method(&f, |a, b| (a + b) / 2.0, a, b, config)
}

/// Regula falsi: the next point is where the secant through the bracket
/// ends crosses zero.
pub fn false_position_method(
    f: impl Fn(f64) -> f64,
    a: f64,
    b: f64,
    config: IterationConfig,
) -> Result<Option<f64>> {
    interval_method(
        &f,
        |a, b| {
            let (fa, fb) = (f(a), f(b));
            (b * fa - a * fb) / (fa - fb)
        },
        a,
        b,
        config,
    )
}

fn secant_step(f: &impl Fn(f64) -> f64, a: f64, b: f64) -> f64 {
    let (fa, fb) = (f(a), f(b));
    b - fb * (b - a) / (fb - fa)
}

/// Fit `x = p(y)` through three points and return `p(0)`.
fn inverse_quadratic_step(f: &impl Fn(f64) -> f64, x0: f64, x1: f64, x2: f64) -> f64 {
    let (f0, f1, f2) = (f(x0), f(x1), f(x2));
    let q = f0 / f1;
    let r = f2 / f1;
    let s = f2 / f0;
    x2 - (r * (r - q) * (x2 - x1) + (1.0 - r) * s * (x2 - x0)) / ((q - 1.0) * (r - 1.0) * (s - 1.0))
}

/// Bookkeeping for Brent's method: the smallest `|f|` seen so far and the
/// three points the next inverse quadratic step is fitted through.
struct BrentState {
    min_backward_error: f64,
    last_three: Option<[f64; 3]>,
    half_width: f64,
}

impl BrentState {
    /// Accept `candidate` if it improves the backward error and sits in the
    /// middle of a window no wider than half the initial bracket. Returns
    /// the window around it.
    fn accept(&self, f: &impl Fn(f64) -> f64, candidate: f64) -> Option<[f64; 3]> {
        if !(f(candidate).abs() < self.min_backward_error) {
            return None;
        }
        let last = self.last_three?;
        let mut four = [last[0], last[1], last[2], candidate];
        four.sort_by(f64::total_cmp);
        let idx = four.iter().position(|&x| x == candidate)?;
        if (idx == 1 || idx == 2) && four[idx + 1] - four[idx - 1] <= self.half_width {
            Some([four[idx - 1], four[idx], four[idx + 1]])
        } else {
            None
        }
    }

    fn record(&mut self, f: &impl Fn(f64) -> f64, c: f64, window: [f64; 3]) -> f64 {
        self.last_three = Some(window);
        self.min_backward_error = self.min_backward_error.min(f(c).abs());
        c
    }
}

/// Brent's method: try an inverse quadratic step, then a secant step, and
/// fall back to the bracket midpoint when neither makes enough progress.
pub fn brent_method(
    f: impl Fn(f64) -> f64,
    a: f64,
    b: f64,
    config: IterationConfig,
) -> Result<Option<f64>> {
    let mut state = BrentState {
        min_backward_error: f(a).abs().min(f(b).abs()),
        last_three: None,
        half_width: (b - a) / 2.0,
    };
    let next = |a: f64, b: f64| {
        if let Some([x0, x1, x2]) = state.last_three {
            let c = inverse_quadratic_step(&f, x0, x1, x2);
            if let Some(window) = state.accept(&f, c) {
                log::trace!("brent: inverse quadratic step to {}", c);
                return state.record(&f, c, window);
            }
            let c = secant_step(&f, a, b);
            if let Some(window) = state.accept(&f, c) {
                log::trace!("brent: secant step to {}", c);
                return state.record(&f, c, window);
            }
        }
        let c = (a + b) / 2.0;
        log::trace!("brent: bisection step to {}", c);
        state.record(&f, c, [a, c, b])
    };
    interval_method(&f, next, a, b, config)
}

/// `x^(1/n)` by the Newton iteration for `a^n - x`, started at `1`.
pub fn n_th_root(x: f64, n: u32, config: IterationConfig) -> Result<f64> {
    if n == 0 {
        return Err(NumanError::InvalidInput("root degree must be positive".into()));
    }
    if x == 0.0 {
        return Ok(x);
    }
    if !(x > 0.0) {
        return Err(NumanError::InvalidInput(format!(
            "cannot take real root of {}",
            x
        )));
    }
    let nf = f64::from(n);
    let power = n as i32 - 1;
    Ok(fixed_point_iteration(
        |a: &f64| (nf - 1.0) * a / nf + x / (nf * a.powi(power)),
        1.0,
        config,
    ))
}

pub fn sqrt(x: f64, config: IterationConfig) -> Result<f64> {
    n_th_root(x, 2, config)
}

pub fn newton_method(
    f: impl Fn(f64) -> f64,
    derivative: impl Fn(f64) -> f64,
    x: f64,
    config: IterationConfig,
) -> f64 {
    fixed_point_iteration(|a: &f64| a - f(*a) / derivative(*a), x, config)
}

pub fn secant_method(f: impl Fn(f64) -> f64, x0: f64, x1: f64, config: IterationConfig) -> f64 {
    n_guess_iteration(|&[a, b]: &[f64; 2]| secant_step(&f, a, b), [x0, x1], config)
}

/// Generalizes the secant method to a parabola `x = p(y)` through the last
/// three guesses.
pub fn inverse_quadratic_interpolation_method(
    f: impl Fn(f64) -> f64,
    a: f64,
    b: f64,
    c: f64,
    config: IterationConfig,
) -> f64 {
    n_guess_iteration(
        |&[x0, x1, x2]: &[f64; 3]| inverse_quadratic_step(&f, x0, x1, x2),
        [a, b, c],
        config,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn cubic(x: f64) -> f64 {
        x * x * x + x - 1.0
    }

    const ROOT: f64 = 0.682_327_803_828_019_3;

    #[test]
    fn test_bisection() {
        let x = bisection_method(cubic, 0.0, 1.0, IterationConfig::bracketing())
            .unwrap()
            .unwrap();
        assert_abs_diff_eq!(x, ROOT, epsilon = 1e-8);
    }

    #[test]
    fn test_no_sign_change() {
        let none = bisection_method(|x| x * x + 1.0, -1.0, 1.0, IterationConfig::bracketing());
        assert_eq!(none.unwrap(), None);
        let reversed = bisection_method(cubic, 1.0, 0.0, IterationConfig::bracketing());
        assert!(matches!(reversed, Err(NumanError::InvalidInput(_))));
    }

    #[test]
    fn test_false_position() {
        let x = false_position_method(cubic, 0.0, 1.0, IterationConfig::bracketing())
            .unwrap()
            .unwrap();
        assert_abs_diff_eq!(x, ROOT, epsilon = 1e-8);
    }

    #[test]
    fn test_exact_root_on_midpoint() {
        let x = bisection_method(|x| x - 0.5, 0.0, 1.0, IterationConfig::bracketing()).unwrap();
        assert_eq!(x, Some(0.5));
    }

    #[test]
    fn test_brent() {
        let x = brent_method(cubic, 0.0, 1.0, IterationConfig::bracketing())
            .unwrap()
            .unwrap();
        assert_abs_diff_eq!(x, ROOT, epsilon = 1e-6);
        assert_eq!(brent_method(|x| x * x + 1.0, 0.0, 1.0, IterationConfig::bracketing()).unwrap(), None);
    }

    #[test]
    fn test_roots() {
        let config = IterationConfig::default();
        assert_abs_diff_eq!(sqrt(2.0, config).unwrap(), 2f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(n_th_root(2.0, 3, config).unwrap(), 2f64.cbrt(), epsilon = 1e-12);
        assert_eq!(sqrt(0.0, config).unwrap(), 0.0);
        assert!(sqrt(-4.0, config).is_err());
        assert!(n_th_root(4.0, 0, config).is_err());
    }

    #[test]
    fn test_newton() {
        let x = newton_method(cubic, |x| 3.0 * x * x + 1.0, -0.7, IterationConfig::default());
        assert_abs_diff_eq!(x, ROOT, epsilon = 1e-12);
    }

    #[test]
    fn test_secant() {
        let config = IterationConfig::fixed_point().with_tolerance(1e-12);
        let x = secant_method(cubic, 0.0, 1.0, config);
        assert_abs_diff_eq!(x, ROOT, epsilon = 1e-10);
    }

    #[test]
    fn test_inverse_quadratic_interpolation() {
        let config = IterationConfig::fixed_point().with_tolerance(1e-12);
        let x = inverse_quadratic_interpolation_method(cubic, 0.0, 0.5, 1.0, config);
        assert_abs_diff_eq!(x, ROOT, epsilon = 1e-10);
    }
}
