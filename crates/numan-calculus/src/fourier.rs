//! Trigonometric interpolation from a discrete Fourier transform.

use std::f64::consts::PI;

use num_complex::Complex64;
use numan_core::error::{NumanError, Result};
use numan_math::Interval;
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};

/// Real trigonometric polynomial through `n` evenly spaced samples of a
/// function on `[c, d)`.
///
/// `a` and `b` hold the real and imaginary parts of the unnormalized
/// forward DFT of the samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrigonometricInterpolant {
    a: Vec<f64>,
    b: Vec<f64>,
    interval: Interval,
}

impl TrigonometricInterpolant {
    pub fn len(&self) -> usize {
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn evaluate(&self, t: f64) -> f64 {
        let n = self.len();
        let u = self.interval.normalize(t);
        let mut sum = self.a[0];
        // the Nyquist term only exists for an even sample count
        if n % 2 == 0 {
            sum += self.a[n / 2] * (n as f64 * PI * u).cos();
        }
        for k in 1..(n + 1) / 2 {
            let angle = 2.0 * PI * k as f64 * u;
            sum += 2.0 * (self.a[k] * angle.cos() - self.b[k] * angle.sin());
        }
        sum / n as f64
    }
}

/// Interpolate `f` at `c + (d - c) j / n` for `j = 0..n`.
pub fn dft_interpolation(
    f: impl Fn(f64) -> f64,
    n: usize,
    c: f64,
    d: f64,
) -> Result<TrigonometricInterpolant> {
    if n == 0 {
        return Err(NumanError::InvalidInput(
            "DFT interpolation needs at least one sample".into(),
        ));
    }
    if !c.is_finite() || !d.is_finite() || c >= d {
        return Err(NumanError::InvalidInput(format!(
            "DFT interpolation needs a finite interval with c < d, got [{}, {}]",
            c, d
        )));
    }

    let interval = Interval::new(c, d);
    let mut samples: Vec<Complex64> = (0..n)
        .map(|j| Complex64::new(f(interval.subinterval(j, n).start), 0.0))
        .collect();
    let mut planner = FftPlanner::new();
    planner.plan_fft_forward(n).process(&mut samples);
    log::trace!("DFT of {} samples on [{}, {}]", n, c, d);

    Ok(TrigonometricInterpolant {
        a: samples.iter().map(|z| z.re).collect(),
        b: samples.iter().map(|z| z.im).collect(),
        interval,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_reproduces_single_cosine() {
        let f = |t: f64| 1.0 + (2.0 * PI * t).cos();
        let p = dft_interpolation(f, 8, 0.0, 1.0).unwrap();
        assert_eq!(p.len(), 8);
        for t in [0.0, 0.1, 0.37, 0.5, 0.9] {
            assert_abs_diff_eq!(p.evaluate(t), f(t), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_passes_through_samples() {
        let f = |t: f64| t * t - t.sin();
        for n in [1, 4, 5, 8, 9] {
            let p = dft_interpolation(f, n, -1.0, 2.0).unwrap();
            for j in 0..n {
                let t = -1.0 + 3.0 * j as f64 / n as f64;
                assert_abs_diff_eq!(p.evaluate(t), f(t), epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_invalid_input() {
        assert!(dft_interpolation(f64::sin, 0, 0.0, 1.0).is_err());
        assert!(dft_interpolation(f64::sin, 4, 1.0, 1.0).is_err());
    }
}
