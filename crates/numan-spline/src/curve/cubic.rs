//! Natural cubic splines through planar data.

use nalgebra::{DMatrix, DVector};
use numan_algebra::NewtonPolynomial;
use numan_core::error::{NumanError, Result};
use numan_math::Interval;

use super::Curve;

/// A piecewise cubic with zero second derivative at both ends.
///
/// Piece `i` covers `[x[i], x[i+1]]` and is stored in Newton form with all
/// three base points at `x[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct NaturalCubicSpline {
    xs: Vec<f64>,
    pieces: Vec<NewtonPolynomial>,
}

impl NaturalCubicSpline {
    pub fn pieces(&self) -> &[NewtonPolynomial] {
        &self.pieces
    }

    pub fn evaluate(&self, x: f64) -> Result<f64> {
        if !self.domain().contains(x) {
            return Err(NumanError::Domain(format!(
                "{} is outside the spline range [{}, {}]",
                x,
                self.xs[0],
                self.xs[self.xs.len() - 1]
            )));
        }
        let piece = self.xs[1..]
            .iter()
            .position(|&right| x <= right)
            .unwrap_or(self.pieces.len() - 1);
        Ok(self.pieces[piece].evaluate(x))
    }
}

impl Curve for NaturalCubicSpline {
    type Point = f64;

    fn point_at(&self, t: f64) -> Result<f64> {
        self.evaluate(t)
    }

    fn domain(&self) -> Interval {
        Interval::new(self.xs[0], self.xs[self.xs.len() - 1])
    }
}

/// Fit a natural cubic spline through `points`, given as `(x, y)` with
/// strictly increasing `x`.
pub fn natural_cubic_spline(points: &[(f64, f64)]) -> Result<NaturalCubicSpline> {
    let n = points.len();
    if n < 2 {
        return Err(NumanError::InvalidInput(format!(
            "natural cubic spline needs at least 2 points, got {}",
            n
        )));
    }
    let dx: Vec<f64> = points.windows(2).map(|w| w[1].0 - w[0].0).collect();
    let dy: Vec<f64> = points.windows(2).map(|w| w[1].1 - w[0].1).collect();
    if let Some(i) = dx.iter().position(|&h| h.is_nan() || h <= 0.0) {
        return Err(NumanError::InvalidInput(format!(
            "x values must be strictly increasing, but x[{}] = {} and x[{}] = {}",
            i,
            points[i].0,
            i + 1,
            points[i + 1].0
        )));
    }

    // Unknowns are the quadratic coefficients c[0..n-1]; c[n-1] = 0 is fixed.
    let mut a = DMatrix::<f64>::zeros(n - 1, n - 1);
    let mut b = DVector::<f64>::zeros(n - 1);
    a[(0, 0)] = 1.0;
    for i in 0..n - 2 {
        a[(i + 1, i)] = dx[i];
        a[(i + 1, i + 1)] = 2.0 * (dx[i] + dx[i + 1]);
        if i + 2 < n - 1 {
            a[(i + 1, i + 2)] = dx[i + 1];
        }
        b[i + 1] = 3.0 * (dy[i + 1] / dx[i + 1] - dy[i] / dx[i]);
    }
    let solved = a
        .lu()
        .solve(&b)
        .ok_or_else(|| NumanError::Singular("natural cubic spline system is singular".into()))?;
    let mut c: Vec<f64> = solved.iter().copied().collect();
    c.push(0.0);

    let pieces = (0..n - 1)
        .map(|i| {
            let x = points[i].0;
            let slope = dy[i] / dx[i] - dx[i] * (2.0 * c[i] + c[i + 1]) / 3.0;
            let cubic = (c[i + 1] - c[i]) / (3.0 * dx[i]);
            NewtonPolynomial::new(vec![points[i].1, slope, c[i], cubic], vec![x; 3])
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(NaturalCubicSpline {
        xs: points.iter().map(|p| p.0).collect(),
        pieces,
    })
}
