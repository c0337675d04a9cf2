//! Polynomial interpolation through point sets.

use std::f64::consts::PI;

use numan_algebra::NewtonPolynomial;
use numan_core::error::{NumanError, Result};
use serde::{Deserialize, Serialize};

fn check_nodes(points: &[(f64, f64)]) -> Result<()> {
    if points.is_empty() {
        return Err(NumanError::InvalidInput("interpolation needs at least one point".into()));
    }
    for (i, p) in points.iter().enumerate() {
        if let Some(j) = points[i + 1..].iter().position(|q| q.0 == p.0) {
            return Err(NumanError::InvalidInput(format!(
                "interpolation nodes {} and {} share x = {}",
                i,
                i + 1 + j,
                p.0
            )));
        }
    }
    Ok(())
}

/// The interpolating polynomial in Lagrange form, evaluated directly from
/// the nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LagrangePolynomial {
    points: Vec<(f64, f64)>,
}

impl LagrangePolynomial {
    pub fn new(points: Vec<(f64, f64)>) -> Result<Self> {
        check_nodes(&points)?;
        Ok(Self { points })
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        self.points
            .iter()
            .enumerate()
            .map(|(i, &(xi, yi))| {
                let (numerator, denominator) = self
                    .points
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .fold((1.0, 1.0), |(n, d), (_, &(xj, _))| (n * (x - xj), d * (xi - xj)));
                yi * numerator / denominator
            })
            .sum()
    }
}

/// Newton-form interpolating polynomial from the divided-difference table.
pub fn newton_divided_difference(points: &[(f64, f64)]) -> Result<NewtonPolynomial> {
    check_nodes(points)?;
    let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
    let mut coefficients: Vec<f64> = points.iter().map(|p| p.1).collect();
    let n = points.len();
    // after pass `i`, entry `j >= i` holds f[x(j-i), ..., x(j)]
    for i in 1..n {
        for j in (i..n).rev() {
            coefficients[j] = (coefficients[j] - coefficients[j - 1]) / (xs[j] - xs[j - i]);
        }
    }
    NewtonPolynomial::new(coefficients, xs[..n - 1].to_vec())
}

/// `n` Chebyshev nodes on `[a, b]` paired with the values of `f` there.
///
/// Node `i` (1-based) is `(b - a)/2 * cos((2i - 1) pi / 2n) + (a + b)/2`.
pub fn chebyshev_base_points(a: f64, b: f64, n: usize, f: impl Fn(f64) -> f64) -> Vec<(f64, f64)> {
    (1..=n)
        .map(|i| {
            let angle = (2 * i - 1) as f64 * PI / (2 * n) as f64;
            let x = (b - a) * angle.cos() / 2.0 + (b + a) / 2.0;
            (x, f(x))
        })
        .collect()
}
