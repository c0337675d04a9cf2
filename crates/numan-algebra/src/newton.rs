use numan_core::error::{NumanError, Result};
use serde::{Deserialize, Serialize};

/// A polynomial in Newton form:
/// `c0 + (x - x0)(c1 + (x - x1)(c2 + ...))`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewtonPolynomial {
    coefficients: Vec<f64>,
    base_points: Vec<f64>,
}

impl NewtonPolynomial {
    /// Trailing zero coefficients are trimmed; there must be a base point for
    /// every remaining coefficient but the first.
    pub fn new(mut coefficients: Vec<f64>, base_points: Vec<f64>) -> Result<Self> {
        while coefficients.last() == Some(&0.0) {
            coefficients.pop();
        }
        if coefficients.is_empty() {
            coefficients.push(0.0);
        }
        if base_points.len() + 1 < coefficients.len() {
            return Err(NumanError::InvalidInput(format!(
                "{} coefficients need at least {} base points, got {}",
                coefficients.len(),
                coefficients.len() - 1,
                base_points.len()
            )));
        }
        Ok(Self {
            coefficients,
            base_points,
        })
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn base_points(&self) -> &[f64] {
        &self.base_points
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let n = self.degree();
        let mut y = self.coefficients[n];
        for i in (0..n).rev() {
            y = y * (x - self.base_points[i]) + self.coefficients[i];
        }
        y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_evaluation() {
        // 1 + (x - 1)(2 + 3(x - 2))
        let p = NewtonPolynomial::new(vec![1.0, 2.0, 3.0], vec![1.0, 2.0]).unwrap();
        assert_eq!(p.evaluate(1.0), 1.0);
        assert_eq!(p.evaluate(2.0), 3.0);
        assert_eq!(p.evaluate(3.0), 1.0 + 2.0 * (2.0 + 3.0));
    }

    #[test]
    fn test_trimmed_coefficients_keep_their_base_points() {
        let p = NewtonPolynomial::new(vec![1.0, 2.0, 0.0], vec![5.0, 7.0]).unwrap();
        assert_eq!(p.degree(), 1);
        assert_eq!(p.evaluate(6.0), 3.0);
    }

    #[test]
    fn test_missing_base_points() {
        assert!(NewtonPolynomial::new(vec![1.0, 2.0, 3.0], vec![0.0]).is_err());
    }
}
