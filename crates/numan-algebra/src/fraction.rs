//! Algebraic fractions of polynomials and their limits.
//!
//! A fraction is read as a rational function of an infinitesimal `epsilon`;
//! [`Fraction::limit`] returns its value as `epsilon -> 0`.

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use numan_core::config::Tolerance;
use numan_core::error::{NumanError, Result};

use crate::polynomial::Polynomial;

/// A `numerator / denominator` pair of polynomials.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fraction {
    numerator: Polynomial,
    denominator: Polynomial,
}

impl Fraction {
    /// Build a fraction and cancel the leading zero coefficients that
    /// numerator and denominator share.
    pub fn new(numerator: Polynomial, denominator: Polynomial) -> Self {
        let p = numerator.coefficients();
        let q = denominator.coefficients();
        let mut k = 0;
        while k < p.len() && k < q.len() && p[k] == 0.0 && q[k] == 0.0 {
            k += 1;
        }
        if k == 0 {
            return Self::raw(numerator, denominator);
        }
        Self::raw(Polynomial::new(p[k..].to_vec()), Polynomial::new(q[k..].to_vec()))
    }

    /// Build a fraction without the cancellation pass.
    pub fn raw(numerator: Polynomial, denominator: Polynomial) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    pub fn numerator(&self) -> &Polynomial {
        &self.numerator
    }

    pub fn denominator(&self) -> &Polynomial {
        &self.denominator
    }

    pub fn limit(&self) -> Result<f64> {
        self.limit_with(Tolerance::default())
    }

    /// Strip leading coefficients that are zero in both numerator and
    /// denominator until the denominator's lowest surviving coefficient is
    /// nonzero, then return the ratio of the lowest coefficients.
    ///
    /// If exact zeros do not reach a nonzero denominator term, the scan is
    /// retried treating numerator residues below `tolerance.limit_residue` as
    /// zero. The denominator must still be exactly zero to be skipped.
    pub fn limit_with(&self, tolerance: Tolerance) -> Result<f64> {
        let q = self.denominator.coefficients();
        let p = |k: usize| self.numerator.coefficient(k);

        let mut k = 0;
        while k < q.len() && q[k] == 0.0 && p(k) == 0.0 {
            k += 1;
        }
        if k < q.len() && q[k] != 0.0 {
            return Ok(p(k) / q[k]);
        }

        while k < q.len() && q[k] == 0.0 && tolerance.is_residue(p(k)) {
            k += 1;
        }
        if k < q.len() && q[k] != 0.0 {
            log::debug!(
                "limit of {} resolved after cancelling round-off residues up to order {}",
                self,
                k
            );
            return Ok(p(k) / q[k]);
        }

        Err(NumanError::Indeterminate(format!(
            "failed to take limit of {}",
            self
        )))
    }
}

/// Free-function form of [`Fraction::limit`].
pub fn limit(fraction: &Fraction) -> Result<f64> {
    fraction.limit()
}

impl From<Polynomial> for Fraction {
    fn from(p: Polynomial) -> Self {
        Self::raw(p, Polynomial::one())
    }
}

impl From<f64> for Fraction {
    fn from(c: f64) -> Self {
        Self::raw(Polynomial::constant(c), Polynomial::one())
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) / ({})", self.numerator, self.denominator)
    }
}

impl Add for &Fraction {
    type Output = Fraction;

    fn add(self, rhs: &Fraction) -> Fraction {
        Fraction::new(
            &(&self.numerator * &rhs.denominator) + &(&rhs.numerator * &self.denominator),
            &self.denominator * &rhs.denominator,
        )
    }
}

impl Sub for &Fraction {
    type Output = Fraction;

    fn sub(self, rhs: &Fraction) -> Fraction {
        Fraction::new(
            &(&self.numerator * &rhs.denominator) - &(&rhs.numerator * &self.denominator),
            &self.denominator * &rhs.denominator,
        )
    }
}

impl Mul for &Fraction {
    type Output = Fraction;

    fn mul(self, rhs: &Fraction) -> Fraction {
        Fraction::new(
            &self.numerator * &rhs.numerator,
            &self.denominator * &rhs.denominator,
        )
    }
}

impl Div for &Fraction {
    type Output = Fraction;

    fn div(self, rhs: &Fraction) -> Fraction {
        Fraction::new(
            &self.numerator * &rhs.denominator,
            &self.denominator * &rhs.numerator,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(c: &[f64]) -> Polynomial {
        Polynomial::new(c.to_vec())
    }

    #[test]
    fn test_new_cancels_shared_leading_zeros() {
        let f = Fraction::new(poly(&[0.0, 0.0, 3.0]), poly(&[0.0, 2.0]));
        assert_eq!(f.numerator(), &poly(&[0.0, 3.0]));
        assert_eq!(f.denominator(), &poly(&[2.0]));

        // 0 / epsilon reduces to 0 / 1
        let z = Fraction::new(Polynomial::zero(), poly(&[0.0, 1.0]));
        assert_eq!(z.numerator(), &Polynomial::zero());
        assert_eq!(z.denominator(), &Polynomial::one());
    }

    #[test]
    fn test_limit_plain_ratio() {
        let f = Fraction::raw(poly(&[3.0, 1.0]), poly(&[4.0]));
        assert_eq!(f.limit().unwrap(), 0.75);
    }

    #[test]
    fn test_limit_cancels_zero_over_zero() {
        // (2 eps + eps^2) / (4 eps) -> 1/2
        let f = Fraction::raw(poly(&[0.0, 2.0, 1.0]), poly(&[0.0, 4.0]));
        assert_eq!(f.limit().unwrap(), 0.5);
    }

    #[test]
    fn test_limit_exhausted_numerator_is_zero() {
        let f = Fraction::raw(Polynomial::zero(), poly(&[0.0, 0.0, 5.0]));
        assert_eq!(f.limit().unwrap(), 0.0);
    }

    #[test]
    fn test_limit_tolerates_round_off_residue() {
        let f = Fraction::raw(poly(&[1e-25, 6.0]), poly(&[0.0, 3.0]));
        assert_eq!(f.limit().unwrap(), 2.0);
    }

    #[test]
    fn test_limit_indeterminate() {
        let f = Fraction::raw(poly(&[1.0, 1.0]), Polynomial::zero());
        assert!(matches!(f.limit(), Err(NumanError::Indeterminate(_))));

        // x / eps diverges
        let g = Fraction::raw(poly(&[2.0]), poly(&[0.0, 1.0]));
        assert!(matches!(limit(&g), Err(NumanError::Indeterminate(_))));
    }

    #[test]
    fn test_arithmetic() {
        let half = Fraction::new(poly(&[1.0]), poly(&[2.0]));
        let third = Fraction::new(poly(&[1.0]), poly(&[3.0]));
        assert!(((&half + &third).limit().unwrap() - 5.0 / 6.0).abs() < 1e-15);
        assert!(((&half - &third).limit().unwrap() - 1.0 / 6.0).abs() < 1e-15);
        assert!(((&half * &third).limit().unwrap() - 1.0 / 6.0).abs() < 1e-15);
        assert!(((&half / &third).limit().unwrap() - 1.5).abs() < 1e-15);
    }
}
