//! Canonical single-variable polynomials with `f64` coefficients.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Bit pattern of `v` with `-0.0` folded onto `0.0`, so that hashing agrees
/// with `==` for every non-NaN value.
pub fn float_key(v: f64) -> u64 {
    if v == 0.0 {
        0
    } else {
        v.to_bits()
    }
}

/// A polynomial stored lowest degree first.
///
/// Trailing (highest-degree) zero coefficients are always trimmed and at
/// least one coefficient is kept, so the zero polynomial is `[0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<f64>", into = "Vec<f64>")]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    pub fn new(mut coefficients: Vec<f64>) -> Self {
        while coefficients.last() == Some(&0.0) {
            coefficients.pop();
        }
        if coefficients.is_empty() {
            coefficients.push(0.0);
        }
        Self { coefficients }
    }

    pub fn zero() -> Self {
        Self {
            coefficients: vec![0.0],
        }
    }

    pub fn one() -> Self {
        Self::constant(1.0)
    }

    pub fn constant(c: f64) -> Self {
        Self::new(vec![c])
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Coefficient of `x^k`, zero past the stored degree.
    pub fn coefficient(&self, k: usize) -> f64 {
        self.coefficients.get(k).copied().unwrap_or(0.0)
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    pub fn is_constant(&self) -> bool {
        self.coefficients.len() == 1
    }

    pub fn is_zero(&self) -> bool {
        self.is_constant() && self.coefficients[0] == 0.0
    }

    /// Evaluate by nested multiplication.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * x + c)
    }

    pub fn derivative(&self) -> Self {
        Self::new(
            self.coefficients
                .iter()
                .enumerate()
                .skip(1)
                .map(|(k, &c)| k as f64 * c)
                .collect(),
        )
    }

    /// Element-wise division by a scalar. The caller guarantees `s != 0`.
    pub fn div_by_scalar(&self, s: f64) -> Self {
        Self::new(self.coefficients.iter().map(|c| c / s).collect())
    }

    fn zip_with(&self, other: &Self, op: impl Fn(f64, f64) -> f64) -> Self {
        let len = self.coefficients.len().max(other.coefficients.len());
        Self::new(
            (0..len)
                .map(|k| op(self.coefficient(k), other.coefficient(k)))
                .collect(),
        )
    }
}

impl Default for Polynomial {
    fn default() -> Self {
        Self::zero()
    }
}

impl Eq for Polynomial {}

impl Hash for Polynomial {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for &c in &self.coefficients {
            float_key(c).hash(state);
        }
    }
}

impl From<Vec<f64>> for Polynomial {
    fn from(coefficients: Vec<f64>) -> Self {
        Self::new(coefficients)
    }
}

impl From<Polynomial> for Vec<f64> {
    fn from(p: Polynomial) -> Self {
        p.coefficients
    }
}

impl From<f64> for Polynomial {
    fn from(c: f64) -> Self {
        Self::constant(c)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.coefficients)
    }
}

impl Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Polynomial {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl Sub for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &Polynomial) -> Polynomial {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Polynomial {
        let mut result = vec![0.0; self.coefficients.len() + rhs.coefficients.len()];
        for (i, &a) in self.coefficients.iter().enumerate() {
            for (j, &b) in rhs.coefficients.iter().enumerate() {
                result[i + j] += a * b;
            }
        }
        Polynomial::new(result)
    }
}

impl Div<f64> for &Polynomial {
    type Output = Polynomial;

    fn div(self, rhs: f64) -> Polynomial {
        self.div_by_scalar(rhs)
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        Polynomial::new(self.coefficients.iter().map(|c| -c).collect())
    }
}

impl Add for Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: Polynomial) -> Polynomial {
        &self + &rhs
    }
}

impl Sub for Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: Polynomial) -> Polynomial {
        &self - &rhs
    }
}

impl Mul for Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Polynomial) -> Polynomial {
        &self * &rhs
    }
}
