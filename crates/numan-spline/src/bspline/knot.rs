//! Knot vectors with infinitesimally separated repeated knots, and the
//! B-spline basis functions defined over them.
//!
//! Each knot `i` is read as `value[i] + epsilon_counts[i] * epsilon` for an
//! infinitesimal `epsilon > 0`. Equal consecutive knots get strictly
//! increasing counts, so every knot span is non-empty and half-open interval
//! membership is well defined even at multiple knots. Basis functions are
//! built as exact fractions in `epsilon` and the limit `epsilon -> 0` is taken
//! once, at the end.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use numan_algebra::{float_key, Expr, Fraction, Polynomial};
use numan_core::config::CacheConfig;
use numan_core::error::{NumanError, Result};
use numan_math::Interval;
use serde::{Deserialize, Serialize};

use crate::memo::MemoCache;

/// A real value plus an integer count of infinitesimals, compared
/// lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KnotPoint {
    pub value: f64,
    pub epsilon: i64,
}

impl KnotPoint {
    pub fn new(value: f64, epsilon: i64) -> Self {
        Self { value, epsilon }
    }

    /// The two-coefficient polynomial `[value, epsilon]`.
    pub fn to_polynomial(self) -> Polynomial {
        Polynomial::new(vec![self.value, self.epsilon as f64])
    }
}

impl PartialOrd for KnotPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.value.partial_cmp(&other.value)? {
            Ordering::Equal => Some(self.epsilon.cmp(&other.epsilon)),
            ord => Some(ord),
        }
    }
}

impl Eq for KnotPoint {}

impl Hash for KnotPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        float_key(self.value).hash(state);
        self.epsilon.hash(state);
    }
}

impl From<f64> for KnotPoint {
    fn from(value: f64) -> Self {
        Self::new(value, 0)
    }
}

/// Reads the first two coefficients. Epsilon counts are integers, so a
/// fractional epsilon coefficient is rounded to the nearest count and a
/// warning is logged.
impl From<&Polynomial> for KnotPoint {
    fn from(p: &Polynomial) -> Self {
        let epsilon = p.coefficient(1);
        let count = epsilon.round();
        if count != epsilon {
            log::warn!("epsilon coefficient {} rounded to {}", epsilon, count);
        }
        Self::new(p.coefficient(0), count as i64)
    }
}

impl From<Polynomial> for KnotPoint {
    fn from(p: Polynomial) -> Self {
        Self::from(&p)
    }
}

/// Memo key: `(t, index, degree, derivative_degree)`.
type BasisKey = (KnotPoint, usize, usize, usize);

/// A non-decreasing knot sequence with its epsilon counts.
#[derive(Debug, Clone)]
pub struct KnotVector {
    knots: Vec<f64>,
    epsilon_counts: Vec<i64>,
    degree: usize,
    cache: MemoCache<BasisKey, Fraction>,
}

impl KnotVector {
    pub fn new(knots: Vec<f64>, degree: usize) -> Result<Self> {
        Self::with_cache_config(knots, degree, CacheConfig::default())
    }

    pub fn with_cache_config(knots: Vec<f64>, degree: usize, cache: CacheConfig) -> Result<Self> {
        if knots.len() < degree + 2 {
            return Err(NumanError::Construction(format!(
                "a degree {} knot vector needs at least {} knots, got {}",
                degree,
                degree + 2,
                knots.len()
            )));
        }
        if let Some(bad) = knots.iter().position(|k| !k.is_finite()) {
            return Err(NumanError::Construction(format!(
                "knot {} is not finite: {}",
                bad, knots[bad]
            )));
        }
        if let Some(i) = knots.windows(2).position(|w| w[0] > w[1]) {
            return Err(NumanError::Construction(format!(
                "knots must be non-decreasing, but knot {} = {} > knot {} = {}",
                i,
                knots[i],
                i + 1,
                knots[i + 1]
            )));
        }

        let epsilon_counts = epsilon_counts(&knots, degree);
        Ok(Self {
            knots,
            epsilon_counts,
            degree,
            cache: MemoCache::new(cache),
        })
    }

    pub fn len(&self) -> usize {
        self.knots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.knots.is_empty()
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn raw_knots(&self) -> &[f64] {
        &self.knots
    }

    pub fn epsilon_counts(&self) -> &[i64] {
        &self.epsilon_counts
    }

    /// Parameter range `[knot[degree], knot[len - degree - 1]]`.
    pub fn domain(&self) -> Interval {
        let p = self.degree;
        Interval::new(self.knots[p], self.knots[self.knots.len() - p - 1])
    }

    /// Knot `index` as the polynomial `[value, epsilon_count]`.
    ///
    /// # Panics
    /// If `index` is out of range.
    pub fn get_knot(&self, index: usize) -> Polynomial {
        self.get_knot_coefficients(index).to_polynomial()
    }

    /// # Panics
    /// If `index` is out of range.
    pub fn get_knot_coefficients(&self, index: usize) -> KnotPoint {
        KnotPoint::new(self.knots[index], self.epsilon_counts[index])
    }

    /// Whether `t` lies in the half-open span `[knot[index], knot[index + 1])`.
    ///
    /// A polynomial `t` is compared by its value and its epsilon coefficient
    /// rounded to an integer count.
    pub fn in_interval(&self, t: impl Into<KnotPoint>, index: usize) -> bool {
        if index + 1 >= self.knots.len() {
            return false;
        }
        let t = t.into();
        self.get_knot_coefficients(index) <= t && t < self.get_knot_coefficients(index + 1)
    }

    /// First span in `degree ..= point_num + 1` containing `t`.
    pub fn get_parameter_index(&self, t: impl Into<KnotPoint>, point_num: usize) -> Result<usize> {
        let t = t.into();
        (self.degree..=point_num + 1)
            .find(|&i| self.in_interval(t, i))
            .ok_or_else(|| {
                NumanError::Domain(format!(
                    "argument ({}, {} eps) out of range",
                    t.value, t.epsilon
                ))
            })
    }

    pub fn evaluate_base_function(
        &self,
        t: impl Into<KnotPoint>,
        index: usize,
        degree: usize,
    ) -> Result<f64> {
        self.evaluate_base_function_derivative(t, index, degree, 0)
    }

    /// Value of the `derivative_degree`-th derivative of `N[index, degree]`
    /// at `t`.
    pub fn evaluate_base_function_derivative(
        &self,
        t: impl Into<KnotPoint>,
        index: usize,
        degree: usize,
        derivative_degree: usize,
    ) -> Result<f64> {
        let t = t.into();
        if !t.value.is_finite() {
            return Err(NumanError::Domain(format!("argument {} out of range", t.value)));
        }
        if index + degree + 1 >= self.knots.len() {
            return Err(NumanError::InvalidInput(format!(
                "basis function N[{}, {}] needs knot {}, but the knot vector has {} knots",
                index,
                degree,
                index + degree + 1,
                self.knots.len()
            )));
        }
        self.base_function_fraction(t, index, degree, derivative_degree)
            .limit()
    }

    fn base_function_fraction(
        &self,
        t: KnotPoint,
        index: usize,
        degree: usize,
        derivative_degree: usize,
    ) -> Fraction {
        self.cache
            .get_or_insert_with((t, index, degree, derivative_degree), || {
                self.expand_base_function(t, index, degree, derivative_degree)
            })
    }

    /// One Cox–de Boor step. The derivative of `N[i,p] = w_l N[i,p-1] + w_r
    /// N[i+1,p-1]` is split with the Leibniz rule; the weights are linear in
    /// `t`, so only the orders `d` and `d - 1` of the lower basis survive.
    fn expand_base_function(
        &self,
        t: KnotPoint,
        index: usize,
        degree: usize,
        derivative_degree: usize,
    ) -> Fraction {
        if degree == 0 {
            let on = derivative_degree == 0 && self.in_interval(t, index);
            return Fraction::from(if on { 1.0 } else { 0.0 });
        }

        let t_poly = t.to_polynomial();
        let left = self.get_knot(index);
        let left_far = self.get_knot(index + degree);
        let right = self.get_knot(index + 1);
        let right_far = self.get_knot(index + degree + 1);

        let mut result: Option<Fraction> = None;
        let mut accumulate = |term: Fraction| {
            result = Some(match result.take() {
                None => term,
                Some(sum) => (Expr::from(sum) + term).simplify(),
            });
        };

        let lowest = derivative_degree.saturating_sub(1);
        for k in lowest..=derivative_degree {
            let lower = (Expr::from(binomial(derivative_degree, k))
                * self.base_function_fraction(t, index, degree - 1, k))
            .simplify();
            let span = Expr::from(left_far.clone()) - left.clone();
            let weight = if k == derivative_degree {
                (Expr::from(t_poly.clone()) - left.clone()) / span
            } else {
                Expr::Number(1.0) / span
            };
            accumulate((Expr::from(lower) * weight).simplify());
        }
        for k in lowest..=derivative_degree {
            let lower = (Expr::from(binomial(derivative_degree, k))
                * self.base_function_fraction(t, index + 1, degree - 1, k))
            .simplify();
            let span = Expr::from(right_far.clone()) - right.clone();
            let weight = if k == derivative_degree {
                (Expr::from(right_far.clone()) - t_poly.clone()) / span
            } else {
                Expr::Number(-1.0) / span
            };
            accumulate((Expr::from(lower) * weight).simplify());
        }

        result.unwrap_or_else(|| Fraction::from(0.0))
    }
}

/// Epsilon counts for `knots`.
///
/// Counts are assigned forward from `knots[degree]`, so the start of the
/// parameter domain keeps count zero; runs to the left of it are then
/// renumbered backwards to stay ordered relative to the knot after them.
fn epsilon_counts(knots: &[f64], degree: usize) -> Vec<i64> {
    let m = knots.len();
    let mut counts = vec![0i64; m];
    for i in degree..m.saturating_sub(1) {
        if knots[i] == knots[i + 1] {
            counts[i + 1] = counts[i] + 1;
        }
    }
    for i in 0..degree.saturating_sub(1) {
        if i + 1 < m && knots[i] == knots[i + 1] {
            counts[i + 1] = counts[i] + 1;
        }
    }
    for i in (0..degree).rev() {
        if i + 1 < m && knots[i] == knots[i + 1] {
            counts[i] = counts[i + 1] - 1;
        }
    }
    counts
}

fn binomial(n: usize, k: usize) -> f64 {
    let mut acc: u64 = 1;
    for i in 1..=k as u64 {
        acc = acc * (n as u64 - k as u64 + i) / i;
    }
    acc as f64
}
