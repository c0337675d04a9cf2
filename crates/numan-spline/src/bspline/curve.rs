//! B-spline curves evaluated by a symbolic de Boor blend.

use glam::DVec2;
use numan_algebra::{float_key, Expr, Fraction, Polynomial};
use numan_core::config::CacheConfig;
use numan_core::error::{NumanError, Result};
use numan_core::traits::Validate;
use numan_math::Interval;
use serde::{Deserialize, Serialize};

use super::knot::{KnotPoint, KnotVector};
use crate::curve::Curve;
use crate::memo::MemoCache;

/// A control point as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ControlPoint {
    Scalar(f64),
    Vector(Vec<f64>),
}

impl ControlPoint {
    fn into_coordinates(self) -> Vec<f64> {
        match self {
            ControlPoint::Scalar(v) => vec![v],
            ControlPoint::Vector(v) => v,
        }
    }
}

impl From<f64> for ControlPoint {
    fn from(v: f64) -> Self {
        ControlPoint::Scalar(v)
    }
}

impl From<Vec<f64>> for ControlPoint {
    fn from(v: Vec<f64>) -> Self {
        ControlPoint::Vector(v)
    }
}

impl<const N: usize> From<[f64; N]> for ControlPoint {
    fn from(v: [f64; N]) -> Self {
        ControlPoint::Vector(v.to_vec())
    }
}

impl From<DVec2> for ControlPoint {
    fn from(v: DVec2) -> Self {
        ControlPoint::Vector(vec![v.x, v.y])
    }
}

/// A point on a curve: a bare number for 1-D control points, a coordinate
/// vector otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CurvePoint {
    Scalar(f64),
    Vector(Vec<f64>),
}

impl CurvePoint {
    fn from_coordinates(mut coords: Vec<f64>) -> Self {
        if coords.len() == 1 {
            CurvePoint::Scalar(coords.remove(0))
        } else {
            CurvePoint::Vector(coords)
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            CurvePoint::Scalar(v) => Some(*v),
            CurvePoint::Vector(_) => None,
        }
    }

    pub fn into_vec(self) -> Vec<f64> {
        match self {
            CurvePoint::Scalar(v) => vec![v],
            CurvePoint::Vector(v) => v,
        }
    }
}

/// Memo key: `(t, remaining degree, coordinate, span index)`.
type BlendKey = (u64, usize, usize, usize);

/// A B-spline curve defined by degree, knot vector, and control points.
///
/// Control points are stored as coordinate vectors of one common dimension;
/// scalar control points become vectors of length one.
#[derive(Debug, Clone)]
pub struct BSpline {
    points: Vec<Vec<f64>>,
    degree: usize,
    knot_vector: KnotVector,
    cache: MemoCache<BlendKey, Fraction>,
}

impl BSpline {
    pub fn new<P: Into<ControlPoint>>(
        points: impl IntoIterator<Item = P>,
        degree: usize,
        knots: Vec<f64>,
    ) -> Result<Self> {
        Self::with_cache_config(points, degree, knots, CacheConfig::default())
    }

    pub fn with_cache_config<P: Into<ControlPoint>>(
        points: impl IntoIterator<Item = P>,
        degree: usize,
        knots: Vec<f64>,
        cache: CacheConfig,
    ) -> Result<Self> {
        let points: Vec<Vec<f64>> = points
            .into_iter()
            .map(|p| p.into().into_coordinates())
            .collect();
        if degree < 1 {
            return Err(NumanError::Construction(
                "B-spline degree must be at least 1".into(),
            ));
        }
        if knots.len() != points.len() + degree + 1 {
            return Err(NumanError::Construction(format!(
                "knot vector length must be n + p + 1, got {} knots for {} control points with degree {}",
                knots.len(),
                points.len(),
                degree
            )));
        }
        let spline = Self {
            points,
            degree,
            knot_vector: KnotVector::with_cache_config(knots, degree, cache)?,
            cache: MemoCache::new(cache),
        };
        spline.validate()?;
        Ok(spline)
    }

    pub fn points(&self) -> &[Vec<f64>] {
        &self.points
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn knot_vector(&self) -> &KnotVector {
        &self.knot_vector
    }

    /// Number of coordinates per control point.
    pub fn dimension(&self) -> usize {
        self.points.first().map_or(0, Vec::len)
    }

    pub fn get_knot(&self, index: usize) -> Polynomial {
        self.knot_vector.get_knot(index)
    }

    pub fn get_knot_coefficients(&self, index: usize) -> KnotPoint {
        self.knot_vector.get_knot_coefficients(index)
    }

    /// Evaluate the curve at `t`.
    ///
    /// `t` is matched against closed spans `[knot[i], knot[i+1]]` for
    /// `i` in `degree .. points.len()`, so both ends of the parameter domain
    /// are accepted; anything else is a [`NumanError::Domain`] error.
    pub fn evaluate(&self, t: f64) -> Result<CurvePoint> {
        let index = self.find_span(t)?;
        let coords = (0..self.dimension())
            .map(|coord| self.blend(t, self.degree, coord, index).limit())
            .collect::<Result<Vec<_>>>()?;
        Ok(CurvePoint::from_coordinates(coords))
    }

    /// The `order`-th derivative, `sum_i N(order)[i, p](t) * P[i]`.
    pub fn derivative(&self, t: f64, order: usize) -> Result<CurvePoint> {
        if !self.knot_vector.domain().contains(t) {
            return Err(NumanError::Domain(format!("argument {} out of range", t)));
        }
        let mut coords = vec![0.0; self.dimension()];
        for (i, point) in self.points.iter().enumerate() {
            let n = self
                .knot_vector
                .evaluate_base_function_derivative(t, i, self.degree, order)?;
            for (c, p) in coords.iter_mut().zip(point) {
                *c += n * p;
            }
        }
        Ok(CurvePoint::from_coordinates(coords))
    }

    fn find_span(&self, t: f64) -> Result<usize> {
        let t_point = KnotPoint::from(t);
        (self.degree..self.points.len())
            .find(|&i| {
                self.get_knot_coefficients(i) <= t_point
                    && t_point <= self.get_knot_coefficients(i + 1)
            })
            .ok_or_else(|| NumanError::Domain(format!("argument {} out of range", t)))
    }

    fn blend(&self, t: f64, degree: usize, coord: usize, index: usize) -> Fraction {
        self.cache
            .get_or_insert_with((float_key(t), degree, coord, index), || {
                self.expand_blend(t, degree, coord, index)
            })
    }

    fn expand_blend(&self, t: f64, degree: usize, coord: usize, index: usize) -> Fraction {
        if degree == 0 {
            return Fraction::from(self.points[index][coord]);
        }
        let left = self.get_knot(index);
        let right = self.get_knot(index + self.degree + 1 - degree);
        let ratio = (Expr::Number(t) - left.clone()) / (Expr::from(right) - left);

        let lower = self.blend(t, degree - 1, coord, index - 1);
        let upper = self.blend(t, degree - 1, coord, index);
        ((Expr::Number(1.0) - ratio.clone()) * lower + ratio * upper).simplify()
    }
}

impl Validate for BSpline {
    fn validate(&self) -> Result<()> {
        if self.degree < 1 {
            return Err(NumanError::Construction(
                "B-spline degree must be at least 1".into(),
            ));
        }
        let dimension = match self.points.first() {
            Some(p) if !p.is_empty() => p.len(),
            _ => {
                return Err(NumanError::Construction(
                    "B-spline needs at least one non-empty control point".into(),
                ))
            }
        };
        if let Some(i) = self.points.iter().position(|p| p.len() != dimension) {
            return Err(NumanError::Construction(format!(
                "control point {} has {} coordinates, expected {}",
                i,
                self.points[i].len(),
                dimension
            )));
        }
        if self.knot_vector.len() != self.points.len() + self.degree + 1 {
            return Err(NumanError::Construction(format!(
                "knot vector length must be n + p + 1, got {} knots for {} control points with degree {}",
                self.knot_vector.len(),
                self.points.len(),
                self.degree
            )));
        }
        Ok(())
    }
}

impl Curve for BSpline {
    type Point = CurvePoint;

    fn point_at(&self, t: f64) -> Result<CurvePoint> {
        self.evaluate(t)
    }

    fn domain(&self) -> Interval {
        self.knot_vector.domain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clamped_cubic() -> BSpline {
        BSpline::new(
            [0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
            3,
            vec![0.0, 0.0, 0.0, 0.0, 1.0, 4.0, 5.0, 5.0, 5.0, 5.0],
        )
        .unwrap()
    }

    #[test]
    fn test_endpoints_interpolate() {
        let spline = clamped_cubic();
        assert_eq!(spline.evaluate(0.0).unwrap(), CurvePoint::Scalar(0.0));
        assert_eq!(spline.evaluate(5.0).unwrap(), CurvePoint::Scalar(5.0));
    }

    #[test]
    fn test_out_of_domain() {
        let spline = clamped_cubic();
        assert!(matches!(spline.evaluate(5.5), Err(NumanError::Domain(_))));
        assert!(matches!(spline.evaluate(-0.1), Err(NumanError::Domain(_))));
        assert!(matches!(spline.derivative(6.0, 1), Err(NumanError::Domain(_))));
    }

    #[test]
    fn test_construction_errors() {
        let short = BSpline::new([0.0, 1.0, 2.0], 3, vec![0.0, 0.0, 1.0, 1.0]);
        assert!(matches!(short, Err(NumanError::Construction(_))));

        let flat = BSpline::new([0.0, 1.0], 0, vec![0.0, 1.0, 2.0]);
        assert!(matches!(flat, Err(NumanError::Construction(_))));

        let ragged = BSpline::new(
            vec![vec![0.0, 0.0], vec![1.0]],
            1,
            vec![0.0, 0.0, 1.0, 1.0],
        );
        assert!(matches!(ragged, Err(NumanError::Construction(_))));

        let empty = BSpline::new(Vec::<f64>::new(), 1, vec![0.0, 1.0]);
        assert!(empty.is_err());
    }

    #[test]
    fn test_planar_linear_segment() {
        let spline = BSpline::new(
            [DVec2::new(0.0, 0.0), DVec2::new(2.0, 4.0)],
            1,
            vec![0.0, 0.0, 1.0, 1.0],
        )
        .unwrap();
        assert_eq!(spline.dimension(), 2);
        assert_eq!(spline.evaluate(0.5).unwrap(), CurvePoint::Vector(vec![1.0, 2.0]));
        assert_eq!(spline.point_at(1.0).unwrap().into_vec(), vec![2.0, 4.0]);
        assert_eq!(spline.domain(), Interval::new(0.0, 1.0));
    }

    #[test]
    fn test_first_derivative_of_linear_segment() {
        let spline = BSpline::new([1.0, 3.0], 1, vec![0.0, 0.0, 2.0, 2.0]).unwrap();
        let d = spline.derivative(0.5, 1).unwrap().as_scalar().unwrap();
        assert!((d - 1.0).abs() < 1e-12);
        let v = spline.derivative(0.5, 0).unwrap().as_scalar().unwrap();
        assert!((v - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_uncached_matches_cached() {
        let knots = vec![0.0, 0.0, 0.0, 0.0, 1.0, 4.0, 5.0, 5.0, 5.0, 5.0];
        let points = [0.0, 2.0, -1.0, 3.0, 4.0, 1.0];
        let cached = BSpline::new(points, 3, knots.clone()).unwrap();
        let uncached =
            BSpline::with_cache_config(points, 3, knots, CacheConfig::disabled()).unwrap();
        for t in [0.3, 1.0, 2.5, 4.75] {
            assert_eq!(cached.evaluate(t).unwrap(), uncached.evaluate(t).unwrap());
        }
    }
}
