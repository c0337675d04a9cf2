//! Bézier curves over arbitrary-dimension control points.

use nalgebra::DVector;
use numan_core::error::{NumanError, Result};
use numan_math::Interval;

use super::Curve;

#[derive(Debug, Clone, PartialEq)]
pub struct BezierCurve {
    control_points: Vec<DVector<f64>>,
}

impl BezierCurve {
    pub fn new(control_points: Vec<DVector<f64>>) -> Result<Self> {
        let Some(first) = control_points.first() else {
            return Err(NumanError::Construction(
                "Bezier curve needs at least one control point".into(),
            ));
        };
        if control_points.iter().any(|p| p.len() != first.len()) {
            return Err(NumanError::Construction(
                "Bezier control points must share one dimension".into(),
            ));
        }
        Ok(Self { control_points })
    }

    pub fn control_points(&self) -> &[DVector<f64>] {
        &self.control_points
    }

    pub fn degree(&self) -> usize {
        self.control_points.len() - 1
    }

    /// The same curve with one more control point.
    pub fn degree_elevation(&self) -> Self {
        let old = &self.control_points;
        let n = old.len();
        let mut elevated = old.clone();
        elevated.push(old[n - 1].clone());
        for i in 1..n {
            elevated[i] = (&old[i - 1] * i as f64 + &old[i] * (n - i) as f64) / n as f64;
        }
        Self {
            control_points: elevated,
        }
    }
}

impl Curve for BezierCurve {
    type Point = DVector<f64>;

    /// De Casteljau evaluation.
    fn point_at(&self, t: f64) -> Result<DVector<f64>> {
        if !self.domain().contains(t) {
            return Err(NumanError::Domain(format!(
                "Bezier parameter {} is outside [0, 1]",
                t
            )));
        }
        let mut tmp = self.control_points.clone();
        while tmp.len() >= 2 {
            for i in 0..tmp.len() - 1 {
                tmp[i] = &tmp[i] * (1.0 - t) + &tmp[i + 1] * t;
            }
            tmp.pop();
        }
        Ok(tmp.swap_remove(0))
    }

    fn domain(&self) -> Interval {
        Interval::unit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quadratic() -> BezierCurve {
        BezierCurve::new(vec![
            DVector::from_vec(vec![0.0, 0.0]),
            DVector::from_vec(vec![0.5, 1.0]),
            DVector::from_vec(vec![1.0, 0.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_quadratic_midpoint() {
        let p = quadratic().point_at(0.5).unwrap();
        assert_relative_eq!(p[0], 0.5);
        assert_relative_eq!(p[1], 0.5);
    }

    #[test]
    fn test_degree_elevation_keeps_shape() {
        let curve = quadratic();
        let elevated = curve.degree_elevation();
        assert_eq!(elevated.degree(), 3);
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let a = curve.point_at(t).unwrap();
            let b = elevated.point_at(t).unwrap();
            assert!((a - b).norm() < 1e-12, "mismatch at t={}", t);
        }
    }

    #[test]
    fn test_outside_unit_interval() {
        assert!(matches!(quadratic().point_at(1.5), Err(NumanError::Domain(_))));
        assert!(BezierCurve::new(vec![]).is_err());
    }
}
