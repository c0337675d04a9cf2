//! Curve trait and the non-B-spline curve types.

mod bezier;
mod cubic;

use numan_core::error::Result;
use numan_math::Interval;

pub use bezier::BezierCurve;
pub use cubic::{natural_cubic_spline, NaturalCubicSpline};

/// Trait for parametric curves.
pub trait Curve: Send + Sync {
    type Point;

    /// Evaluate the curve at parameter `t`.
    fn point_at(&self, t: f64) -> Result<Self::Point>;

    /// Return the parameter domain.
    fn domain(&self) -> Interval;
}
