//! numan splines: B-spline basis functions over knot vectors with repeated
//! knots, B-spline/Bézier/natural cubic curves, and B-spline interpolation.

pub mod bspline;
pub mod curve;
pub mod memo;

pub use bspline::{
    chord_length_parameterization, interpolate_cubic, BSpline, ControlPoint, CurvePoint, KnotPoint,
    KnotVector,
};
pub use curve::{natural_cubic_spline, BezierCurve, Curve, NaturalCubicSpline};
pub use memo::MemoCache;
