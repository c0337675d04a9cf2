//! B-splines over knot vectors with repeated knots.

mod curve;
pub mod interpolate;
mod knot;

pub use curve::{BSpline, ControlPoint, CurvePoint};
pub use interpolate::{chord_length_parameterization, interpolate_cubic};
pub use knot::{KnotPoint, KnotVector};
