pub mod distance;
pub mod interval;

pub use glam::{dvec2, DVec2};
pub use nalgebra::{DMatrix, DVector};
pub use distance::Distance;
pub use interval::Interval;

pub type Point2 = DVec2;
pub type Matrix = DMatrix<f64>;
pub type Vector = DVector<f64>;
