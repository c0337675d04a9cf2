use glam::DVec2;
use nalgebra::DVector;

/// Distance between two successive iterates, used by convergence tests.
///
/// Vectors use the max norm, which cannot underflow to zero for distinct
/// iterates the way a sum of squares can.
pub trait Distance {
    fn distance(&self, other: &Self) -> f64;
}

impl Distance for f64 {
    fn distance(&self, other: &Self) -> f64 {
        (self - other).abs()
    }
}

impl Distance for DVector<f64> {
    fn distance(&self, other: &Self) -> f64 {
        if self.len() != other.len() {
            return f64::INFINITY;
        }
        (self - other).amax()
    }
}

impl Distance for DVec2 {
    fn distance(&self, other: &Self) -> f64 {
        (*self - *other).abs().max_element()
    }
}
