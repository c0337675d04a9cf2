use numan_core::error::{NumanError, Result};
use numan_core::traits::Validate;
use serde::{Deserialize, Serialize};

/// Closed interval `[start, end]` on the real line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn unit() -> Self {
        Self::new(0.0, 1.0)
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t <= self.end
    }

    /// Split at the midpoint into `(left, right)` halves.
    pub fn bisect(&self) -> (Self, Self) {
        let mid = self.midpoint();
        (Self::new(self.start, mid), Self::new(mid, self.end))
    }

    /// The `i`-th of `m` equal sub-intervals.
    pub fn subinterval(&self, i: usize, m: usize) -> Self {
        let h = self.length() / m as f64;
        Self::new(self.start + h * i as f64, self.start + h * (i + 1) as f64)
    }

    /// Map `t` to the unit parameter `(t - start) / length`.
    pub fn normalize(&self, t: f64) -> f64 {
        (t - self.start) / self.length()
    }
}

impl Validate for Interval {
    fn validate(&self) -> Result<()> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(NumanError::InvalidInput(format!(
                "interval [{}, {}] has a non-finite endpoint",
                self.start, self.end
            )));
        }
        if self.start > self.end {
            return Err(NumanError::InvalidInput(format!(
                "interval start {} exceeds end {}",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bisect() {
        let (l, r) = Interval::new(-1.0, 3.0).bisect();
        assert_eq!(l, Interval::new(-1.0, 1.0));
        assert_eq!(r, Interval::new(1.0, 3.0));
    }

    #[test]
    fn test_subinterval_and_normalize() {
        let iv = Interval::new(1.0, 2.0);
        let sub = iv.subinterval(3, 4);
        assert_relative_eq!(sub.start, 1.75);
        assert_relative_eq!(sub.end, 2.0);
        assert_relative_eq!(iv.normalize(1.5), 0.5);
        assert!(iv.contains(2.0));
        assert!(!iv.contains(2.0 + 1e-12));
    }

    #[test]
    fn test_validate() {
        assert!(Interval::unit().validate().is_ok());
        assert!(Interval::new(2.0, 1.0).validate().is_err());
        assert!(Interval::new(0.0, f64::NAN).validate().is_err());
    }
}
