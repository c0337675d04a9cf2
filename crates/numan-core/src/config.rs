//! Tolerances and iteration budgets shared by the numerical routines.

/// Numeric thresholds used when reducing symbolic expressions and comparing results.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Numerator coefficients below this magnitude are treated as round-off
    /// during the second pass of a limit.
    pub limit_residue: f64,
    /// Absolute tolerance for comparing evaluated values.
    pub comparison: f64,
}

impl Tolerance {
    pub const DEFAULT_LIMIT_RESIDUE: f64 = 1e-20;
    pub const DEFAULT_COMPARISON: f64 = 1e-9;

    pub fn new(limit_residue: f64, comparison: f64) -> Self {
        Self {
            limit_residue,
            comparison,
        }
    }

    pub fn default_precision() -> Self {
        Self {
            limit_residue: Self::DEFAULT_LIMIT_RESIDUE,
            comparison: Self::DEFAULT_COMPARISON,
        }
    }

    /// Check if two values are equal within the comparison tolerance
    pub fn approx_eq(self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.comparison
    }

    /// Check if a limit residue is small enough to be cancelled
    pub fn is_residue(self, v: f64) -> bool {
        v.abs() < self.limit_residue
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_precision()
    }
}

/// Step budget and stopping tolerance for iterative drivers.
///
/// A `tolerance` of `0.0` means iteration stops only when a step reproduces
/// its input exactly.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IterationConfig {
    pub max_steps: usize,
    pub tolerance: f64,
}

impl IterationConfig {
    pub fn new(max_steps: usize, tolerance: f64) -> Self {
        Self {
            max_steps,
            tolerance,
        }
    }

    pub fn fixed_point() -> Self {
        Self {
            max_steps: 100,
            tolerance: 0.0,
        }
    }

    /// Budget for bracketing root finders: stop once the bracket is narrower
    /// than `tolerance`.
    pub fn bracketing() -> Self {
        Self {
            max_steps: 1000,
            tolerance: 1e-8,
        }
    }

    pub fn eigen() -> Self {
        Self {
            max_steps: 1000,
            tolerance: 1e-5,
        }
    }

    pub fn with_max_steps(self, max_steps: usize) -> Self {
        Self { max_steps, ..self }
    }

    pub fn with_tolerance(self, tolerance: f64) -> Self {
        Self { tolerance, ..self }
    }
}

impl Default for IterationConfig {
    fn default() -> Self {
        Self::fixed_point()
    }
}

/// Capacity of a per-instance memoization cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CacheConfig {
    pub capacity: usize,
}

impl CacheConfig {
    pub const DEFAULT_CAPACITY: usize = 1000;

    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    pub fn disabled() -> Self {
        Self { capacity: 0 }
    }

    pub fn is_enabled(self) -> bool {
        self.capacity > 0
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: Self::DEFAULT_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tolerance_residue() {
        let tol = Tolerance::default();
        assert!(tol.is_residue(1e-21));
        assert!(!tol.is_residue(1e-19));
        assert!(tol.approx_eq(1.0, 1.0 + 1e-12));
    }

    #[test]
    fn test_iteration_presets() {
        assert_eq!(IterationConfig::default(), IterationConfig::fixed_point());
        let cfg = IterationConfig::bracketing().with_max_steps(10);
        assert_eq!(cfg.max_steps, 10);
        assert_eq!(cfg.tolerance, 1e-8);
    }

    #[test]
    fn test_config_json_roundtrip() {
        let cfg = IterationConfig::eigen();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: IterationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);

        let cache: CacheConfig = serde_json::from_str(r#"{"capacity":0}"#).unwrap();
        assert!(!cache.is_enabled());
    }
}
