use nalgebra::DVector;

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// State vector: one value per dependent variable at a single grid point
// ---------------------------------------------------------------------------

pub type StateVector = DVector<f64>;

// ---------------------------------------------------------------------------
// Simulation config
// ---------------------------------------------------------------------------

/// Integration domain `[x_min, x_max]` split into `steps` equal intervals.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub steps: usize,
    pub x_min: f64,
    pub x_max: f64,
}

impl SimConfig {
    pub fn new(steps: usize, x_min: f64, x_max: f64) -> Self {
        Self { steps, x_min, x_max }
    }

    /// Step size `(x_max - x_min) / steps`. Zero for a zero-step run.
    pub fn dx(&self) -> f64 {
        if self.steps == 0 {
            0.0
        } else {
            (self.x_max - self.x_min) / self.steps as f64
        }
    }

    /// Bounds must be finite and strictly ordered. Does not look at `steps`.
    pub fn check_bounds(&self) -> Result<()> {
        if self.x_min.is_finite() && self.x_max.is_finite() && self.x_max > self.x_min {
            Ok(())
        } else {
            Err(self.invalid())
        }
    }

    /// Full check for user-supplied configuration: bounds plus `steps >= 1`.
    pub fn validate(&self) -> Result<()> {
        self.check_bounds()?;
        if self.steps == 0 {
            return Err(self.invalid());
        }
        Ok(())
    }

    fn invalid(&self) -> Error {
        Error::InvalidDomain {
            steps: self.steps as i64,
            x_min: self.x_min,
            x_max: self.x_max,
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            steps: 500,
            x_min: 0.0,
            x_max: std::f64::consts::FRAC_PI_2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_quarter_period() {
        let c = SimConfig::default();
        assert_eq!(c.steps, 500);
        assert!((c.dx() - std::f64::consts::FRAC_PI_2 / 500.0).abs() < 1e-15);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn reversed_bounds_rejected() {
        let c = SimConfig::new(10, 1.0, 0.0);
        assert!(matches!(c.check_bounds(), Err(Error::InvalidDomain { .. })));
        let c = SimConfig::new(10, 1.0, 1.0);
        assert!(c.check_bounds().is_err());
        let c = SimConfig::new(10, 0.0, f64::NAN);
        assert!(c.check_bounds().is_err());
    }

    #[test]
    fn zero_steps_fails_full_validation_only() {
        let c = SimConfig::new(0, 0.0, 1.0);
        assert!(c.check_bounds().is_ok());
        assert!(c.validate().is_err());
        assert_eq!(c.dx(), 0.0);
    }
}
