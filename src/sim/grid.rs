use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Evenly spaced samples of the independent variable
// ---------------------------------------------------------------------------

/// `steps + 1` samples `x_i = x_min + i * dx`, `dx = (x_max - x_min) / steps`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    points: Vec<f64>,
    dx: f64,
}

impl Grid {
    /// Build the grid for `[x_min, x_max]` split into `steps` intervals.
    pub fn new(x_min: f64, x_max: f64, steps: usize) -> Result<Grid> {
        let ordered = x_min.is_finite() && x_max.is_finite() && x_max > x_min;
        if steps == 0 || !ordered {
            return Err(Error::InvalidDomain { steps: steps as i64, x_min, x_max });
        }

        let dx = (x_max - x_min) / steps as f64;
        let points = (0..=steps).map(|i| x_min + i as f64 * dx).collect();
        Ok(Grid { points, dx })
    }

    /// Degenerate single-sample grid used by zero-step runs.
    pub fn point(x: f64) -> Grid {
        Grid { points: vec![x], dx: 0.0 }
    }

    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Number of intervals (one less than the number of samples).
    pub fn steps(&self) -> usize {
        self.points.len() - 1
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn get(&self, i: usize) -> Option<f64> {
        self.points.get(i).copied()
    }

    pub fn first(&self) -> f64 {
        self.points[0]
    }

    pub fn last(&self) -> f64 {
        self.points[self.points.len() - 1]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().copied()
    }
}

impl std::ops::Index<usize> for Grid {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.points[i]
    }
}
