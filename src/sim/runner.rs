use crate::error::{Error, Result};
use crate::model::Model;
use crate::state::{SimConfig, StateVector};
use super::event::{EventDetector, SimEvent};
use super::grid::Grid;
use super::integrator::euler_step;
use super::trajectory::Trajectory;

// ---------------------------------------------------------------------------
// Solution: grid paired with the trajectory computed on it
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Solution {
    pub model: String,
    pub labels: Vec<String>,
    pub grid: Grid,
    pub trajectory: Trajectory,
}

impl Solution {
    /// Iterate over `(x_i, state_i)` pairs.
    pub fn rows(&self) -> impl Iterator<Item = (f64, &[f64])> + '_ {
        self.grid.iter().zip(self.trajectory.iter())
    }

    /// History of the component with the given label.
    pub fn series(&self, label: &str) -> Option<Vec<f64>> {
        let k = self.labels.iter().position(|l| l == label)?;
        self.trajectory.component(k)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn check_model(model: &Model) -> Result<()> {
    if model.node() == 0 {
        return Err(Error::EmptyModel(model.name.clone()));
    }
    if model.initial_state.len() != model.node() {
        return Err(Error::InvalidInitialCondition {
            expected: model.node(),
            got: model.initial_state.len(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Full integration loop
// ---------------------------------------------------------------------------

/// Integrate `model` over the configured domain with passive event detectors.
///
/// Every consecutive pair of samples is offered to each detector. Detectors
/// never alter the run. With `steps == 0` the trajectory is the initial
/// condition alone and no right-hand side is evaluated.
pub fn integrate_with(
    model: &Model,
    config: &SimConfig,
    detectors: &mut [Box<dyn EventDetector>],
) -> Result<(Solution, Vec<SimEvent>)> {
    config.check_bounds()?;
    check_model(model)?;

    let grid = if config.steps == 0 {
        Grid::point(config.x_min)
    } else {
        Grid::new(config.x_min, config.x_max, config.steps)?
    };
    let dx = grid.dx();

    let mut state: StateVector = model.initial_vector();
    let mut trajectory = Trajectory::with_initial(&state, grid.len());
    let mut events = Vec::new();

    for i in 1..grid.len() {
        let next = euler_step(&state, grid[i - 1], dx, model);

        for det in detectors.iter_mut() {
            if let Some(kind) = det.check(&state, &next) {
                events.push(SimEvent { index: i, x: grid[i], kind });
            }
        }

        trajectory.set_sample(i, &next);
        state = next;
    }

    let solution = Solution {
        model: model.name.clone(),
        labels: model.labels.clone(),
        grid,
        trajectory,
    };
    Ok((solution, events))
}

/// Integrate `model` over the configured domain.
pub fn integrate(model: &Model, config: &SimConfig) -> Result<Solution> {
    integrate_with(model, config, &mut []).map(|(solution, _)| solution)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
