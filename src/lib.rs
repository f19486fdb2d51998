pub mod error;
pub mod state;
pub mod model;
pub mod sim;
pub mod io;
pub mod cli;

pub use error::{Error, Result};
pub use model::{presets, Model, ModelBuilder, ModelKind, ModelParams, Rhs};
pub use sim::{euler_step, integrate, integrate_with, Grid, Solution, Trajectory};
pub use state::{SimConfig, StateVector};
