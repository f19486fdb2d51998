pub mod grid;
pub mod trajectory;
pub mod integrator;
pub mod runner;
pub mod event;

pub use grid::Grid;
pub use trajectory::Trajectory;
pub use integrator::euler_step;
pub use runner::{integrate, integrate_with, Solution};
