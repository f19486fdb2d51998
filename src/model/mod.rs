pub mod system;
pub mod presets;

pub use system::{Model, ModelBuilder, Rhs};
pub use presets::{ModelKind, ModelParams};
