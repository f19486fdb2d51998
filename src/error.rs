use thiserror::Error;

/// Configuration errors. All of them are raised before the first step is taken.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid domain: steps={steps}, x_min={x_min}, x_max={x_max} (need x_min < x_max, finite bounds, steps >= 1)")]
    InvalidDomain { steps: i64, x_min: f64, x_max: f64 },

    #[error("initial state has {got} components but the model has {expected} equations")]
    InvalidInitialCondition { expected: usize, got: usize },

    #[error("model `{0}` has no equations")]
    EmptyModel(String),

    #[error("unknown model `{0}` (expected one of: cosine, system, sir)")]
    UnknownModel(String),

    #[error("unknown parameter `{name}` for model `{model}`")]
    UnknownParameter { model: String, name: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;
