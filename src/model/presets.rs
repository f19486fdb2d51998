use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::system::{Model, ModelBuilder};
use crate::error::{Error, Result};
use crate::state::{SimConfig, StateVector};

// ---------------------------------------------------------------------------
// Reference constants
// ---------------------------------------------------------------------------

/// SIR transmission rate used when none is supplied.
pub const SIR_B: f64 = 1.0;
/// SIR recovery rate used when none is supplied.
pub const SIR_G: f64 = 0.2;
/// Initial susceptible fraction; the infected fraction is `1 - SIR_S0`.
pub const SIR_S0: f64 = 0.9999;

// ---------------------------------------------------------------------------
// Preset models
// ---------------------------------------------------------------------------

/// Scalar ODE `df/dx = cos(x)`, `f(0) = 0`. Exact solution `sin(x)`.
pub fn cosine() -> Model {
    ModelBuilder::new("cosine")
        .equation("f", 0.0, |_: &StateVector, x: f64| x.cos())
        .build()
}

/// Uncoupled 3-equation system `(sin x, x, cos x)` starting from `[1, 1, 1]`.
pub fn three_equation() -> Model {
    ModelBuilder::new("system")
        .equation("f0", 1.0, |_: &StateVector, x: f64| x.sin())
        .equation("f1", 1.0, |_: &StateVector, x: f64| x)
        .equation("f2", 1.0, |_: &StateVector, x: f64| x.cos())
        .build()
}

/// SIR compartment model with transmission rate `b` and recovery rate `g`.
///
/// ```text
/// dS/dt = -b S I
/// dI/dt =  b S I - g I
/// dR/dt =  g I
/// ```
///
/// Populations are fractions, so `S + I + R = 1` initially and stays there
/// analytically.
pub fn sir(b: f64, g: f64) -> Model {
    ModelBuilder::new("sir")
        .param("b", b)
        .param("g", g)
        .equation("S", SIR_S0, move |f: &StateVector, _t: f64| -b * f[0] * f[1])
        .equation("I", 1.0 - SIR_S0, move |f: &StateVector, _t: f64| {
            b * f[0] * f[1] - g * f[1]
        })
        .equation("R", 0.0, move |f: &StateVector, _t: f64| g * f[1])
        .build()
}

// ---------------------------------------------------------------------------
// Model selection by name
// ---------------------------------------------------------------------------

/// Named parameter overrides, e.g. `{"b": 0.8}`.
pub type ModelParams = BTreeMap<String, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Cosine,
    ThreeEquation,
    Sir,
}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [ModelKind::Cosine, ModelKind::ThreeEquation, ModelKind::Sir];

    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::Cosine => "cosine",
            ModelKind::ThreeEquation => "system",
            ModelKind::Sir => "sir",
        }
    }

    /// Parameter names the model accepts.
    pub fn param_names(&self) -> &'static [&'static str] {
        match self {
            ModelKind::Cosine | ModelKind::ThreeEquation => &[],
            ModelKind::Sir => &["b", "g"],
        }
    }

    /// Domain each model was designed for.
    pub fn default_config(&self) -> SimConfig {
        match self {
            ModelKind::Cosine | ModelKind::ThreeEquation => SimConfig::default(),
            ModelKind::Sir => SimConfig::new(500, 0.0, 20.0),
        }
    }

    /// Bind parameters and build the model. Missing parameters take their
    /// defaults; names the model does not know are rejected.
    pub fn build(&self, params: &ModelParams) -> Result<Model> {
        if let Some(name) = params.keys().find(|k| !self.param_names().contains(&k.as_str())) {
            return Err(Error::UnknownParameter {
                model: self.name().to_string(),
                name: name.clone(),
            });
        }

        Ok(match self {
            ModelKind::Cosine => cosine(),
            ModelKind::ThreeEquation => three_equation(),
            ModelKind::Sir => {
                let b = params.get("b").copied().unwrap_or(SIR_B);
                let g = params.get("g").copied().unwrap_or(SIR_G);
                sir(b, g)
            }
        })
    }
}

impl FromStr for ModelKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cosine" | "cos" | "scalar" => Ok(ModelKind::Cosine),
            "system" | "three" => Ok(ModelKind::ThreeEquation),
            "sir" => Ok(ModelKind::Sir),
            _ => Err(Error::UnknownModel(s.to_string())),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
