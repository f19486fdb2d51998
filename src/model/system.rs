use std::fmt;

use crate::state::StateVector;

// ---------------------------------------------------------------------------
// Right-hand side of one equation: df_k/dx = F_k(f, x)
// ---------------------------------------------------------------------------

/// Right-hand side of a single equation of the system.
///
/// Receives the full state vector so that equations can be coupled, and the
/// current value of the independent variable. Any closure of the shape
/// `Fn(&StateVector, f64) -> f64` is an `Rhs`, so model parameters are
/// captured by the closure rather than read from globals.
pub trait Rhs {
    fn eval(&self, state: &StateVector, x: f64) -> f64;
}

impl<F> Rhs for F
where
    F: Fn(&StateVector, f64) -> f64,
{
    fn eval(&self, state: &StateVector, x: f64) -> f64 {
        self(state, x)
    }
}

// ---------------------------------------------------------------------------
// Model: ordered set of equations plus initial condition and parameters
// ---------------------------------------------------------------------------

pub struct Model {
    pub name: String,
    pub labels: Vec<String>,
    pub params: Vec<(String, f64)>,
    pub initial_state: Vec<f64>,
    equations: Vec<Box<dyn Rhs>>,
}

impl Model {
    /// Number of coupled equations.
    pub fn node(&self) -> usize {
        self.equations.len()
    }

    pub fn param(&self, name: &str) -> Option<f64> {
        self.params.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    pub fn initial_vector(&self) -> StateVector {
        StateVector::from_column_slice(&self.initial_state)
    }

    /// Slopes `[F_0(f, x), .., F_{n-1}(f, x)]`, all evaluated on the same `state`.
    pub fn derivatives(&self, state: &StateVector, x: f64) -> StateVector {
        StateVector::from_iterator(
            self.equations.len(),
            self.equations.iter().map(|f| f.eval(state, x)),
        )
    }

    /// Replace the initial condition. Length is checked when integrating.
    pub fn with_initial_state(mut self, initial_state: Vec<f64>) -> Self {
        self.initial_state = initial_state;
        self
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("name", &self.name)
            .field("labels", &self.labels)
            .field("params", &self.params)
            .field("initial_state", &self.initial_state)
            .field("equations", &self.equations.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Model builder
// ---------------------------------------------------------------------------

pub struct ModelBuilder {
    name: String,
    labels: Vec<String>,
    params: Vec<(String, f64)>,
    initial_state: Vec<f64>,
    initial_override: Option<Vec<f64>>,
    equations: Vec<Box<dyn Rhs>>,
}

impl ModelBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            labels: vec![],
            params: vec![],
            initial_state: vec![],
            initial_override: None,
            equations: vec![],
        }
    }

    /// Record a named parameter. Only used for reporting; equations capture
    /// their own copies.
    pub fn param(mut self, name: impl Into<String>, value: f64) -> Self {
        self.params.push((name.into(), value));
        self
    }

    /// Append an equation with its label and initial value.
    pub fn equation(mut self, label: impl Into<String>, initial: f64, rhs: impl Rhs + 'static) -> Self {
        self.labels.push(label.into());
        self.initial_state.push(initial);
        self.equations.push(Box::new(rhs));
        self
    }

    /// Override the per-equation initial values as a whole.
    pub fn initial_state(mut self, initial_state: Vec<f64>) -> Self {
        self.initial_override = Some(initial_state);
        self
    }

    pub fn build(self) -> Model {
        Model {
            name: self.name,
            labels: self.labels,
            params: self.params,
            initial_state: self.initial_override.unwrap_or(self.initial_state),
            equations: self.equations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decay(k: f64) -> Model {
        ModelBuilder::new("decay")
            .param("k", k)
            .equation("y", 2.0, move |f: &StateVector, _x: f64| -k * f[0])
            .build()
    }

    #[test]
    fn builder_collects_equations() {
        let m = decay(0.5);
        assert_eq!(m.node(), 1);
        assert_eq!(m.labels, vec!["y".to_string()]);
        assert_eq!(m.initial_state, vec![2.0]);
        assert_eq!(m.param("k"), Some(0.5));
        assert_eq!(m.param("missing"), None);
    }

    #[test]
    fn derivatives_use_captured_parameters() {
        let m = decay(0.5);
        let d = m.derivatives(&StateVector::from_vec(vec![4.0]), 0.0);
        assert_eq!(d[0], -2.0);
    }

    #[test]
    fn initial_state_override_wins() {
        let m = ModelBuilder::new("pair")
            .equation("a", 1.0, |_: &StateVector, _x: f64| 0.0)
            .equation("b", 1.0, |_: &StateVector, _x: f64| 0.0)
            .initial_state(vec![3.0, 4.0])
            .build();
        assert_eq!(m.initial_state, vec![3.0, 4.0]);
        let m = m.with_initial_state(vec![5.0]);
        assert_eq!(m.initial_vector().len(), 1);
    }

    #[test]
    fn debug_does_not_expose_closures() {
        let s = format!("{:?}", decay(1.0));
        assert!(s.contains("decay"));
        assert!(s.contains("equations: 1"));
    }
}
