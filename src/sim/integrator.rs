use crate::model::Model;
use crate::state::StateVector;

// ---------------------------------------------------------------------------
// Explicit (forward) Euler step
// ---------------------------------------------------------------------------

/// Single Euler step: `f1[k] = f0[k] + F_k(f0, x0) * dx` for every equation.
///
/// All slopes are taken from the pre-step `state` before any component is
/// updated, so coupled equations see a consistent snapshot.
pub fn euler_step(state: &StateVector, x: f64, dx: f64, model: &Model) -> StateVector {
    let slopes = model.derivatives(state, x);
    state + slopes * dx
}
