use euler_ode::io::table;
use euler_ode::{integrate, ModelBuilder, SimConfig, StateVector};

/// Damped harmonic oscillator x'' + 2 zeta w x' + w^2 x = 0 written as a
/// first-order system (position, velocity).
fn main() {
    let (w, zeta) = (2.0_f64, 0.1_f64);

    let model = ModelBuilder::new("oscillator")
        .param("w", w)
        .param("zeta", zeta)
        .equation("pos", 0.0, |f: &StateVector, _t: f64| f[1])
        .equation("vel", 0.0, move |f: &StateVector, _t: f64| {
            -2.0 * zeta * w * f[1] - w * w * f[0]
        })
        // released from rest at unit displacement
        .initial_state(vec![1.0, 0.0])
        .build();

    let config = SimConfig::new(2000, 0.0, 10.0);
    let solution = integrate(&model, &config).expect("valid configuration");

    let stdout = std::io::stdout();
    table::write_table(&mut stdout.lock(), &solution).expect("Failed to write table");
}
