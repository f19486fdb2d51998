use std::f64::consts::FRAC_PI_2;

use euler_ode::{integrate, presets, SimConfig};

/// First-order convergence of the scalar model: the error at x = pi/2 halves
/// each time the step count doubles.
fn main() {
    println!("{:>8}  {:>12}  {:>12}  {:>8}", "N", "dx", "|f(N) - 1|", "ratio");

    let mut previous: Option<f64> = None;
    for n in [125, 250, 500, 1000, 2000, 4000] {
        let solution = integrate(&presets::cosine(), &SimConfig::new(n, 0.0, FRAC_PI_2))
            .expect("valid configuration");
        let error = (solution.trajectory.final_state()[0] - 1.0).abs();
        let ratio = previous.map_or(String::from("-"), |p| format!("{:.3}", p / error));
        println!("{:>8}  {:>12.3e}  {:>12.3e}  {:>8}", n, FRAC_PI_2 / n as f64, error, ratio);
        previous = Some(error);
    }
}
