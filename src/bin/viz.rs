use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use euler_ode::cli::{Cli, USAGE};
use euler_ode::sim::{self, Solution};

fn main() -> eframe::Result {
    let solution = match solve() {
        Ok(solution) => solution,
        Err(err) => {
            eprintln!("error: {}\n\n{}", err, USAGE);
            std::process::exit(1);
        }
    };

    let app = SolutionViz { solution };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Euler ODE Integrator", options, Box::new(|_| Ok(Box::new(app))))
}

fn solve() -> euler_ode::Result<Solution> {
    let cli = Cli::parse(std::env::args().skip(1))?;
    let config = cli.config()?;
    let model = cli.build_model()?;
    sim::integrate(&model, &config)
}

struct SolutionViz {
    solution: Solution,
}

impl eframe::App for SolutionViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let sol = &self.solution;
        let step = (sol.grid.len() / 2000).max(1);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(format!("Model: {}", sol.model));
            ui.label(format!(
                "x in [{:.4}, {:.4}]  |  steps: {}  |  dx: {:.6}  |  components: {}",
                sol.grid.first(),
                sol.grid.last(),
                sol.grid.steps(),
                sol.grid.dx(),
                sol.labels.len(),
            ));
            if let Some(last) = sol.trajectory.state(sol.grid.steps()) {
                let values: Vec<String> = sol
                    .labels
                    .iter()
                    .zip(last.iter())
                    .map(|(label, v)| format!("{} = {:.6}", label, v))
                    .collect();
                ui.label(format!("final state at x = {:.4}:  {}", sol.grid.last(), values.join("  |  ")));
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            Plot::new("trajectory")
                .legend(Legend::default())
                .x_axis_label("x")
                .show(ui, |plot_ui| {
                    for (k, label) in sol.labels.iter().enumerate() {
                        let points: PlotPoints = sol
                            .rows()
                            .step_by(step)
                            .map(|(x, state)| [x, state[k]])
                            .collect();
                        plot_ui.line(Line::new(label.as_str(), points));
                    }
                });
        });
    }
}
