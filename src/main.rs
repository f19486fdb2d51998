use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::Context;

use euler_ode::cli::{Cli, USAGE};
use euler_ode::io::json::{self, RunSummary};
use euler_ode::io::{csv, table};
use euler_ode::sim::event::{DivergenceDetector, EventDetector, EventKind, PeakDetector, SimEvent};
use euler_ode::sim::{self, Solution};
use euler_ode::Model;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse(std::env::args().skip(1))?;
    if cli.help {
        print!("{}", USAGE);
        return Ok(());
    }

    // -----------------------------------------------------------------------
    // Configuration: rejected here, before any step is taken
    // -----------------------------------------------------------------------
    let config = cli.config()?;
    let model = cli.build_model()?;

    if !cli.quiet {
        eprintln!(
            "integrating {} ({} equations) over [{}, {}] in {} steps, dx = {}",
            model.name,
            model.node(),
            config.x_min,
            config.x_max,
            config.steps,
            config.dx()
        );
    }

    // -----------------------------------------------------------------------
    // Run
    // -----------------------------------------------------------------------
    let mut detectors: Vec<Box<dyn EventDetector>> = Vec::new();
    if cli.events {
        detectors.push(Box::new(DivergenceDetector::new()));
        detectors.extend(
            (0..model.node()).map(|k| Box::new(PeakDetector::new(k)) as Box<dyn EventDetector>),
        );
    }
    let (solution, events) = sim::integrate_with(&model, &config, &mut detectors)?;

    for event in &events {
        eprintln!("{}", describe(event, &solution));
    }

    // -----------------------------------------------------------------------
    // Sinks
    // -----------------------------------------------------------------------
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if cli.report {
        print_report(&mut out, &model, &solution)?;
    } else {
        table::write_table(&mut out, &solution)?;
    }
    out.flush()?;

    if let Some(path) = &cli.csv {
        csv::write_trajectory_file(path, &solution)
            .with_context(|| format!("failed to write CSV to {}", path))?;
        if !cli.quiet {
            eprintln!("wrote {}", path);
        }
    }

    if let Some(path) = &cli.summary {
        let summary = RunSummary::from_solution(&solution);
        json::write_summary_file(path, &model, &summary)
            .with_context(|| format!("failed to write summary to {}", path))?;
        if !cli.quiet {
            eprintln!("wrote {}", path);
        }
    }

    Ok(())
}

fn describe(event: &SimEvent, solution: &Solution) -> String {
    let label = |k: usize| solution.labels.get(k).map_or("?", String::as_str);
    match &event.kind {
        EventKind::Divergence { component } => format!(
            "warning: {} became non-finite at x = {:.6} (step {}); values propagate unchanged",
            label(*component),
            event.x,
            event.index
        ),
        EventKind::Peak { component, value } => format!(
            "peak: {} = {:.6} at x = {:.6}",
            label(*component),
            value,
            solution.grid.get(event.index - 1).unwrap_or(event.x)
        ),
        EventKind::Threshold { component, level, rising } => format!(
            "threshold: {} crossed {} {} at x = {:.6}",
            label(*component),
            level,
            if *rising { "upward" } else { "downward" },
            event.x
        ),
    }
}

/// Formatted run report: parameters, per-component summary and a sampled table.
fn print_report<W: Write>(out: &mut W, model: &Model, solution: &Solution) -> io::Result<()> {
    let summary = RunSummary::from_solution(solution);

    writeln!(out)?;
    writeln!(out, "====================================================================")?;
    writeln!(out, "  EULER INTEGRATION — {}", model.name)?;
    writeln!(out, "====================================================================")?;
    writeln!(out)?;
    writeln!(out, "  Domain")?;
    writeln!(out, "  ──────────────────────────────────────────────────────────────────")?;
    writeln!(
        out,
        "  x:             [{:.4}, {:.4}]   steps: {:>6}   dx: {:.6}",
        summary.x_min, summary.x_max, summary.steps, summary.dx
    )?;
    for (name, value) in &model.params {
        writeln!(out, "  {:<14} {:>10.4}", format!("{}:", name), value)?;
    }
    writeln!(out)?;

    writeln!(out, "  Components")?;
    writeln!(out, "  ──────────────────────────────────────────────────────────────────")?;
    writeln!(
        out,
        "  {:>6}  {:>12}  {:>12}  {:>12}  {:>12}  {:>10}",
        "name", "initial", "final", "min", "max", "x @ max"
    )?;
    for c in &summary.components {
        writeln!(
            out,
            "  {:>6}  {:>12.6}  {:>12.6}  {:>12.6}  {:>12.6}  {:>10.4}",
            c.label, c.initial, c.last, c.min, c.max, c.argmax_x
        )?;
    }
    writeln!(out, "  Sum drift: {:.3e}{}", summary.sum_drift, if summary.diverged { "   (diverged)" } else { "" })?;
    writeln!(out)?;

    writeln!(out, "  Trajectory")?;
    writeln!(out, "  ──────────────────────────────────────────────────────────────────")?;
    write!(out, "  {:>10}", "x")?;
    for label in &solution.labels {
        write!(out, "  {:>12}", label)?;
    }
    writeln!(out)?;

    let n = solution.grid.len();
    let sample_interval = (n / 20).max(1);
    for (i, (x, state)) in solution.rows().enumerate() {
        if i % sample_interval != 0 && i != n - 1 {
            continue;
        }
        write!(out, "  {:>10.4}", x)?;
        for v in state {
            write!(out, "  {:>12.6}", v)?;
        }
        writeln!(out)?;
    }

    writeln!(out)?;
    writeln!(out, "  Integration: {} samples, {} equations", n, model.node())?;
    writeln!(out, "====================================================================")?;
    writeln!(out)?;
    Ok(())
}
