use std::io::{self, Write};

use crate::model::Model;
use crate::sim::Solution;
use super::escape_json;

/// Per-component statistics over a trajectory.
#[derive(Debug, Clone)]
pub struct ComponentSummary {
    pub label: String,
    pub initial: f64,
    pub last: f64,
    pub min: f64,
    pub max: f64,
    pub argmax_x: f64,
}

/// Summary statistics computed from a solution.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub steps: usize,
    pub dx: f64,
    pub x_min: f64,
    pub x_max: f64,
    pub components: Vec<ComponentSummary>,
    /// Largest `|sum(state_i) - sum(state_0)|` over the run. Zero for models
    /// whose slopes cancel, such as SIR, up to rounding.
    pub sum_drift: f64,
    /// Whether any sample holds NaN or infinity.
    pub diverged: bool,
}

impl RunSummary {
    /// Compute summary from solution data.
    pub fn from_solution(solution: &Solution) -> Self {
        let traj = &solution.trajectory;
        let grid = &solution.grid;

        let components = (0..traj.node())
            .map(|k| {
                let series = traj.component(k).unwrap_or_default();
                let (argmax, max) = series
                    .iter()
                    .copied()
                    .enumerate()
                    .fold((0, f64::NEG_INFINITY), |best, (i, v)| if v > best.1 { (i, v) } else { best });
                ComponentSummary {
                    label: solution.labels.get(k).cloned().unwrap_or_else(|| format!("f{}", k)),
                    initial: series[0],
                    last: series[series.len() - 1],
                    min: series.iter().copied().fold(f64::INFINITY, f64::min),
                    max,
                    argmax_x: grid[argmax],
                }
            })
            .collect();

        let sum0: f64 = traj.iter().next().map_or(0.0, |s| s.iter().sum());
        let sum_drift = traj
            .iter()
            .map(|s| (s.iter().sum::<f64>() - sum0).abs())
            .fold(0.0_f64, f64::max);

        RunSummary {
            steps: grid.steps(),
            dx: grid.dx(),
            x_min: grid.first(),
            x_max: grid.last(),
            components,
            sum_drift,
            diverged: traj.as_matrix().iter().any(|v| !v.is_finite()),
        }
    }
}

fn number(v: f64) -> String {
    // JSON has no NaN/Infinity literals
    if v.is_finite() { format!("{}", v) } else { "null".into() }
}

/// Write run summary as JSON to a writer.
pub fn write_summary<W: Write>(
    writer: &mut W,
    model: &Model,
    summary: &RunSummary,
) -> io::Result<()> {
    writeln!(writer, "{{")?;
    writeln!(writer, "  \"model\": {{")?;
    writeln!(writer, "    \"name\": \"{}\",", escape_json(&model.name))?;
    writeln!(writer, "    \"equations\": {},", model.node())?;
    write!(writer, "    \"params\": {{")?;
    for (i, (name, value)) in model.params.iter().enumerate() {
        let sep = if i == 0 { "" } else { ", " };
        write!(writer, "{}\"{}\": {}", sep, escape_json(name), number(*value))?;
    }
    writeln!(writer, "}}")?;
    writeln!(writer, "  }},")?;
    writeln!(writer, "  \"domain\": {{")?;
    writeln!(writer, "    \"steps\": {},", summary.steps)?;
    writeln!(writer, "    \"dx\": {},", number(summary.dx))?;
    writeln!(writer, "    \"x_min\": {},", number(summary.x_min))?;
    writeln!(writer, "    \"x_max\": {}", number(summary.x_max))?;
    writeln!(writer, "  }},")?;
    writeln!(writer, "  \"components\": [")?;
    for (i, c) in summary.components.iter().enumerate() {
        let sep = if i + 1 == summary.components.len() { "" } else { "," };
        writeln!(
            writer,
            "    {{\"label\": \"{}\", \"initial\": {}, \"final\": {}, \"min\": {}, \"max\": {}, \"argmax_x\": {}}}{}",
            escape_json(&c.label),
            number(c.initial),
            number(c.last),
            number(c.min),
            number(c.max),
            number(c.argmax_x),
            sep,
        )?;
    }
    writeln!(writer, "  ],")?;
    writeln!(writer, "  \"sum_drift\": {},", number(summary.sum_drift))?;
    writeln!(writer, "  \"diverged\": {}", summary.diverged)?;
    writeln!(writer, "}}")?;
    Ok(())
}

/// Write run summary JSON to a file.
pub fn write_summary_file(path: &str, model: &Model, summary: &RunSummary) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, model, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{presets, ModelBuilder, ModelKind};
    use crate::sim::integrate;
    use crate::state::{SimConfig, StateVector};

    #[test]
    fn summary_finds_epidemic_peak() {
        let m = presets::sir(presets::SIR_B, presets::SIR_G);
        let sol = integrate(&m, &ModelKind::Sir.default_config()).unwrap();
        let s = RunSummary::from_solution(&sol);

        assert_eq!(s.steps, 500);
        assert!((s.dx - 0.04).abs() < 1e-15);
        let infected = &s.components[1];
        assert_eq!(infected.label, "I");
        assert!(infected.argmax_x > 0.0 && infected.argmax_x < 20.0);
        assert!(infected.max > infected.last);
        assert!(s.sum_drift < 1e-9);
        assert!(!s.diverged);
    }

    #[test]
    fn json_output_is_valid() {
        let m = presets::sir(0.5, 0.1);
        let sol = integrate(&m, &ModelKind::Sir.default_config()).unwrap();
        let summary = RunSummary::from_solution(&sol);

        let mut buf = Vec::new();
        write_summary(&mut buf, &m, &summary).unwrap();
        let json = String::from_utf8(buf).unwrap();
        assert!(json.contains("\"name\": \"sir\""));
        assert!(json.contains("\"params\": {\"b\": 0.5, \"g\": 0.1}"));
        assert!(json.contains("\"label\": \"R\""));
        assert!(json.trim_end().ends_with('}'));
    }

    #[test]
    fn quotes_and_backslashes_are_escaped() {
        let m = ModelBuilder::new(r#"my "model""#)
            .param(r#"k"1"#, 2.0)
            .equation(r"a\b", 1.0, |_: &StateVector, _x: f64| 0.0)
            .build();
        let sol = integrate(&m, &SimConfig::new(2, 0.0, 1.0)).unwrap();
        let summary = RunSummary::from_solution(&sol);

        let mut buf = Vec::new();
        write_summary(&mut buf, &m, &summary).unwrap();
        let json = String::from_utf8(buf).unwrap();
        assert!(json.contains(r#""name": "my \"model\"","#), "name not escaped:\n{}", json);
        assert!(json.contains(r#""params": {"k\"1": 2}"#), "param not escaped:\n{}", json);
        assert!(json.contains(r#""label": "a\\b""#), "label not escaped:\n{}", json);
    }

    #[test]
    fn non_finite_values_become_null() {
        assert_eq!(number(f64::NAN), "null");
        assert_eq!(number(2.5), "2.5");
    }
}
