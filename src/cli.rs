//! Command-line configuration for the `euler-ode` binary.

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::model::{Model, ModelKind, ModelParams};
use crate::state::SimConfig;

pub const USAGE: &str = "\
usage: euler-ode [MODEL] [OPTIONS]

models:
  cosine            df/dx = cos(x), f(0) = 0 on [0, pi/2]            (default)
  system            (sin x, x, cos x) from [1, 1, 1] on [0, pi/2]
  sir               SIR epidemic, S0 = 0.9999, I0 = 1 - S0 on [0, 20]

options:
  --steps N         number of Euler steps (N >= 1)
  --x-min A         domain start
  --x-max B         domain end
  --init a,b,..     initial state, one value per equation
  --param k=v       model parameter (sir: b, g); repeatable
  --csv PATH        also write the trajectory as CSV
  --summary PATH    also write a JSON run summary
  --events          report divergence and peaks on stderr
  --report          print a formatted report instead of the raw table
  --quiet           no progress lines on stderr
  -h, --help        show this help
";

/// Parsed command line. `None` fields fall back to the model's defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Cli {
    pub model: ModelKind,
    pub steps: Option<i64>,
    pub x_min: Option<f64>,
    pub x_max: Option<f64>,
    pub initial_state: Option<Vec<f64>>,
    pub params: ModelParams,
    pub csv: Option<String>,
    pub summary: Option<String>,
    pub events: bool,
    pub report: bool,
    pub quiet: bool,
    pub help: bool,
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            model: ModelKind::Cosine,
            steps: None,
            x_min: None,
            x_max: None,
            initial_state: None,
            params: ModelParams::new(),
            csv: None,
            summary: None,
            events: false,
            report: false,
            quiet: false,
            help: false,
        }
    }
}

fn parse_value<T: FromStr>(flag: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| Error::InvalidArgument(format!("{}: cannot parse `{}`", flag, raw)))
}

fn parse_list(flag: &str, raw: &str) -> Result<Vec<f64>> {
    raw.split(',').map(|v| parse_value(flag, v)).collect()
}

fn parse_param(raw: &str) -> Result<(String, f64)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| Error::InvalidArgument(format!("--param: expected name=value, got `{}`", raw)))?;
    Ok((name.trim().to_string(), parse_value("--param", value)?))
}

impl Cli {
    /// Parse arguments (without the program name). Accepts `--flag value` and
    /// `--flag=value`.
    pub fn parse<I>(args: I) -> Result<Cli>
    where
        I: IntoIterator<Item = String>,
    {
        let mut cli = Cli::default();
        let mut model_seen = false;
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((f, v)) if f.starts_with("--") => (f.to_string(), Some(v.to_string())),
                _ => (arg.clone(), None),
            };

            let mut value = || -> Result<String> {
                match inline.clone() {
                    Some(v) => Ok(v),
                    None => args
                        .next()
                        .ok_or_else(|| Error::InvalidArgument(format!("{} needs a value", flag))),
                }
            };

            match flag.as_str() {
                "-h" | "--help" => cli.help = true,
                "--events" => cli.events = true,
                "--report" => cli.report = true,
                "--quiet" | "-q" => cli.quiet = true,
                "--steps" => cli.steps = Some(parse_value("--steps", &value()?)?),
                "--x-min" | "--t-min" => cli.x_min = Some(parse_value("--x-min", &value()?)?),
                "--x-max" | "--t-max" => cli.x_max = Some(parse_value("--x-max", &value()?)?),
                "--init" => cli.initial_state = Some(parse_list("--init", &value()?)?),
                "--param" => {
                    let (name, v) = parse_param(&value()?)?;
                    cli.params.insert(name, v);
                }
                "--csv" => cli.csv = Some(value()?),
                "--summary" => cli.summary = Some(value()?),
                other if other.starts_with('-') && other.len() > 1 => {
                    return Err(Error::InvalidArgument(format!("unknown option `{}`", other)));
                }
                name => {
                    if model_seen {
                        return Err(Error::InvalidArgument(format!("unexpected argument `{}`", name)));
                    }
                    cli.model = name.parse()?;
                    model_seen = true;
                }
            }
        }

        Ok(cli)
    }

    /// Domain for this run: model defaults overridden by flags, fully validated.
    pub fn config(&self) -> Result<SimConfig> {
        let defaults = self.model.default_config();
        let x_min = self.x_min.unwrap_or(defaults.x_min);
        let x_max = self.x_max.unwrap_or(defaults.x_max);
        let steps = match self.steps {
            Some(n) if n <= 0 => return Err(Error::InvalidDomain { steps: n, x_min, x_max }),
            Some(n) => usize::try_from(n)
                .map_err(|_| Error::InvalidArgument(format!("--steps: {} is too large", n)))?,
            None => defaults.steps,
        };
        let config = SimConfig { steps, x_min, x_max };
        config.validate()?;
        Ok(config)
    }

    /// Model with parameters bound and the initial state overridden if given.
    pub fn build_model(&self) -> Result<Model> {
        let model = self.model.build(&self.params)?;
        Ok(match &self.initial_state {
            Some(init) => model.with_initial_state(init.clone()),
            None => model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli> {
        Cli::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults_to_cosine() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.model, ModelKind::Cosine);
        assert_eq!(cli.config().unwrap(), SimConfig::default());
    }

    #[test]
    fn full_command_line() {
        let cli = parse(&[
            "sir", "--steps", "1000", "--x-max=30", "--x-min", "-1", "--param", "b=0.8",
            "--param=g=0.3", "--init", "0.99,0.01,0", "--csv", "out.csv", "--events", "-q",
        ])
        .unwrap();
        assert_eq!(cli.model, ModelKind::Sir);
        assert_eq!(cli.config().unwrap(), SimConfig::new(1000, -1.0, 30.0));
        assert_eq!(cli.params.get("b"), Some(&0.8));
        assert_eq!(cli.params.get("g"), Some(&0.3));
        assert_eq!(cli.initial_state, Some(vec![0.99, 0.01, 0.0]));
        assert_eq!(cli.csv.as_deref(), Some("out.csv"));
        assert!(cli.events && cli.quiet && !cli.report);

        let model = cli.build_model().unwrap();
        assert_eq!(model.param("b"), Some(0.8));
        assert_eq!(model.initial_state, vec![0.99, 0.01, 0.0]);
    }

    #[test]
    fn model_defaults_apply() {
        let cli = parse(&["sir"]).unwrap();
        assert_eq!(cli.config().unwrap(), SimConfig::new(500, 0.0, 20.0));
    }

    #[test]
    fn non_positive_steps_is_invalid_domain() {
        let cli = parse(&["--steps", "0"]).unwrap();
        assert!(matches!(cli.config(), Err(Error::InvalidDomain { steps: 0, .. })));
        let cli = parse(&["sir", "--steps", "-5"]).unwrap();
        assert_eq!(
            cli.config().unwrap_err(),
            Error::InvalidDomain { steps: -5, x_min: 0.0, x_max: 20.0 }
        );
        let cli = parse(&["--x-min", "2", "--x-max", "1"]).unwrap();
        assert!(matches!(cli.config(), Err(Error::InvalidDomain { .. })));
    }

    #[test]
    fn bad_input_rejected() {
        assert!(matches!(parse(&["--steps", "1.5"]), Err(Error::InvalidArgument(_))));
        assert!(matches!(parse(&["--steps"]), Err(Error::InvalidArgument(_))));
        assert!(matches!(parse(&["--bogus"]), Err(Error::InvalidArgument(_))));
        assert!(matches!(parse(&["lorenz"]), Err(Error::UnknownModel(_))));
        assert!(matches!(parse(&["sir", "cosine"]), Err(Error::InvalidArgument(_))));
        assert!(matches!(parse(&["--param", "b"]), Err(Error::InvalidArgument(_))));
        assert!(matches!(parse(&["--init", "1,x"]), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn unknown_param_surfaces_on_build() {
        let cli = parse(&["cosine", "--param", "b=1"]).unwrap();
        assert!(matches!(cli.build_model(), Err(Error::UnknownParameter { .. })));
    }
}
