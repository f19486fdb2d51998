use std::io::{self, Write};

use crate::sim::Solution;
use super::fixed;

/// Write the trajectory as whitespace-separated text, one grid point per line:
///
/// ```text
/// x f0 f1 ... f{n-1}
/// ```
///
/// Every value is printed with six decimals, as `printf("%f")` would.
pub fn write_table<W: Write>(writer: &mut W, solution: &Solution) -> io::Result<()> {
    for (x, state) in solution.rows() {
        write!(writer, "{}", fixed(x, 6))?;
        for v in state {
            write!(writer, " {}", fixed(*v, 6))?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{presets, ModelBuilder};
    use crate::sim::integrate;
    use crate::state::{SimConfig, StateVector};

    #[test]
    fn one_line_per_sample() {
        let sol = integrate(&presets::three_equation(), &SimConfig::new(4, 0.0, 1.0)).unwrap();
        let mut buf = Vec::new();
        write_table(&mut buf, &sol).unwrap();
        let out = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "0.000000 1.000000 1.000000 1.000000");
        assert_eq!(lines[1], "0.250000 1.000000 1.000000 1.250000");
        assert!(lines.iter().all(|l| l.split(' ').count() == 4));
    }

    #[test]
    fn scalar_rows_have_two_columns() {
        let sol = integrate(&presets::cosine(), &SimConfig::new(2, 0.0, 1.0)).unwrap();
        let mut buf = Vec::new();
        write_table(&mut buf, &sol).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out, "0.000000 0.000000\n0.500000 0.500000\n1.000000 0.938791\n");
    }

    #[test]
    fn nan_is_written_through() {
        let m = ModelBuilder::new("nan")
            .equation("y", 0.0, |_: &StateVector, _x: f64| f64::NAN)
            .build();
        let sol = integrate(&m, &SimConfig::new(1, 0.0, 1.0)).unwrap();
        let mut buf = Vec::new();
        write_table(&mut buf, &sol).unwrap();
        assert!(String::from_utf8(buf).unwrap().ends_with("1.000000 nan\n"));
    }
}
