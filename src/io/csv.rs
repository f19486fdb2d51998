use std::io::{self, Write};

use crate::sim::Solution;
use super::csv_field;

/// Write trajectory data to CSV format.
///
/// Columns: x, then one column per model component, named by its label.
pub fn write_trajectory<W: Write>(writer: &mut W, solution: &Solution) -> io::Result<()> {
    let header: Vec<String> = solution.labels.iter().map(|l| csv_field(l)).collect();
    writeln!(writer, "x,{}", header.join(","))?;

    for (x, state) in solution.rows() {
        write!(writer, "{}", x)?;
        for v in state {
            write!(writer, ",{}", v)?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

/// Write trajectory to a CSV file at the given path.
pub fn write_trajectory_file(path: &str, solution: &Solution) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_trajectory(&mut file, solution)?;
    file.flush()
}
