use crate::error::SolverError;
use crate::problem::grid::Grid2D;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write `u` as `x  y  u` lines, one block per grid row, blocks separated by a
/// blank line (the layout gnuplot's `splot` expects).
pub fn write_field<W: Write>(out: &mut W, grid: &Grid2D, u: &[f64]) -> Result<(), SolverError> {
    if u.len() != grid.len() {
        return Err(SolverError::DimensionMismatch { expected: grid.len(), found: u.len() });
    }
    for j in 0..grid.ny {
        let y = grid.y(j);
        for i in 0..grid.nx {
            writeln!(out, "{}  {}  {}", grid.x(i), y, u[grid.index(i, j)])?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Write the solution field to `path`, replacing any existing file.
pub fn write_solution<P: AsRef<Path>>(path: P, grid: &Grid2D, u: &[f64]) -> Result<(), SolverError> {
    let mut out = BufWriter::new(File::create(path)?);
    write_field(&mut out, grid, u)?;
    out.flush()?;
    Ok(())
}
