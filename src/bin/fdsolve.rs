//! Solve -Δu = f on the unit square with Dirichlet data and a chosen iterative method.
//!
//! Usage: `fdsolve <nx> <ny> <method> [max_iter] [--output PATH]`

use anyhow::Context;
use clap::Parser;
use clap::error::ErrorKind;
use fdsolve::{
    PoissonProblem, SolverContext, SolverKind, SolverOptions, Grid2D, LinearSystem, write_solution,
    DEFAULT_MAX_ITER,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Specify: nx, ny, solver (jacobi, sor, ssor, cg), max_iter\nExample: fdsolve 50 50 jacobi 5000";

#[derive(Parser, Debug)]
#[command(name = "fdsolve")]
#[command(about = "Finite-difference Poisson solver with Jacobi, SOR, SSOR and CG", long_about = None)]
struct Cli {
    /// Grid points in x, boundary included
    #[arg(value_parser = parse_grid_dim)]
    nx: usize,

    /// Grid points in y, boundary included
    #[arg(value_parser = parse_grid_dim)]
    ny: usize,

    /// Solver: jacobi, sor, ssor or cg
    method: SolverKind,

    /// Maximum number of iterations
    #[arg(default_value_t = DEFAULT_MAX_ITER, value_parser = parse_max_iter)]
    max_iter: usize,

    /// File the solution field is written to
    #[arg(short, long, default_value = "u.dat")]
    output: PathBuf,
}

fn parse_grid_dim(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(n) if n >= 2 => Ok(n),
        Ok(n) => Err(format!("grid dimension must be at least 2, got {n}")),
        Err(e) => Err(format!("invalid grid dimension '{s}': {e}")),
    }
}

fn parse_max_iter(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        Ok(_) => Err("max_iter must be positive".to_string()),
        Err(e) => Err(format!("invalid max_iter '{s}': {e}")),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let grid = Grid2D::unit_square(cli.nx, cli.ny)?;
    let problem = PoissonProblem::manufactured(grid);
    let LinearSystem { a, b, x0: mut u } = problem.assemble().context("assembling the Poisson system")?;
    info!(nx = cli.nx, ny = cli.ny, nnz = a.nnz(), "assembled system");

    let opts = SolverOptions { max_iter: cli.max_iter, ..Default::default() };
    let ctx = SolverContext::from_options(cli.method, &opts, grid.spacing());
    let stats = ctx.solve(&a, &b, &mut u)?;

    println!("Convergence tolerance = {:e}", opts.tol);
    println!("Number of iterations = {}", stats.iterations);
    if let Some(err) = problem.max_error(&u) {
        info!(max_error = err, converged = stats.converged, "error against exact solution");
    }

    write_solution(&cli.output, &grid, &u)
        .with_context(|| format!("writing solution to {}", cli.output.display()))?;
    println!("Saved solution into file {}", cli.output.display());
    Ok(())
}
