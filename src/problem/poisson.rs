//! Dirichlet problem for the Poisson equation, -Δu = f in Ω, u = g on ∂Ω.
//!
//! The 5-point stencil is assembled on every node of the grid. Boundary rows are
//! then eliminated: their off-diagonals are zeroed and the right-hand side is set
//! to `a_cc g_c`, so the row reads `a_cc u_c = a_cc g_c`. Interior rows keep their
//! couplings to boundary nodes, and the initial guess carries the boundary
//! values, so every solver starts with a zero residual on the boundary.

use crate::error::SolverError;
use crate::matrix::SparseMatrix;
use crate::problem::grid::Grid2D;
use std::f64::consts::PI;
use std::fmt;

type Field = Box<dyn Fn(f64, f64) -> f64>;

/// Assembled system `A x = b` plus the initial guess `x0`.
#[derive(Debug, Clone)]
pub struct LinearSystem {
    pub a: SparseMatrix<f64>,
    pub b: Vec<f64>,
    pub x0: Vec<f64>,
}

pub struct PoissonProblem {
    grid: Grid2D,
    boundary: Field,
    source: Field,
    exact: Option<Field>,
}

impl PoissonProblem {
    pub fn new<G, F>(grid: Grid2D, boundary: G, source: F) -> Self
    where
        G: Fn(f64, f64) -> f64 + 'static,
        F: Fn(f64, f64) -> f64 + 'static,
    {
        Self { grid, boundary: Box::new(boundary), source: Box::new(source), exact: None }
    }

    /// Attach a known exact solution, enabling [`PoissonProblem::max_error`].
    pub fn with_exact<E>(mut self, exact: E) -> Self
    where
        E: Fn(f64, f64) -> f64 + 'static,
    {
        self.exact = Some(Box::new(exact));
        self
    }

    /// Manufactured problem with u = 1 + sin(2πx) sin(2πy).
    pub fn manufactured(grid: Grid2D) -> Self {
        let exact = |x: f64, y: f64| 1.0 + (2.0 * PI * x).sin() * (2.0 * PI * y).sin();
        Self::new(grid, exact, |x, y| {
            8.0 * PI * PI * (2.0 * PI * x).sin() * (2.0 * PI * y).sin()
        })
        .with_exact(exact)
    }

    pub fn grid(&self) -> &Grid2D {
        &self.grid
    }

    /// Stencil coefficients (a0, a1, a2): centre, x-neighbours, y-neighbours.
    pub fn stencil(&self) -> (f64, f64, f64) {
        let (dx, dy) = (self.grid.dx(), self.grid.dy());
        (
            2.0 / (dx * dx) + 2.0 / (dy * dy),
            -1.0 / (dx * dx),
            -1.0 / (dy * dy),
        )
    }

    pub fn assemble(&self) -> Result<LinearSystem, SolverError> {
        let g = &self.grid;
        let (nx, ny) = (g.nx, g.ny);
        let (a0, a1, a2) = self.stencil();

        let mut a = SparseMatrix::new(g.len());
        for (i, j) in g.nodes() {
            let c = g.index(i, j);
            a.set(c, c, a0)?;
            if i > 0 {
                a.set(c, c - 1, a1)?;
            }
            if i + 1 < nx {
                a.set(c, c + 1, a1)?;
            }
            if j > 0 {
                a.set(c, c - nx, a2)?;
            }
            if j + 1 < ny {
                a.set(c, c + nx, a2)?;
            }
        }
        a.close();

        let mut x0 = vec![0.0; g.len()];
        let mut b = vec![0.0; g.len()];
        for (i, j) in g.nodes() {
            let c = g.index(i, j);
            let (x, y) = (g.x(i), g.y(j));
            if g.is_boundary(i, j) {
                x0[c] = (self.boundary)(x, y);
                b[c] = a.diagonal(c) * x0[c];
                a.zero_off_diag(c);
            } else {
                b[c] = (self.source)(x, y);
            }
        }
        Ok(LinearSystem { a, b, x0 })
    }

    /// Max-norm error of `u` against the exact solution, if one is attached.
    pub fn max_error(&self, u: &[f64]) -> Option<f64> {
        let exact = self.exact.as_ref()?;
        let g = &self.grid;
        Some(
            g.nodes()
                .map(|(i, j)| (u[g.index(i, j)] - exact(g.x(i), g.y(j))).abs())
                .fold(0.0, f64::max),
        )
    }
}

impl fmt::Debug for PoissonProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoissonProblem")
            .field("grid", &self.grid)
            .field("has_exact", &self.exact.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_rows_are_eliminated() {
        let grid = Grid2D::unit_square(4, 4).unwrap();
        let problem = PoissonProblem::new(grid, |x, y| x + y, |_, _| 0.0);
        let sys = problem.assemble().unwrap();
        let (a0, a1, _) = problem.stencil();

        // bottom-left corner
        assert_eq!(sys.a.get(0, 1), 0.0);
        assert_eq!(sys.a.get(0, 0), a0);
        assert_eq!(sys.b[0], 0.0);
        // interior node (1, 1) still couples to its boundary neighbour
        let c = grid.index(1, 1);
        assert_eq!(sys.a.get(c, c - 1), a1);
        assert_eq!(sys.b[c], 0.0);
        // right boundary node carries g in both x0 and b
        let r = grid.index(3, 1);
        assert!((sys.x0[r] - (1.0 + 1.0 / 3.0)).abs() < 1e-14);
        assert!((sys.b[r] - a0 * sys.x0[r]).abs() < 1e-12);
    }

    #[test]
    fn interior_rhs_is_plain_source() {
        let grid = Grid2D::unit_square(5, 5).unwrap();
        let sys = PoissonProblem::new(grid, |_, _| 10.0, |_, _| 3.0).assemble().unwrap();
        for (i, j) in grid.nodes().filter(|&(i, j)| !grid.is_boundary(i, j)) {
            let c = grid.index(i, j);
            assert_eq!(sys.b[c], 3.0);
            assert_eq!(sys.x0[c], 0.0);
        }
    }

    #[test]
    fn linear_boundary_data_is_reproduced() {
        use crate::solver::{CgSolver, LinearSolver};

        // The 5-point stencil is exact for linear functions, so with f = 0 the
        // discrete solution is g itself at every node.
        let grid = Grid2D::unit_square(6, 5).unwrap();
        let problem = PoissonProblem::new(grid, |x, y| 2.0 * x - y + 1.0, |_, _| 0.0);
        let sys = problem.assemble().unwrap();
        let mut u = sys.x0.clone();
        let stats = CgSolver::new(1e-12, 200).solve(&sys.a, &sys.b, &mut u).unwrap();
        assert!(stats.converged);
        for (i, j) in grid.nodes() {
            let expected = 2.0 * grid.x(i) - grid.y(j) + 1.0;
            assert!((u[grid.index(i, j)] - expected).abs() < 1e-9, "node ({i}, {j})");
        }
    }

    #[test]
    fn boundary_residual_starts_at_zero() {
        let grid = Grid2D::unit_square(5, 6).unwrap();
        let sys = PoissonProblem::manufactured(grid).assemble().unwrap();
        let mut ax = vec![0.0; grid.len()];
        sys.a.multiply(&sys.x0, &mut ax).unwrap();
        for (i, j) in grid.nodes().filter(|&(i, j)| grid.is_boundary(i, j)) {
            let c = grid.index(i, j);
            assert!((sys.b[c] - ax[c]).abs() < 1e-9);
        }
    }

    #[test]
    fn max_error_needs_exact_solution() {
        let grid = Grid2D::unit_square(3, 3).unwrap();
        let plain = PoissonProblem::new(grid, |_, _| 0.0, |_, _| 1.0);
        assert!(plain.max_error(&[0.0; 9]).is_none());

        let manufactured = PoissonProblem::manufactured(grid);
        // 1 + sin(2πx) sin(2πy) is exactly 1 at every node of the 3x3 grid (up to rounding)
        let err = manufactured.max_error(&[1.0; 9]).unwrap();
        assert!(err < 1e-12);
    }
}
