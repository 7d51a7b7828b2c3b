//! Solver agreement on the discrete Laplacian and sparse matrix properties.
//!
//! The main scenario is the 5-point Laplacian with unit spacing (a0 = 4,
//! a1 = a2 = -1) on a 5 x 5 grid, i.e. 3 x 3 interior unknowns, with fixed
//! boundary values and a source of all ones. Every method must reach the same
//! solution; only the iteration counts differ.

use approx::assert_abs_diff_eq;
use fdsolve::{
    Grid2D, LinearSolver, LinearSystem, PoissonProblem, SolverContext, SolverError, SolverKind,
    SorSolver, SparseMatrix,
};

fn unit_spacing_system() -> (Grid2D, LinearSystem) {
    let grid = Grid2D::new(5, 5, (0.0, 4.0), (0.0, 4.0)).unwrap();
    let problem = PoissonProblem::new(grid, |x, y| 0.25 * x - 0.5 * y, |_, _| 1.0);
    assert_eq!(problem.stencil(), (4.0, -1.0, -1.0));
    (grid, problem.assemble().unwrap())
}

fn residual_norm(a: &SparseMatrix<f64>, b: &[f64], x: &[f64]) -> f64 {
    let mut ax = vec![0.0; x.len()];
    a.multiply(x, &mut ax).unwrap();
    ax.iter().zip(b).map(|(axi, bi)| (bi - axi).powi(2)).sum::<f64>().sqrt()
}

#[test]
fn all_methods_reach_the_same_solution() {
    let (grid, sys) = unit_spacing_system();
    let mut solutions = Vec::new();
    let mut iterations = Vec::new();
    for kind in SolverKind::ALL {
        let ctx = SolverContext::new(kind, 1e-10, 10_000, 1.5);
        let mut u = sys.x0.clone();
        let stats = ctx.solve(&sys.a, &sys.b, &mut u).unwrap();
        assert!(stats.converged, "{kind} did not converge");
        assert!(residual_norm(&sys.a, &sys.b, &u) <= 1e-8);
        solutions.push(u);
        iterations.push(stats.iterations);
    }
    for u in &solutions[1..] {
        for (ui, ri) in u.iter().zip(&solutions[0]) {
            assert_abs_diff_eq!(*ui, *ri, epsilon = 1e-6);
        }
    }
    // Boundary values are untouched by every method.
    for (i, j) in grid.nodes().filter(|&(i, j)| grid.is_boundary(i, j)) {
        let c = grid.index(i, j);
        for u in &solutions {
            assert_abs_diff_eq!(u[c], sys.x0[c], epsilon = 1e-12);
        }
    }
    // Jacobi is the slowest of the four on this problem, CG the fastest.
    let (jacobi, cg) = (iterations[0], iterations[3]);
    assert!(iterations.iter().all(|&k| k <= jacobi && k >= cg), "{iterations:?}");
}

#[test]
fn sor_with_unit_omega_is_gauss_seidel() {
    let (_, sys) = unit_spacing_system();
    let n = sys.a.dim();
    let sweeps = 7;

    let mut expected = sys.x0.clone();
    for _ in 0..sweeps {
        for i in 0..n {
            let mut sigma = 0.0;
            for j in 0..n {
                if j != i {
                    sigma += sys.a.get(i, j) * expected[j];
                }
            }
            expected[i] = (sys.b[i] - sigma) / sys.a.get(i, i);
        }
    }

    let mut u = sys.x0.clone();
    let stats = SorSolver::new(0.0, sweeps, 1.0).solve(&sys.a, &sys.b, &mut u).unwrap();
    assert_eq!(stats.iterations, sweeps);
    for (ui, ei) in u.iter().zip(&expected) {
        assert_abs_diff_eq!(*ui, *ei, epsilon = 1e-12);
    }
}

#[test]
fn zero_off_diag_isolates_the_row() {
    let mut a = SparseMatrix::new(4);
    for i in 0..4 {
        a.set(i, i, 3.0 + i as f64).unwrap();
        for j in 0..4 {
            if j != i {
                a.set(i, j, -0.5 * (i + j) as f64).unwrap();
            }
        }
    }
    a.close();
    let x = vec![1.0, -2.0, 0.5, 4.0];
    let mut before = vec![0.0; 4];
    a.multiply(&x, &mut before).unwrap();

    a.zero_off_diag(2);
    let mut after = vec![0.0; 4];
    a.multiply(&x, &mut after).unwrap();

    assert_eq!(after[2], a.diagonal(2) * x[2]);
    for row in [0, 1, 3] {
        assert_eq!(after[row], before[row]);
    }
}

#[test]
fn exhausted_budget_returns_cap_for_every_method() {
    let (_, sys) = unit_spacing_system();
    for kind in SolverKind::ALL {
        let ctx = SolverContext::new(kind, 1e-14, 1, 1.5);
        let mut u = sys.x0.clone();
        let stats = ctx.solve(&sys.a, &sys.b, &mut u).unwrap();
        assert_eq!(stats.iterations, 1, "{kind}");
        assert!(!stats.converged, "{kind}");
    }
}

#[test]
fn open_matrix_is_rejected_by_every_method() {
    let mut a = SparseMatrix::new(3);
    for i in 0..3 {
        a.set(i, i, 2.0).unwrap();
    }
    let b = vec![1.0; 3];
    for kind in SolverKind::ALL {
        let ctx = SolverContext::new(kind, 1e-8, 10, 1.2);
        let mut x = vec![0.0; 3];
        let err = ctx.solve(&a, &b, &mut x);
        assert!(matches!(err, Err(SolverError::NotFinalized)), "{kind}: {err:?}");
        assert_eq!(x, vec![0.0; 3], "{kind}");
    }
}

#[test]
fn mismatched_lengths_are_rejected_by_every_method() {
    let (_, sys) = unit_spacing_system();
    let n = sys.b.len();
    for kind in SolverKind::ALL {
        let ctx = SolverContext::new(kind, 1e-8, 10, 1.2);
        let mut x = vec![0.0; n + 1];
        let err = ctx.solve(&sys.a, &sys.b, &mut x);
        assert!(
            matches!(err, Err(SolverError::DimensionMismatch { expected, found }) if expected == n && found == n + 1),
            "{kind}: {err:?}"
        );
    }
}

#[test]
fn zero_pivot_is_rejected_by_every_relaxation_method() {
    let mut a = SparseMatrix::new(3);
    a.set(0, 0, 2.0).unwrap();
    a.set(1, 0, 1.0).unwrap();
    a.set(2, 2, 2.0).unwrap();
    a.close();
    let b = vec![1.0; 3];
    for kind in SolverKind::ALL.into_iter().filter(|&k| k != SolverKind::Cg) {
        let ctx = SolverContext::new(kind, 1e-8, 10, 1.2);
        let mut x = vec![0.0; 3];
        let err = ctx.solve(&a, &b, &mut x);
        assert!(matches!(err, Err(SolverError::ZeroPivot(1))), "{kind}: {err:?}");
    }
}
