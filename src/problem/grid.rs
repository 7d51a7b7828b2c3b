use crate::error::SolverError;

/// Uniform node-centred grid on `[xmin, xmax] x [ymin, ymax]`.
///
/// Nodes are numbered row by row, `c = i + j * nx`, with the boundary nodes
/// included. Both directions need at least two nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid2D {
    pub nx: usize,
    pub ny: usize,
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Grid2D {
    pub fn new(nx: usize, ny: usize, (xmin, xmax): (f64, f64), (ymin, ymax): (f64, f64)) -> Result<Self, SolverError> {
        if nx < 2 || ny < 2 {
            return Err(SolverError::InvalidGrid(format!(
                "need at least 2 nodes per direction, got {nx}x{ny}"
            )));
        }
        if !(xmax > xmin && ymax > ymin) {
            return Err(SolverError::InvalidGrid(format!(
                "empty domain [{xmin}, {xmax}] x [{ymin}, {ymax}]"
            )));
        }
        Ok(Self { nx, ny, xmin, xmax, ymin, ymax })
    }

    /// `nx x ny` nodes on the unit square.
    pub fn unit_square(nx: usize, ny: usize) -> Result<Self, SolverError> {
        Self::new(nx, ny, (0.0, 1.0), (0.0, 1.0))
    }

    pub fn dx(&self) -> f64 {
        (self.xmax - self.xmin) / (self.nx - 1) as f64
    }

    pub fn dy(&self) -> f64 {
        (self.ymax - self.ymin) / (self.ny - 1) as f64
    }

    /// Smallest mesh width, min(dx, dy).
    pub fn spacing(&self) -> f64 {
        self.dx().min(self.dy())
    }

    pub fn x(&self, i: usize) -> f64 {
        self.xmin + i as f64 * self.dx()
    }

    pub fn y(&self, j: usize) -> f64 {
        self.ymin + j as f64 * self.dy()
    }

    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        i + j * self.nx
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nx * self.ny
    }

    pub fn is_boundary(&self, i: usize, j: usize) -> bool {
        i == 0 || j == 0 || i + 1 == self.nx || j + 1 == self.ny
    }

    /// All nodes as `(i, j)`, row by row.
    pub fn nodes(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.ny).flat_map(move |j| (0..self.nx).map(move |i| (i, j)))
    }
}
