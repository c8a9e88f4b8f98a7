//! Direct solvers for the tridiagonal system.

use nalgebra::DVector;
use thiserror::Error;

use super::system::LinearSystem;

/// Pivots smaller than this share of their row's magnitude count as zero.
const PIVOT_TOLERANCE: f64 = 1e-12;

/// The system has no unique solution.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("singular system: zero pivot in row {row}")]
pub struct Singular {
    pub row: usize,
}

/// Solves `A·T = b` for a tridiagonal system.
pub trait LinearSolver {
    /// Writes the solution into `solution`, which must have `system.len()` entries.
    ///
    /// # Errors
    ///
    /// Returns [`Singular`] if a pivot vanishes.
    fn solve(&self, system: &LinearSystem, solution: &mut [f64]) -> Result<(), Singular>;
}

/// Thomas algorithm, `O(n)`.
///
/// Stable without pivoting for diagonally dominant systems, which is what
/// the conduction balance produces once at least one cell is anchored.
#[derive(Debug, Clone, Copy, Default)]
pub struct Thomas;

impl LinearSolver for Thomas {
    fn solve(&self, system: &LinearSystem, solution: &mut [f64]) -> Result<(), Singular> {
        let n = system.len();
        debug_assert_eq!(solution.len(), n);
        if n == 0 {
            return Ok(());
        }

        let (a, b, c, d) = (system.lower(), system.diag(), system.upper(), system.rhs());
        let mut c_prime = vec![0.0; n];
        let x = solution;

        let mut previous_c = 0.0;
        let mut previous_d = 0.0;
        for i in 0..n {
            let west = if i > 0 { a[i] } else { 0.0 };
            let east = if i + 1 < n { c[i] } else { 0.0 };

            let pivot = b[i] - west * previous_c;
            let scale = b[i].abs() + west.abs() + east.abs();
            if pivot.is_nan() || pivot.abs() <= PIVOT_TOLERANCE * scale {
                return Err(Singular { row: i });
            }

            previous_c = east / pivot;
            previous_d = (d[i] - west * previous_d) / pivot;
            c_prime[i] = previous_c;
            x[i] = previous_d;
        }

        for i in (0..n - 1).rev() {
            x[i] -= c_prime[i] * x[i + 1];
        }

        Ok(())
    }
}

/// Dense LU factorisation with partial pivoting, `O(n³)`.
///
/// Slower than [`Thomas`] but tolerant of systems that are not diagonally
/// dominant. Useful as a cross-check on small meshes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenseLu;

impl LinearSolver for DenseLu {
    fn solve(&self, system: &LinearSystem, solution: &mut [f64]) -> Result<(), Singular> {
        let matrix = system.to_dense();
        let scale = matrix.amax();
        let lu = matrix.lu();

        let u = lu.u();
        let vanishing = |pivot: f64| pivot.is_nan() || pivot.abs() <= PIVOT_TOLERANCE * scale;
        if let Some(row) = (0..u.nrows()).find(|&i| vanishing(u[(i, i)])) {
            return Err(Singular { row });
        }

        let rhs = DVector::from_column_slice(system.rhs());
        let x = lu.solve(&rhs).ok_or(Singular { row: 0 })?;
        solution.copy_from_slice(x.as_slice());
        Ok(())
    }
}

/// Choice of linear solver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinearSolverKind {
    /// [`Thomas`].
    #[default]
    Banded,

    /// [`DenseLu`].
    Dense,
}

impl LinearSolver for LinearSolverKind {
    fn solve(&self, system: &LinearSystem, solution: &mut [f64]) -> Result<(), Singular> {
        match self {
            Self::Banded => Thomas.solve(system, solution),
            Self::Dense => DenseLu.solve(system, solution),
        }
    }
}
