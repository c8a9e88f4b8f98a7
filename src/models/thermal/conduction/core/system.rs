//! Tridiagonal linear system stored as three bands and a right-hand side.

use nalgebra::DMatrix;

/// Coefficients of `A·T = b` for a tridiagonal `A`.
///
/// Row `i` reads `lower[i]·T[i-1] + diag[i]·T[i] + upper[i]·T[i+1] = rhs[i]`.
/// `lower[0]` and `upper[n-1]` are always zero and never read.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    lower: Vec<f64>,
    diag: Vec<f64>,
    upper: Vec<f64>,
    rhs: Vec<f64>,
}

/// Mutable view of one row.
///
/// `west` and `east` are `None` where the row has no neighbour.
#[derive(Debug)]
pub struct RowMut<'a> {
    pub west: Option<&'a mut f64>,
    pub center: &'a mut f64,
    pub east: Option<&'a mut f64>,
    pub rhs: &'a mut f64,
}

/// Copy of one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row {
    pub west: Option<f64>,
    pub center: f64,
    pub east: Option<f64>,
    pub rhs: f64,
}

impl LinearSystem {
    /// A zeroed system of `n` rows.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            lower: vec![0.0; n],
            diag: vec![0.0; n],
            upper: vec![0.0; n],
            rhs: vec![0.0; n],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.diag.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diag.is_empty()
    }

    /// Zeroes every coefficient.
    pub fn reset(&mut self) {
        for band in [&mut self.lower, &mut self.diag, &mut self.upper, &mut self.rhs] {
            band.fill(0.0);
        }
    }

    /// Mutable access to row `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    pub fn row_mut(&mut self, i: usize) -> RowMut<'_> {
        let last = self.len() - 1;
        RowMut {
            west: (i > 0).then_some(&mut self.lower[i]),
            center: &mut self.diag[i],
            east: (i < last).then_some(&mut self.upper[i]),
            rhs: &mut self.rhs[i],
        }
    }

    /// Copy of row `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    #[must_use]
    pub fn row(&self, i: usize) -> Row {
        let last = self.len() - 1;
        Row {
            west: (i > 0).then(|| self.lower[i]),
            center: self.diag[i],
            east: (i < last).then(|| self.upper[i]),
            rhs: self.rhs[i],
        }
    }

    #[must_use]
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    #[must_use]
    pub fn diag(&self) -> &[f64] {
        &self.diag
    }

    #[must_use]
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    #[must_use]
    pub fn rhs(&self) -> &[f64] {
        &self.rhs
    }

    /// The coefficient matrix as a dense `n × n` matrix.
    #[must_use]
    pub fn to_dense(&self) -> DMatrix<f64> {
        let n = self.len();
        DMatrix::from_fn(n, n, |i, j| {
            if i == j {
                self.diag[i]
            } else if j + 1 == i {
                self.lower[i]
            } else if i + 1 == j {
                self.upper[i]
            } else {
                0.0
            }
        })
    }
}
