//! One-dimensional cell arena.
//!
//! Cells are stored contiguously by index; the west and east neighbours of
//! cell `i` are `i - 1` and `i + 1` when they exist.

use uom::si::{f64::Length, length::meter};

use super::ConfigError;

/// Allowed gap between the summed cell widths and the span, relative to
/// spans longer than a metre and absolute below.
const WIDTH_SUM_TOLERANCE: f64 = 1e-9;

/// A finite-volume cell.
///
/// All lengths are in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub index: usize,

    /// Node position where the temperature is evaluated.
    pub position: f64,
    pub start: f64,
    pub end: f64,
    pub width: f64,
}

/// Ordered cells covering `[start, end]`.
#[derive(Debug, Clone)]
pub struct Mesh {
    cells: Vec<Cell>,
}

impl Mesh {
    /// Builds an equidistant mesh of `count` cells over `[start, end]`.
    ///
    /// With `Δ = (end - start) / (count - 1)`, node `i` sits at `start + i·Δ`.
    /// The two end cells are half cells of width `Δ/2` whose nodes sit on the
    /// domain boundaries, and all interior cells have width `Δ`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCellCount`] for fewer than two cells,
    /// [`ConfigError::InvalidExtent`] for an empty or non-finite span, and
    /// [`ConfigError::MalformedMesh`] if the widths fail to cover the span.
    pub fn equidistant(start: f64, end: f64, count: usize) -> Result<Self, ConfigError> {
        if count < 2 {
            return Err(ConfigError::InvalidCellCount { count });
        }
        if !(start.is_finite() && end.is_finite() && start < end) {
            return Err(ConfigError::InvalidExtent {
                start: Length::new::<meter>(start),
                end: Length::new::<meter>(end),
            });
        }

        #[allow(clippy::cast_precision_loss)]
        let delta = (end - start) / (count - 1) as f64;
        let last = count - 1;

        // Face between node `i` and node `i + 1`.
        #[allow(clippy::cast_precision_loss)]
        let face = |i: usize| start + (i as f64 + 0.5) * delta;

        let cells: Vec<Cell> = (0..count)
            .map(|index| {
                #[allow(clippy::cast_precision_loss)]
                let (position, cell_start, cell_end, width) = match index {
                    0 => (start, start, face(0), delta / 2.0),
                    i if i == last => (end, face(i - 1), end, delta / 2.0),
                    i => (start + i as f64 * delta, face(i - 1), face(i), delta),
                };
                Cell {
                    index,
                    position,
                    start: cell_start,
                    end: cell_end,
                    width,
                }
            })
            .collect();

        let span = end - start;
        let covered: f64 = cells.iter().map(|cell| cell.width).sum();
        if (covered - span).abs() > WIDTH_SUM_TOLERANCE * span.max(1.0) {
            return Err(ConfigError::MalformedMesh {
                reached: Length::new::<meter>(start + covered),
                end: Length::new::<meter>(end),
            });
        }

        Ok(Self { cells })
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[must_use]
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// The previous cell, or `None` at the west end.
    #[must_use]
    pub fn west(&self, index: usize) -> Option<&Cell> {
        index.checked_sub(1).and_then(|i| self.cells.get(i))
    }

    /// The next cell, or `None` at the east end.
    #[must_use]
    pub fn east(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index + 1)
    }

    /// Start of the first cell.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.cells.first().map_or(0.0, |cell| cell.start)
    }

    /// End of the last cell.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.cells.last().map_or(0.0, |cell| cell.end)
    }

    /// Index of the cell whose node is closest to `x`.
    ///
    /// Ties go to the later cell, and positions past the last node clamp to
    /// the last cell.
    #[must_use]
    pub fn nearest(&self, x: f64) -> usize {
        let last = self.cells.len().saturating_sub(1);
        let Some(after) = self.cells.iter().position(|cell| cell.position > x) else {
            return last;
        };
        match self.west(after) {
            Some(before) if x - before.position < self.cells[after].position - x => before.index,
            _ => after,
        }
    }
}
