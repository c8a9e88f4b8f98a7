//! Effective conductivity at the faces between neighbouring cells.

use crate::support::constraint::{Constrained, UnitInterval};

use super::{ConfigError, mesh::Mesh, resolve::CellProperties};

/// Scheme used to blend the conductivities of two neighbouring cells.
///
/// With interpolation factor `f` (the share of the node spacing that lies on
/// the neighbour's side of the face):
///
/// - arithmetic: `k = f·k_P + (1 − f)·k_N`
/// - harmonic: `k = 1 / ((1 − f)/k_P + f/k_N)`
///
/// The harmonic mean treats the two half spacings as thermal resistances in
/// series, which keeps the flux right across a material jump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Interpolation {
    Arithmetic,
    #[default]
    Harmonic,
}

impl Interpolation {
    /// Effective conductivity between a cell (`own`) and its neighbour.
    ///
    /// Equal conductivities are returned unchanged under either scheme.
    #[must_use]
    pub fn conductivity(
        self,
        factor: Constrained<f64, UnitInterval>,
        own: f64,
        neighbor: f64,
    ) -> f64 {
        if own == neighbor {
            return own;
        }
        let f = factor.into_inner();
        match self {
            Self::Arithmetic => f * own + (1.0 - f) * neighbor,
            Self::Harmonic => 1.0 / ((1.0 - f) / own + f / neighbor),
        }
    }
}

/// A face shared with one neighbour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interface {
    /// Node-to-node distance, m.
    pub distance: f64,

    /// Share of `distance` on the neighbour side of the face.
    pub factor: Constrained<f64, UnitInterval>,

    /// Effective conductivity, W/m·K.
    pub conductivity: f64,
}

impl Interface {
    /// Conductance per unit area, `k / δ` in W/m²·K.
    #[must_use]
    pub fn conductance(&self) -> f64 {
        self.conductivity / self.distance
    }
}

/// The west and east faces of a cell; `None` at the domain ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellInterfaces {
    pub west: Option<Interface>,
    pub east: Option<Interface>,
}

/// Computes both faces of every cell.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidInterface`] if a face lies outside the span
/// between the two nodes, which only happens for an inconsistent mesh.
pub fn interfaces(
    mesh: &Mesh,
    properties: &[CellProperties],
    scheme: Interpolation,
) -> Result<Vec<CellInterfaces>, ConfigError> {
    mesh.cells()
        .iter()
        .map(|cell| -> Result<CellInterfaces, ConfigError> {
            let own = properties[cell.index].conductivity;

            let face = |neighbor: usize, face_position: f64| -> Result<Interface, ConfigError> {
                let other = &mesh.cells()[neighbor];
                let distance = (other.position - cell.position).abs();
                let near = (face_position - cell.position).abs();
                let factor = UnitInterval::new((distance - near) / distance).map_err(|source| {
                    ConfigError::InvalidInterface {
                        index: cell.index,
                        source,
                    }
                })?;
                Ok(Interface {
                    distance,
                    factor,
                    conductivity: scheme.conductivity(
                        factor,
                        own,
                        properties[neighbor].conductivity,
                    ),
                })
            };

            Ok(CellInterfaces {
                west: mesh
                    .west(cell.index)
                    .map(|west| face(west.index, cell.start))
                    .transpose()?,
                east: mesh
                    .east(cell.index)
                    .map(|east| face(east.index, cell.end))
                    .transpose()?,
            })
        })
        .collect()
}
