//! Converged field and its queries.

use uom::si::{
    f64::{HeatFluxDensity, Length, TemperatureInterval, ThermodynamicTemperature},
    heat_flux_density::watt_per_square_meter,
    length::meter,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
};

use super::{
    interface::CellInterfaces,
    iterate::{Outcome, Status},
    mesh::Mesh,
};

/// Temperatures, derived heat fluxes, and loop status of a finished run.
///
/// Index-based accessors return `None` past the last cell.
/// The heat flux is only defined at interior cells; at the two end cells it
/// is `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    positions: Vec<f64>,
    temperatures: Vec<f64>,
    heat_fluxes: Vec<f64>,
    outcome: Outcome,
}

impl Solution {
    pub(super) fn new(
        mesh: &Mesh,
        interfaces: &[CellInterfaces],
        temperatures: Vec<f64>,
        outcome: Outcome,
    ) -> Self {
        Self {
            positions: mesh.cells().iter().map(|cell| cell.position).collect(),
            heat_fluxes: heat_fluxes(&temperatures, interfaces),
            temperatures,
            outcome,
        }
    }

    #[must_use]
    pub fn position_at(&self, index: usize) -> Option<Length> {
        self.positions.get(index).map(|&x| Length::new::<meter>(x))
    }

    #[must_use]
    pub fn temperature_at(&self, index: usize) -> Option<ThermodynamicTemperature> {
        self.temperatures
            .get(index)
            .map(|&t| ThermodynamicTemperature::new::<kelvin>(t))
    }

    /// Heat flux in the positive `x` direction at cell `index`.
    #[must_use]
    pub fn heat_flux_at(&self, index: usize) -> Option<HeatFluxDensity> {
        self.heat_fluxes
            .get(index)
            .map(|&q| HeatFluxDensity::new::<watt_per_square_meter>(q))
    }

    /// Number of completed iterations.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.outcome.iterations
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.outcome.status
    }

    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.outcome.status == Status::Converged
    }

    /// L2 norm of the temperature change over the last iteration.
    #[must_use]
    pub fn change_norm(&self) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(self.outcome.change_norm)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.temperatures.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.temperatures.is_empty()
    }

    /// Node positions, m.
    #[must_use]
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Node temperatures, K.
    #[must_use]
    pub fn temperatures(&self) -> &[f64] {
        &self.temperatures
    }

    /// Heat fluxes, W/m².
    #[must_use]
    pub fn heat_fluxes(&self) -> &[f64] {
        &self.heat_fluxes
    }
}

/// Fourier flux at every node, averaged over its two faces.
///
/// `q = −k·dT/dx` evaluated with each face's effective conductivity and node
/// spacing; end cells have a single face and get `NaN`.
fn heat_fluxes(temperatures: &[f64], interfaces: &[CellInterfaces]) -> Vec<f64> {
    interfaces
        .iter()
        .enumerate()
        .map(|(i, faces)| match (faces.west, faces.east) {
            (Some(west), Some(east)) => {
                let gradient_west = west.conductance() * (temperatures[i] - temperatures[i - 1]);
                let gradient_east = east.conductance() * (temperatures[i + 1] - temperatures[i]);
                -(gradient_west + gradient_east) / 2.0
            }
            _ => f64::NAN,
        })
        .collect()
}
