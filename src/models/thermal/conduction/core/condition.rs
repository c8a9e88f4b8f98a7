//! Boundary and zone conditions applied on top of the assembled system.

use std::ops::Range;

use uom::si::{
    f64::Length, heat_flux_density::watt_per_square_meter,
    heat_transfer::watt_per_square_meter_kelvin, length::meter, power::watt,
    thermodynamic_temperature::kelvin,
};

use crate::support::units::watt_per_cubic_meter;

use super::{
    ConfigError, ThermalZone,
    mesh::{Cell, Mesh},
    resolve::CellProperties,
    system::{LinearSystem, RowMut},
};

/// Slack on the upper bound of an extent, in metres.
pub(super) const EXTENT_TOLERANCE: f64 = 1e-9;

/// A thermal zone bound to its extent, in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Condition {
    pub zone: ThermalZone,
    pub start: f64,
    pub end: f64,
}

impl Condition {
    #[must_use]
    pub fn is_point(&self) -> bool {
        self.start == self.end
    }
}

/// Cells affected by `condition`.
///
/// A point condition targets the nearest cell; an extent targets every cell
/// whose node lies in `[start, end]`.
#[must_use]
pub fn target_cells(mesh: &Mesh, condition: &Condition) -> Range<usize> {
    if condition.is_point() {
        let index = mesh.nearest(condition.start);
        return index..index + 1;
    }

    let inside = |cell: &Cell| {
        cell.position >= condition.start && cell.position <= condition.end + EXTENT_TOLERANCE
    };
    let cells = mesh.cells();
    match cells.iter().position(inside) {
        Some(first) => {
            let count = cells[first..].iter().take_while(|cell| inside(cell)).count();
            first..first + count
        }
        None => 0..0,
    }
}

/// Checks that every extended condition reaches at least one cell.
///
/// Point conditions always bind to the nearest cell.
///
/// # Errors
///
/// Returns [`ConfigError::EmptyCondition`] for the first condition whose
/// extent lies between nodes or outside the mesh.
pub fn check_coverage(mesh: &Mesh, conditions: &[Condition]) -> Result<(), ConfigError> {
    match conditions
        .iter()
        .position(|condition| target_cells(mesh, condition).is_empty())
    {
        Some(index) => Err(ConfigError::EmptyCondition {
            index,
            start: Length::new::<meter>(conditions[index].start),
            end: Length::new::<meter>(conditions[index].end),
        }),
        None => Ok(()),
    }
}

/// Applies `conditions` in order to an assembled system.
///
/// Fixed temperatures replace the row; every other kind adds to it, so a later
/// fixed temperature wins over earlier zones on the same cell.
pub fn apply_conditions(
    system: &mut LinearSystem,
    mesh: &Mesh,
    properties: &[CellProperties],
    conditions: &[Condition],
) {
    for condition in conditions {
        let cells = target_cells(mesh, condition);
        let zone_length = condition.end - condition.start;
        for index in cells {
            let cell = &mesh.cells()[index];
            let length = if condition.is_point() {
                cell.width
            } else {
                zone_length
            };
            apply_zone(
                system.row_mut(index),
                &condition.zone,
                cell,
                &properties[index],
                length,
            );
        }
    }
}

fn apply_zone(
    row: RowMut<'_>,
    zone: &ThermalZone,
    cell: &Cell,
    properties: &CellProperties,
    zone_length: f64,
) {
    let surface_per_volume = properties.perimeter / properties.area;

    match *zone {
        ThermalZone::FixedTemperature { temperature } => {
            if let Some(west) = row.west {
                *west = 0.0;
            }
            if let Some(east) = row.east {
                *east = 0.0;
            }
            *row.center = 1.0;
            *row.rhs = temperature.get::<kelvin>();
        }
        ThermalZone::LongitudinalHeatFlux { heat_flux } => {
            *row.rhs += heat_flux.get::<watt_per_square_meter>();
        }
        ThermalZone::LongitudinalHeatFlow { heat_flow } => {
            *row.rhs += heat_flow.get::<watt>() * properties.area;
        }
        ThermalZone::LongitudinalTransferCoefficient {
            coefficient,
            ambient,
        } => {
            let h = coefficient.get::<watt_per_square_meter_kelvin>();
            *row.center += h;
            *row.rhs += h * ambient.get::<kelvin>();
        }
        ThermalZone::InternalGeneration { generation } => {
            *row.rhs += watt_per_cubic_meter(generation) * cell.width;
        }
        ThermalZone::DistributedHeatFlux { heat_flux } => {
            *row.rhs += heat_flux.get::<watt_per_square_meter>() * surface_per_volume * cell.width;
        }
        ThermalZone::DistributedHeatFlow { heat_flow } => {
            *row.rhs += heat_flow.get::<watt>() / (zone_length * properties.area) * cell.width;
        }
        ThermalZone::DistributedTransferCoefficient {
            coefficient,
            ambient,
        } => {
            let h = coefficient.get::<watt_per_square_meter_kelvin>();
            let conductance = h * surface_per_volume * cell.width;
            *row.center += conductance;
            *row.rhs += conductance * ambient.get::<kelvin>();
        }
    }
}
