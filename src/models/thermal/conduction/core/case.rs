//! Case definition consumed by the conduction simulation.
//!
//! A case is already parsed and structurally valid; the simulation only checks
//! physical ranges and cross references (materials, zones, initial conditions).

use std::{collections::HashMap, f64::consts::PI};

use uom::si::f64::{
    Area, HeatFluxDensity, HeatTransfer, Length, Power, TemperatureInterval, ThermalConductivity,
    ThermodynamicTemperature,
};
use uom::si::temperature_interval::kelvin as delta_kelvin;

use crate::support::units::{
    SourceCoefficient, VolumetricHeatGeneration, source_coefficient, volumetric_heat_generation,
};

use super::{interface::Interpolation, iterate::Reassembly, linear::LinearSolverKind};

/// Full description of a steady conduction problem.
#[derive(Debug, Clone)]
pub struct Case {
    /// Mesh and solver settings.
    pub parameters: Parameters,

    /// Named spans of the domain, in configuration order.
    ///
    /// When spans overlap, the last matching domain owns the cell.
    pub domains: Vec<Domain>,

    /// Materials referenced by [`Domain::material`].
    pub materials: HashMap<String, Material>,

    /// Zone behaviours referenced by [`BoundaryCondition::zone`].
    pub thermal_zones: HashMap<String, ThermalZone>,

    /// Conditions applied in order after assembly.
    pub boundary_conditions: Vec<BoundaryCondition>,

    /// Initial temperature of each domain, keyed by domain name.
    pub initial_conditions: HashMap<String, ThermodynamicTemperature>,
}

/// Mesh and solver settings.
#[derive(Debug, Clone, Copy)]
pub struct Parameters {
    /// Number of cells, including the two half cells at the domain ends.
    pub cell_count: usize,

    /// Iteration cap for the convergence loop.
    pub max_iterations: usize,

    /// L2 norm of the temperature change below which the loop stops.
    pub tolerance: TemperatureInterval,

    /// Interface conductivity scheme.
    pub interpolation: Interpolation,

    /// Linear solver used for each iteration.
    pub linear_solver: LinearSolverKind,

    /// Whether coefficients are rebuilt on every iteration.
    pub reassembly: Reassembly,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            cell_count: 10,
            max_iterations: 100,
            tolerance: TemperatureInterval::new::<delta_kelvin>(1e-6),
            interpolation: Interpolation::default(),
            linear_solver: LinearSolverKind::default(),
            reassembly: Reassembly::default(),
        }
    }
}

/// A contiguous span of the domain made of one material.
#[derive(Debug, Clone)]
pub struct Domain {
    /// Domain name, also used as its zone tag for initial conditions.
    pub name: String,
    pub start: Length,
    pub end: Length,

    /// Key into [`Case::materials`].
    pub material: String,
    pub geometry: Geometry,
    pub source: HeatSource,
}

/// Circular cross-section of a domain.
#[derive(Debug, Clone, Copy)]
pub struct Geometry {
    pub diameter: Length,
}

impl Geometry {
    /// Cross-sectional area, `π d² / 4`.
    #[must_use]
    pub fn area(&self) -> Area {
        self.diameter * self.diameter * (PI / 4.0)
    }

    /// Wetted perimeter, `π d`.
    #[must_use]
    pub fn perimeter(&self) -> Length {
        self.diameter * PI
    }
}

/// Linearised volumetric source `S = S_c + S_p·T`.
///
/// A negative `linear` coefficient stabilises the system; a positive one can
/// make it singular.
#[derive(Debug, Clone, Copy)]
pub struct HeatSource {
    pub constant: VolumetricHeatGeneration,
    pub linear: SourceCoefficient,
}

impl Default for HeatSource {
    fn default() -> Self {
        Self {
            constant: volumetric_heat_generation(0.0),
            linear: source_coefficient(0.0),
        }
    }
}

/// Material properties used by steady conduction.
#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub conductivity: ThermalConductivity,
}

/// Physical behaviour of a boundary or source zone.
///
/// Only [`ThermalZone::FixedTemperature`] overwrites a cell's equation; all
/// other kinds add to it, so overlapping zones accumulate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThermalZone {
    /// Cell temperature is pinned.
    FixedTemperature {
        temperature: ThermodynamicTemperature,
    },

    /// Heat flux entering through the cross-section.
    LongitudinalHeatFlux { heat_flux: HeatFluxDensity },

    /// Heat flow entering through the cross-section.
    LongitudinalHeatFlow { heat_flow: Power },

    /// Convective exchange through the cross-section.
    LongitudinalTransferCoefficient {
        coefficient: HeatTransfer,
        ambient: ThermodynamicTemperature,
    },

    /// Volumetric generation on top of the domain source.
    InternalGeneration { generation: VolumetricHeatGeneration },

    /// Heat flux entering through the lateral surface.
    DistributedHeatFlux { heat_flux: HeatFluxDensity },

    /// Total heat flow spread over the zone volume.
    DistributedHeatFlow { heat_flow: Power },

    /// Convective exchange through the lateral surface.
    DistributedTransferCoefficient {
        coefficient: HeatTransfer,
        ambient: ThermodynamicTemperature,
    },
}

/// Places a thermal zone over a span of the domain.
#[derive(Debug, Clone)]
pub struct BoundaryCondition {
    /// Key into [`Case::thermal_zones`].
    pub zone: String,
    pub start: Length,
    pub end: Length,
}

impl BoundaryCondition {
    /// A condition applied to every cell centred in `[start, end]`.
    pub fn over(zone: impl Into<String>, start: Length, end: Length) -> Self {
        Self {
            zone: zone.into(),
            start,
            end,
        }
    }

    /// A condition applied to the cell nearest to `position`.
    pub fn at(zone: impl Into<String>, position: Length) -> Self {
        Self::over(zone, position, position)
    }

    /// Returns `true` for a zero-length extent.
    #[must_use]
    pub fn is_point(&self) -> bool {
        self.start == self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{area::square_meter, length::meter};

    #[test]
    fn circular_section() {
        let geometry = Geometry {
            diameter: Length::new::<meter>(2.0),
        };
        assert_relative_eq!(geometry.area().get::<square_meter>(), PI);
        assert_relative_eq!(geometry.perimeter().get::<meter>(), 2.0 * PI);
    }

    #[test]
    fn point_conditions() {
        let x = Length::new::<meter>(0.3);
        assert!(BoundaryCondition::at("left", x).is_point());
        assert!(!BoundaryCondition::over("fin", x, Length::new::<meter>(0.4)).is_point());
    }
}
