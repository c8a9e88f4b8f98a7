//! Validated configuration tables in SI units.
//!
//! Built once from a [`Case`] and shared by reference with the resolver,
//! assembler and condition applier.

use uom::si::{
    area::square_meter, f64::Length, heat_transfer::watt_per_square_meter_kelvin,
    length::meter, temperature_interval::kelvin as delta_kelvin,
    thermal_conductivity::watt_per_meter_kelvin, thermodynamic_temperature::kelvin,
};

use crate::support::{
    constraint::{NonNegative, StrictlyPositive},
    units::{watt_per_cubic_meter, watt_per_cubic_meter_kelvin},
};

use super::{Case, ConfigError, Parameters, ThermalZone, condition::Condition};

/// A domain with its material and geometry looked up.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainEntry {
    pub start: f64,
    pub end: f64,

    /// W/m·K.
    pub conductivity: f64,

    /// W/m³.
    pub source_constant: f64,

    /// W/m³·K.
    pub source_linear: f64,

    /// m².
    pub area: f64,

    /// m.
    pub perimeter: f64,

    /// K.
    pub initial_temperature: f64,
}

/// Immutable lookup tables for one simulation.
#[derive(Debug, Clone)]
pub struct Tables {
    pub parameters: Parameters,

    /// Domains in configuration order.
    pub domains: Vec<DomainEntry>,

    /// Boundary conditions bound to their zones, in configuration order.
    pub conditions: Vec<Condition>,

    /// Convergence tolerance, K.
    pub tolerance: f64,
}

impl Tables {
    /// Validates `case` and converts it to SI tables.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for missing references or out-of-range values.
    pub fn new(case: &Case) -> Result<Self, ConfigError> {
        let parameters = case.parameters;

        let tolerance = StrictlyPositive::new(parameters.tolerance.get::<delta_kelvin>())
            .map_err(|source| ConfigError::InvalidParameter {
                name: "tolerance",
                source,
            })?
            .into_inner();

        StrictlyPositive::new(parameters.max_iterations).map_err(|source| {
            ConfigError::InvalidParameter {
                name: "max_iterations",
                source,
            }
        })?;

        if case.domains.is_empty() {
            return Err(ConfigError::NoDomains);
        }

        let domains = case
            .domains
            .iter()
            .map(|domain| -> Result<DomainEntry, ConfigError> {
                check_extent(domain.start, domain.end)?;

                let material = case.materials.get(&domain.material).ok_or_else(|| {
                    ConfigError::MissingMaterial {
                        domain: domain.name.clone(),
                        material: domain.material.clone(),
                    }
                })?;
                let conductivity = StrictlyPositive::new(material.conductivity)
                    .map_err(|source| {
                        ConfigError::property(
                            format!("conductivity of material `{}`", domain.material),
                            source,
                        )
                    })?
                    .into_inner();

                StrictlyPositive::new(domain.geometry.diameter).map_err(|source| {
                    ConfigError::property(format!("diameter of domain `{}`", domain.name), source)
                })?;

                let initial = case.initial_conditions.get(&domain.name).ok_or_else(|| {
                    ConfigError::MissingInitialCondition {
                        domain: domain.name.clone(),
                    }
                })?;

                Ok(DomainEntry {
                    start: domain.start.get::<meter>(),
                    end: domain.end.get::<meter>(),
                    conductivity: conductivity.get::<watt_per_meter_kelvin>(),
                    source_constant: watt_per_cubic_meter(domain.source.constant),
                    source_linear: watt_per_cubic_meter_kelvin(domain.source.linear),
                    area: domain.geometry.area().get::<square_meter>(),
                    perimeter: domain.geometry.perimeter().get::<meter>(),
                    initial_temperature: initial.get::<kelvin>(),
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let conditions = case
            .boundary_conditions
            .iter()
            .map(|bc| -> Result<Condition, ConfigError> {
                let zone = case
                    .thermal_zones
                    .get(&bc.zone)
                    .ok_or_else(|| ConfigError::MissingZone {
                        zone: bc.zone.clone(),
                    })?;
                check_zone(&bc.zone, zone)?;
                if !bc.is_point() {
                    check_extent(bc.start, bc.end)?;
                }
                Ok(Condition {
                    zone: *zone,
                    start: bc.start.get::<meter>(),
                    end: bc.end.get::<meter>(),
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Self {
            parameters,
            domains,
            conditions,
            tolerance,
        })
    }

    /// Overall span covered by the domains, in metres.
    #[must_use]
    pub fn limits(&self) -> (f64, f64) {
        self.domains.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(start, end), domain| (start.min(domain.start), end.max(domain.end)),
        )
    }
}

fn check_extent(start: Length, end: Length) -> Result<(), ConfigError> {
    let (a, b) = (start.get::<meter>(), end.get::<meter>());
    if a.is_finite() && b.is_finite() && a < b {
        Ok(())
    } else {
        Err(ConfigError::InvalidExtent { start, end })
    }
}

fn check_zone(name: &str, zone: &ThermalZone) -> Result<(), ConfigError> {
    match zone {
        ThermalZone::LongitudinalTransferCoefficient { coefficient, .. }
        | ThermalZone::DistributedTransferCoefficient { coefficient, .. } => {
            NonNegative::new(coefficient.get::<watt_per_square_meter_kelvin>())
                .map(|_| ())
                .map_err(|source| {
                    ConfigError::property(
                        format!("transfer coefficient of zone `{name}`"),
                        source,
                    )
                })
        }
        ThermalZone::FixedTemperature { .. }
        | ThermalZone::LongitudinalHeatFlux { .. }
        | ThermalZone::LongitudinalHeatFlow { .. }
        | ThermalZone::InternalGeneration { .. }
        | ThermalZone::DistributedHeatFlux { .. }
        | ThermalZone::DistributedHeatFlow { .. } => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{HeatTransfer, TemperatureInterval, ThermalConductivity, ThermodynamicTemperature},
        length::meter,
    };

    use crate::models::thermal::conduction::core::{
        BoundaryCondition, HeatSource,
        test_support::{fixed, rod_case},
    };
    use crate::support::units::{source_coefficient, volumetric_heat_generation};

    #[test]
    fn converts_domains_to_si() {
        let case = rod_case(5, 1.0, 100.0, 0.0);
        let tables = Tables::new(&case).unwrap();

        assert_eq!(tables.domains.len(), 1);
        let rod = &tables.domains[0];
        assert_relative_eq!(rod.conductivity, 1.0);
        assert_relative_eq!(rod.end, 1.0);
        assert_eq!(tables.conditions.len(), 2);
        assert_eq!(tables.limits(), (0.0, 1.0));
    }

    #[test]
    fn converts_sources_to_si() {
        let mut case = rod_case(5, 1.0, 100.0, 0.0);
        case.domains[0].source = HeatSource {
            constant: volumetric_heat_generation(2.0e3),
            linear: source_coefficient(-4.0),
        };
        let rod = &Tables::new(&case).unwrap().domains[0];
        assert_eq!(rod.source_constant, 2.0e3);
        assert_eq!(rod.source_linear, -4.0);
    }

    #[test]
    fn missing_zone_is_rejected() {
        let mut case = rod_case(5, 1.0, 100.0, 0.0);
        case.boundary_conditions
            .push(BoundaryCondition::at("nowhere", Length::new::<meter>(0.5)));

        match Tables::new(&case) {
            Err(ConfigError::MissingZone { zone }) => assert_eq!(zone, "nowhere"),
            other => panic!("expected MissingZone, got {other:?}"),
        }
    }

    #[test]
    fn missing_material_is_rejected() {
        let mut case = rod_case(5, 1.0, 100.0, 0.0);
        case.materials.clear();
        assert!(matches!(
            Tables::new(&case),
            Err(ConfigError::MissingMaterial { .. })
        ));
    }

    #[test]
    fn missing_initial_condition_is_rejected() {
        let mut case = rod_case(5, 1.0, 100.0, 0.0);
        case.initial_conditions.clear();
        assert!(matches!(
            Tables::new(&case),
            Err(ConfigError::MissingInitialCondition { .. })
        ));
    }

    #[test]
    fn non_physical_values_are_rejected() {
        let mut case = rod_case(5, 1.0, 100.0, 0.0);
        case.materials.get_mut("steel").unwrap().conductivity =
            ThermalConductivity::new::<watt_per_meter_kelvin>(0.0);
        assert!(matches!(
            Tables::new(&case),
            Err(ConfigError::InvalidProperty { .. })
        ));

        let mut case = rod_case(5, 1.0, 100.0, 0.0);
        case.thermal_zones.insert(
            "left".into(),
            ThermalZone::LongitudinalTransferCoefficient {
                coefficient: HeatTransfer::new::<watt_per_square_meter_kelvin>(-1.0),
                ambient: ThermodynamicTemperature::new::<kelvin>(300.0),
            },
        );
        assert!(matches!(
            Tables::new(&case),
            Err(ConfigError::InvalidProperty { .. })
        ));

        let mut case = rod_case(5, 1.0, 100.0, 0.0);
        case.parameters.tolerance = TemperatureInterval::new::<delta_kelvin>(0.0);
        assert!(matches!(
            Tables::new(&case),
            Err(ConfigError::InvalidParameter {
                name: "tolerance",
                ..
            })
        ));

        let mut case = rod_case(5, 1.0, 100.0, 0.0);
        case.parameters.max_iterations = 0;
        assert!(matches!(
            Tables::new(&case),
            Err(ConfigError::InvalidParameter {
                name: "max_iterations",
                ..
            })
        ));
    }

    #[test]
    fn reversed_condition_extent_is_rejected() {
        let mut case = rod_case(5, 1.0, 100.0, 0.0);
        case.thermal_zones.insert("mid".into(), fixed(50.0));
        case.boundary_conditions.push(BoundaryCondition::over(
            "mid",
            Length::new::<meter>(0.6),
            Length::new::<meter>(0.4),
        ));
        assert!(matches!(
            Tables::new(&case),
            Err(ConfigError::InvalidExtent { .. })
        ));
    }
}
