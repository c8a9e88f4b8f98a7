use std::collections::HashMap;

use uom::si::{
    f64::{Length, ThermalConductivity, ThermodynamicTemperature},
    length::meter,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::kelvin,
};

use super::{
    BoundaryCondition, Case, Domain, Geometry, HeatSource, Material, Parameters, ThermalZone,
};

/// A fixed-temperature zone in kelvin.
pub(crate) fn fixed(temperature: f64) -> ThermalZone {
    ThermalZone::FixedTemperature {
        temperature: ThermodynamicTemperature::new::<kelvin>(temperature),
    }
}

/// A 1 m steel rod of 1 m diameter with fixed temperatures at both ends.
///
/// Zones `left` and `right` are applied as point conditions at `x = 0` and
/// `x = 1`, and the rod starts at the mean of the two end temperatures.
pub(crate) fn rod_case(cell_count: usize, conductivity: f64, left: f64, right: f64) -> Case {
    let m = Length::new::<meter>;

    Case {
        parameters: Parameters {
            cell_count,
            ..Parameters::default()
        },
        domains: vec![Domain {
            name: "rod".into(),
            start: m(0.0),
            end: m(1.0),
            material: "steel".into(),
            geometry: Geometry { diameter: m(1.0) },
            source: HeatSource::default(),
        }],
        materials: HashMap::from([(
            "steel".into(),
            Material {
                conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(conductivity),
            },
        )]),
        thermal_zones: HashMap::from([
            ("left".into(), fixed(left)),
            ("right".into(), fixed(right)),
        ]),
        boundary_conditions: vec![
            BoundaryCondition::at("left", m(0.0)),
            BoundaryCondition::at("right", m(1.0)),
        ],
        initial_conditions: HashMap::from([(
            "rod".into(),
            ThermodynamicTemperature::new::<kelvin>((left + right) / 2.0),
        )]),
    }
}
