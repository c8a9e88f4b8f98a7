//! Steady one-dimensional heat conduction.
//!
//! [`SteadyConduction`] solves a [`Case`] on an equidistant finite-volume mesh
//! and returns the nodal temperatures with derived heat fluxes.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//!
//! use twine_core::Model;
//! use twine_conduction::models::thermal::conduction::{
//!     BoundaryCondition, Case, Domain, Geometry, HeatSource, Material, Parameters,
//!     SteadyConduction, ThermalZone,
//! };
//! use uom::si::{
//!     f64::{Length, ThermalConductivity, ThermodynamicTemperature},
//!     length::meter,
//!     thermal_conductivity::watt_per_meter_kelvin,
//!     thermodynamic_temperature::kelvin,
//! };
//!
//! let m = Length::new::<meter>;
//! let t = ThermodynamicTemperature::new::<kelvin>;
//!
//! let case = Case {
//!     parameters: Parameters {
//!         cell_count: 5,
//!         ..Parameters::default()
//!     },
//!     domains: vec![Domain {
//!         name: "bar".into(),
//!         start: m(0.0),
//!         end: m(1.0),
//!         material: "steel".into(),
//!         geometry: Geometry { diameter: m(0.01) },
//!         source: HeatSource::default(),
//!     }],
//!     materials: HashMap::from([(
//!         "steel".into(),
//!         Material {
//!             conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(16.0),
//!         },
//!     )]),
//!     thermal_zones: HashMap::from([
//!         ("hot".into(), ThermalZone::FixedTemperature { temperature: t(400.0) }),
//!         ("cold".into(), ThermalZone::FixedTemperature { temperature: t(300.0) }),
//!     ]),
//!     boundary_conditions: vec![
//!         BoundaryCondition::at("hot", m(0.0)),
//!         BoundaryCondition::at("cold", m(1.0)),
//!     ],
//!     initial_conditions: HashMap::from([("bar".into(), t(350.0))]),
//! };
//!
//! let solution = SteadyConduction.call(&case)?;
//! let middle = solution.temperature_at(2).unwrap().get::<kelvin>();
//! assert!((middle - 350.0).abs() < 1e-9);
//! # Ok::<(), twine_conduction::models::thermal::conduction::SolveError>(())
//! ```

mod core;

pub use self::core::{
    Action, BoundaryCondition, Case, Cell, CellInterfaces, ConfigError, DenseLu, Domain, Event,
    Geometry, HeatSource, Interface, Interpolation, LinearSolver, LinearSolverKind, LinearSystem,
    Material, Mesh, Parameters, Reassembly, Row, RowMut, Simulation, Singular, SolveError,
    Solution, Status, ThermalZone, Thomas,
};

use twine_core::Model;

/// Steady conduction as a [`twine_core::Model`].
///
/// Each call validates the case, solves it, and returns the [`Solution`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SteadyConduction;

impl Model for SteadyConduction {
    type Input = Case;
    type Output = Solution;
    type Error = SolveError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Simulation::new(input)?.run()
    }
}
