//! Finite-volume steady conduction along a one-dimensional domain.
//!
//! The domain is split into cells whose nodes carry the temperature.
//! Each cell contributes one row of a tridiagonal system:
//!
//! ```text
//! a_W·T_W + a_P·T_P + a_E·T_E = b
//! ```
//!
//! built from face conductances and sources, then overwritten or augmented
//! by the configured thermal zones before it is solved.

mod assemble;
mod case;
mod condition;
mod error;
mod interface;
mod iterate;
mod linear;
mod mesh;
mod resolve;
mod results;
mod system;
mod tables;

#[cfg(test)]
pub(super) mod test_support;

pub use case::{
    BoundaryCondition, Case, Domain, Geometry, HeatSource, Material, Parameters, ThermalZone,
};
pub use error::{ConfigError, SolveError};
pub use interface::{CellInterfaces, Interface, Interpolation};
pub use iterate::{Action, Event, Reassembly, Status};
pub use linear::{DenseLu, LinearSolver, LinearSolverKind, Singular, Thomas};
pub use mesh::{Cell, Mesh};
pub use results::Solution;
pub use system::{LinearSystem, Row, RowMut};

use twine_core::Observer;
use uom::si::{f64::TemperatureInterval, temperature_interval::kelvin};

use assemble::assemble;
use condition::{apply_conditions, check_coverage};
use interface::interfaces;
use iterate::{Limits, Outcome, iterate};
use resolve::{CellProperties, resolve_cells};
use tables::Tables;

/// A case bound to its mesh and assembled system, ready to solve.
///
/// Construction validates the whole case, so every [`ConfigError`] surfaces
/// from [`Simulation::new`] and running can only fail on a singular system.
#[derive(Debug, Clone)]
pub struct Simulation {
    tables: Tables,
    mesh: Mesh,
    properties: Vec<CellProperties>,
    interfaces: Vec<CellInterfaces>,
    system: LinearSystem,
    current: Vec<f64>,
    previous: Vec<f64>,
}

impl Simulation {
    /// Builds the mesh, resolves cells, and assembles the system.
    ///
    /// The previous-iteration temperatures start at each cell's domain
    /// initial condition.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the case is inconsistent or non-physical.
    pub fn new(case: &Case) -> Result<Self, ConfigError> {
        let tables = Tables::new(case)?;
        let (start, end) = tables.limits();
        let mesh = Mesh::equidistant(start, end, tables.parameters.cell_count)?;
        check_coverage(&mesh, &tables.conditions)?;
        let properties = resolve_cells(&mesh, &tables.domains)?;
        let interfaces = interfaces(&mesh, &properties, tables.parameters.interpolation)?;

        let previous: Vec<f64> = properties
            .iter()
            .map(|p| tables.domains[p.domain].initial_temperature)
            .collect();

        let mut simulation = Self {
            system: LinearSystem::new(mesh.len()),
            current: previous.clone(),
            previous,
            tables,
            mesh,
            properties,
            interfaces,
        };
        simulation.assemble();
        Ok(simulation)
    }

    #[must_use]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// West and east faces of every cell.
    #[must_use]
    pub fn interfaces(&self) -> &[CellInterfaces] {
        &self.interfaces
    }

    /// The system as it will be handed to the linear solver.
    #[must_use]
    pub fn system(&self) -> &LinearSystem {
        &self.system
    }

    /// Rebuilds the conduction balance and applies every condition.
    pub fn assemble(&mut self) {
        assemble(
            &mut self.system,
            &self.mesh,
            &self.properties,
            &self.interfaces,
        );
        apply_conditions(
            &mut self.system,
            &self.mesh,
            &self.properties,
            &self.tables.conditions,
        );
    }

    /// Runs the convergence loop without observation.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::Singular`] if a linear solve fails.
    pub fn run(self) -> Result<Solution, SolveError> {
        self.run_observed(())
    }

    /// Runs the convergence loop, reporting every iteration to `observer`.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::Singular`] if a linear solve fails.
    pub fn run_observed<Obs>(mut self, observer: Obs) -> Result<Solution, SolveError>
    where
        Obs: Observer<Event, Action>,
    {
        let parameters = self.tables.parameters;
        let limits = Limits {
            max_iterations: parameters.max_iterations,
            tolerance: self.tables.tolerance,
            reassembly: parameters.reassembly,
        };

        let mut last_change_norm = None;
        let outcome: Outcome = iterate(
            limits,
            |iteration| {
                let norm = self.step(iteration, last_change_norm)?;
                last_change_norm = Some(norm);
                Ok(norm)
            },
            observer,
        )?;

        Ok(Solution::new(
            &self.mesh,
            &self.interfaces,
            self.current,
            outcome,
        ))
    }

    /// One iteration: optional re-assembly, solve, change norm, state sync.
    fn step(&mut self, iteration: usize, last_change_norm: Option<f64>) -> Result<f64, SolveError> {
        let parameters = self.tables.parameters;
        if parameters.reassembly == Reassembly::EveryIteration {
            self.assemble();
        }

        parameters
            .linear_solver
            .solve(&self.system, &mut self.current)
            .map_err(|Singular { row }| SolveError::Singular {
                iteration,
                row,
                last_change_norm: last_change_norm.map(TemperatureInterval::new::<kelvin>),
            })?;

        let norm = self
            .current
            .iter()
            .zip(&self.previous)
            .map(|(current, previous)| (current - previous).powi(2))
            .sum::<f64>()
            .sqrt();

        self.previous.copy_from_slice(&self.current);
        Ok(norm)
    }
}
