use thiserror::Error;
use uom::si::f64::{Length, TemperatureInterval};

use crate::support::constraint::ConstraintError;

/// Errors raised while turning a [`Case`](super::Case) into a solvable simulation.
///
/// Every variant is detected before the first linear solve.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The mesh needs at least two cells.
    #[error("invalid cell count {count}: at least 2 cells are required")]
    InvalidCellCount { count: usize },

    /// An extent is empty, reversed, or not finite.
    #[error("invalid extent: start={start:?}, end={end:?}")]
    InvalidExtent { start: Length, end: Length },

    /// The cell widths do not add up to the domain length.
    #[error("malformed mesh: cell widths reach {reached:?} instead of {end:?}")]
    MalformedMesh { reached: Length, end: Length },

    /// The case defines no domains, so there is nothing to mesh.
    #[error("case defines no domains")]
    NoDomains,

    /// A cell centre lies outside every domain.
    #[error("cell {index} at {position:?} does not belong to any domain")]
    UnresolvedCell { index: usize, position: Length },

    /// A domain references a material that is not defined.
    #[error("domain `{domain}` references unknown material `{material}`")]
    MissingMaterial { domain: String, material: String },

    /// A boundary condition references a thermal zone that is not defined.
    #[error("boundary condition references unknown thermal zone `{zone}`")]
    MissingZone { zone: String },

    /// An extended boundary condition contains no cell node.
    #[error("boundary condition {index} over [{start:?}, {end:?}] covers no cell")]
    EmptyCondition {
        /// Position in [`Case::boundary_conditions`](super::Case::boundary_conditions).
        index: usize,
        start: Length,
        end: Length,
    },

    /// A domain has no initial temperature.
    #[error("domain `{domain}` has no initial condition")]
    MissingInitialCondition { domain: String },

    /// A solver parameter is out of range.
    #[error("invalid solver parameter `{name}`")]
    InvalidParameter {
        name: &'static str,
        #[source]
        source: ConstraintError,
    },

    /// A physical property is out of range.
    #[error("invalid property: {context}")]
    InvalidProperty {
        context: String,
        #[source]
        source: ConstraintError,
    },

    /// An interface interpolation factor fell outside `[0, 1]`.
    #[error("invalid interface interpolation factor at cell {index}")]
    InvalidInterface {
        index: usize,
        #[source]
        source: ConstraintError,
    },
}

impl ConfigError {
    /// Creates a property error with context.
    pub(super) fn property(context: impl Into<String>, source: ConstraintError) -> Self {
        Self::InvalidProperty {
            context: context.into(),
            source,
        }
    }
}

/// Errors that can occur while running a conduction simulation.
#[derive(Debug, Error)]
pub enum SolveError {
    /// The case could not be turned into a simulation.
    #[error("invalid configuration")]
    Config(#[from] ConfigError),

    /// The assembled system could not be solved.
    ///
    /// This usually means part of the domain has no temperature reference,
    /// e.g. flux-only boundaries on both ends.
    #[error("singular or ill-conditioned system at row {row} (iteration {iteration})")]
    Singular {
        /// Iteration during which the solve failed, starting at 1.
        iteration: usize,

        /// Row (cell index) where elimination broke down.
        row: usize,

        /// Change norm of the last completed iteration, if any.
        last_change_norm: Option<TemperatureInterval>,
    },
}
