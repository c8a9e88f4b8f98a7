//! Extensions to [`uom`].
//!
//! This crate uses [`uom`] for every physical input and output.
//! Heat source terms per unit volume have no predefined [`uom`] quantity, so
//! they are defined here together with SI constructors and getters.
//!
//! ```
//! use twine_conduction::support::units::{
//!     VolumetricHeatGeneration, volumetric_heat_generation, watt_per_cubic_meter,
//! };
//!
//! let q: VolumetricHeatGeneration = volumetric_heat_generation(5.0e4);
//! assert_eq!(watt_per_cubic_meter(q), 5.0e4);
//! ```

mod quantities;

pub use quantities::{
    SourceCoefficient, VolumetricHeatGeneration, source_coefficient, volumetric_heat_generation,
    watt_per_cubic_meter, watt_per_cubic_meter_kelvin,
};
