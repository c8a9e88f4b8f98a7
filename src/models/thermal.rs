//! Thermal models.

pub mod conduction;
