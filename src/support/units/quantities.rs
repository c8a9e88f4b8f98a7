use std::marker::PhantomData;

use uom::{
    si::{ISQ, Quantity, SI},
    typenum::{N1, N3, P1, Z0},
};

/// Volumetric heat generation, W/m³ in SI.
pub type VolumetricHeatGeneration = Quantity<ISQ<N1, P1, N3, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Temperature coefficient of a linearised volumetric source, W/m³·K in SI.
pub type SourceCoefficient = Quantity<ISQ<N1, P1, N3, Z0, N1, Z0, Z0>, SI<f64>, f64>;

/// Creates a [`VolumetricHeatGeneration`] from a value in W/m³.
#[must_use]
pub fn volumetric_heat_generation(watt_per_cubic_meter: f64) -> VolumetricHeatGeneration {
    Quantity {
        dimension: PhantomData,
        units: PhantomData,
        value: watt_per_cubic_meter,
    }
}

/// Creates a [`SourceCoefficient`] from a value in W/m³·K.
#[must_use]
pub fn source_coefficient(watt_per_cubic_meter_kelvin: f64) -> SourceCoefficient {
    Quantity {
        dimension: PhantomData,
        units: PhantomData,
        value: watt_per_cubic_meter_kelvin,
    }
}

/// Value of a [`VolumetricHeatGeneration`] in W/m³.
#[must_use]
pub fn watt_per_cubic_meter(generation: VolumetricHeatGeneration) -> f64 {
    generation.value
}

/// Value of a [`SourceCoefficient`] in W/m³·K.
#[must_use]
pub fn watt_per_cubic_meter_kelvin(coefficient: SourceCoefficient) -> f64 {
    coefficient.value
}
