//! Type-level numeric constraints for physical inputs.
//!
//! Conduction cases carry scalars that only make sense in a restricted range:
//! a conductivity must be strictly positive, a transfer coefficient may be zero
//! but never negative, and an interface interpolation factor always lies in
//! `[0, 1]`.
//! Wrapping such values in [`Constrained<T, C>`] checks the range once, at
//! construction, and documents the invariant in the type.
//!
//! # Provided constraints
//!
//! - [`StrictlyPositive`]: greater than zero
//! - [`NonNegative`]: zero or greater
//! - [`UnitInterval`]: closed unit interval `0 ≤ x ≤ 1`
//!
//! Each marker also offers an associated `new()` shortcut,
//! e.g. `StrictlyPositive::new(1.4)`.

mod non_negative;
mod strictly_positive;
mod unit_interval;

use std::marker::PhantomData;

use thiserror::Error;

pub use non_negative::NonNegative;
pub use strictly_positive::StrictlyPositive;
pub use unit_interval::{UnitBounds, UnitInterval};

/// A numeric invariant checked when a [`Constrained`] value is built.
pub trait Constraint<T> {
    /// Checks that `value` satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] describing the violation.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// The reason a value was rejected by a [`Constraint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value is below the minimum allowed")]
    BelowMinimum,
    #[error("value is above the maximum allowed")]
    AboveMaximum,
}

/// A value that is known to satisfy the constraint `C`.
///
/// # Example
///
/// ```
/// use twine_conduction::support::constraint::{Constrained, StrictlyPositive};
/// use uom::si::{f64::ThermalConductivity, thermal_conductivity::watt_per_meter_kelvin};
///
/// let k = ThermalConductivity::new::<watt_per_meter_kelvin>(1.4);
/// let k = Constrained::<_, StrictlyPositive>::new(k).unwrap();
/// assert_eq!(k.into_inner().get::<watt_per_meter_kelvin>(), 1.4);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Checks `value` against `C` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not satisfy the constraint.
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Consumes the wrapper and returns the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}
