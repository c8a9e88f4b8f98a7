//! # Twine Conduction
//!
//! Steady one-dimensional heat conduction models for
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! ## Crate layout
//!
//! - [`models`]: [`twine_core::Model`] implementations, starting with
//!   [`models::thermal::conduction::SteadyConduction`].
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! Code starts in a model's internal `core` module and only moves to
//! [`support`] once more than one model needs it.

pub mod models;
pub mod support;
