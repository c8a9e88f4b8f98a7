//! Supporting utilities shared by models.
//!
//! These modules are public because they're useful outside the models, but
//! their APIs are not stable.

pub mod constraint;
pub mod units;
