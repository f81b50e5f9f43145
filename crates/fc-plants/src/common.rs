//! Common checks shared by the plant models.

use crate::error::{PlantError, PlantResult};
use fc_core::numeric::{ensure_finite, ensure_positive};

/// Ensure a step input is finite, returning a domain error if not.
pub fn check_input(value: f64, what: &'static str) -> PlantResult<f64> {
    ensure_finite(value, what).map_err(|_| PlantError::Domain { what, value })
}

/// Ensure a construction parameter is finite and strictly positive.
pub fn check_positive(value: f64, what: &'static str) -> PlantResult<f64> {
    ensure_positive(value, what).map_err(|_| PlantError::InvalidArg { what })
}
