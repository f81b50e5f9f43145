//! Error types for plant models.

use thiserror::Error;

pub type PlantResult<T> = Result<T, PlantError>;

/// Errors raised while constructing or stepping a plant.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlantError {
    /// Invalid construction parameter.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Step input outside the model's numeric domain.
    #[error("Input outside domain for {what}: {value}")]
    Domain { what: &'static str, value: f64 },
}
