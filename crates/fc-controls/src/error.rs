//! Error types for controller operations.

use thiserror::Error;

/// Result type for controller operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur in controller operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a controller (gains, time step).
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Error signal outside the controller's numeric domain.
    #[error("Input outside domain for {what}: {value}")]
    Domain { what: &'static str, value: f64 },
}
