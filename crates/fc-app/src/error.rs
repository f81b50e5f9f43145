//! Error types for the fc-app service layer.

use std::path::PathBuf;

/// Application error shared by every front end.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read scenario file: {path}")]
    ScenarioFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write scenario file: {path}")]
    ScenarioFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Scenario validation failed: {0}")]
    Validation(String),

    #[error("Scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("Simulation error: {0}")]
    Simulation(#[from] fc_sim::SimError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for fc-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<fc_plants::PlantError> for AppError {
    fn from(err: fc_plants::PlantError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<fc_controls::ControlError> for AppError {
    fn from(err: fc_controls::ControlError) -> Self {
        AppError::Validation(err.to_string())
    }
}
