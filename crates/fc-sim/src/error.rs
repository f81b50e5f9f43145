//! Error types for simulation runs.

use fc_controls::ControlError;
use fc_core::{FcError, Step};
use fc_plants::PlantError;
use thiserror::Error;

/// Why a single step could not be completed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StepFailure {
    #[error("plant rejected input: {0}")]
    Plant(#[from] PlantError),

    #[error("controller rejected input: {0}")]
    Controller(#[from] ControlError),

    #[error("set-point is not finite: {0}")]
    Setpoint(f64),

    #[error("plant produced a non-finite output: {0}")]
    Output(f64),
}

/// Errors encountered while configuring or running a feedback loop.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Detected before the run starts; no observation is produced.
    #[error("Invalid configuration: {what}")]
    Configuration { what: String },

    /// A step failed; the run stops and nothing is emitted for that step.
    #[error("Run aborted at step {step}: {cause}")]
    Domain {
        step: Step,
        #[source]
        cause: StepFailure,
    },
}

pub type SimResult<T> = Result<T, SimError>;

impl SimError {
    pub(crate) fn config(what: impl Into<String>) -> Self {
        SimError::Configuration { what: what.into() }
    }

    pub(crate) fn at_step(step: Step, cause: impl Into<StepFailure>) -> Self {
        SimError::Domain {
            step,
            cause: cause.into(),
        }
    }
}

impl From<PlantError> for SimError {
    fn from(e: PlantError) -> Self {
        SimError::config(e.to_string())
    }
}

impl From<ControlError> for SimError {
    fn from(e: ControlError) -> Self {
        SimError::config(e.to_string())
    }
}

impl From<FcError> for SimError {
    fn from(e: FcError) -> Self {
        SimError::config(e.to_string())
    }
}
