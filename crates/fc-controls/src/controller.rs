//! Controller law implementations.
//!
//! Provides standard controller types:
//! - **On-Off**: signed unit action from the sign of the error
//! - **P (Proportional)**: action proportional to the error
//! - **PI (Proportional-Integral)**: adds the accumulated error
//! - **PID (Proportional-Integral-Derivative)**: adds the error's rate of change
//!
//! Integral and derivative memory reflect exactly the errors seen so far, in
//! order. None of the laws clamp their output.

use crate::block::{ControlBlock, ControlLaw};
use crate::error::{ControlError, ControlResult};
use fc_core::numeric::{ensure_finite, ensure_positive};
use serde::{Deserialize, Serialize};

fn check_gain(value: f64, what: &'static str) -> ControlResult<f64> {
    ensure_finite(value, what).map_err(|_| ControlError::InvalidArg { what })
}

fn check_dt(dt: f64) -> ControlResult<f64> {
    ensure_positive(dt, "dt must be positive")
        .map_err(|_| ControlError::InvalidArg { what: "dt must be positive" })
}

fn check_error(error: f64) -> ControlResult<f64> {
    ensure_finite(error, "control error").map_err(|_| ControlError::Domain {
        what: "control error",
        value: error,
    })
}

/// On-off controller: `+1` when the error is positive, `-1` otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OnOff;

impl ControlLaw for OnOff {
    type State = ();

    fn name(&self) -> &'static str {
        "on-off"
    }

    fn update(&self, _state: &(), error: f64, dt: f64) -> ControlResult<((), f64)> {
        check_dt(dt)?;
        let error = check_error(error)?;
        Ok(((), if error > 0.0 { 1.0 } else { -1.0 }))
    }
}

/// Proportional controller configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proportional {
    /// Proportional gain.
    pub kp: f64,
}

impl Proportional {
    pub fn new(kp: f64) -> ControlResult<Self> {
        Ok(Self {
            kp: check_gain(kp, "kp must be finite")?,
        })
    }
}

impl ControlLaw for Proportional {
    type State = ();

    fn name(&self) -> &'static str {
        "proportional"
    }

    fn update(&self, _state: &(), error: f64, dt: f64) -> ControlResult<((), f64)> {
        check_dt(dt)?;
        let error = check_error(error)?;
        Ok(((), self.kp * error))
    }
}

/// PI controller configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PIController {
    /// Proportional gain.
    pub kp: f64,
    /// Integral gain.
    pub ki: f64,
}

impl PIController {
    /// Create a new PI controller.
    ///
    /// # Arguments
    ///
    /// * `kp` - Proportional gain
    /// * `ki` - Integral gain
    pub fn new(kp: f64, ki: f64) -> ControlResult<Self> {
        Ok(Self {
            kp: check_gain(kp, "kp must be finite")?,
            ki: check_gain(ki, "ki must be finite")?,
        })
    }
}

/// PI controller state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PIControllerState {
    /// Integral accumulator.
    pub integral: f64,
}

impl ControlLaw for PIController {
    type State = PIControllerState;

    fn name(&self) -> &'static str {
        "PI"
    }

    fn update(
        &self,
        state: &PIControllerState,
        error: f64,
        dt: f64,
    ) -> ControlResult<(PIControllerState, f64)> {
        let dt = check_dt(dt)?;
        let error = check_error(error)?;

        // The current error is part of the integral it is weighted with.
        let integral = state.integral + dt * error;
        let output = self.kp * error + self.ki * integral;

        Ok((PIControllerState { integral }, output))
    }
}

/// PID controller configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PIDController {
    /// Proportional gain.
    pub kp: f64,
    /// Integral gain.
    pub ki: f64,
    /// Derivative gain.
    pub kd: f64,
}

impl PIDController {
    /// Create a new PID controller.
    ///
    /// # Arguments
    ///
    /// * `kp` - Proportional gain
    /// * `ki` - Integral gain
    /// * `kd` - Derivative gain
    pub fn new(kp: f64, ki: f64, kd: f64) -> ControlResult<Self> {
        Ok(Self {
            kp: check_gain(kp, "kp must be finite")?,
            ki: check_gain(ki, "ki must be finite")?,
            kd: check_gain(kd, "kd must be finite")?,
        })
    }
}

/// PID controller state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PIDControllerState {
    /// Integral accumulator.
    pub integral: f64,
    /// Error seen on the previous step (zero before the first step).
    pub previous_error: f64,
}

impl ControlLaw for PIDController {
    type State = PIDControllerState;

    fn name(&self) -> &'static str {
        "PID"
    }

    fn update(
        &self,
        state: &PIDControllerState,
        error: f64,
        dt: f64,
    ) -> ControlResult<(PIDControllerState, f64)> {
        let dt = check_dt(dt)?;
        let error = check_error(error)?;

        let integral = state.integral + dt * error;
        // Uses the previous step's error; it is overwritten only afterwards.
        let derivative = (error - state.previous_error) / dt;
        let output = self.kp * error + self.ki * integral + self.kd * derivative;

        let next = PIDControllerState {
            integral,
            previous_error: error,
        };
        Ok((next, output))
    }
}

impl<L: ControlLaw> From<L> for ControlBlock<L> {
    fn from(law: L) -> Self {
        ControlBlock::new(law)
    }
}
