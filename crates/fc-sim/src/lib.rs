//! Discrete-time feedback loop simulation.
//!
//! Provides:
//! - Set-point schedules (constant and step functions)
//! - The feedback loop driver, closed loop and open loop
//! - Observation records and run outcomes
//! - Cooperative cancellation between steps
//!
//! The loop is an explicit recurrence: the observation committed at step `t`
//! is the only feedback input to step `t + 1`.

pub mod cancel;
pub mod error;
pub mod feedback;
pub mod record;
pub mod schedule;

pub use cancel::CancelToken;
pub use error::{SimError, SimResult, StepFailure};
pub use feedback::{FeedbackLoop, LoopOptions, LoopStatus, NoController};
pub use record::{Observation, RunStatus, SimulationRun};
pub use schedule::{FnSetpoint, Schedule, Segment, Setpoint, from_fn};
