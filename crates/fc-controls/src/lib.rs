//! Controller models for discrete-time feedback loops.
//!
//! A controller turns the error between a set-point and the last observed
//! plant output into a control action, once per step.
//!
//! # Architecture
//!
//! - [`ControlLaw`]: immutable gains plus a pure `update(state, error, dt)`
//!   returning the next state and the action
//! - [`ControlBlock`]: owns a law and its state, and commits the new state only
//!   when the update succeeds
//! - [`Controller`]: the stateful `step(error, dt)` seam the loop driver uses
//!
//! Controllers never saturate their own output. Clamping is the plant's job.

pub mod block;
pub mod controller;
pub mod error;

pub use block::{ControlBlock, ControlLaw, Controller};
pub use controller::{
    OnOff, PIController, PIControllerState, PIDController, PIDControllerState, Proportional,
};
pub use error::{ControlError, ControlResult};
