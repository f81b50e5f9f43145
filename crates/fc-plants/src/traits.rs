//! Core trait for plant models.

use crate::error::PlantResult;

/// A controlled subsystem advanced one control input at a time.
///
/// The loop driver calls [`Plant::step`] exactly once per tick, in increasing
/// step order, and never replays a completed step. A failed step must leave
/// the plant state untouched.
pub trait Plant: Send {
    /// Plant name for logging and identification.
    fn name(&self) -> &str;

    /// Reading of the plant before any input is applied (the loop's seed).
    fn initial_output(&self) -> f64;

    /// Apply one control input and return the new observed output.
    fn step(&mut self, input: f64) -> PlantResult<f64>;
}

impl<P: Plant + ?Sized> Plant for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn initial_output(&self) -> f64 {
        (**self).initial_output()
    }

    fn step(&mut self, input: f64) -> PlantResult<f64> {
        (**self).step(input)
    }
}
