//! Stateful controller blocks built from pure control laws.

use crate::error::ControlResult;

/// A control law: fixed configuration and a pure state transition.
pub trait ControlLaw {
    /// Memory carried between steps (integral, previous error, ...).
    type State: Clone + Default;

    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Compute the action for `error` over time step `dt`.
    ///
    /// Returns the updated state and the action. Must not have side effects.
    fn update(&self, state: &Self::State, error: f64, dt: f64)
    -> ControlResult<(Self::State, f64)>;
}

/// Stateful controller stepped once per simulation tick.
pub trait Controller: Send {
    fn name(&self) -> &str;

    /// Consume one error sample and return the control action.
    ///
    /// On error the controller's memory is left as it was before the call.
    fn step(&mut self, error: f64, dt: f64) -> ControlResult<f64>;

    /// Forget all accumulated memory.
    fn reset(&mut self);
}

impl<C: Controller + ?Sized> Controller for Box<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn step(&mut self, error: f64, dt: f64) -> ControlResult<f64> {
        (**self).step(error, dt)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

/// A control law paired with its running state.
#[derive(Debug, Clone)]
pub struct ControlBlock<L: ControlLaw> {
    law: L,
    state: L::State,
}

impl<L: ControlLaw> ControlBlock<L> {
    pub fn new(law: L) -> Self {
        Self {
            law,
            state: L::State::default(),
        }
    }

    pub fn law(&self) -> &L {
        &self.law
    }

    pub fn state(&self) -> &L::State {
        &self.state
    }
}

impl<L> Controller for ControlBlock<L>
where
    L: ControlLaw + Send,
    L::State: Send,
{
    fn name(&self) -> &str {
        self.law.name()
    }

    fn step(&mut self, error: f64, dt: f64) -> ControlResult<f64> {
        let (next, action) = self.law.update(&self.state, error, dt)?;
        self.state = next;
        Ok(action)
    }

    fn reset(&mut self) {
        self.state = L::State::default();
    }
}
