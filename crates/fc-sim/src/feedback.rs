//! Feedback loop driver.
//!
//! The loop is a recurrence over one owned "last observation":
//!
//! ```text
//! y[0]  = plant.initial_output()                 (seed, emitted as step 0)
//! e[t]  = schedule(t) - y[t-1]                    (t >= 1)
//! u[t]  = controller.step(e[t], dt)               (closed loop)
//! u[t]  = schedule(t)                             (open loop)
//! y[t]  = plant.step(u[t])
//! ```
//!
//! Step `t + 1` is never computed before `y[t]` is committed, which is what
//! makes the plant -> controller -> plant cycle well founded.

use crate::cancel::CancelToken;
use crate::error::{SimError, SimResult, StepFailure};
use crate::record::{Observation, RunStatus, SimulationRun};
use crate::schedule::Setpoint;
use fc_controls::{ControlResult, Controller};
use fc_core::{Step, ensure_positive};
use fc_plants::Plant;
use std::iter::FusedIterator;
use tracing::{debug, trace, warn};

/// Options for feedback loop runs.
#[derive(Clone, Debug, PartialEq)]
pub struct LoopOptions {
    /// Number of observations to emit, seed included. `None` runs until cancelled
    /// or until the consumer stops pulling.
    pub length: Option<usize>,
    /// Time step handed to the controller.
    pub dt: f64,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            length: Some(100),
            dt: 1.0,
        }
    }
}

impl LoopOptions {
    pub fn with_length(length: usize) -> Self {
        Self {
            length: Some(length),
            ..Self::default()
        }
    }

    pub fn unbounded() -> Self {
        Self {
            length: None,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.length == Some(0) {
            return Err(SimError::config("run length must be positive"));
        }
        ensure_positive(self.dt, "dt must be positive")?;
        Ok(())
    }
}

/// Stand-in controller type for open-loop runs. Never stepped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoController;

impl Controller for NoController {
    fn name(&self) -> &str {
        "none"
    }

    fn step(&mut self, error: f64, _dt: f64) -> ControlResult<f64> {
        Ok(error)
    }

    fn reset(&mut self) {}
}

/// Lifecycle of a loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStatus {
    Running,
    Completed,
    Cancelled,
    Failed,
}

/// Lazily evaluated feedback loop over one plant and an optional controller.
///
/// Iterating yields `Ok(Observation)` in strictly increasing step order. A
/// failed step yields a single `Err` and ends the sequence.
pub struct FeedbackLoop<P, C, S> {
    plant: P,
    controller: Option<C>,
    schedule: S,
    opts: LoopOptions,
    cancel: Option<CancelToken>,
    next_step: Step,
    last: f64,
    status: LoopStatus,
    /// The error a failed step produced, replayed by later `drive` calls.
    failure: Option<SimError>,
}

impl<P: Plant, S: Setpoint> FeedbackLoop<P, NoController, S> {
    /// Open loop: the schedule value is applied to the plant directly.
    pub fn open(plant: P, schedule: S, opts: LoopOptions) -> SimResult<Self> {
        Self::new(plant, None, schedule, opts)
    }
}

impl<P: Plant, C: Controller, S: Setpoint> FeedbackLoop<P, C, S> {
    /// Closed loop: the controller acts on `schedule(t) - y[t-1]`.
    pub fn closed(plant: P, controller: C, schedule: S, opts: LoopOptions) -> SimResult<Self> {
        Self::new(plant, Some(controller), schedule, opts)
    }

    /// Open loop when `controller` is `None`, closed loop otherwise.
    pub fn new(plant: P, controller: Option<C>, schedule: S, opts: LoopOptions) -> SimResult<Self> {
        opts.validate()?;
        schedule.validate()?;
        let seed = plant.initial_output();
        if !seed.is_finite() {
            return Err(SimError::config("plant initial output must be finite"));
        }
        debug!(
            plant = plant.name(),
            controller = controller.as_ref().map_or("open loop", |c| c.name()),
            length = ?opts.length,
            dt = opts.dt,
            "feedback loop configured"
        );
        Ok(Self {
            plant,
            controller,
            schedule,
            opts,
            cancel: None,
            next_step: 0,
            last: seed,
            status: LoopStatus::Running,
            failure: None,
        })
    }

    /// Observe `token` between steps.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn status(&self) -> LoopStatus {
        self.status
    }

    pub fn options(&self) -> &LoopOptions {
        &self.opts
    }

    pub fn is_closed_loop(&self) -> bool {
        self.controller.is_some()
    }

    /// Step the next call will produce.
    pub fn next_step(&self) -> Step {
        self.next_step
    }

    /// Last committed observation value (the seed before step 0 is emitted).
    pub fn last_value(&self) -> f64 {
        self.last
    }

    pub fn plant(&self) -> &P {
        &self.plant
    }

    pub fn controller(&self) -> Option<&C> {
        self.controller.as_ref()
    }

    /// Hand back the plant and controller, internal memory intact, so a caller
    /// can continue them in a later run.
    pub fn into_parts(self) -> (P, Option<C>) {
        (self.plant, self.controller)
    }

    fn finish(&mut self, status: LoopStatus) {
        self.status = status;
        match status {
            LoopStatus::Completed => {
                debug!(steps = self.next_step, "feedback loop completed")
            }
            LoopStatus::Cancelled => {
                warn!(steps = self.next_step, "feedback loop cancelled")
            }
            LoopStatus::Failed | LoopStatus::Running => {}
        }
    }

    fn compute(&mut self, step: Step) -> Result<f64, StepFailure> {
        let target = self.schedule.target(step);
        if !target.is_finite() {
            return Err(StepFailure::Setpoint(target));
        }
        let action = match self.controller.as_mut() {
            Some(controller) => controller.step(target - self.last, self.opts.dt)?,
            None => target,
        };
        let value = self.plant.step(action)?;
        if !value.is_finite() {
            return Err(StepFailure::Output(value));
        }
        Ok(value)
    }

    /// Produce the next observation, or `None` once the run has ended.
    pub fn advance(&mut self) -> Option<SimResult<Observation>> {
        if self.status != LoopStatus::Running {
            return None;
        }
        if self.cancel.as_ref().is_some_and(|c| c.is_cancelled()) {
            self.finish(LoopStatus::Cancelled);
            return None;
        }
        if let Some(length) = self.opts.length {
            if self.next_step >= length as Step {
                self.finish(LoopStatus::Completed);
                return None;
            }
        }

        let step = self.next_step;
        let value = if step == 0 {
            self.last
        } else {
            match self.compute(step) {
                Ok(value) => value,
                Err(cause) => {
                    warn!(step, %cause, "feedback loop aborted");
                    self.finish(LoopStatus::Failed);
                    let err = SimError::at_step(step, cause);
                    self.failure = Some(err.clone());
                    return Some(Err(err));
                }
            }
        };

        self.last = value;
        self.next_step += 1;
        trace!(step, value, "observation committed");
        Some(Ok(Observation { step, value }))
    }

    /// Push every observation into `sink` until the run ends.
    ///
    /// Returns how the run ended; a failed step is returned as the error.
    pub fn drive<F>(&mut self, mut sink: F) -> SimResult<RunStatus>
    where
        F: FnMut(&Observation),
    {
        if self.opts.length.is_none() && self.cancel.is_none() {
            return Err(SimError::config(
                "unbounded runs need a cancel token or must be consumed lazily",
            ));
        }
        while let Some(obs) = self.advance() {
            sink(&obs?);
        }
        match self.status {
            LoopStatus::Cancelled => Ok(RunStatus::Cancelled),
            LoopStatus::Completed => Ok(RunStatus::Completed),
            LoopStatus::Failed | LoopStatus::Running => match &self.failure {
                Some(err) => Err(err.clone()),
                None => Err(SimError::config("loop stopped without a final status")),
            },
        }
    }

    /// Run to the end and collect every observation.
    pub fn run(mut self) -> SimResult<SimulationRun> {
        let mut observations = Vec::with_capacity(self.opts.length.unwrap_or(0));
        let status = self.drive(|obs| observations.push(*obs))?;
        Ok(SimulationRun {
            observations,
            status,
        })
    }
}

impl<P: Plant, C: Controller, S: Setpoint> Iterator for FeedbackLoop<P, C, S> {
    type Item = SimResult<Observation>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match (self.status, self.opts.length) {
            (LoopStatus::Running, Some(length)) => {
                let remaining = length.saturating_sub(self.next_step as usize);
                (0, Some(remaining))
            }
            (LoopStatus::Running, None) => (0, None),
            _ => (0, Some(0)),
        }
    }
}

impl<P: Plant, C: Controller, S: Setpoint> FusedIterator for FeedbackLoop<P, C, S> {}
