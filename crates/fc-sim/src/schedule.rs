//! Set-point schedules.
//!
//! A schedule is a pure function from step index to target value. It holds no
//! mutable state, so one schedule can be shared by any number of runs.

use crate::error::{SimError, SimResult};
use fc_core::Step;
use serde::{Deserialize, Serialize};

/// Target value for each step.
pub trait Setpoint: Send + Sync {
    fn target(&self, step: Step) -> f64;

    /// Check the schedule is well formed before a run starts.
    fn validate(&self) -> SimResult<()> {
        Ok(())
    }
}

impl<S: Setpoint + ?Sized> Setpoint for &S {
    fn target(&self, step: Step) -> f64 {
        (**self).target(step)
    }

    fn validate(&self) -> SimResult<()> {
        (**self).validate()
    }
}

impl<S: Setpoint + ?Sized> Setpoint for std::sync::Arc<S> {
    fn target(&self, step: Step) -> f64 {
        (**self).target(step)
    }

    fn validate(&self) -> SimResult<()> {
        (**self).validate()
    }
}

/// Set-point backed by a plain function or closure.
#[derive(Clone, Copy)]
pub struct FnSetpoint<F>(F);

/// Wrap a function of the step index as a [`Setpoint`].
pub fn from_fn<F>(f: F) -> FnSetpoint<F>
where
    F: Fn(Step) -> f64 + Send + Sync,
{
    FnSetpoint(f)
}

impl<F> Setpoint for FnSetpoint<F>
where
    F: Fn(Step) -> f64 + Send + Sync,
{
    fn target(&self, step: Step) -> f64 {
        (self.0)(step)
    }
}

/// One piece of a step function: `value` applies to every step below `until`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub until: Step,
    pub value: f64,
}

impl Segment {
    /// Applies while `step < bound`.
    pub fn below(bound: Step, value: f64) -> Self {
        Self {
            until: bound,
            value,
        }
    }

    /// Applies while `step <= bound`.
    pub fn through(bound: Step, value: f64) -> Self {
        Self {
            until: bound.saturating_add(1),
            value,
        }
    }
}

/// Piecewise-constant schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Schedule {
    Constant {
        value: f64,
    },
    /// Segments in increasing `until` order, then `otherwise` for all later steps.
    Steps {
        steps: Vec<Segment>,
        otherwise: f64,
    },
}

impl Schedule {
    pub fn constant(value: f64) -> SimResult<Self> {
        let schedule = Schedule::Constant { value };
        schedule.validate()?;
        Ok(schedule)
    }

    pub fn steps(steps: Vec<Segment>, otherwise: f64) -> SimResult<Self> {
        let schedule = Schedule::Steps { steps, otherwise };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Steps at which the target changes, in order.
    pub fn breakpoints(&self) -> Vec<Step> {
        match self {
            Schedule::Constant { .. } => Vec::new(),
            Schedule::Steps { steps, .. } => steps.iter().map(|s| s.until).collect(),
        }
    }
}

impl Setpoint for Schedule {
    fn target(&self, step: Step) -> f64 {
        match self {
            Schedule::Constant { value } => *value,
            Schedule::Steps { steps, otherwise } => steps
                .iter()
                .find(|s| step < s.until)
                .map_or(*otherwise, |s| s.value),
        }
    }

    fn validate(&self) -> SimResult<()> {
        match self {
            Schedule::Constant { value } => {
                if !value.is_finite() {
                    return Err(SimError::config("constant set-point must be finite"));
                }
            }
            Schedule::Steps { steps, otherwise } => {
                if !otherwise.is_finite() {
                    return Err(SimError::config("fallback set-point must be finite"));
                }
                if let Some(s) = steps.iter().find(|s| !s.value.is_finite()) {
                    return Err(SimError::config(format!(
                        "set-point for steps below {} must be finite",
                        s.until
                    )));
                }
                if steps.windows(2).any(|w| w[0].until >= w[1].until) {
                    return Err(SimError::config(
                        "schedule segments must have strictly increasing bounds",
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache_schedule() -> Schedule {
        Schedule::steps(
            vec![
                Segment::below(50, 0.6),
                Segment::below(100, 0.8),
                Segment::below(150, 0.1),
            ],
            0.9,
        )
        .unwrap()
    }

    #[test]
    fn step_function_switches_at_bounds() {
        let s = cache_schedule();
        assert_eq!(s.target(0), 0.6);
        assert_eq!(s.target(49), 0.6);
        assert_eq!(s.target(50), 0.8);
        assert_eq!(s.target(149), 0.1);
        assert_eq!(s.target(150), 0.9);
        assert_eq!(s.target(1_000_000), 0.9);
        assert_eq!(s.breakpoints(), vec![50, 100, 150]);
    }

    #[test]
    fn inclusive_segments() {
        let s = Schedule::steps(
            vec![Segment::through(20, 15.0), Segment::through(40, 5.0)],
            20.0,
        )
        .unwrap();
        assert_eq!(s.target(20), 15.0);
        assert_eq!(s.target(21), 5.0);
        assert_eq!(s.target(40), 5.0);
        assert_eq!(s.target(41), 20.0);
    }

    #[test]
    fn evaluation_is_order_independent() {
        let s = cache_schedule();
        let forward: Vec<f64> = (0..200).map(|t| s.target(t)).collect();
        let backward: Vec<f64> = (0..200).rev().map(|t| s.target(t)).collect();
        assert!(forward.iter().eq(backward.iter().rev()));
    }

    #[test]
    fn malformed_schedules_rejected() {
        assert!(Schedule::constant(f64::NAN).is_err());
        assert!(Schedule::steps(vec![Segment::below(10, 1.0)], f64::INFINITY).is_err());
        assert!(
            Schedule::steps(
                vec![Segment::below(10, 1.0), Segment::below(10, 2.0)],
                0.0
            )
            .is_err()
        );
        assert!(Schedule::steps(vec![Segment::below(5, f64::NAN)], 0.0).is_err());
    }

    #[test]
    fn closures_work_as_setpoints() {
        let s = from_fn(|t| if t < 100 { 0.0 } else { 50.0 });
        assert_eq!(s.target(99), 0.0);
        assert_eq!(s.target(100), 50.0);
    }
}
