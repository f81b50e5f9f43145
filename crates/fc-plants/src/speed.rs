//! Speed regulator plants.
//!
//! [`SpeedSystem`] coasts down by a decay factor whenever it receives no
//! positive power and otherwise adds the power to its speed. Speeds are kept
//! at one decimal place so runs are reproducible digit for digit.
//!
//! [`OnOffSpeedSystem`] only understands "faster" or "slower" and moves its
//! speed one unit per step.

use crate::common::{check_input, check_positive};
use crate::error::{PlantError, PlantResult};
use crate::traits::Plant;
use fc_core::round_to_tenths;

pub const DEFAULT_DECAY: f64 = 0.90;
pub const DEFAULT_INITIAL_SPEED: f64 = 10.0;

fn check_initial_speed(speed: f64) -> PlantResult<f64> {
    if speed.is_finite() && speed >= 0.0 {
        Ok(speed)
    } else {
        Err(PlantError::InvalidArg {
            what: "initial speed must be finite and non-negative",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeedSystem {
    /// Fraction of speed kept per unpowered step, in `(0, 1]`.
    decay: f64,
    speed: f64,
}

impl Default for SpeedSystem {
    fn default() -> Self {
        Self {
            decay: DEFAULT_DECAY,
            speed: DEFAULT_INITIAL_SPEED,
        }
    }
}

impl SpeedSystem {
    pub fn new(decay: f64, initial_speed: f64) -> PlantResult<Self> {
        let decay = check_positive(decay, "decay must be positive")?;
        if decay > 1.0 {
            return Err(PlantError::InvalidArg {
                what: "decay must not exceed 1",
            });
        }
        Ok(Self {
            decay,
            speed: check_initial_speed(initial_speed)?,
        })
    }

    pub fn decay(&self) -> f64 {
        self.decay
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Apply `power` for one step and return the new speed.
    pub fn interact(&mut self, power: f64) -> PlantResult<f64> {
        let power = check_input(power, "speed power")?;
        let next = if power <= 0.0 {
            round_to_tenths(self.decay * self.speed)
        } else {
            round_to_tenths(self.speed + power)
        };
        if !next.is_finite() {
            return Err(PlantError::Domain {
                what: "speed after applying power",
                value: next,
            });
        }
        self.speed = next.max(0.0);
        Ok(self.speed)
    }
}

impl Plant for SpeedSystem {
    fn name(&self) -> &str {
        "speed"
    }

    fn initial_output(&self) -> f64 {
        self.speed
    }

    fn step(&mut self, input: f64) -> PlantResult<f64> {
        self.interact(input)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OnOffSpeedSystem {
    speed: f64,
}

impl Default for OnOffSpeedSystem {
    fn default() -> Self {
        Self {
            speed: DEFAULT_INITIAL_SPEED,
        }
    }
}

impl OnOffSpeedSystem {
    pub fn new(initial_speed: f64) -> PlantResult<Self> {
        Ok(Self {
            speed: check_initial_speed(initial_speed)?,
        })
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Speed up by one unit if `increase`, otherwise slow down by one (not below zero).
    pub fn interact(&mut self, increase: bool) -> f64 {
        self.speed = if increase {
            self.speed + 1.0
        } else {
            (self.speed - 1.0).max(0.0)
        };
        self.speed
    }
}

impl Plant for OnOffSpeedSystem {
    fn name(&self) -> &str {
        "on-off speed"
    }

    fn initial_output(&self) -> f64 {
        self.speed
    }

    /// Positive input means "increase"; zero or negative means "decrease".
    fn step(&mut self, input: f64) -> PlantResult<f64> {
        let input = check_input(input, "on-off setting")?;
        Ok(self.interact(input > 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn powered_step_rounds_to_tenths() {
        let mut sys = SpeedSystem::default();
        assert_eq!(sys.interact(3.515).unwrap(), 13.5);
        assert_eq!(sys.interact(1.0695).unwrap(), 14.6);
    }

    #[test]
    fn unpowered_step_decays() {
        let mut sys = SpeedSystem::default();
        assert_eq!(sys.interact(0.0).unwrap(), 9.0);
        assert_eq!(sys.interact(-4.0).unwrap(), 8.1);
        assert_eq!(sys.interact(-4.0).unwrap(), 7.3);
    }

    #[test]
    fn overflowing_power_keeps_previous_speed() {
        let mut sys = SpeedSystem::default();
        let err = sys.interact(1e308).unwrap_err();
        assert!(matches!(err, PlantError::Domain { value, .. } if value.is_infinite()));
        assert_eq!(sys.speed(), 10.0);
        assert_eq!(sys.interact(0.0).unwrap(), 9.0);
    }

    #[test]
    fn invalid_parameters() {
        assert!(SpeedSystem::new(0.0, 10.0).is_err());
        assert!(SpeedSystem::new(1.5, 10.0).is_err());
        assert!(SpeedSystem::new(0.9, -1.0).is_err());
        assert!(SpeedSystem::new(0.9, f64::NAN).is_err());
        assert!(OnOffSpeedSystem::new(-2.0).is_err());
    }

    #[test]
    fn nan_power_keeps_speed() {
        let mut sys = SpeedSystem::default();
        assert!(sys.interact(f64::NAN).is_err());
        assert_eq!(sys.speed(), 10.0);
    }

    #[test]
    fn on_off_moves_one_unit() {
        let mut sys = OnOffSpeedSystem::default();
        assert_eq!(sys.step(1.0).unwrap(), 11.0);
        assert_eq!(sys.step(-1.0).unwrap(), 10.0);
        assert_eq!(sys.step(0.0).unwrap(), 9.0);
    }

    #[test]
    fn on_off_never_negative() {
        let mut sys = OnOffSpeedSystem::new(1.0).unwrap();
        sys.interact(false);
        sys.interact(false);
        assert_eq!(sys.speed(), 0.0);
    }
}
