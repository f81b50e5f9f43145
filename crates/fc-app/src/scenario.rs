//! Scenario file schema.
//!
//! A scenario names one plant, an optional controller (absent means open
//! loop) and a set-point schedule, plus the run's length and seed.

use crate::error::{AppError, AppResult};
use fc_controls::{ControlBlock, Controller, OnOff, PIController, PIDController, Proportional};
use fc_plants::{Buffer, Cache, OnOffSpeedSystem, Plant, SpeedSystem};
use fc_sim::{LoopOptions, Schedule, Setpoint};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_dt() -> f64 {
    1.0
}

fn default_capacity() -> f64 {
    fc_plants::cache::DEFAULT_CAPACITY
}

fn default_decay() -> f64 {
    fc_plants::speed::DEFAULT_DECAY
}

fn default_initial_speed() -> f64 {
    fc_plants::speed::DEFAULT_INITIAL_SPEED
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Observations to emit, seed included. Absent means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    #[serde(default = "default_dt")]
    pub dt: f64,
    /// Seed for stochastic plants. Absent means a fresh seed per run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub plant: PlantDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<ControllerDef>,
    pub schedule: Schedule,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum PlantDef {
    Buffer {
        max_wip: u64,
        max_flow: u64,
    },
    Cache {
        #[serde(default = "default_capacity")]
        capacity: f64,
    },
    Speed {
        #[serde(default = "default_decay")]
        decay: f64,
        #[serde(default = "default_initial_speed")]
        initial_speed: f64,
    },
    OnOffSpeed {
        #[serde(default = "default_initial_speed")]
        initial_speed: f64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ControllerDef {
    OnOff,
    P { kp: f64 },
    PI { kp: f64, ki: f64 },
    PID { kp: f64, ki: f64, kd: f64 },
}

impl PlantDef {
    pub fn label(&self) -> &'static str {
        match self {
            PlantDef::Buffer { .. } => "buffer",
            PlantDef::Cache { .. } => "cache",
            PlantDef::Speed { .. } => "speed",
            PlantDef::OnOffSpeed { .. } => "on-off speed",
        }
    }

    pub fn is_stochastic(&self) -> bool {
        matches!(self, PlantDef::Buffer { .. })
    }

    /// Construct a fresh plant. `seed` is only used by stochastic plants.
    pub fn build(&self, seed: u64) -> AppResult<Box<dyn Plant>> {
        let plant: Box<dyn Plant> = match *self {
            PlantDef::Buffer { max_wip, max_flow } => {
                Box::new(Buffer::new(max_wip, max_flow, seed)?)
            }
            PlantDef::Cache { capacity } => Box::new(Cache::new(capacity)?),
            PlantDef::Speed {
                decay,
                initial_speed,
            } => Box::new(SpeedSystem::new(decay, initial_speed)?),
            PlantDef::OnOffSpeed { initial_speed } => {
                Box::new(OnOffSpeedSystem::new(initial_speed)?)
            }
        };
        Ok(plant)
    }
}

impl ControllerDef {
    pub fn label(&self) -> &'static str {
        match self {
            ControllerDef::OnOff => "on-off",
            ControllerDef::P { .. } => "P",
            ControllerDef::PI { .. } => "PI",
            ControllerDef::PID { .. } => "PID",
        }
    }

    /// Construct a controller with empty memory.
    pub fn build(&self) -> AppResult<Box<dyn Controller>> {
        let controller: Box<dyn Controller> = match *self {
            ControllerDef::OnOff => Box::new(ControlBlock::new(OnOff)),
            ControllerDef::P { kp } => Box::new(ControlBlock::new(Proportional::new(kp)?)),
            ControllerDef::PI { kp, ki } => Box::new(ControlBlock::new(PIController::new(kp, ki)?)),
            ControllerDef::PID { kp, ki, kd } => {
                Box::new(ControlBlock::new(PIDController::new(kp, ki, kd)?))
            }
        };
        Ok(controller)
    }
}

impl ScenarioDef {
    pub fn loop_options(&self) -> LoopOptions {
        LoopOptions {
            length: self.length,
            dt: self.dt,
        }
    }

    pub fn is_closed_loop(&self) -> bool {
        self.controller.is_some()
    }
}

/// Check a scenario can be built and run.
pub fn validate_scenario(def: &ScenarioDef) -> AppResult<()> {
    if def.name.trim().is_empty() {
        return Err(AppError::Validation("scenario name must not be empty".into()));
    }
    def.loop_options()
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    def.schedule
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    def.plant.build(def.seed.unwrap_or_default())?;
    if let Some(controller) = &def.controller {
        controller.build()?;
    }
    Ok(())
}

pub fn parse_scenario(content: &str) -> AppResult<ScenarioDef> {
    let def: ScenarioDef = serde_yaml::from_str(content)?;
    validate_scenario(&def)?;
    Ok(def)
}

pub fn load_scenario(path: &Path) -> AppResult<ScenarioDef> {
    let content = std::fs::read_to_string(path).map_err(|source| AppError::ScenarioFileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_scenario(&content)
}

pub fn scenario_yaml(def: &ScenarioDef) -> AppResult<String> {
    Ok(serde_yaml::to_string(def)?)
}

pub fn save_scenario(path: &Path, def: &ScenarioDef) -> AppResult<()> {
    validate_scenario(def)?;
    let content = scenario_yaml(def)?;
    std::fs::write(path, content).map_err(|source| AppError::ScenarioFileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PI_SPEED: &str = r#"
name: speed-pi
length: 60
plant: { type: Speed }
controller: { type: PI, kp: 0.7, ki: 0.003 }
schedule:
  type: Steps
  steps:
    - { until: 21, value: 15.0 }
    - { until: 41, value: 5.0 }
  otherwise: 20.0
"#;

    #[test]
    fn parse_applies_defaults() {
        let def = parse_scenario(PI_SPEED).unwrap();
        assert_eq!(def.dt, 1.0);
        assert_eq!(def.seed, None);
        assert_eq!(
            def.plant,
            PlantDef::Speed {
                decay: 0.9,
                initial_speed: 10.0
            }
        );
        assert!(def.is_closed_loop());
    }

    #[test]
    fn open_loop_when_controller_absent() {
        let yaml = r#"
name: buffer-open
length: 10
seed: 3
plant: { type: Buffer, max_wip: 10, max_flow: 10 }
schedule: { type: Constant, value: 5.0 }
"#;
        let def = parse_scenario(yaml).unwrap();
        assert!(!def.is_closed_loop());
        assert!(def.plant.is_stochastic());
    }

    #[test]
    fn invalid_parameters_fail_validation() {
        let yaml = PI_SPEED.replace("{ type: Speed }", "{ type: Speed, decay: 0.0 }");
        assert!(matches!(parse_scenario(&yaml), Err(AppError::Validation(_))));

        let yaml = PI_SPEED.replace("length: 60", "length: 0");
        assert!(parse_scenario(&yaml).is_err());

        let yaml = PI_SPEED.replace("until: 41", "until: 10");
        assert!(parse_scenario(&yaml).is_err());
    }

    #[test]
    fn oversized_buffer_fails_validation() {
        let yaml = r#"
name: huge-buffer
length: 10
seed: 3
plant: { type: Buffer, max_wip: 18446744073709551615, max_flow: 10 }
schedule: { type: Constant, value: 5.0 }
"#;
        assert!(matches!(parse_scenario(yaml), Err(AppError::Validation(_))));
    }

    #[test]
    fn unknown_plant_type_is_yaml_error() {
        let yaml = PI_SPEED.replace("type: Speed", "type: Turbine");
        assert!(matches!(parse_scenario(&yaml), Err(AppError::Yaml(_))));
    }
}
