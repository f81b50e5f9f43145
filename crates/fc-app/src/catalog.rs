//! Built-in scenarios: the classic queue, cache and speed-control experiments.

use crate::error::{AppError, AppResult};
use crate::scenario::{ControllerDef, PlantDef, ScenarioDef};
use fc_sim::{Schedule, Segment};

/// Seed used by the built-in stochastic scenarios so they are reproducible.
pub const DEFAULT_SEED: u64 = 42;

fn buffer_schedule() -> Schedule {
    Schedule::Steps {
        steps: vec![Segment::below(100, 0.0), Segment::below(300, 50.0)],
        otherwise: 10.0,
    }
}

fn cache_schedule() -> Schedule {
    Schedule::Steps {
        steps: vec![
            Segment::below(50, 0.6),
            Segment::below(100, 0.8),
            Segment::below(150, 0.1),
        ],
        otherwise: 0.9,
    }
}

fn speed_schedule() -> Schedule {
    Schedule::Steps {
        steps: vec![Segment::through(20, 15.0), Segment::through(40, 5.0)],
        otherwise: 20.0,
    }
}

fn scenario(
    name: &str,
    description: &str,
    length: usize,
    plant: PlantDef,
    controller: Option<ControllerDef>,
    schedule: Schedule,
) -> ScenarioDef {
    ScenarioDef {
        name: name.to_string(),
        description: description.to_string(),
        length: Some(length),
        dt: 1.0,
        seed: plant.is_stochastic().then_some(DEFAULT_SEED),
        plant,
        controller,
        schedule,
    }
}

/// Every built-in scenario, in presentation order.
pub fn builtin_scenarios() -> Vec<ScenarioDef> {
    let buffer = PlantDef::Buffer {
        max_wip: 10,
        max_flow: 10,
    };
    let cache = PlantDef::Cache { capacity: 100.0 };
    let speed = PlantDef::Speed {
        decay: 0.90,
        initial_speed: 10.0,
    };

    vec![
        scenario(
            "buffer-open",
            "Open-loop work queue with constant upstream work",
            5000,
            buffer.clone(),
            None,
            Schedule::Constant { value: 5.0 },
        ),
        scenario(
            "buffer-closed",
            "PI-controlled work queue tracking 0, 50, then 10 items",
            5000,
            buffer,
            Some(ControllerDef::PI { kp: 1.25, ki: 0.01 }),
            buffer_schedule(),
        ),
        scenario(
            "cache-cumulative",
            "Cache sized by the accumulated hit-rate error",
            200,
            cache.clone(),
            Some(ControllerDef::PI { kp: 0.0, ki: 160.0 }),
            cache_schedule(),
        ),
        scenario(
            "cache-noncumulative",
            "Cache sized proportionally to the current hit-rate error",
            200,
            cache.clone(),
            Some(ControllerDef::P { kp: 160.0 }),
            cache_schedule(),
        ),
        scenario(
            "cache-constant",
            "Cache with integral control toward a constant hit rate",
            30,
            cache,
            Some(ControllerDef::PI { kp: 0.0, ki: 160.0 }),
            Schedule::Constant { value: 0.6 },
        ),
        scenario(
            "speed-on-off",
            "On-off control of a speed regulator",
            60,
            PlantDef::OnOffSpeed {
                initial_speed: 10.0,
            },
            Some(ControllerDef::OnOff),
            speed_schedule(),
        ),
        scenario(
            "speed-proportional",
            "Proportional control of a decaying speed regulator",
            60,
            speed.clone(),
            Some(ControllerDef::P { kp: 0.7 }),
            speed_schedule(),
        ),
        scenario(
            "speed-pi",
            "PI control of a decaying speed regulator",
            60,
            speed.clone(),
            Some(ControllerDef::PI { kp: 0.7, ki: 0.003 }),
            speed_schedule(),
        ),
        scenario(
            "speed-pid",
            "PID control of a decaying speed regulator",
            60,
            speed,
            Some(ControllerDef::PID {
                kp: 0.7,
                ki: 0.003,
                kd: 0.1,
            }),
            speed_schedule(),
        ),
    ]
}

pub fn find_scenario(name: &str) -> AppResult<ScenarioDef> {
    builtin_scenarios()
        .into_iter()
        .find(|s| s.name == name)
        .ok_or_else(|| AppError::ScenarioNotFound(name.to_string()))
}
