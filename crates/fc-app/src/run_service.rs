//! Run execution: single scenarios, streamed scenarios and parallel batches.
//!
//! Every run constructs fresh plant and controller instances, so concurrent
//! runs share nothing mutable.

use crate::error::{AppError, AppResult};
use crate::progress::{RunProgressEvent, RunStage};
use crate::scenario::{ScenarioDef, validate_scenario};
use fc_controls::Controller;
use fc_core::Step;
use fc_plants::Plant;
use fc_sim::{
    CancelToken, FeedbackLoop, LoopStatus, Observation, RunStatus, Schedule, SimulationRun,
};
use rayon::prelude::*;
use tracing::{debug, info};

/// Per-run overrides of a scenario's settings.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub length: Option<usize>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct RunResponse {
    pub scenario: String,
    pub seed: u64,
    pub run: SimulationRun,
}

/// Outcome of a streamed run, whose observations went to a sink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamOutcome {
    pub seed: u64,
    pub status: RunStatus,
    pub emitted: u64,
}

type ScenarioLoop = FeedbackLoop<Box<dyn Plant>, Box<dyn Controller>, Schedule>;

/// Emit a progress event roughly this often during long runs.
const PROGRESS_EVERY: u64 = 1000;

fn resolve(def: &ScenarioDef, opts: &RunOptions) -> AppResult<(ScenarioDef, u64)> {
    let mut def = def.clone();
    if let Some(length) = opts.length {
        def.length = Some(length);
    }
    validate_scenario(&def)?;
    let seed = match opts.seed.or(def.seed) {
        Some(seed) => seed,
        None => {
            let seed = rand::random::<u64>();
            debug!(scenario = %def.name, seed, "no seed given, drew one");
            seed
        }
    };
    Ok((def, seed))
}

fn build_loop(def: &ScenarioDef, seed: u64) -> AppResult<ScenarioLoop> {
    let plant = def.plant.build(seed)?;
    let controller = def.controller.as_ref().map(|c| c.build()).transpose()?;
    Ok(FeedbackLoop::new(
        plant,
        controller,
        def.schedule.clone(),
        def.loop_options(),
    )?)
}

/// Run a bounded scenario to completion (or cancellation) and collect it.
pub fn run_scenario(
    def: &ScenarioDef,
    opts: &RunOptions,
    cancel: Option<CancelToken>,
    mut progress: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<RunResponse> {
    let (def, seed) = resolve(def, opts)?;
    let Some(length) = def.length else {
        return Err(AppError::Validation(format!(
            "scenario '{}' is unbounded; give it a length or stream it",
            def.name
        )));
    };

    let mut emit = |stage: RunStage, emitted: u64, last_step: Option<Step>| {
        if let Some(cb) = progress.as_mut() {
            let mut event = RunProgressEvent::stage(&def.name, stage, emitted, Some(length));
            event.last_step = last_step;
            cb(event);
        }
    };
    emit(RunStage::Configuring, 0, None);

    let mut lp = build_loop(&def, seed)?;
    if let Some(token) = cancel {
        lp = lp.with_cancel(token);
    }

    let mut observations = Vec::with_capacity(length);
    let status = lp.drive(|obs| {
        observations.push(*obs);
        if obs.step % PROGRESS_EVERY == 0 {
            emit(RunStage::Running, obs.step + 1, Some(obs.step));
        }
    })?;

    let emitted = observations.len() as u64;
    let last_step = observations.last().map(|o| o.step);
    let stage = match status {
        RunStatus::Completed => RunStage::Completed,
        RunStatus::Cancelled => RunStage::Cancelled,
    };
    emit(stage, emitted, last_step);
    info!(scenario = %def.name, points = emitted, ?status, "scenario run finished");

    Ok(RunResponse {
        scenario: def.name,
        seed,
        run: SimulationRun {
            observations,
            status,
        },
    })
}

/// Pull observations one at a time and hand each to `sink`.
///
/// Works for unbounded scenarios: the run ends when the length is reached,
/// `cancel` fires, or `sink` returns an error (which is passed through).
pub fn stream_scenario<F>(
    def: &ScenarioDef,
    opts: &RunOptions,
    cancel: Option<CancelToken>,
    mut sink: F,
) -> AppResult<StreamOutcome>
where
    F: FnMut(&Observation) -> AppResult<()>,
{
    let (def, seed) = resolve(def, opts)?;
    let mut lp = build_loop(&def, seed)?;
    if let Some(token) = cancel {
        lp = lp.with_cancel(token);
    }

    let mut emitted = 0;
    while let Some(obs) = lp.advance() {
        sink(&obs?)?;
        emitted += 1;
    }
    let status = match lp.status() {
        LoopStatus::Cancelled => RunStatus::Cancelled,
        _ => RunStatus::Completed,
    };
    Ok(StreamOutcome {
        seed,
        status,
        emitted,
    })
}

/// Run independent scenarios in parallel. Results keep the input order.
pub fn run_batch(defs: &[ScenarioDef], opts: &RunOptions) -> Vec<AppResult<RunResponse>> {
    defs.par_iter()
        .map(|def| run_scenario(def, opts, None, None))
        .collect()
}
