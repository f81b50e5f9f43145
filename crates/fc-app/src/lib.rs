//! Shared application service layer for the feedback-loop simulator.
//!
//! Sits between the simulation engine and its front ends: scenario files,
//! the built-in experiment catalog, run execution and export formatting.

pub mod catalog;
pub mod error;
pub mod export;
pub mod progress;
pub mod query;
pub mod run_service;
pub mod scenario;

pub use error::{AppError, AppResult};
pub use export::ExportFormat;
pub use progress::{RunProgressEvent, RunStage};
pub use query::{RunSummary, summarize};
pub use run_service::{
    RunOptions, RunResponse, StreamOutcome, run_batch, run_scenario, stream_scenario,
};
pub use scenario::{
    ControllerDef, PlantDef, ScenarioDef, load_scenario, save_scenario, scenario_yaml,
};
