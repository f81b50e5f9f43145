//! Text renderings of a finished run.
//!
//! These only format an already-computed sequence; nothing here feeds back
//! into the simulation.

use crate::error::AppResult;
use crate::query::RunSummary;
use fc_sim::{Observation, SimulationRun};
use std::fmt::Write as _;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// `name:` header followed by `step,value` lines.
    #[default]
    Print,
    Csv,
    Json,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "print" => Ok(Self::Print),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown export format '{other}' (print, csv, json)")),
        }
    }
}

pub fn observation_line(obs: &Observation) -> String {
    format!("{},{}", obs.step, obs.value)
}

pub fn to_print(name: &str, run: &SimulationRun) -> String {
    let mut out = format!("{name}:\n");
    for obs in run {
        let _ = writeln!(out, "{}", observation_line(obs));
    }
    out
}

pub fn to_csv(run: &SimulationRun) -> String {
    let mut out = String::from("step,value\n");
    for obs in run {
        let _ = writeln!(out, "{}", observation_line(obs));
    }
    out
}

pub fn summary_json(summary: &RunSummary) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

/// Render `run` in `format`. JSON renders the run summary, not the points.
pub fn render(
    format: ExportFormat,
    name: &str,
    run: &SimulationRun,
    summary: &RunSummary,
) -> AppResult<String> {
    match format {
        ExportFormat::Print => Ok(to_print(name, run)),
        ExportFormat::Csv => Ok(to_csv(run)),
        ExportFormat::Json => summary_json(summary),
    }
}
