//! Summary statistics over a finished run.

use fc_sim::{RunStatus, SimulationRun};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub scenario: String,
    pub seed: u64,
    pub status: RunStatus,
    pub points: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub final_value: Option<f64>,
}

pub fn summarize(scenario: &str, seed: u64, run: &SimulationRun) -> RunSummary {
    let points = run.len();
    let (min, max, sum) = run.values().fold(
        (f64::INFINITY, f64::NEG_INFINITY, 0.0),
        |(lo, hi, sum), v| (lo.min(v), hi.max(v), sum + v),
    );
    let nonempty = points > 0;
    RunSummary {
        scenario: scenario.to_string(),
        seed,
        status: run.status,
        points,
        min: nonempty.then_some(min),
        max: nonempty.then_some(max),
        mean: nonempty.then(|| sum / points as f64),
        final_value: run.last().map(|o| o.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fc_sim::Observation;

    #[test]
    fn summary_of_simple_run() {
        let run = SimulationRun {
            observations: vec![
                Observation { step: 0, value: 1.0 },
                Observation { step: 1, value: 3.0 },
                Observation { step: 2, value: 2.0 },
            ],
            status: RunStatus::Completed,
        };
        let s = summarize("demo", 7, &run);
        assert_eq!(s.points, 3);
        assert_eq!(s.min, Some(1.0));
        assert_eq!(s.max, Some(3.0));
        assert_eq!(s.mean, Some(2.0));
        assert_eq!(s.final_value, Some(2.0));
    }

    #[test]
    fn summary_of_empty_run() {
        let run = SimulationRun {
            observations: Vec::new(),
            status: RunStatus::Cancelled,
        };
        let s = summarize("demo", 0, &run);
        assert_eq!(s.points, 0);
        assert_eq!(s.mean, None);
        assert_eq!(s.status, RunStatus::Cancelled);
    }
}
