//! Observation records and run outcomes.

use fc_core::Step;
use serde::{Deserialize, Serialize};

/// One committed point of the time series. Immutable once emitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub step: Step,
    pub value: f64,
}

/// How a run that did not fail came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// The declared length was reached.
    Completed,
    /// A stop was requested; everything emitted before it is final.
    Cancelled,
}

/// Ordered observations of one feedback loop execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    pub observations: Vec<Observation>,
    pub status: RunStatus,
}

impl SimulationRun {
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.observations.iter().map(|o| o.value)
    }

    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    /// Value observed at `step`, if the run reached it.
    pub fn value_at(&self, step: Step) -> Option<f64> {
        usize::try_from(step)
            .ok()
            .and_then(|i| self.observations.get(i))
            .filter(|o| o.step == step)
            .map(|o| o.value)
    }
}

impl<'a> IntoIterator for &'a SimulationRun {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}
