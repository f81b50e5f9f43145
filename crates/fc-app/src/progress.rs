use fc_core::Step;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Configuring,
    Running,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct RunProgressEvent {
    pub scenario: String,
    pub stage: RunStage,
    /// Observations emitted so far.
    pub emitted: u64,
    /// Declared run length, if bounded.
    pub length: Option<usize>,
    pub last_step: Option<Step>,
}

impl RunProgressEvent {
    pub fn stage(scenario: &str, stage: RunStage, emitted: u64, length: Option<usize>) -> Self {
        Self {
            scenario: scenario.to_string(),
            stage,
            emitted,
            length,
            last_step: None,
        }
    }

    pub fn fraction_complete(&self) -> Option<f64> {
        self.length
            .filter(|&n| n > 0)
            .map(|n| (self.emitted as f64 / n as f64).min(1.0))
    }
}
