//! Core types for installer runs

/// Final state of one step in a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The user chose not to install
    Declined,
    /// Already installed and not reinstalled
    Skipped,
    /// Every action succeeded, stubs were published and a checkpoint attempted
    Committed,
    /// An action failed; nothing was published or committed afterwards
    Failed { reason: String },
}

impl StepOutcome {
    /// Check if the outcome represents a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Summary of a run
#[derive(Debug, Clone, Default)]
pub struct InstallSummary {
    /// Outcome per step id, in catalog order
    pub outcomes: Vec<(String, StepOutcome)>,
}

impl InstallSummary {
    /// Record a step outcome
    pub fn add(&mut self, id: &str, outcome: StepOutcome) {
        self.outcomes.push((id.to_string(), outcome));
    }

    /// Outcome of a step, if it was evaluated
    pub fn outcome(&self, id: &str) -> Option<&StepOutcome> {
        self.outcomes
            .iter()
            .find(|(step, _)| step == id)
            .map(|(_, outcome)| outcome)
    }

    pub fn committed(&self) -> usize {
        self.count(|o| matches!(o, StepOutcome::Committed))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, StepOutcome::Skipped | StepOutcome::Declined))
    }

    pub fn failed(&self) -> usize {
        self.count(StepOutcome::is_failure)
    }

    /// Check if no step failed
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, pred: impl Fn(&StepOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}
