//! Provider traits for prompts and progress
//!
//! These traits keep the engine free of any terminal UI, so a run can be
//! driven interactively or by a script.

use crate::process::CommandOutput;
use crate::types::StepOutcome;
use anyhow::{Result, bail};

/// One choice of a single-choice prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    /// Stable key returned by [`Prompter::select`]
    pub key: &'static str,
    /// Label shown to the user
    pub label: &'static str,
}

/// Blocking interactive prompts
pub trait Prompter {
    /// Ask a yes/no question
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;

    /// Ask for one of `options`, returning the chosen key
    fn select(&mut self, prompt: &str, options: &[SelectOption], default: &str)
    -> Result<String>;
}

/// Progress callback for installer runs
pub trait Reporter {
    /// Called once before the first step
    fn on_start(&mut self, steps: usize);

    /// Called when a step starts running its actions ("Installing X...")
    fn on_step_start(&mut self, label: &str);

    /// Called when a step is skipped because it is already installed
    fn on_already_installed(&mut self, label: &str);

    /// Called before a command or pipeline runs
    fn on_command_start(&mut self, _command: &str, _streamed: bool) {}

    /// Called with each line of a streamed command
    fn on_output(&mut self, line: &str);

    /// Called after a command or pipeline finished
    fn on_command_complete(&mut self, _command: &str, _output: &CommandOutput) {}

    /// Called once per step with its final outcome
    fn on_step_complete(&mut self, id: &str, label: &str, outcome: &StepOutcome);
}

/// No-op reporter
pub struct NoReport;

impl Reporter for NoReport {
    fn on_start(&mut self, _steps: usize) {}
    fn on_step_start(&mut self, _label: &str) {}
    fn on_already_installed(&mut self, _label: &str) {}
    fn on_output(&mut self, _line: &str) {}
    fn on_step_complete(&mut self, _id: &str, _label: &str, _outcome: &StepOutcome) {}
}

/// Answers every prompt with its default
pub struct AcceptDefaults;

impl Prompter for AcceptDefaults {
    fn confirm(&mut self, _prompt: &str, default: bool) -> Result<bool> {
        Ok(default)
    }

    fn select(
        &mut self,
        prompt: &str,
        options: &[SelectOption],
        default: &str,
    ) -> Result<String> {
        if !options.iter().any(|o| o.key == default) {
            bail!("Default '{default}' is not an option of \"{prompt}\"");
        }
        Ok(default.to_string())
    }
}
