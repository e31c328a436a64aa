//! Install step engine - evaluates a catalog of steps in order
//!
//! Per step: gate (confirm/select) → detection → reinstall prompt → actions →
//! publish stubs → checkpoint. A failing step never stops the run. Files it
//! published ahead of its commands are removed again, so its marker stays
//! absent and the next run retries it.

use crate::checkpoint::Committer;
use crate::context::{Prompter, Reporter};
use crate::detect::FeatureDetector;
use crate::process::{CommandOutput, CommandRunner};
use crate::publish::publish_stubs;
use crate::step::{Action, Gate, Step, WhenInstalled};
use crate::types::{InstallSummary, StepOutcome};
use anyhow::Result;
use std::fs;
use std::path::PathBuf;

/// Drives steps against one workspace
pub struct Engine<'a> {
    detector: &'a FeatureDetector,
    runner: &'a dyn CommandRunner,
    committer: &'a dyn Committer,
}

impl<'a> Engine<'a> {
    pub fn new(
        detector: &'a FeatureDetector,
        runner: &'a dyn CommandRunner,
        committer: &'a dyn Committer,
    ) -> Self {
        Self {
            detector,
            runner,
            committer,
        }
    }

    /// Evaluate every step exactly once, in order.
    ///
    /// Only prompt failures abort the run; step failures are recorded in the
    /// summary.
    pub fn run(
        &self,
        steps: &[Step],
        prompter: &mut dyn Prompter,
        reporter: &mut dyn Reporter,
    ) -> Result<InstallSummary> {
        reporter.on_start(steps.len());

        let mut summary = InstallSummary::default();
        for step in steps {
            let outcome = self.run_step(step, prompter, reporter)?;
            log::debug!("Step {} finished: {outcome:?}", step.id);
            reporter.on_step_complete(&step.id, &step.label, &outcome);
            summary.add(&step.id, outcome);
        }

        Ok(summary)
    }

    fn run_step(
        &self,
        step: &Step,
        prompter: &mut dyn Prompter,
        reporter: &mut dyn Reporter,
    ) -> Result<StepOutcome> {
        let choice = match &step.gate {
            Gate::Always => None,
            Gate::Confirm { prompt, default } => {
                if !prompter.confirm(prompt, *default)? {
                    return Ok(StepOutcome::Declined);
                }
                None
            }
            Gate::Select {
                prompt,
                options,
                default,
                skip,
            } => {
                let choice = prompter.select(prompt, options, default)?;
                // Skipping by selection never inspects the workspace
                if choice == *skip {
                    return Ok(StepOutcome::Declined);
                }
                Some(choice)
            }
        };

        if self.detector.is_installed(&step.id) {
            match step.when_installed {
                WhenInstalled::Skip { announce } => {
                    if announce {
                        reporter.on_already_installed(&step.label);
                    }
                    return Ok(StepOutcome::Skipped);
                }
                WhenInstalled::AskReinstall => {
                    if !prompter.confirm(&step.reinstall_prompt(), false)? {
                        return Ok(StepOutcome::Skipped);
                    }
                }
            }
        }

        reporter.on_step_start(&step.label);

        let mut published = Vec::new();
        for action in &step.actions {
            if let Err(reason) = self.perform(action, reporter, &mut published) {
                discard(&published);
                return Ok(StepOutcome::Failed { reason });
            }
        }

        match publish_stubs(step.stubs_for(choice.as_deref())) {
            Ok(written) => log::debug!("Published {} file(s) for {}", written.len(), step.id),
            Err(e) => {
                discard(&published);
                return Ok(StepOutcome::Failed {
                    reason: format!("{e:#}"),
                });
            }
        }

        self.committer.commit(&step.commit_message);
        Ok(StepOutcome::Committed)
    }

    /// Perform one action, returning the failure reason if it failed.
    ///
    /// Files written by a publish action are appended to `published`.
    fn perform(
        &self,
        action: &Action,
        reporter: &mut dyn Reporter,
        published: &mut Vec<PathBuf>,
    ) -> Result<(), String> {
        match action {
            Action::Run { command, stream } => {
                let output = self.command(command, *stream, reporter, |sink| {
                    self.runner.run(command, sink)
                });
                if output.success {
                    Ok(())
                } else {
                    Err(format!("`{command}` failed"))
                }
            }
            Action::Pipeline { commands, stream } => {
                let shown = commands.join(" | ");
                let output = self.command(&shown, *stream, reporter, |sink| {
                    self.runner.run_pipeline(commands, sink)
                });
                if output.success {
                    Ok(())
                } else {
                    Err(format!("`{shown}` failed"))
                }
            }
            Action::Publish(stubs) => {
                // One at a time, so a partial publish is still tracked
                for stub in stubs {
                    let written =
                        publish_stubs(std::slice::from_ref(stub)).map_err(|e| format!("{e:#}"))?;
                    published.extend(written);
                }
                Ok(())
            }
        }
    }

    fn command(
        &self,
        shown: &str,
        stream: bool,
        reporter: &mut dyn Reporter,
        exec: impl FnOnce(&mut dyn FnMut(&str)) -> CommandOutput,
    ) -> CommandOutput {
        reporter.on_command_start(shown, stream);

        let output = {
            let mut sink = |line: &str| {
                if stream {
                    reporter.on_output(line);
                }
            };
            exec(&mut sink)
        };

        reporter.on_command_complete(shown, &output);
        output
    }
}

/// Remove files a failed step published before its commands ran
fn discard(published: &[PathBuf]) {
    for path in published {
        match fs::remove_file(path) {
            Ok(()) => log::debug!("Removed {}", path.display()),
            Err(e) => log::warn!("Failed to remove {}: {e}", path.display()),
        }
    }
}
