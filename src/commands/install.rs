use anyhow::Result;
use chrono::Local;
use installer::{
    AcceptDefaults, CommandOutput, Committer, Engine, GitCommitter, NoCommit, Reporter,
    ShellRunner, StepOutcome,
};

use crate::Context;
use crate::catalog;
use crate::config::Workspace;
use crate::progress::Spinner;
use crate::prompt::DialoguerPrompter;
use crate::ui;

pub fn run(ctx: &Context, no_interaction: bool) -> Result<()> {
    let ws = Workspace::resolve(ctx.path.as_deref())?;
    log::info!("Installing into {}", ws.ctx.base_path.display());

    let steps = catalog::steps(&ws.ctx, Local::now().naive_local());
    let detector = catalog::detector(ws.ctx.clone());
    let runner = ShellRunner::new(&ws.ctx.base_path);
    let committer: Box<dyn Committer> = if ws.settings.git.commit {
        Box::new(GitCommitter::new(&ws.ctx.base_path))
    } else {
        Box::new(NoCommit)
    };
    let engine = Engine::new(&detector, &runner, committer.as_ref());

    if !ctx.quiet {
        ui::banner();
    }

    let mut reporter = ConsoleReporter::new(ctx.quiet, ctx.verbose > 0);
    let summary = if no_interaction {
        engine.run(&steps, &mut AcceptDefaults, &mut reporter)?
    } else {
        engine.run(&steps, &mut DialoguerPrompter::default(), &mut reporter)?
    };

    if !summary.is_success() {
        // Failed steps left no marker; the next run retries them
        ui::warn(&format!(
            "{} step(s) failed. Fix the problem and run install again.",
            summary.failed()
        ));
    }

    Ok(())
}

/// Prints step progress and command output to the terminal
struct ConsoleReporter {
    quiet: bool,
    show_output: bool,
    spinner: Option<Spinner>,
}

impl ConsoleReporter {
    fn new(quiet: bool, show_output: bool) -> Self {
        Self {
            quiet,
            show_output,
            spinner: None,
        }
    }
}

impl Reporter for ConsoleReporter {
    fn on_start(&mut self, steps: usize) {
        log::debug!("Evaluating {steps} install steps");
    }

    fn on_step_start(&mut self, label: &str) {
        if !self.quiet {
            ui::info(&format!("Installing {label}..."));
        }
    }

    fn on_already_installed(&mut self, label: &str) {
        if !self.quiet {
            ui::info(&format!("{label} already installed."));
        }
    }

    fn on_command_start(&mut self, command: &str, streamed: bool) {
        if streamed {
            if !self.quiet {
                ui::dim(&format!("$ {command}"));
            }
        } else {
            self.spinner = Some(Spinner::start(command, self.quiet));
        }
    }

    fn on_output(&mut self, line: &str) {
        if !self.quiet {
            ui::output(line);
        }
    }

    fn on_command_complete(&mut self, command: &str, output: &CommandOutput) {
        let Some(spinner) = self.spinner.take() else {
            return;
        };

        if output.success {
            spinner.success(command);
            if self.show_output && !self.quiet {
                output.output.lines().for_each(ui::dim);
            }
        } else {
            spinner.error(&format!("{command} failed"));
            // Quiet commands are the only place their output can be seen
            output.output.lines().for_each(|line| eprintln!("    {line}"));
        }
    }

    fn on_step_complete(&mut self, id: &str, label: &str, outcome: &StepOutcome) {
        match outcome {
            StepOutcome::Committed => {
                if !self.quiet {
                    ui::success(&format!("{label} installed."));
                }
            }
            StepOutcome::Failed { reason } => ui::error(&format!("{label} failed: {reason}")),
            StepOutcome::Declined | StepOutcome::Skipped => {
                log::debug!("Step {id}: {outcome:?}");
            }
        }
    }
}
