use anyhow::{Context as _, Result};
use colored::Colorize;
use std::path::Path;
use std::time::Duration;
use updates::{Ledger, ProgressCallback, Runner};

use crate::Context;
use crate::config::Workspace;
use crate::ui;

pub fn run(ctx: &Context, realpath: Option<&Path>, pretend: bool) -> Result<()> {
    let ws = Workspace::resolve(ctx.path.as_deref())?;
    let ledger_path = ws.ledger_path();
    let mut ledger = Ledger::open(&ledger_path)
        .with_context(|| format!("Failed to open ledger at {}", ledger_path.display()))?;

    let mut runner = match realpath {
        Some(dir) => {
            let dir = std::path::absolute(dir)
                .with_context(|| format!("Invalid updates directory: {}", dir.display()))?;
            Runner::with_required_dir(&mut ledger, &dir)?
        }
        None => Runner::new(&mut ledger, &ws.updates_dir()),
    };

    let mut progress = ConsoleProgress { quiet: ctx.quiet };
    let summary = if pretend {
        runner.pretend(&mut progress)?
    } else {
        runner.run(&mut progress)?
    };

    log::info!(
        "{} update(s) applied, {} pretended",
        summary.applied.len(),
        summary.pretended.len()
    );
    Ok(())
}

/// Prints one line per update
struct ConsoleProgress {
    quiet: bool,
}

impl ProgressCallback for ConsoleProgress {
    fn on_start(&mut self, pending: usize) {
        if self.quiet {
            return;
        }
        if pending == 0 {
            ui::info("Nothing to update.");
        } else {
            ui::info("Running database updates.");
        }
    }

    fn on_update(&mut self, name: &str) {
        log::debug!("Running update {name}");
    }

    fn on_update_complete(&mut self, name: &str, elapsed: Duration) {
        if !self.quiet {
            ui::success(&format!("{name} {}", ui::elapsed_ms(elapsed).dimmed()));
        }
    }

    fn on_update_failed(&mut self, name: &str) {
        ui::error(&format!("{name} failed"));
    }

    fn on_pretend(&mut self, name: &str) {
        if !self.quiet {
            ui::dim(&format!("Would run {name}"));
        }
    }
}
