use anyhow::Result;
use chrono::Local;
use colored::Colorize;
use updates::{Ledger, Runner};

use crate::Context;
use crate::catalog;
use crate::config::Workspace;
use crate::ui;

pub fn run(ctx: &Context) -> Result<()> {
    let ws = Workspace::resolve(ctx.path.as_deref())?;

    ui::header("Workspace Status");
    ui::kv("Base path", &ws.ctx.base_path.display().to_string());

    ui::section("Features");
    let detector = catalog::detector(ws.ctx.clone());
    for step in catalog::steps(&ws.ctx, Local::now().naive_local()) {
        let mark = if detector.is_installed(&step.id) {
            "✓ installed".green()
        } else {
            "· not installed".dimmed()
        };
        println!("  {:<16} {}", step.label, mark);
    }

    ui::section("Database updates");
    let ledger_path = ws.ledger_path();
    match Ledger::open_existing(&ledger_path)? {
        Some(mut ledger) => {
            let entries = ledger.entries()?;
            let pending = Runner::new(&mut ledger, &ws.updates_dir()).pending()?.len();
            ui::kv("Applied", &entries.len().to_string());
            if let Some(last) = entries.last() {
                ui::kv("Last applied", &format!("{} ({})", last.update, last.applied_at));
            }
            ui::kv(
                "Pending",
                &if pending > 0 {
                    pending.to_string().yellow().to_string()
                } else {
                    pending.to_string()
                },
            );
        }
        None => ui::dim(&format!("No ledger at {}", ledger_path.display())),
    }

    println!();
    Ok(())
}
