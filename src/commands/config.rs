use anyhow::{Context as _, Result};

use crate::Context;
use crate::config::Workspace;
use crate::paths::{CONFIG_FILE, ENV_BASE_PATH};
use crate::ui;

pub fn show(ctx: &Context) -> Result<()> {
    let ws = Workspace::resolve(ctx.path.as_deref())?;

    ui::header("Configuration");

    ui::section("Workspace");
    ui::kv("Base path", &ws.ctx.base_path.display().to_string());
    ui::kv("Config path", &ws.ctx.config_path.display().to_string());
    ui::kv("Database path", &ws.ctx.database_path.display().to_string());
    ui::kv("Updates", &ws.updates_dir().display().to_string());
    ui::kv("Ledger", &ws.ledger_path().display().to_string());
    ui::kv(
        "Checkpoints",
        if ws.settings.git.commit { "git commit" } else { "disabled" },
    );

    ui::section("Settings");
    match &ws.settings_file {
        Some(path) => ui::kv("File", &path.display().to_string()),
        None => ui::dim(&format!("No {CONFIG_FILE}; using defaults")),
    }
    println!();
    let rendered = toml::to_string_pretty(&ws.settings).context("Failed to render settings")?;
    for line in rendered.lines() {
        println!("  {line}");
    }

    println!();
    ui::dim(&format!(
        "Base path comes from --path, then ${ENV_BASE_PATH}, then the current directory."
    ));

    Ok(())
}
