use anyhow::{Context as _, Result};
use chrono::{Local, NaiveDateTime};
use std::path::Path;
use updates::GeneratedUpdate;

use crate::Context;
use crate::config::Workspace;
use crate::stubs;
use crate::ui;

pub fn run(ctx: &Context, name: &str) -> Result<()> {
    let ws = Workspace::resolve(ctx.path.as_deref())?;
    let created = create(&ws.updates_dir(), name, Local::now().naive_local())?;

    ui::info(&created_message(&created));
    log::debug!("Update written to {}", created.path.display());
    Ok(())
}

/// Write a new update script from the update template
pub fn create(dir: &Path, name: &str, at: NaiveDateTime) -> Result<GeneratedUpdate> {
    updates::generate(dir, name, stubs::DATABASE_UPDATE.contents, at)
        .with_context(|| format!("Failed to create database update in {}", dir.display()))
}

fn created_message(created: &GeneratedUpdate) -> String {
    format!("Created database update [{}].", created.file_name)
}
