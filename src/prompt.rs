//! Terminal prompts

use anyhow::{Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Select};
use installer::{Prompter, SelectOption};

/// Interactive prompts on the terminal
#[derive(Default)]
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl Prompter for DialoguerPrompter {
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()
            .with_context(|| format!("Failed to read answer to \"{prompt}\""))
    }

    fn select(
        &mut self,
        prompt: &str,
        options: &[SelectOption],
        default: &str,
    ) -> Result<String> {
        let labels: Vec<&str> = options.iter().map(|o| o.label).collect();
        let default_idx = options.iter().position(|o| o.key == default).unwrap_or(0);

        let idx = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(&labels)
            .default(default_idx)
            .interact()
            .with_context(|| format!("Failed to read selection for \"{prompt}\""))?;

        options
            .get(idx)
            .map(|o| o.key.to_string())
            .context("Selection out of range")
    }
}
