//! Spinners for commands whose output is not streamed

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// A running spinner that ends in a status line
pub struct Spinner {
    pb: ProgressBar,
    quiet: bool,
}

impl Spinner {
    /// Start a spinner; nothing is drawn or printed when `quiet`
    pub fn start(msg: &str, quiet: bool) -> Self {
        if quiet {
            return Self {
                pb: ProgressBar::hidden(),
                quiet,
            };
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb, quiet }
    }

    /// Replace the spinner with a success line
    pub fn success(self, msg: &str) {
        self.pb.finish_and_clear();
        if !self.quiet {
            println!("  {} {}", "✓".green(), msg.dimmed());
        }
    }

    /// Replace the spinner with a failure line
    pub fn error(self, msg: &str) {
        self.pb.finish_and_clear();
        if !self.quiet {
            eprintln!("  {} {}", "✗".red(), msg);
        }
    }
}
