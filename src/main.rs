mod catalog;
mod cli;
mod commands;
mod config;
mod paths;
mod progress;
mod prompt;
mod stubs;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command, ConfigCommand};
use std::io;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
    /// Value of `--path`, if given
    pub path: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
        path: cli.path,
    };

    match cli.command {
        Command::Install { no_interaction } => commands::install::run(&ctx, no_interaction),
        Command::MakeUpdate { name } => commands::make_update::run(&ctx, &name),
        Command::DbUpdate { realpath, pretend } => {
            commands::db_update::run(&ctx, realpath.as_deref(), pretend)
        }
        Command::Status => commands::status::run(&ctx),
        Command::Config(cmd) => match cmd {
            ConfigCommand::Show => commands::config::show(&ctx),
        },
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "starter-kit", &mut io::stdout());
            Ok(())
        }
    }
}
