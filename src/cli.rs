use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "starter-kit")]
#[command(author = "Vocalio")]
#[command(version)]
#[command(about = "Bootstrap your app with tooling and run database updates", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Application workspace (defaults to $STARTER_KIT_BASE_PATH, then the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub path: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Install the project tooling, one checkpointed step at a time
    Install {
        /// Accept the default answer to every prompt
        #[arg(short = 'n', long)]
        no_interaction: bool,
    },

    /// Create a new database update script
    #[command(name = "make:update")]
    MakeUpdate {
        /// Name of the update, e.g. "Add Users Table"
        name: String,
    },

    /// Run pending database updates
    #[command(name = "db:update")]
    DbUpdate {
        /// Scan this directory instead of the configured updates directory
        #[arg(long, value_name = "DIR")]
        realpath: Option<PathBuf>,

        /// List pending updates without running them
        #[arg(long)]
        pretend: bool,
    },

    /// Show installed features and pending updates
    Status,

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the resolved workspace and settings
    Show,
}
