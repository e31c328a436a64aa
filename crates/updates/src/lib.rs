//! # Updates
//!
//! Forward-only database updates with a persisted ledger.
//!
//! This crate provides functionality to:
//! - Generate timestamp-prefixed update scripts from a template
//! - Discover update scripts in a directory, ordered by name
//! - Record applied updates in a `database_updates` table in SQLite
//! - Apply pending updates strictly in order, one transaction each
//!
//! ## Example
//!
//! ```no_run
//! use updates::{Ledger, Runner};
//! use std::path::Path;
//!
//! let mut ledger = Ledger::open(Path::new("database/database.sqlite"))?;
//! let summary = Runner::new(&mut ledger, Path::new("database/updates"))
//!     .run(&mut updates::NoProgress)?;
//!
//! for name in &summary.applied {
//!     println!("applied {name}");
//! }
//! # Ok::<(), updates::Error>(())
//! ```

mod descriptor;
mod error;
mod generator;
mod ledger;
mod name;
mod runner;
mod types;

pub use descriptor::{UpdateDescriptor, discover};
pub use error::{Error, Result};
pub use generator::{GeneratedUpdate, generate};
pub use ledger::{Ledger, TABLE};
pub use name::{EXTENSION, TIMESTAMP_FORMAT, is_update_name, slug, timestamped};
pub use runner::Runner;
pub use types::{LedgerEntry, NoProgress, ProgressCallback, RunSummary};
