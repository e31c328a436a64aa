//! # Installer
//!
//! Idempotent, resumable installation of optional project features.
//!
//! A run walks an ordered catalog of [`Step`]s. Each step is gated by a
//! prompt, checked against a live marker in the workspace, and when it goes
//! ahead runs its commands, publishes template files and commits a
//! checkpoint. Because installed state is always re-detected from the
//! workspace, re-running after a failure resumes where it stopped.
//!
//! ## Core Concepts
//!
//! - **Step**: One feature - gate, detection policy, actions, stubs, commit message
//! - **FeatureDetector**: Maps feature ids to side-effect-free marker checks
//! - **Engine**: Evaluates steps in order, isolating failures per step
//!
//! ## Example
//!
//! ```ignore
//! use installer::{
//!     AcceptDefaults, Engine, FeatureDetector, GitCommitter, NoReport, ShellRunner, Step,
//!     WorkspaceContext, path_exists,
//! };
//!
//! let ctx = WorkspaceContext::new("/srv/app");
//! let detector = FeatureDetector::new(ctx.clone())
//!     .with("larastan", path_exists(|ctx| ctx.base("vendor/larastan/larastan")));
//! let steps = vec![
//!     Step::new("larastan", "Larastan")
//!         .announce_installed()
//!         .run("composer require --dev larastan/larastan"),
//! ];
//!
//! let runner = ShellRunner::new(&ctx.base_path);
//! let committer = GitCommitter::new(&ctx.base_path);
//! let summary = Engine::new(&detector, &runner, &committer)
//!     .run(&steps, &mut AcceptDefaults, &mut NoReport)?;
//! ```
//!
//! ## Provider Traits
//!
//! - [`Prompter`]: Answers confirm/select prompts
//! - [`Reporter`]: Receives progress and streamed command output
//! - [`CommandRunner`]: Executes command lines
//! - [`Committer`]: Records checkpoints

pub mod checkpoint;
pub mod context;
pub mod detect;
pub mod engine;
pub mod process;
pub mod publish;
pub mod step;
pub mod types;
pub mod workspace;

pub use checkpoint::{Committer, GitCommitter, NoCommit};
pub use context::{AcceptDefaults, NoReport, Prompter, Reporter, SelectOption};
pub use detect::{Detector, FeatureDetector, file_name_contains, path_exists};
pub use engine::Engine;
pub use process::{CommandOutput, CommandRunner, ShellRunner};
pub use publish::{StubMapping, Template, publish_stubs};
pub use step::{Action, Gate, Step, WhenInstalled};
pub use types::{InstallSummary, StepOutcome};
pub use workspace::WorkspaceContext;
