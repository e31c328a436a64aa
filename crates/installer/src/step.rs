//! Install step definitions

use crate::context::SelectOption;
use crate::publish::{StubMapping, Template};
use std::path::PathBuf;

/// What decides whether a step is attempted at all
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// Always attempted
    Always,
    /// Attempted if the user confirms
    Confirm { prompt: String, default: bool },
    /// Attempted unless the user picks `skip`; the chosen key selects stubs
    Select {
        prompt: String,
        options: Vec<SelectOption>,
        default: &'static str,
        skip: &'static str,
    },
}

/// Behaviour when the feature's marker is already present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhenInstalled {
    /// Skip; `announce` prints "X already installed."
    Skip { announce: bool },
    /// Ask whether to reinstall (default no)
    AskReinstall,
}

/// One side-effecting operation of a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A single command line
    Run { command: String, stream: bool },
    /// Commands run in order, aborting at the first failure
    Pipeline { commands: Vec<String>, stream: bool },
    /// Templates the following commands depend on; removed if the step fails
    Publish(Vec<StubMapping>),
}

/// An optional, independently detectable installation unit
#[derive(Debug, Clone)]
pub struct Step {
    /// Feature id, also the detector key
    pub id: String,
    /// Human name used in messages ("Larastan", "TailwindCSS")
    pub label: String,
    pub gate: Gate,
    pub when_installed: WhenInstalled,
    pub actions: Vec<Action>,
    /// Published only after every action succeeded
    pub stubs: Vec<StubMapping>,
    pub commit_message: String,
}

impl Step {
    /// An always-attempted step that skips silently when installed
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            id: id.into(),
            commit_message: format!("Add {label}"),
            label,
            gate: Gate::Always,
            when_installed: WhenInstalled::Skip { announce: false },
            actions: Vec::new(),
            stubs: Vec::new(),
        }
    }

    pub fn commit_message(mut self, message: impl Into<String>) -> Self {
        self.commit_message = message.into();
        self
    }

    /// Gate on a yes/no question
    pub fn confirm(mut self, prompt: impl Into<String>, default: bool) -> Self {
        self.gate = Gate::Confirm {
            prompt: prompt.into(),
            default,
        };
        self
    }

    /// Gate on a single choice; picking `skip` skips the step
    pub fn select(
        mut self,
        prompt: impl Into<String>,
        options: Vec<SelectOption>,
        default: &'static str,
        skip: &'static str,
    ) -> Self {
        self.gate = Gate::Select {
            prompt: prompt.into(),
            options,
            default,
            skip,
        };
        self
    }

    /// Print "X already installed." when skipping
    pub fn announce_installed(mut self) -> Self {
        self.when_installed = WhenInstalled::Skip { announce: true };
        self
    }

    /// Offer a reinstall when already installed
    pub fn ask_reinstall(mut self) -> Self {
        self.when_installed = WhenInstalled::AskReinstall;
        self
    }

    /// Run a command quietly
    pub fn run(mut self, command: impl Into<String>) -> Self {
        self.actions.push(Action::Run {
            command: command.into(),
            stream: false,
        });
        self
    }

    /// Run a pipeline; `stream` shows its output as it arrives
    pub fn pipeline<I, S>(mut self, commands: I, stream: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actions.push(Action::Pipeline {
            commands: commands.into_iter().map(Into::into).collect(),
            stream,
        });
        self
    }

    /// Publish templates before the following actions run
    pub fn publish_first(mut self, stubs: Vec<StubMapping>) -> Self {
        self.actions.push(Action::Publish(stubs));
        self
    }

    /// Publish a template on success
    pub fn stub(mut self, template: Template, destination: impl Into<PathBuf>) -> Self {
        self.stubs.push(StubMapping::new(template, destination));
        self
    }

    /// Publish a template on success when `choice` was selected
    pub fn stub_for(
        mut self,
        choice: &'static str,
        template: Template,
        destination: impl Into<PathBuf>,
    ) -> Self {
        self.stubs
            .push(StubMapping::new(template, destination).when(choice));
        self
    }

    /// Prompt used to offer a reinstall
    pub fn reinstall_prompt(&self) -> String {
        format!("{} already installed. Would you like to reinstall?", self.label)
    }

    /// Stubs to publish for the given selection
    pub fn stubs_for<'a>(&'a self, choice: Option<&'a str>) -> impl Iterator<Item = &'a StubMapping> {
        self.stubs.iter().filter(move |s| s.applies_to(choice))
    }
}
