//! Running external commands and command pipelines

use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Outcome of an external command or pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether every command exited successfully
    pub success: bool,
    /// Combined stdout/stderr, or a diagnostic if the process could not start
    pub output: String,
}

impl CommandOutput {
    /// Successful output
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
        }
    }

    /// Failed output
    pub fn failed(output: impl Into<String>) -> Self {
        Self {
            success: false,
            output: output.into(),
        }
    }
}

/// Executes shell command lines.
///
/// Output is handed to `sink` line by line as it is produced, and also
/// captured in the returned [`CommandOutput`]. Failures are reported, never
/// retried: a half-finished package install is not safely repeatable.
pub trait CommandRunner {
    /// Run one command line to completion
    fn run(&self, command: &str, sink: &mut dyn FnMut(&str)) -> CommandOutput;

    /// Run commands one after another, aborting at the first failure.
    ///
    /// The pipeline succeeds only if every command does; later commands
    /// are not started once one fails.
    fn run_pipeline(&self, commands: &[String], sink: &mut dyn FnMut(&str)) -> CommandOutput {
        let mut output = String::new();

        for command in commands {
            let result = self.run(command, &mut *sink);
            output.push_str(&result.output);

            if !result.success {
                log::debug!("Pipeline aborted at `{command}`");
                return CommandOutput::failed(output);
            }
        }

        CommandOutput::ok(output)
    }
}

/// Runs commands through the platform shell inside a working directory.
///
/// Blocks until the command exits; there is no timeout.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    cwd: PathBuf,
}

impl ShellRunner {
    /// Runner executing in `cwd`
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str, sink: &mut dyn FnMut(&str)) -> CommandOutput {
        log::debug!("Running `{command}` in {}", self.cwd.display());

        let mut child = match shell(command)
            .current_dir(&self.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => return CommandOutput::failed(format!("Failed to execute `{command}`: {e}")),
        };

        let mut output = String::new();

        if let Some(stdout) = child.stdout.take() {
            let mut reader = BufReader::new(stdout);
            let mut buf = Vec::new();
            loop {
                buf.clear();
                match reader.read_until(b'\n', &mut buf) {
                    Ok(0) => break,
                    Ok(_) => {
                        let line = String::from_utf8_lossy(&buf).into_owned();
                        sink(line.as_str());
                        output.push_str(&line);
                    }
                    Err(e) => {
                        log::warn!("Failed to read output of `{command}`: {e}");
                        break;
                    }
                }
            }
        }

        match child.wait() {
            Ok(status) => CommandOutput {
                success: status.success(),
                output,
            },
            Err(e) => {
                output.push_str(&format!("Failed to wait for `{command}`: {e}"));
                CommandOutput::failed(output)
            }
        }
    }
}

/// Build a shell invocation with stderr folded into stdout
#[cfg(not(windows))]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(format!("exec 2>&1\n{command}"));
    cmd
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(format!("({command}) 2>&1"));
    cmd
}
