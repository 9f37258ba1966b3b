//! Execution of `git` command batches.
//!
//! The workflows never spawn processes themselves. They describe what to run as a
//! [`CommandBatch`] and hand it to a [`CommandRunner`], which executes every command in
//! order inside the repository directory and reports the stdout of the final command
//! together with any failures along the way.
//!
//! # Public API
//! - [`CommandBatch`]: Ordered list of `git` argument vectors
//! - [`CommandOutput`]: Captured lines plus error flag and error lines
//! - [`CommandRunner`]: The seam the workflows depend on
//! - [`GitRunner`]: Process-backed runner used by the binary
//!
//! # Failure Semantics
//! A command that cannot be spawned or exits non-zero marks the output as failed and
//! contributes its stderr lines, but the remaining commands of the batch still run.
//! Nothing is retried.

use std::fmt;
use std::path::Path;
use std::process::Command;

/// One `git` invocation, stored as its argument list (without the `git` program name)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommand {
    args: Vec<String>,
}

impl GitCommand {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for GitCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "git {}", self.args.join(" "))
    }
}

/// Ordered commands executed within one runner session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandBatch {
    commands: Vec<GitCommand>,
}

impl CommandBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command built from `args`
    pub fn git<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.commands.push(GitCommand::new(args));
        self
    }

    pub fn commands(&self) -> &[GitCommand] {
        &self.commands
    }
}

/// Result of running a batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Non-blank stdout lines of the final command
    pub lines: Vec<String>,
    /// Set when any command failed to spawn or exited non-zero
    pub had_errors: bool,
    /// Error-stream lines of the failed commands
    pub errors: Vec<String>,
}

impl CommandOutput {
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn failed<I, S>(errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: Vec::new(),
            had_errors: true,
            errors: errors.into_iter().map(Into::into).collect(),
        }
    }
}

/// Runs command batches against a repository directory
pub trait CommandRunner {
    fn run(&mut self, dir: &Path, batch: &CommandBatch) -> CommandOutput;
}

/// [`CommandRunner`] that spawns the `git` executable for every command
#[derive(Debug, Clone)]
pub struct GitRunner {
    program: String,
}

impl GitRunner {
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
        }
    }
}

impl Default for GitRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for GitRunner {
    fn run(&mut self, dir: &Path, batch: &CommandBatch) -> CommandOutput {
        let mut output = CommandOutput::default();
        let last = batch.commands().len().saturating_sub(1);

        for (position, command) in batch.commands().iter().enumerate() {
            log::debug!("Running `{command}` in {}", dir.display());

            let result = Command::new(&self.program)
                .args(command.args())
                .current_dir(dir)
                .output();

            let process = match result {
                Ok(process) => process,
                Err(e) => {
                    output.had_errors = true;
                    output.errors.push(format!("failed to run `{command}`: {e}"));
                    continue;
                }
            };

            let stderr = String::from_utf8_lossy(&process.stderr);
            if process.status.success() {
                for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
                    log::debug!("{line}");
                }
            } else {
                output.had_errors = true;
                output.errors.extend(
                    stderr
                        .lines()
                        .filter(|l| !l.trim().is_empty())
                        .map(str::to_string),
                );
                output
                    .errors
                    .push(format!("`{command}` exited with {}", process.status));
            }

            if position == last {
                output.lines = String::from_utf8_lossy(&process.stdout)
                    .lines()
                    .filter(|l| !l.trim().is_empty())
                    .map(str::to_string)
                    .collect();
            }
        }

        output
    }
}
