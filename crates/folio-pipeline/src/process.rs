//! Child process execution for the compiler and bundler steps.

use std::process::Stdio;

use tokio::process::Command;

use crate::PipelineError;

/// Environment variable carrying Node.js runtime flags.
pub const NODE_OPTIONS: &str = "NODE_OPTIONS";

/// An external command given as an argv list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Step name used in log lines ("compile", "bundle")
    pub step: &'static str,
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Build a command from an argv list; the first element is the program.
    pub fn from_argv(step: &'static str, argv: &[String]) -> Result<Self, PipelineError> {
        let (program, args) = argv
            .split_first()
            .ok_or(PipelineError::EmptyCommand(step))?;

        Ok(Self {
            step,
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// Render the command line for logging.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// How a step finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    /// The process ran and exited with this code
    Exited(i32),

    /// The process could not be started
    NotStarted(String),
}

impl StepStatus {
    pub fn success(&self) -> bool {
        matches!(self, Self::Exited(0))
    }

    /// Exit code to report; 1 when the process never ran or was killed.
    pub fn code(&self) -> i32 {
        match self {
            Self::Exited(code) => *code,
            Self::NotStarted(_) => 1,
        }
    }
}

/// Append `flags` to an existing `NODE_OPTIONS` value.
pub fn append_node_options(existing: Option<&str>, flags: &[String]) -> String {
    existing
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .into_iter()
        .chain(flags.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run a command to completion, inheriting stdio and the parent environment
/// plus `node_options` appended to `NODE_OPTIONS`.
///
/// Blocks until the child exits; there is no timeout.
pub async fn run_command(spec: &CommandSpec, node_options: &[String]) -> StepStatus {
    tracing::info!("Running {} step: {}", spec.step, spec.display());

    let existing = std::env::var(NODE_OPTIONS).ok();
    let mut command = Command::new(&spec.program);
    command
        .args(&spec.args)
        .env(NODE_OPTIONS, append_node_options(existing.as_deref(), node_options))
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    match command.status().await {
        Ok(status) => {
            // Killed by a signal has no code
            let code = status.code().unwrap_or(1);
            tracing::info!("{} step completed with code {}", spec.step, code);
            StepStatus::Exited(code)
        }
        Err(e) => {
            tracing::error!("Failed to start {}: {}", spec.program, e);
            StepStatus::NotStarted(e.to_string())
        }
    }
}
