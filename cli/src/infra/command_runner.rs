//! Infrastructure implementation of the `CommandRunner` port.
//!
//! `TokioCommandRunner` is the production implementation. Children inherit
//! the installer's stdio so their output is visible live, and are waited on
//! without a timeout.

use std::path::Path;
use std::process::{ExitStatus, Stdio};

use anyhow::{Context, Result};

use crate::application::ports::CommandRunner;

/// Production `CommandRunner` backed by `tokio::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioCommandRunner;

impl TokioCommandRunner {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    async fn wait(mut command: tokio::process::Command, program: &str) -> Result<ExitStatus> {
        let mut child = command
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {program}"))?;

        child
            .wait()
            .await
            .with_context(|| format!("waiting for {program}"))
    }
}

impl CommandRunner for TokioCommandRunner {
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus> {
        tracing::debug!(program, ?args, "running command");
        let mut command = tokio::process::Command::new(program);
        command.args(args);
        Self::wait(command, program).await
    }

    async fn run_status_in(
        &self,
        dir: &Path,
        program: &str,
        args: &[&str],
    ) -> Result<ExitStatus> {
        tracing::debug!(program, ?args, dir = %dir.display(), "running command");
        let mut command = tokio::process::Command::new(program);
        command.args(args).current_dir(dir);
        Self::wait(command, program).await
    }
}
