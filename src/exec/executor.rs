//! Shell command execution.
//!
//! # Responsibilities
//! - Spawn the bound command as `sh -c <command>` with the built environment
//! - Capture stdout to completion
//! - Surface spawn failures and non-zero exits to the caller
//!
//! # Design Decisions
//! - The command string is interpreted by the shell, never tokenized here;
//!   pipes, redirection, and quoting behave as at a shell prompt
//! - The parent environment is cleared; only the built ProcessEnv is visible
//! - stderr is inherited by the server process for operator diagnosis
//! - One attempt per request, no timeout; the caller awaits the full run

use std::process::Stdio;

use thiserror::Error;
use tokio::process::Command;

use crate::exec::environment::ProcessEnv;

/// Errors from a single command execution.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The shell itself could not be spawned.
    #[error("failed to spawn shell: {0}")]
    Spawn(#[from] std::io::Error),

    /// The command ran but exited non-zero (or was killed by a signal).
    #[error("{0}")]
    Failed(std::process::ExitStatus),
}

/// Run `command` under `sh -c` with exactly the given environment and return
/// its captured stdout.
pub async fn execute(command: &str, env: &ProcessEnv) -> Result<Vec<u8>, ExecError> {
    let output = Command::new("sh")
        .arg("-c")
        .arg(command)
        .env_clear()
        .envs(env.iter())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .output()
        .await?;

    if !output.status.success() {
        return Err(ExecError::Failed(output.status));
    }

    Ok(output.stdout)
}
