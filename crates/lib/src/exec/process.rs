//! Real process execution.

use std::io;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use super::{CommandOutput, Executor, Invocation};

/// Runs invocations as child processes and captures their output.
///
/// The child inherits the caller's environment plus `Invocation::envs`.
/// stdin is closed so a tool waiting for input fails instead of hanging on
/// the terminal. Output is decoded as UTF-8, undecodable bytes replaced.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl Executor for ProcessExecutor {
  async fn execute(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
    let mut command = Command::new(&invocation.program);
    command
      .args(&invocation.args)
      .envs(&invocation.envs)
      .stdin(Stdio::null())
      .kill_on_drop(true);

    if let Some(cwd) = &invocation.cwd {
      command.current_dir(cwd);
    }

    debug!(cmd = %invocation, cwd = ?invocation.cwd, env = ?invocation.envs.keys().collect::<Vec<_>>(), "spawning process");

    let output = command.output().await?;

    let result = CommandOutput {
      stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
      stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
      code: output.status.code(),
    };

    if !result.stdout.is_empty() {
      debug!(stdout = %result.stdout.trim_end(), "command stdout");
    }
    if !result.stderr.is_empty() {
      debug!(stderr = %result.stderr.trim_end(), "command stderr");
    }
    debug!(code = ?result.code, "process exited");

    Ok(result)
  }
}
