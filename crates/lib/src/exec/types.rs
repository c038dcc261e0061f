//! Invocation records, captured output, and the execution error.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// One external command to run.
///
/// Arguments are passed to the program directly, never through a shell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
  pub program: String,
  pub args: Vec<String>,
  /// Working directory, or the caller's current directory when `None`.
  pub cwd: Option<PathBuf>,
  /// Variables added to the inherited environment of the child.
  pub envs: BTreeMap<String, String>,
}

impl Invocation {
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
      ..Default::default()
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.cwd = Some(dir.into());
    self
  }

  pub fn envs<I, K, V>(mut self, vars: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
  {
    self.envs.extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
    self
  }

  /// The command as an operator would type it, e.g. `git clone https://host/org/app.git`.
  pub fn command_line(&self) -> String {
    std::iter::once(self.program.as_str())
      .chain(self.args.iter().map(String::as_str))
      .collect::<Vec<_>>()
      .join(" ")
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.command_line())
  }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
  pub stdout: String,
  pub stderr: String,
  /// Exit code; `None` when the process was terminated by a signal.
  pub code: Option<i32>,
}

impl CommandOutput {
  /// A successful exit with the given stdout.
  pub fn ok(stdout: impl Into<String>) -> Self {
    Self {
      stdout: stdout.into(),
      stderr: String::new(),
      code: Some(0),
    }
  }

  /// A failed exit with the given code and stderr.
  pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
    Self {
      stdout: String::new(),
      stderr: stderr.into(),
      code: Some(code),
    }
  }

  pub fn success(&self) -> bool {
    self.code == Some(0)
  }
}

/// Errors from running an external command.
///
/// A tool that could not be started surfaces the same way as one that exited
/// non-zero; both carry whatever the process printed.
#[derive(Debug, Error)]
pub enum ExecError {
  #[error("command `{command}` {}", describe_exit(.code))]
  CommandFailed {
    command: String,
    stdout: String,
    stderr: String,
    code: Option<i32>,
  },
}

impl ExecError {
  /// Failure for a process that exited unsuccessfully.
  pub fn from_output(invocation: &Invocation, output: CommandOutput) -> Self {
    ExecError::CommandFailed {
      command: invocation.command_line(),
      stdout: output.stdout,
      stderr: output.stderr,
      code: output.code,
    }
  }

  /// Failure for a process that could not be spawned at all.
  pub fn spawn(invocation: &Invocation, err: std::io::Error) -> Self {
    ExecError::CommandFailed {
      command: invocation.command_line(),
      stdout: String::new(),
      stderr: format!("failed to start {}: {}", invocation.program, err),
      code: None,
    }
  }

  pub fn command(&self) -> &str {
    match self {
      ExecError::CommandFailed { command, .. } => command,
    }
  }

  pub fn stdout(&self) -> &str {
    match self {
      ExecError::CommandFailed { stdout, .. } => stdout,
    }
  }

  pub fn stderr(&self) -> &str {
    match self {
      ExecError::CommandFailed { stderr, .. } => stderr,
    }
  }

  pub fn code(&self) -> Option<i32> {
    match self {
      ExecError::CommandFailed { code, .. } => *code,
    }
  }
}

fn describe_exit(code: &Option<i32>) -> String {
  match code {
    Some(code) => format!("failed with exit code {}", code),
    None => "failed without an exit code".to_string(),
  }
}
