//! External command execution.
//!
//! Every pipeline step is a single invocation of an external tool. Steps build
//! an [`Invocation`], hand it to a [`Runner`], and get back the captured
//! output or an [`ExecError`] if the tool could not be started or exited
//! non-zero.

mod process;
mod types;

#[cfg(test)]
pub(crate) mod testutil;

use std::io;

use crate::report::Reporter;

pub use process::ProcessExecutor;
pub use types::{CommandOutput, ExecError, Invocation};

/// Something that can run an invocation to completion.
///
/// Implementations return the captured output for any process that ran,
/// successful or not; `Err` is reserved for processes that could not be
/// started.
#[allow(async_fn_in_trait)]
pub trait Executor {
  async fn execute(&self, invocation: &Invocation) -> io::Result<CommandOutput>;
}

/// Run an invocation and treat a non-zero exit as an error.
pub async fn run_checked<E: Executor>(executor: &E, invocation: &Invocation) -> Result<CommandOutput, ExecError> {
  let output = executor
    .execute(invocation)
    .await
    .map_err(|e| ExecError::spawn(invocation, e))?;

  if !output.success() {
    return Err(ExecError::from_output(invocation, output));
  }

  Ok(output)
}

/// Pairs an executor with the reporter that echoes commands to the operator.
pub struct Runner<'a, E, R> {
  executor: &'a E,
  reporter: &'a mut R,
}

impl<'a, E: Executor, R: Reporter> Runner<'a, E, R> {
  pub fn new(executor: &'a E, reporter: &'a mut R) -> Self {
    Self { executor, reporter }
  }

  pub fn reporter(&mut self) -> &mut R {
    &mut *self.reporter
  }

  /// Announce, run, and echo the output of an invocation.
  pub async fn run(&mut self, invocation: &Invocation) -> Result<CommandOutput, ExecError> {
    self.reporter.running(invocation);
    let output = run_checked(self.executor, invocation).await?;
    self.reporter.output(&output);
    Ok(output)
  }

  /// Run an invocation whose output is consumed by the caller rather than shown.
  pub async fn capture(&mut self, invocation: &Invocation) -> Result<CommandOutput, ExecError> {
    run_checked(self.executor, invocation).await
  }
}
