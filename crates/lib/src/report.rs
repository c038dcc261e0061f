//! Operator-facing progress reporting.
//!
//! The pipeline tells a [`Reporter`] what it is doing; the CLI decides how
//! (or whether) to show it.

use crate::docker_env::EnvAssignment;
use crate::exec::{CommandOutput, Invocation};

pub trait Reporter {
  /// A command is about to run.
  fn running(&mut self, invocation: &Invocation);

  /// A command finished successfully with this output.
  fn output(&mut self, output: &CommandOutput);

  /// A daemon environment variable was resolved.
  fn env_set(&mut self, assignment: &EnvAssignment);

  /// Free-form progress message, e.g. a skipped step.
  fn notice(&mut self, message: &str);
}

/// Reporter that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Reporter for Silent {
  fn running(&mut self, _invocation: &Invocation) {}

  fn output(&mut self, _output: &CommandOutput) {}

  fn env_set(&mut self, _assignment: &EnvAssignment) {}

  fn notice(&mut self, _message: &str) {}
}
