//! Test doubles for driving the pipeline without real tools.

use std::io;
use std::sync::Mutex;

use super::{CommandOutput, Executor, Invocation};
use crate::docker_env::EnvAssignment;
use crate::report::Reporter;

enum Reply {
  Output(CommandOutput),
  Unavailable,
}

/// Executor that records every invocation and answers from a script.
///
/// Rules match on a prefix of the command line; the first matching rule wins.
/// Unmatched invocations succeed with empty output.
#[derive(Default)]
pub struct ScriptedExecutor {
  rules: Vec<(String, Reply)>,
  calls: Mutex<Vec<Invocation>>,
}

impl ScriptedExecutor {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn respond(mut self, prefix: &str, stdout: &str) -> Self {
    self.rules.push((prefix.to_string(), Reply::Output(CommandOutput::ok(stdout))));
    self
  }

  pub fn fail(mut self, prefix: &str, code: i32, stderr: &str) -> Self {
    self
      .rules
      .push((prefix.to_string(), Reply::Output(CommandOutput::failed(code, stderr))));
    self
  }

  pub fn unavailable(mut self, prefix: &str) -> Self {
    self.rules.push((prefix.to_string(), Reply::Unavailable));
    self
  }

  pub fn calls(&self) -> Vec<Invocation> {
    self.calls.lock().unwrap().clone()
  }

  pub fn command_lines(&self) -> Vec<String> {
    self.calls().iter().map(Invocation::command_line).collect()
  }
}

impl Executor for ScriptedExecutor {
  async fn execute(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
    self.calls.lock().unwrap().push(invocation.clone());

    let line = invocation.command_line();
    match self.rules.iter().find(|(prefix, _)| line.starts_with(prefix.as_str())) {
      Some((_, Reply::Output(output))) => Ok(output.clone()),
      Some((_, Reply::Unavailable)) => Err(io::Error::new(io::ErrorKind::NotFound, "program not found")),
      None => Ok(CommandOutput::ok("")),
    }
  }
}

/// Reporter that keeps every event as a line of text.
#[derive(Debug, Default)]
pub struct RecordingReporter {
  pub events: Vec<String>,
}

impl Reporter for RecordingReporter {
  fn running(&mut self, invocation: &Invocation) {
    self.events.push(format!("running: {}", invocation));
  }

  fn output(&mut self, output: &CommandOutput) {
    if !output.stdout.is_empty() {
      self.events.push(format!("stdout: {}", output.stdout));
    }
    if !output.stderr.is_empty() {
      self.events.push(format!("stderr: {}", output.stderr));
    }
  }

  fn env_set(&mut self, assignment: &EnvAssignment) {
    self.events.push(assignment.echo_line());
  }

  fn notice(&mut self, message: &str) {
    self.events.push(format!("notice: {}", message));
  }
}
