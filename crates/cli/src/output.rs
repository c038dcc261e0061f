//! CLI output formatting utilities.
//!
//! Provides consistent formatting for terminal output: colored status
//! messages, the command echo used while deploying, and failure reports.

use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

use kubeship_lib::docker_env::EnvAssignment;
use kubeship_lib::exec::{CommandOutput, ExecError, Invocation};
use kubeship_lib::report::Reporter;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const INFO: &str = "•";
  pub const RUNNING: &str = ">>>";
}

pub fn format_duration(duration: Duration) -> String {
  let secs = duration.as_secs();
  let millis = duration.subsec_millis();

  if secs >= 60 {
    let mins = secs / 60;
    let remaining_secs = secs % 60;
    format!("{}m {}s", mins, remaining_secs)
  } else if secs > 0 {
    format!("{}.{:02}s", secs, millis / 10)
  } else {
    format!("{}ms", millis)
  }
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

/// Print everything a failed command left behind.
pub fn print_command_failure(err: &ExecError) {
  eprintln!();
  print_error(&err.to_string());
  if !err.stdout().is_empty() {
    eprintln!("{}", "--- stdout".if_supports_color(Stream::Stderr, |s| s.dimmed()));
    eprint!("{}", with_trailing_newline(err.stdout()));
  }
  if !err.stderr().is_empty() {
    eprintln!("{}", "--- stderr".if_supports_color(Stream::Stderr, |s| s.dimmed()));
    eprint!("{}", with_trailing_newline(err.stderr()));
  }
}

fn with_trailing_newline(text: &str) -> String {
  if text.ends_with('\n') {
    text.to_string()
  } else {
    format!("{}\n", text)
  }
}

/// Echoes pipeline progress to the terminal.
///
/// Command stdout goes to stdout and command stderr to stderr, unmodified.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalReporter;

impl Reporter for TerminalReporter {
  fn running(&mut self, invocation: &Invocation) {
    println!();
    println!(
      "{} {}",
      format!("{} Running:", symbols::RUNNING).if_supports_color(Stream::Stdout, |s| s.cyan()),
      invocation
    );
  }

  fn output(&mut self, output: &CommandOutput) {
    if !output.stdout.is_empty() {
      print!("{}", with_trailing_newline(&output.stdout));
    }
    if !output.stderr.is_empty() {
      eprint!("{}", with_trailing_newline(&output.stderr));
    }
  }

  fn env_set(&mut self, assignment: &EnvAssignment) {
    println!("{}", assignment.echo_line());
  }

  fn notice(&mut self, message: &str) {
    println!();
    print_info(message);
  }
}
