//! Parsing `minikube docker-env` output.
//!
//! minikube prints shell code meant to be `eval`ed. kubeship never spawns a
//! shell to source it, so the two known output styles are parsed here and the
//! assignments applied to child processes directly.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::platform::Os;

/// Output style requested with `minikube docker-env --shell <style>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvShell {
  /// Windows `cmd.exe` style: `SET NAME=value`
  Cmd,
  /// POSIX shell style: `export NAME="value"`
  Bash,
}

impl EnvShell {
  /// `Cmd` on Windows hosts, `Bash` everywhere else.
  pub fn for_os(os: Option<Os>) -> Self {
    match os {
      Some(os) if os.is_windows() => EnvShell::Cmd,
      _ => EnvShell::Bash,
    }
  }

  /// The style matching the host this process runs on.
  pub fn host() -> Self {
    Self::for_os(Os::current())
  }

  /// Value passed to `--shell`.
  pub const fn shell_arg(self) -> &'static str {
    match self {
      EnvShell::Cmd => "cmd",
      EnvShell::Bash => "bash",
    }
  }

  /// Prefix that marks an assignment line in this style.
  pub const fn prefix(self) -> &'static str {
    match self {
      EnvShell::Cmd => "SET ",
      EnvShell::Bash => "export ",
    }
  }

  /// Parse a single output line.
  ///
  /// Returns `None` for anything that is not `<prefix>NAME=value`: comments,
  /// blank lines, `unset`/`REM` lines, and prefixed lines without `=`. The
  /// value is everything after the first `=`, so values may themselves
  /// contain `=`.
  pub fn parse_line(self, line: &str) -> Option<EnvAssignment> {
    let rest = line.strip_prefix(self.prefix())?;
    let (name, value) = rest.split_once('=')?;
    Some(EnvAssignment {
      name: name.to_string(),
      value: value.to_string(),
    })
  }

  /// Parse the full output of `minikube docker-env`.
  pub fn parse(self, output: &str) -> DaemonEnv {
    output.lines().filter_map(|line| self.parse_line(line)).collect()
  }
}

impl fmt::Display for EnvShell {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.shell_arg())
  }
}

/// One `NAME=value` pair from the docker-env output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvAssignment {
  pub name: String,
  /// Raw value text, exactly as printed after the first `=`.
  pub value: String,
}

impl EnvAssignment {
  /// Line shown to the operator when the assignment is applied.
  pub fn echo_line(&self) -> String {
    format!("Set {}={}", self.name, self.value)
  }

  /// Value as a shell would see it after evaluation.
  ///
  /// minikube double-quotes values in POSIX style output; one enclosing pair
  /// is removed. Anything else is returned unchanged.
  pub fn effective_value(&self) -> &str {
    self
      .value
      .strip_prefix('"')
      .and_then(|v| v.strip_suffix('"'))
      .unwrap_or(&self.value)
  }
}

/// Docker daemon connection settings resolved from one docker-env run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DaemonEnv {
  assignments: Vec<EnvAssignment>,
}

impl DaemonEnv {
  pub fn iter(&self) -> impl Iterator<Item = &EnvAssignment> {
    self.assignments.iter()
  }

  pub fn len(&self) -> usize {
    self.assignments.len()
  }

  pub fn is_empty(&self) -> bool {
    self.assignments.is_empty()
  }

  /// Raw value of the last assignment to `name`.
  pub fn get(&self, name: &str) -> Option<&str> {
    self
      .assignments
      .iter()
      .rev()
      .find(|a| a.name == name)
      .map(|a| a.value.as_str())
  }

  /// Distinct variable names, in first-seen order.
  pub fn names(&self) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for a in &self.assignments {
      if !names.contains(&a.name) {
        names.push(a.name.clone());
      }
    }
    names
  }

  /// Variables to add to a child process environment. Later assignments win.
  pub fn to_env_map(&self) -> BTreeMap<String, String> {
    self
      .assignments
      .iter()
      .map(|a| (a.name.clone(), a.effective_value().to_string()))
      .collect()
  }
}

impl FromIterator<EnvAssignment> for DaemonEnv {
  fn from_iter<I: IntoIterator<Item = EnvAssignment>>(iter: I) -> Self {
    Self {
      assignments: iter.into_iter().collect(),
    }
  }
}
