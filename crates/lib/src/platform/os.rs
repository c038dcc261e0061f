use std::fmt;

use serde::Serialize;

/// Host operating system families kubeship distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
  Linux,
  #[serde(rename = "darwin")]
  MacOs,
  Windows,
}

impl Os {
  /// Detect the current operating system at runtime
  ///
  /// Returns `None` for hosts outside the three known families (BSDs, etc.)
  pub fn current() -> Option<Self> {
    Self::from_target(std::env::consts::OS)
  }

  fn from_target(name: &str) -> Option<Self> {
    match name {
      "linux" => Some(Self::Linux),
      "macos" => Some(Self::MacOs),
      "windows" => Some(Self::Windows),
      _ => None,
    }
  }

  /// Returns the lowercase string identifier for this OS
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "linux",
      Self::MacOs => "darwin",
      Self::Windows => "windows",
    }
  }

  pub fn is_windows(&self) -> bool {
    matches!(self, Self::Windows)
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
