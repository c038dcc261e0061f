//! Run configuration.
//!
//! The CLI assembles these from flags and `KUBESHIP_*` environment variables;
//! the library never reads configuration from the environment itself.

use std::path::PathBuf;

use crate::docker_env::EnvShell;

/// Cluster profile used when none is given.
pub const DEFAULT_PROFILE: &str = "minikube";

/// Names (or paths) of the external tools the pipeline drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tools {
  pub git: String,
  pub docker: String,
  pub minikube: String,
  pub kubectl: String,
}

impl Default for Tools {
  fn default() -> Self {
    Self {
      git: "git".to_string(),
      docker: "docker".to_string(),
      minikube: "minikube".to_string(),
      kubectl: "kubectl".to_string(),
    }
  }
}

/// Everything one deployment run needs to know.
#[derive(Debug, Clone)]
pub struct DeployOptions {
  /// Repository location, as accepted by `git clone`.
  pub repo: String,
  /// Image name and tag passed to `docker build -t`.
  pub image: String,
  /// Primary manifest, always applied.
  pub deploy_file: PathBuf,
  /// Secondary manifest, applied after the primary one when present.
  pub service_file: Option<PathBuf>,
  /// minikube profile queried for the docker daemon environment.
  pub profile: String,
  /// Output style requested from `minikube docker-env`.
  pub env_shell: EnvShell,
  /// Directory the repository is cloned into.
  pub workdir: PathBuf,
}

impl DeployOptions {
  /// Options with the default profile, the host's env shell, and the current directory as workdir.
  pub fn new(repo: impl Into<String>, image: impl Into<String>, deploy_file: impl Into<PathBuf>) -> Self {
    Self {
      repo: repo.into(),
      image: image.into(),
      deploy_file: deploy_file.into(),
      service_file: None,
      profile: DEFAULT_PROFILE.to_string(),
      env_shell: EnvShell::host(),
      workdir: PathBuf::from("."),
    }
  }
}
