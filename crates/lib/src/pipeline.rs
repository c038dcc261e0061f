//! The deployment pipeline.
//!
//! Sync → docker-env → build → apply → status, strictly in order. The first
//! failing command aborts the run; nothing already done is rolled back.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::config::{DeployOptions, Tools};
use crate::deploy;
use crate::docker_env::{self, EnvShell};
use crate::exec::{ExecError, Executor, Runner};
use crate::platform::Os;
use crate::report::Reporter;
use crate::status::{self, ClusterStatus};
use crate::sync::{self, SyncAction};

/// Errors that abort a deployment run.
#[derive(Debug, Error)]
pub enum PipelineError {
  /// No directory name can be derived from the repository location.
  #[error("cannot derive a directory name from repository location '{0}'")]
  InvalidRepository(String),

  /// An external command failed.
  #[error(transparent)]
  Command(#[from] ExecError),
}

/// What a successful run did.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
  pub host_os: Option<Os>,
  /// Local checkout the image was built from.
  pub repository: PathBuf,
  pub sync: SyncAction,
  pub image: String,
  pub profile: String,
  pub env_shell: EnvShell,
  /// Names of the daemon variables passed to the build.
  pub daemon_env: Vec<String>,
  pub manifests_applied: Vec<PathBuf>,
  pub status: ClusterStatus,
}

/// Run the whole pipeline.
pub async fn run<E: Executor, R: Reporter>(
  options: &DeployOptions,
  tools: &Tools,
  executor: &E,
  reporter: &mut R,
) -> Result<RunSummary, PipelineError> {
  let workdir = dunce::canonicalize(&options.workdir).unwrap_or_else(|_| options.workdir.clone());
  info!(repo = %options.repo, image = %options.image, workdir = %workdir.display(), "starting deployment");

  let mut runner = Runner::new(executor, reporter);

  let synced = sync::sync_repository(&mut runner, &tools.git, &options.repo, &workdir).await?;

  let env = docker_env::resolve(&mut runner, &tools.minikube, &options.profile, options.env_shell).await?;

  deploy::build_image(&mut runner, &tools.docker, &options.image, &synced.dir, &env).await?;

  let applied = deploy::apply_manifests(
    &mut runner,
    &tools.kubectl,
    &options.deploy_file,
    options.service_file.as_deref(),
  )
  .await?;

  let status = status::report_status(&mut runner, &tools.kubectl).await?;

  info!(image = %options.image, manifests = applied.len(), "deployment complete");

  Ok(RunSummary {
    host_os: Os::current(),
    repository: synced.dir,
    sync: synced.action,
    image: options.image.clone(),
    profile: options.profile.clone(),
    env_shell: options.env_shell,
    daemon_env: env.names(),
    manifests_applied: applied,
    status,
  })
}
