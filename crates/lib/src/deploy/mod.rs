//! Image build and manifest application.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::docker_env::DaemonEnv;
use crate::exec::{ExecError, Executor, Invocation, Runner};
use crate::report::Reporter;

/// `docker build -t <image> .` inside `repo_dir`, targeting the daemon in `env`.
pub fn build_invocation(docker: &str, image: &str, repo_dir: &Path, env: &DaemonEnv) -> Invocation {
  Invocation::new(docker)
    .args(["build", "-t", image, "."])
    .current_dir(repo_dir)
    .envs(env.to_env_map())
}

/// `kubectl apply -f <manifest>`
pub fn apply_invocation(kubectl: &str, manifest: &Path) -> Invocation {
  Invocation::new(kubectl)
    .args(["apply", "-f"])
    .arg(manifest.to_string_lossy())
}

/// Build the image from the repository root.
///
/// The build descriptor is not checked beforehand; a missing `Dockerfile`
/// surfaces as a docker failure.
pub async fn build_image<E: Executor, R: Reporter>(
  runner: &mut Runner<'_, E, R>,
  docker: &str,
  image: &str,
  repo_dir: &Path,
  env: &DaemonEnv,
) -> Result<(), ExecError> {
  info!(image, dir = %repo_dir.display(), daemon_vars = env.len(), "building image");
  runner.run(&build_invocation(docker, image, repo_dir, env)).await?;
  Ok(())
}

/// Apply the primary manifest, then the secondary one if given.
///
/// Returns the manifests that were applied, in order.
pub async fn apply_manifests<E: Executor, R: Reporter>(
  runner: &mut Runner<'_, E, R>,
  kubectl: &str,
  deploy_file: &Path,
  service_file: Option<&Path>,
) -> Result<Vec<PathBuf>, ExecError> {
  let mut applied = Vec::with_capacity(2);

  info!(manifest = %deploy_file.display(), "applying deployment manifest");
  runner.run(&apply_invocation(kubectl, deploy_file)).await?;
  applied.push(deploy_file.to_path_buf());

  match service_file {
    Some(service_file) => {
      info!(manifest = %service_file.display(), "applying service manifest");
      runner.run(&apply_invocation(kubectl, service_file)).await?;
      applied.push(service_file.to_path_buf());
    }
    None => {
      warn!("no service manifest given, skipping service deployment");
      runner
        .reporter()
        .notice("Skipping service deployment (no service file provided)");
    }
  }

  Ok(applied)
}
