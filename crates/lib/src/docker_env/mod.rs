//! Daemon environment resolution.
//!
//! Points `docker build` at the container runtime inside the minikube node
//! instead of the host's own daemon, without the operator having to `eval`
//! `minikube docker-env` first.

mod parse;

use tracing::{info, warn};

use crate::exec::{ExecError, Executor, Invocation, Runner};
use crate::report::Reporter;

pub use parse::{DaemonEnv, EnvAssignment, EnvShell};

/// `minikube -p <profile> docker-env --shell <style>`
pub fn docker_env_invocation(minikube: &str, profile: &str, shell: EnvShell) -> Invocation {
  Invocation::new(minikube).args(["-p", profile, "docker-env", "--shell", shell.shell_arg()])
}

/// Query minikube for the daemon environment of `profile`.
///
/// Each resolved assignment is reported to the operator. The returned
/// [`DaemonEnv`] is meant to be passed to the build invocation; the
/// environment of the current process is left untouched.
pub async fn resolve<E: Executor, R: Reporter>(
  runner: &mut Runner<'_, E, R>,
  minikube: &str,
  profile: &str,
  shell: EnvShell,
) -> Result<DaemonEnv, ExecError> {
  info!(profile, shell = %shell, "resolving docker daemon environment");
  runner
    .reporter()
    .notice(&format!("Configuring docker to use the daemon of minikube profile '{}'", profile));

  let output = runner.capture(&docker_env_invocation(minikube, profile, shell)).await?;
  let env = shell.parse(&output.stdout);

  for assignment in env.iter() {
    runner.reporter().env_set(assignment);
  }

  if env.is_empty() {
    warn!(profile, "docker-env printed no assignments; the build will use the default daemon");
  }

  Ok(env)
}
