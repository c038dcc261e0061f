//! Cluster status listing.

use serde::Serialize;
use tracing::info;

use crate::exec::{ExecError, Executor, Invocation, Runner};
use crate::report::Reporter;

/// Raw `kubectl get` output captured after a deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClusterStatus {
  pub pods: String,
  pub services: String,
}

/// List pods, then services.
///
/// A failing query fails the run like any earlier step.
pub async fn report_status<E: Executor, R: Reporter>(
  runner: &mut Runner<'_, E, R>,
  kubectl: &str,
) -> Result<ClusterStatus, ExecError> {
  info!("listing pods and services");
  let pods = runner.run(&Invocation::new(kubectl).args(["get", "pods"])).await?;
  let services = runner.run(&Invocation::new(kubectl).args(["get", "svc"])).await?;

  Ok(ClusterStatus {
    pods: pods.stdout,
    services: services.stdout,
  })
}
