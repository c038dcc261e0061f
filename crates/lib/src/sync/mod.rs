//! Repository sync.
//!
//! Clones the repository into the working directory on first use and pulls
//! on every later run. An existing directory is trusted to be a checkout of
//! the requested repository.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::exec::{Executor, Invocation, Runner};
use crate::pipeline::PipelineError;
use crate::report::Reporter;

/// What the sync step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncAction {
  Cloned,
  Pulled,
}

/// Result of syncing a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
  /// Local checkout directory.
  pub dir: PathBuf,
  pub action: SyncAction,
}

/// Directory name `git clone` creates for `location`.
///
/// Takes the final segment of the location and strips a trailing `.git`:
/// `https://host/org/app.git` and `https://host/org/app` both give `app`.
/// Trailing slashes are ignored, and `\` and `:` also separate segments so
/// Windows paths and scp-style locations (`git@host:app.git`) work.
/// Returns `None` when no usable name remains.
pub fn repo_dir_name(location: &str) -> Option<&str> {
  let trimmed = location.trim_end_matches(['/', '\\']);
  let segment = trimmed.rsplit(['/', '\\', ':']).next()?;
  let name = segment.strip_suffix(".git").unwrap_or(segment);

  if name.is_empty() || name == "." || name == ".." {
    None
  } else {
    Some(name)
  }
}

/// Clone `location` into `workdir`, or pull if its directory already exists.
pub async fn sync_repository<E: Executor, R: Reporter>(
  runner: &mut Runner<'_, E, R>,
  git: &str,
  location: &str,
  workdir: &Path,
) -> Result<SyncOutcome, PipelineError> {
  let name = repo_dir_name(location).ok_or_else(|| PipelineError::InvalidRepository(location.to_string()))?;
  let dir = workdir.join(name);

  let action = if dir.exists() {
    info!(dir = %dir.display(), "repository exists, pulling latest changes");
    runner
      .reporter()
      .notice(&format!("Repository {} already exists, pulling latest changes", name));
    runner.run(&Invocation::new(git).arg("pull").current_dir(&dir)).await?;
    SyncAction::Pulled
  } else {
    info!(location, dir = %dir.display(), "cloning repository");
    runner
      .run(&Invocation::new(git).args(["clone", location]).current_dir(workdir))
      .await?;
    SyncAction::Cloned
  };

  Ok(SyncOutcome { dir, action })
}
