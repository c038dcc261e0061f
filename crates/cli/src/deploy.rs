//! Implementation of the deployment run.
//!
//! Sync the repository, point docker at minikube's daemon, build the image,
//! apply the manifests, and show what is running.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::debug;

use kubeship_lib::config::{DeployOptions, Tools};
use kubeship_lib::docker_env::EnvShell;
use kubeship_lib::exec::ProcessExecutor;
use kubeship_lib::pipeline::{self, PipelineError};
use kubeship_lib::report::Silent;

use crate::output::{OutputFormat, TerminalReporter, format_duration, print_command_failure, print_json, print_success};

/// Arguments for a deployment run, as parsed from the command line.
pub struct DeployArgs {
  pub repo: String,
  pub image: String,
  pub deploy_file: PathBuf,
  pub service_file: Option<PathBuf>,
  pub profile: String,
  pub env_shell: Option<EnvShell>,
  pub workdir: Option<PathBuf>,
  pub tools: Tools,
}

impl DeployArgs {
  fn into_parts(self) -> Result<(DeployOptions, Tools)> {
    let workdir = match self.workdir {
      Some(dir) => dir,
      None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    let options = DeployOptions {
      repo: self.repo,
      image: self.image,
      deploy_file: self.deploy_file,
      service_file: self.service_file,
      profile: self.profile,
      env_shell: self.env_shell.unwrap_or_else(EnvShell::host),
      workdir,
    };

    Ok((options, self.tools))
  }
}

/// Execute a deployment run.
///
/// In text mode every command is echoed with its output as it runs. In JSON
/// mode nothing is echoed and a summary is printed at the end. Either way, a
/// failing command's captured output is printed before the error is returned.
pub fn cmd_deploy(args: DeployArgs, output: OutputFormat) -> Result<()> {
  let start = Instant::now();
  let (options, tools) = args.into_parts()?;
  debug!(workdir = %options.workdir.display(), env_shell = %options.env_shell, profile = %options.profile, "resolved options");

  // One thread of control: each command is awaited before the next starts.
  let rt = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")?;

  let executor = ProcessExecutor;
  let result = if output.is_json() {
    rt.block_on(pipeline::run(&options, &tools, &executor, &mut Silent))
  } else {
    rt.block_on(pipeline::run(&options, &tools, &executor, &mut TerminalReporter))
  };

  let summary = match result {
    Ok(summary) => summary,
    Err(err) => {
      if let PipelineError::Command(failure) = &err {
        print_command_failure(failure);
      }
      return Err(err).context("Deployment failed");
    }
  };

  if output.is_json() {
    print_json(&summary)?;
  } else {
    println!();
    print_success(&format!(
      "Deployed {} in {}",
      summary.image,
      format_duration(start.elapsed())
    ));
  }

  Ok(())
}
