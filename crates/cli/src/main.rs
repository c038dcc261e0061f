mod deploy;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use kubeship_lib::config::{DEFAULT_PROFILE, Tools};
use kubeship_lib::docker_env::EnvShell;

use crate::output::OutputFormat;

/// Build a git repository into an image on minikube's docker daemon and deploy it
#[derive(Parser, Debug)]
#[command(name = "kubeship")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Git repository URL or path to clone
  #[arg(long)]
  repo: String,

  /// Image name and tag to build (e.g. my-app:1.0)
  #[arg(long)]
  image: String,

  /// Path to the deployment manifest
  #[arg(long)]
  deploy_file: PathBuf,

  /// Path to the service manifest (optional)
  #[arg(long)]
  service_file: Option<PathBuf>,

  /// minikube profile whose docker daemon is used for the build
  #[arg(long, env = "KUBESHIP_PROFILE", default_value = DEFAULT_PROFILE)]
  profile: String,

  /// Output style requested from `minikube docker-env` (default: cmd on Windows, bash elsewhere)
  #[arg(long, env = "KUBESHIP_ENV_SHELL", value_enum)]
  env_shell: Option<EnvShellArg>,

  /// Directory the repository is cloned into (default: current directory)
  #[arg(long, env = "KUBESHIP_WORKDIR")]
  workdir: Option<PathBuf>,

  /// Output format
  #[arg(long, value_enum, default_value_t)]
  output: OutputFormat,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,

  #[command(flatten)]
  tools: ToolArgs,
}

/// Overrides for the external tool binaries
#[derive(Args, Debug)]
struct ToolArgs {
  /// git binary
  #[arg(long, env = "KUBESHIP_GIT", default_value = "git")]
  git_bin: String,

  /// docker binary
  #[arg(long, env = "KUBESHIP_DOCKER", default_value = "docker")]
  docker_bin: String,

  /// minikube binary
  #[arg(long, env = "KUBESHIP_MINIKUBE", default_value = "minikube")]
  minikube_bin: String,

  /// kubectl binary
  #[arg(long, env = "KUBESHIP_KUBECTL", default_value = "kubectl")]
  kubectl_bin: String,
}

impl From<ToolArgs> for Tools {
  fn from(args: ToolArgs) -> Self {
    Tools {
      git: args.git_bin,
      docker: args.docker_bin,
      minikube: args.minikube_bin,
      kubectl: args.kubectl_bin,
    }
  }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EnvShellArg {
  Cmd,
  Bash,
}

impl From<EnvShellArg> for EnvShell {
  fn from(arg: EnvShellArg) -> Self {
    match arg {
      EnvShellArg::Cmd => EnvShell::Cmd,
      EnvShellArg::Bash => EnvShell::Bash,
    }
  }
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  // RUST_LOG wins over --verbose
  let default_filter = if cli.verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let args = deploy::DeployArgs {
    repo: cli.repo,
    image: cli.image,
    deploy_file: cli.deploy_file,
    service_file: cli.service_file,
    profile: cli.profile,
    env_shell: cli.env_shell.map(EnvShell::from),
    workdir: cli.workdir,
    tools: cli.tools.into(),
  };

  deploy::cmd_deploy(args, cli.output)
}
