//! Deployment run integration tests.

use predicates::prelude::*;
use serial_test::serial;

use super::common::{IMAGE, REPO, TestEnv};

#[test]
#[serial]
fn deploy_runs_every_step_in_order() {
  let env = TestEnv::new();

  env
    .kubeship_cmd()
    .assert()
    .success()
    .stdout(predicate::str::contains(format!(">>> Running: {} clone {}", env.tool_path("git").display(), REPO)))
    .stdout(predicate::str::contains("Set DOCKER_HOST=\"tcp://127.0.0.1:2376\""))
    .stdout(predicate::str::contains("Skipping service deployment"))
    .stdout(predicate::str::contains("app-7d9f-x"))
    .stdout(predicate::str::contains("NodePort"))
    .stdout(predicate::str::contains(format!("Deployed {}", IMAGE)));

  let calls = env.calls();
  assert_eq!(calls.len(), 6, "{calls:#?}");
  assert_eq!(calls[0], format!("git clone {}", REPO));
  assert_eq!(calls[1], "minikube -p minikube docker-env --shell bash");
  assert_eq!(calls[2], "docker build -t app:1.0 . [DOCKER_HOST=tcp://127.0.0.1:2376] [dir=app]");
  assert!(calls[3].starts_with("kubectl apply -f ") && calls[3].ends_with("deploy.yaml"));
  assert_eq!(calls[4], "kubectl get pods");
  assert_eq!(calls[5], "kubectl get svc");
  assert!(env.workdir().join("app").is_dir());
}

#[test]
#[serial]
fn service_manifest_is_applied_after_deployment() {
  let env = TestEnv::new();

  env
    .kubeship_cmd()
    .arg("--service-file")
    .arg(env.manifest("service.yaml"))
    .assert()
    .success()
    .stdout(predicate::str::contains("Skipping service deployment").not());

  let applies: Vec<_> = env
    .calls()
    .into_iter()
    .filter(|c| c.starts_with("kubectl apply"))
    .collect();
  assert_eq!(applies.len(), 2);
  assert!(applies[0].ends_with("deploy.yaml"));
  assert!(applies[1].ends_with("service.yaml"));
}

#[test]
#[serial]
fn existing_checkout_is_pulled() {
  let env = TestEnv::new();
  std::fs::create_dir(env.workdir().join("app")).unwrap();

  env
    .kubeship_cmd()
    .assert()
    .success()
    .stdout(predicate::str::contains("already exists, pulling latest changes"))
    .stdout(predicate::str::contains("Already up to date."));

  let calls = env.calls();
  assert_eq!(calls[0], "git pull");
  assert!(!calls.iter().any(|c| c.starts_with("git clone")));
}

#[test]
#[serial]
fn build_failure_stops_before_deploy() {
  let env = TestEnv::new();

  env
    .kubeship_cmd()
    .env("FAKE_DOCKER_FAIL", "1")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("build -t app:1.0 .` failed with exit code 1"))
    .stderr(predicate::str::contains("Sending build context to Docker daemon"))
    .stderr(predicate::str::contains("failed to read dockerfile"));

  assert!(!env.calls().iter().any(|c| c.starts_with("kubectl")));
}

#[test]
#[serial]
fn missing_tool_fails_the_run() {
  let env = TestEnv::new();

  env
    .kubeship_cmd()
    .env("KUBESHIP_MINIKUBE", env.tool_path("no-such-minikube"))
    .assert()
    .code(1)
    .stderr(predicate::str::contains("failed to start"))
    .stderr(predicate::str::contains("failed without an exit code"));

  let calls = env.calls();
  assert_eq!(calls.len(), 1);
  assert!(calls[0].starts_with("git clone"));
}

#[test]
#[serial]
fn profile_is_passed_to_minikube() {
  let env = TestEnv::new();

  env.kubeship_cmd().args(["--profile", "dev"]).assert().success();

  assert!(
    env
      .calls()
      .contains(&"minikube -p dev docker-env --shell bash".to_string())
  );
}

#[test]
#[serial]
fn json_output_prints_summary_only() {
  let env = TestEnv::new();

  let output = env
    .kubeship_cmd()
    .args(["--output", "json"])
    .assert()
    .success()
    .stdout(predicate::str::contains(">>> Running").not())
    .get_output()
    .stdout
    .clone();

  let summary: serde_json::Value = serde_json::from_slice(&output).unwrap();
  assert_eq!(summary["sync"], "cloned");
  assert_eq!(summary["image"], IMAGE);
  assert_eq!(summary["profile"], "minikube");
  assert_eq!(summary["env_shell"], "bash");
  assert_eq!(
    summary["daemon_env"],
    serde_json::json!(["DOCKER_TLS_VERIFY", "DOCKER_HOST", "MINIKUBE_ACTIVE_DOCKERD"])
  );
  assert_eq!(summary["manifests_applied"].as_array().unwrap().len(), 1);
  assert!(summary["status"]["pods"].as_str().unwrap().contains("Running"));
}
