//! kubeship-lib: Core logic for kubeship
//!
//! This crate takes a git repository from clone to a running deployment on a
//! local minikube cluster by driving the external tools in a fixed order:
//! - `sync`: clone or pull the repository
//! - `docker_env`: resolve the cluster's docker daemon environment
//! - `deploy`: build the image and apply the manifests
//! - `status`: list pods and services
//!
//! `pipeline::run` sequences the steps. Every external command goes through an
//! [`exec::Executor`], so the pipeline can be driven without real tools.

pub mod config;
pub mod deploy;
pub mod docker_env;
pub mod exec;
pub mod pipeline;
pub mod platform;
pub mod report;
pub mod status;
pub mod sync;
