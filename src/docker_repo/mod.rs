// Container runtime access via bollard: inspect, list and exec against one named container

use crate::error::ProbeError;
use bollard::Docker;
use bollard::container::LogOutput;
use bollard::exec::{StartExecOptions, StartExecResults};
use bollard::models::{ContainerSummary, ExecConfig};
use bollard::query_parameters::{InspectContainerOptions, ListContainersOptions};
use futures_util::StreamExt;
use std::collections::HashMap;

/// Status of the container named exactly `name`. Docker's name filter matches substrings
/// ("mainnet" also returns "mainnet-horizon"), so the listing is narrowed here.
/// A match without a status yields an empty string, which classifies as stopped.
pub fn exact_status(containers: Vec<ContainerSummary>, name: &str) -> Option<String> {
    containers
        .into_iter()
        .find(|c| {
            c.names
                .as_ref()
                .is_some_and(|names| names.iter().any(|n| n.trim_start_matches('/') == name))
        })
        .map(|c| c.status.unwrap_or_default())
}

pub struct DockerRepo {
    docker: Docker,
}

impl DockerRepo {
    /// Builds the client; no request is made until the first call, so a stopped daemon
    /// only shows up as per-call errors.
    pub fn connect() -> anyhow::Result<Self> {
        let docker = Docker::connect_with_unix_defaults()?;
        Ok(Self { docker })
    }

    /// `State.Running` of the named container (`docker inspect -f '{{.State.Running}}'`).
    pub async fn inspect_running(&self, name: &str) -> Result<Option<bool>, ProbeError> {
        let inspected = self
            .docker
            .inspect_container(name, None::<InspectContainerOptions>)
            .await?;
        Ok(inspected.state.and_then(|s| s.running))
    }

    /// Status text ("Up 3 hours") of the container whose name is exactly `name`, if any.
    pub async fn list_status(&self, name: &str) -> Result<Option<String>, ProbeError> {
        let mut filters = HashMap::new();
        filters.insert("name".to_string(), vec![name.to_string()]);

        let options = ListContainersOptions {
            all: true,
            filters: Some(filters),
            ..Default::default()
        };
        let containers = self.docker.list_containers(Some(options)).await?;
        Ok(exact_status(containers, name))
    }

    /// Runs `cmd` inside the container and returns its stdout. A non-zero exit is an error; so is
    /// a missing exit code, since the stream has ended and Docker should have recorded one.
    pub async fn exec_output(&self, name: &str, cmd: &[String]) -> Result<String, ProbeError> {
        let config = ExecConfig {
            attach_stdout: Some(true),
            attach_stderr: Some(true),
            cmd: Some(cmd.to_vec()),
            ..Default::default()
        };
        let exec = self.docker.create_exec(name, config).await?;

        let mut stdout = Vec::new();
        match self.docker.start_exec(&exec.id, None::<StartExecOptions>).await? {
            StartExecResults::Attached { mut output, .. } => {
                while let Some(chunk) = output.next().await {
                    match chunk? {
                        LogOutput::StdOut { message } => stdout.extend_from_slice(&message),
                        LogOutput::StdErr { message } => {
                            tracing::debug!(
                                container = name,
                                stderr = %String::from_utf8_lossy(&message).trim(),
                                "exec stderr"
                            );
                        }
                        _ => {}
                    }
                }
            }
            StartExecResults::Detached => {
                return Err(ProbeError::ProcessSpawn("exec started detached".into()));
            }
        }

        let inspected = self.docker.inspect_exec(&exec.id).await?;
        exec_result(cmd, inspected.exit_code, &stdout)
    }
}

/// Stdout of a finished exec, or `ProcessSpawn` unless it exited with code 0.
fn exec_result(cmd: &[String], exit_code: Option<i64>, stdout: &[u8]) -> Result<String, ProbeError> {
    match exit_code {
        Some(0) => Ok(String::from_utf8_lossy(stdout).into_owned()),
        Some(code) => Err(ProbeError::ProcessSpawn(format!(
            "{} exited with code {}",
            cmd.join(" "),
            code
        ))),
        None => Err(ProbeError::ProcessSpawn(format!(
            "{} finished without an exit code",
            cmd.join(" ")
        ))),
    }
}
