use super::{Probe, settle};
use crate::config::{ContainerConfig, ContainerMode};
use crate::docker_repo::DockerRepo;
use crate::error::ProbeError;
use crate::models::ContainerStatus;
use futures_util::future::BoxFuture;
use std::sync::Arc;

pub struct ContainerProbe {
    /// `None` when no Docker client could be built; every probe then reports `NotFound`.
    repo: Option<Arc<DockerRepo>>,
    name: String,
    mode: ContainerMode,
}

impl ContainerProbe {
    pub fn new(repo: Option<Arc<DockerRepo>>, config: &ContainerConfig) -> Self {
        Self {
            repo,
            name: config.name.clone(),
            mode: config.mode,
        }
    }

    async fn check(&self) -> Result<ContainerStatus, ProbeError> {
        let repo = self
            .repo
            .as_ref()
            .ok_or_else(|| ProbeError::ProcessSpawn("docker client unavailable".into()))?;
        match self.mode {
            ContainerMode::Inspect => Ok(ContainerStatus::from_running_flag(
                repo.inspect_running(&self.name).await?,
            )),
            ContainerMode::List => Ok(repo
                .list_status(&self.name)
                .await?
                .map(|s| ContainerStatus::from_status_text(&s))
                .unwrap_or(ContainerStatus::NotFound)),
        }
    }
}

impl Probe<ContainerStatus> for ContainerProbe {
    fn name(&self) -> &'static str {
        "container"
    }

    fn probe(&self) -> BoxFuture<'_, ContainerStatus> {
        Box::pin(async move { settle(self.name(), self.check().await) })
    }
}
