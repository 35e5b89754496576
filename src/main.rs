use anyhow::Result;
use pi_node_dashboard::config::{AppConfig, ValidatorMode};
use pi_node_dashboard::docker_repo::DockerRepo;
use pi_node_dashboard::models::ValidatorStatus;
use pi_node_dashboard::probes::{
    ContainerProbe, LedgerIndexProbe, Probe, ValidatorProbe, ValidatorSource, http_client,
};
use pi_node_dashboard::{aggregator::StatusAggregator, routes};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

fn build_aggregator(config: &AppConfig) -> Result<StatusAggregator> {
    let client = http_client(config.probes.timeout())?;

    // A missing Docker client is not fatal: the container probe reports NotFound.
    let docker = match DockerRepo::connect() {
        Ok(repo) => Some(Arc::new(repo)),
        Err(e) => {
            tracing::warn!(error = %e, "Docker client unavailable");
            None
        }
    };

    let validator: Option<Arc<dyn Probe<ValidatorStatus>>> = match config.validator.mode {
        ValidatorMode::Disabled => None,
        ValidatorMode::Exec => match &docker {
            Some(repo) => Some(Arc::new(ValidatorProbe::new(ValidatorSource::Exec {
                repo: repo.clone(),
                container: config.container.name.clone(),
                command: config.validator.command.clone(),
            }))),
            None => {
                tracing::warn!("validator exec mode needs Docker; deriving core status from Horizon");
                None
            }
        },
        ValidatorMode::Http => Some(Arc::new(ValidatorProbe::new(ValidatorSource::Http {
            client: client.clone(),
            url: config.validator.url.clone(),
        }))),
    };

    Ok(StatusAggregator::new(
        Arc::new(ContainerProbe::new(docker, &config.container)),
        validator,
        Arc::new(LedgerIndexProbe::new(client, &config.ledger_index)),
        config.probes.timeout(),
    ))
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = AppConfig::load()?;
    tracing::info!(
        container = %app_config.container.name,
        container_mode = ?app_config.container.mode,
        horizon = %app_config.ledger_index.base_url,
        horizon_endpoint = ?app_config.ledger_index.endpoint,
        validator_mode = ?app_config.validator.mode,
        "Probes configured"
    );

    let app = routes::app(build_aggregator(&app_config)?, &app_config);
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Pi Node Dashboard running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Received shutdown signal");
        })
        .await?;

    Ok(())
}
