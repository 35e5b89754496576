// Aggregation tests: every success/failure combination of the three probes

mod common;

use common::*;
use pi_node_dashboard::aggregator::StatusAggregator;
use pi_node_dashboard::config::{ContainerConfig, LedgerIndexConfig};
use pi_node_dashboard::models::*;
use pi_node_dashboard::probes::{
    ContainerProbe, LedgerIndexProbe, Probe, ValidatorProbe, ValidatorSource,
};
use std::sync::Arc;
use std::time::Duration;

fn container_probe(ok: bool) -> Arc<dyn Probe<ContainerStatus>> {
    if ok {
        Arc::new(Fixed(ContainerStatus::Running))
    } else {
        // No Docker client at all: the probe has to classify instead of failing.
        Arc::new(ContainerProbe::new(None, &ContainerConfig::default()))
    }
}

async fn validator_probe(ok: bool) -> Arc<dyn Probe<ValidatorStatus>> {
    let body = if ok { CORE_INFO } else { "Error: command not found" };
    let url = spawn_core(body).await;
    Arc::new(ValidatorProbe::new(ValidatorSource::Http {
        client: test_client(),
        url,
    }))
}

async fn ledger_index_probe(ok: bool) -> Arc<dyn Probe<LedgerIndexReport>> {
    let base_url = if ok {
        spawn_horizon().await
    } else {
        UNREACHABLE_URL.to_string()
    };
    Arc::new(LedgerIndexProbe::new(
        test_client(),
        &LedgerIndexConfig {
            base_url,
            ..Default::default()
        },
    ))
}

#[tokio::test]
async fn test_all_probe_combinations_keep_shape() {
    for mask in 0u8..8 {
        let (c_ok, v_ok, l_ok) = (mask & 1 != 0, mask & 2 != 0, mask & 4 != 0);
        let aggregator = StatusAggregator::new(
            container_probe(c_ok),
            Some(validator_probe(v_ok).await),
            ledger_index_probe(l_ok).await,
            Duration::from_secs(5),
        );
        let status = aggregator.aggregate().await;

        let expected_container = if c_ok {
            ContainerStatus::Running
        } else {
            ContainerStatus::NotFound
        };
        assert_eq!(status.container_status, expected_container, "mask {mask}");

        if v_ok {
            assert_eq!(status.validator_status.state, ValidatorState::Synced);
            assert_eq!(status.validator_status.ledger_number, 52345);
            assert_eq!(status.validator_status.peer_count, PeerCount::Count(8));
        } else {
            assert_eq!(status.validator_status, ValidatorStatus::default(), "mask {mask}");
        }

        if l_ok {
            assert_eq!(status.ledger_index_status.latest_ledger, 52341);
            assert_eq!(status.ledger_index_info.network_passphrase, "Pi Network");
            assert_eq!(status.sync_progress, 100.0);
        } else {
            assert_eq!(status.ledger_index_status, LedgerIndexStatus::default());
            assert_eq!(status.ledger_index_info, LedgerIndexInfo::default());
            assert_eq!(status.sync_progress, 0.0);
        }

        let json = serde_json::to_value(&status).unwrap();
        for key in [
            "containerStatus",
            "validatorStatus",
            "ledgerIndexStatus",
            "ledgerIndexInfo",
            "syncProgress",
        ] {
            assert!(json.get(key).is_some(), "mask {mask}: missing {key}");
        }
    }
}

#[tokio::test]
async fn test_without_validator_core_fields_follow_horizon() {
    let aggregator = StatusAggregator::new(
        Arc::new(Fixed(ContainerStatus::Running)),
        None,
        ledger_index_probe(true).await,
        Duration::from_secs(5),
    );
    let status = aggregator.aggregate().await;
    assert_eq!(
        status.ledger_index_status,
        LedgerIndexStatus {
            latest_ledger: 52341,
            closed_at: "2024-01-01T00:00:00Z".into(),
        }
    );
    assert_eq!(status.validator_status.state, ValidatorState::Synced);
    assert_eq!(status.validator_status.ledger_number, 52341);
    assert_eq!(status.validator_status.peer_count, PeerCount::Unavailable);
    assert_eq!(status.sync_progress, 100.0);
}

#[tokio::test]
async fn test_without_validator_and_horizon_down_reports_error() {
    let aggregator = StatusAggregator::new(
        Arc::new(Fixed(ContainerStatus::Stopped)),
        None,
        ledger_index_probe(false).await,
        Duration::from_secs(5),
    );
    let status = aggregator.aggregate().await;
    assert_eq!(status.container_status, ContainerStatus::Stopped);
    assert_eq!(status.validator_status, ValidatorStatus::default());
    assert_eq!(status.sync_progress, 0.0);
}

#[tokio::test]
async fn test_stalled_probes_time_out_to_defaults() {
    let report = LedgerIndexReport {
        status: LedgerIndexStatus {
            latest_ledger: 9,
            closed_at: "2024-01-01T00:00:00Z".into(),
        },
        info: LedgerIndexInfo::default(),
    };
    let aggregator = StatusAggregator::new(
        Arc::new(Stalled(ContainerStatus::Running)),
        Some(Arc::new(Stalled(ValidatorStatus::derived_from_ledger_index(9)))),
        Arc::new(Stalled(report)),
        Duration::from_millis(50),
    );
    let started = tokio::time::Instant::now();
    let status = aggregator.aggregate().await;
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(status.container_status, ContainerStatus::NotFound);
    assert_eq!(status.validator_status, ValidatorStatus::default());
    assert_eq!(status.ledger_index_status, LedgerIndexStatus::default());
    assert_eq!(status.sync_progress, 0.0);
}

#[tokio::test]
async fn test_repeated_aggregation_is_identical() {
    let aggregator = StatusAggregator::new(
        Arc::new(Fixed(ContainerStatus::Running)),
        Some(validator_probe(true).await),
        ledger_index_probe(true).await,
        Duration::from_secs(5),
    );
    let first = aggregator.aggregate().await;
    let second = aggregator.aggregate().await;
    assert_eq!(first, second);
}
