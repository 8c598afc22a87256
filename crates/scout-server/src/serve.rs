use crate::config::Config;
use crate::http::AppState;
use async_trait::async_trait;
use scout_core::{
    resolve_credential, BriefError, BriefLog, CredentialReport, GeminiClient, Orchestrator,
    UpstreamClient,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Stand-in upstream for credential-less processes. The orchestrator
/// short-circuits to the mock path before dispatch, so this is only
/// reachable if that invariant breaks — in which case it fails loudly
/// instead of hanging.
struct UnconfiguredUpstream;

#[async_trait]
impl UpstreamClient for UnconfiguredUpstream {
    async fn generate_text(&self, _prompt: &str) -> scout_core::Result<String> {
        Err(BriefError::UpstreamTransport(
            "no upstream credential configured".to_string(),
        ))
    }
}

pub async fn run(config: Config) -> anyhow::Result<()> {
    info!("Starting scout v{}", env!("CARGO_PKG_VERSION"));
    info!("HTTP: {}", config.http_addr);
    info!("Data: {:?}", config.data_dir);

    // Credential resolution happens exactly once, here. Everything
    // downstream receives the result by reference.
    let report = resolve_credential(std::env::vars());
    match &report {
        CredentialReport::Found(_) => info!("Upstream credential resolved"),
        CredentialReport::Absent(failure) => {
            warn!("Running in demo mode: {}", failure.describe())
        }
    }

    // Durable store, degrading to in-memory rather than refusing to start.
    let store = Arc::new(BriefLog::open(config.db_path()));
    info!("Brief store mode: {}", store.mode().as_str());

    let upstream: Arc<dyn UpstreamClient> = match report.credential() {
        Some(credential) => Arc::new(GeminiClient::new(credential.clone())),
        None => Arc::new(UnconfiguredUpstream),
    };

    let orchestrator = Arc::new(Orchestrator::new(
        config.orchestrator_config(report),
        upstream,
        store.clone(),
    ));
    let demo_mode = orchestrator.mock_reason().is_some();

    let app_state = AppState {
        orchestrator,
        store,
        demo_mode,
    };
    let app = crate::http::create_router(app_state);

    info!("Scout ready on {}", config.http_addr);
    let listener = tokio::net::TcpListener::bind(config.http_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
