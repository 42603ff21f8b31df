use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use parley_gateway::providers::LlamaServerClient;
use parley_gateway::server;
use parley_gateway::session::SessionStore;
use parley_gateway::state::AppState;
use parley_knowledge::KnowledgeStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let settings = parley_core::Settings::load()?;
    info!(
        "Configuration loaded (completion backend: {} / {})",
        settings.inference.base_url, settings.inference.model
    );

    // Prepare the data directories and stores
    parley_core::paths::ensure_dirs()?;
    let knowledge = KnowledgeStore::new(parley_core::paths::knowledge_file_path()?);
    let sessions = SessionStore::new(parley_core::paths::sessions_dir()?);
    let uploads_dir = parley_core::paths::uploads_dir()?;

    // Completion provider client
    let provider = LlamaServerClient::new(
        settings.inference.base_url.clone(),
        settings.inference.model.clone(),
        settings.inference.api_key.clone(),
        std::time::Duration::from_secs(settings.inference.timeout_secs),
    )?;

    let state = Arc::new(AppState::new(
        settings.clone(),
        knowledge,
        sessions,
        Arc::new(provider),
        uploads_dir,
    ));

    // Security: warn when binding beyond localhost
    if settings.gateway.host != "127.0.0.1" && settings.gateway.host != "localhost" {
        tracing::warn!(
            "Gateway binding to non-localhost address: {}. This may expose the API to remote access.",
            settings.gateway.host
        );
    }

    let bind_addr = settings.bind_addr();
    info!("Starting parley gateway on {}", bind_addr);

    server::run(state, &bind_addr).await
}
