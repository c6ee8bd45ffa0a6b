use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

use neural_care::ai::gemini::GeminiClient;
use neural_care::api::router::api_router;
use neural_care::api::types::ApiContext;
use neural_care::config::{self, ProviderConfig};
use neural_care::db;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let db_path = config::database_path();
    if let Some(parent) = db_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::error!(error = %e, path = %parent.display(), "cannot create data directory");
            std::process::exit(1);
        }
    }
    let conn = match db::open_database(&db_path) {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!(error = %e, path = %db_path.display(), "cannot open database");
            std::process::exit(1);
        }
    };
    tracing::info!(path = %db_path.display(), "database ready");

    let provider = ProviderConfig::from_env();
    if provider.api_key.is_empty() {
        tracing::warn!("GEMINI_API_KEY not set — generation endpoints will serve fallback content");
    }
    let client = GeminiClient::from_config(&provider);

    let ctx = ApiContext::new(
        Arc::new(Mutex::new(conn)),
        Arc::new(provider),
        Arc::new(client),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config::server_port()));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "cannot bind listener");
            std::process::exit(1);
        }
    };
    tracing::info!(%addr, "Neural Care API listening");

    if let Err(e) = axum::serve(listener, api_router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
