//! NoteMate API server entrypoint.

use clap::Parser;
use notemate_api::{AppState, ServerConfig, build_app};
use notemate_licensing::{KeymintClient, LicenseGate};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::parse();

    let missing = config.missing_licensing_config();
    if !missing.is_empty() {
        warn!(
            missing = ?missing,
            "Licensing service not configured, license activations will fail"
        );
    }

    let keymint = config.keymint();
    let product_id = keymint.product_id.clone();
    let gate = LicenseGate::new(Arc::new(KeymintClient::new(keymint)), product_id);
    let app = build_app(Arc::new(AppState::new(Arc::new(gate))));

    let listener = TcpListener::bind(config.socket_addr()).await?;
    info!(addr = %listener.local_addr()?, "NoteMate server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
