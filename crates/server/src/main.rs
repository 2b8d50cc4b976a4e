mod logging;
mod sweeper;

use api::{router, AppState};
use capture_core::AppConfig;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("FATAL: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (config, overrides) = AppConfig::load_with_env()?;
    logging::init_logging(&config.logging)?;

    if !overrides.is_empty() {
        tracing::info!(?overrides, "Configuration overridden from environment");
    }

    let state = Arc::new(AppState::in_memory(&config)?);
    tracing::info!(
        issuer = %config.auth.issuer,
        token_expiry_seconds = config.auth.token_expiry_seconds,
        "Token issuer ready"
    );

    if let Some(seconds) = config.auth.revocation_sweep_seconds {
        sweeper::spawn(Arc::clone(&state.revocations), Duration::from_secs(seconds));
        tracing::info!(every_seconds = seconds, "Revocation sweeper started");
    }

    let app = router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
