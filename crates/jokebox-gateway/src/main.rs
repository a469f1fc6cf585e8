//! Jokebox HTTP/JSON Gateway binary.

use clap::Parser;
use jokebox_gateway::{create_router, AppState, Args, GatewayConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line args
    let args = Args::parse();

    // Initialize tracing
    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "jokebox_gateway={0},jokebox_core={0},tower_http={0}",
                    log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GatewayConfig::from(args);
    config.validate()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        listen = %config.listen_addr(),
        base_path = %config.base_path,
        "Starting Jokebox Gateway"
    );

    // Open the store; SQL backends synchronise their schema here, before
    // the listener accepts traffic.
    let store = jokebox_core::connect(&config.database_url, config.max_connections).await?;
    info!(backend = store.backend(), "Store ready");

    let state = AppState::new(store, config.clone());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    info!("Gateway listening on {}", config.listen_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl+c");
        std::future::pending::<()>().await;
    }
    info!("received shutdown signal");
}
