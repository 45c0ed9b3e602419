use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use marketplace_api::config::AppConfig;
use marketplace_api::database::{DatabaseManager, PgAdRepository, PgUserRepository};
use marketplace_api::{router, AppState};

#[derive(Parser)]
#[command(name = "marketplace-api")]
#[command(about = "Classifieds marketplace backend")]
#[command(version)]
struct Args {
    #[arg(long, help = "Bind address (overrides API_HOST)")]
    host: Option<String>,

    #[arg(long, help = "Listen port (overrides MARKETPLACE_API_PORT / PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Do not create missing tables at startup")]
    skip_schema: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DB_* and JWT_SECRET
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(host) = args.host {
        config.api.host = host;
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }
    tracing::info!("Starting Marketplace API in {:?} mode", config.environment);
    tracing::debug!(
        "Configuration: {}",
        serde_json::to_string(&config).unwrap_or_default()
    );

    let database = DatabaseManager::connect_with_retry(&config.database)
        .await
        .context("database unavailable")?;
    if !args.skip_schema {
        database.ensure_schema().await.context("schema bootstrap failed")?;
    }

    let users = Arc::new(PgUserRepository::new(database.pool().clone()));
    let ads = Arc::new(PgAdRepository::new(database.pool().clone()));

    let bind_addr = format!("{}:{}", config.api.host, config.api.port);
    let state = AppState::new(config, users, ads).context("failed to build application state")?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Marketplace API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    database.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
