//! Restaurant API Binary
//!
//! Starts the restaurant REST service.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin restaurant-api
//! ```
//!
//! # Environment Variables
//!
//! - `RESTAURANT_API_CONFIG`: path to the YAML config (default: `config.yaml`
//!   when present, built-in defaults otherwise)
//! - `RUST_LOG`: log filter, overrides `observability.logging.level`
//!
//! Any `${VAR}` referenced by the config file is read after `.env` is loaded.

use std::sync::Arc;

use anyhow::Context;
use restaurant_api::config::Config;
use restaurant_api::infrastructure::config::Container;
use restaurant_api::infrastructure::http::create_router;
use restaurant_api::infrastructure::persistence::Database;
use restaurant_api::telemetry::init_tracing;
use restaurant_api::load_process_config;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let config = load_process_config().context("failed to load configuration")?;
    init_tracing(&config.observability.logging).context("failed to initialize tracing")?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Restaurant API");
    log_config(&config);

    let db = Database::connect(&config.database)
        .await
        .context("failed to open database")?;
    db.ensure_schema()
        .await
        .context("failed to create database schema")?;
    let db = Arc::new(db);

    let container = Container::new(Arc::clone(&db));
    let app = create_router(container.app_state(env!("CARGO_PKG_VERSION")));

    let addr = config.server.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, "HTTP server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    db.close().await;
    tracing::info!("Restaurant API stopped");
    Ok(())
}

/// Load .env file from current directory or any ancestor directory.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

fn log_config(config: &Config) {
    tracing::info!(
        http_port = config.server.http_port,
        bind_address = %config.server.bind_address,
        database_url = %config.database.url,
        max_connections = config.database.max_connections,
        log_format = %config.observability.logging.format,
        "Configuration loaded"
    );
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
///
/// # Panics
///
/// Panics if signal handlers cannot be installed. A process that cannot
/// observe termination signals should fail at startup.
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}
