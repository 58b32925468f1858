//! RouteHub Server: dynamic plugin route registry host.
//!
//! Wires the registry together, loads the demo plugin and keeps its routes
//! attached until shutdown.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use routehub::RouteHub;
use routehub::demo::demo_plugin;
use routehub_core::config::AppConfig;
use routehub_core::error::AppError;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "routehub-server", version, about = "Dynamic plugin route registry host")]
struct Cli {
    /// Configuration overlay to load from `config/{env}.toml`.
    #[arg(long, default_value = "development")]
    env: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting RouteHub v{}", env!("CARGO_PKG_VERSION"));

    let hub = RouteHub::new(&config.routing);

    hub.manager().load_plugin(Arc::new(demo_plugin()))?;
    tracing::info!(
        plugins = hub.manager().list_plugins().len(),
        routes = hub.table().len(),
        "Route table ready"
    );
    tracing::info!("Registered routes:\n{}", hub.routes_json()?);

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| AppError::internal(format!("Failed to listen for shutdown signal: {e}")))?;
    tracing::info!("Shutdown signal received");

    hub.manager().unload_all();
    tracing::info!(routes = hub.table().len(), "RouteHub stopped");
    Ok(())
}
