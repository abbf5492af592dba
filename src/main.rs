use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use task_api::config::{loader, AppConfig};
use task_api::lifecycle::{startup, Shutdown};
use task_api::observability::{logging, metrics};
use task_api::HttpServer;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "task-api", version, about = "Task manager HTTP API")]
struct Args {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listener port (also honors the PORT environment variable).
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => loader::load_config(path)?,
        None => AppConfig::default(),
    };
    loader::apply_overrides(&mut config, args.port)?;

    logging::init(&config.observability);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "task-api starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        store = %config.store.name,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // Connect the store and bind the listener before accepting traffic.
    let runtime = startup::init(&config).await?;

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, Arc::new(runtime.store));
    server.run(runtime.listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
