//! Signal handling for graceful shutdown.

use tokio::sync::broadcast;

/// Resolve when either Ctrl-C arrives or the shutdown coordinator fires.
pub async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            match result {
                Ok(()) => tracing::info!("Ctrl-C received"),
                Err(error) => tracing::error!(%error, "Failed to listen for Ctrl-C"),
            }
        }
        _ = shutdown.recv() => {
            tracing::info!("Shutdown signal received");
        }
    }
}
