//! Ordered startup: store first, then the listener.

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::store::{DocumentStore, StoreError};

/// Error type for startup failures.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to bind listener: {0}")]
    Bind(#[from] std::io::Error),

    #[error("failed to connect store: {0}")]
    Store(#[from] StoreError),
}

/// Resources the server needs before it can accept traffic.
pub struct Runtime {
    pub store: DocumentStore,
    pub listener: TcpListener,
}

/// Connect the document store and bind the TCP listener.
pub async fn init(config: &AppConfig) -> Result<Runtime, StartupError> {
    let store = DocumentStore::connect(&config.store).await?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    Ok(Runtime { store, listener })
}
