//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use task_api::config::AppConfig;
use task_api::lifecycle::Shutdown;
use task_api::store::DocumentStore;
use task_api::HttpServer;

/// Start a server on an ephemeral port with default configuration.
#[allow(dead_code)]
pub async fn spawn_server() -> (SocketAddr, Shutdown) {
    spawn_server_with(AppConfig::default()).await
}

/// Start a server on an ephemeral port with the given configuration.
pub async fn spawn_server_with(config: AppConfig) -> (SocketAddr, Shutdown) {
    let store = DocumentStore::connect(&config.store)
        .await
        .expect("store connect failed");
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, Arc::new(store));

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Give the acceptor a moment to come up.
    tokio::time::sleep(Duration::from_millis(50)).await;

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
