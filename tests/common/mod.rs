//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use hitwalker_router::config::ServerConfig;
use hitwalker_router::handlers::HandlerRegistry;
use hitwalker_router::http::HttpServer;
use hitwalker_router::lifecycle::Shutdown;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// A server running on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    #[allow(dead_code)]
    pub updates: mpsc::UnboundedSender<ServerConfig>,
    pub shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start a server with the given config and handlers.
pub async fn start_server(config: ServerConfig, handlers: HandlerRegistry) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config, handlers).unwrap();
    let shutdown = Shutdown::new();
    let (updates, config_updates) = mpsc::unbounded_channel();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, config_updates, server_shutdown).await;
    });

    TestServer {
        addr,
        updates,
        shutdown,
    }
}

/// Start a server with the built-in table and the echo handler.
#[allow(dead_code)]
pub async fn start_default_server() -> TestServer {
    start_server(ServerConfig::default(), HandlerRegistry::echo()).await
}

/// Poll until `check` returns true or the deadline passes.
#[allow(dead_code)]
pub async fn eventually<F, Fut>(mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..50 {
        if check().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    false
}
