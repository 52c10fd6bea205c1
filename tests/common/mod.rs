//! Shared utilities for end-to-end tests.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use cmdserve::config::ServerConfig;
use cmdserve::HttpServer;

/// A server under test, bound to an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn url(&self, path_and_query: &str) -> String {
        format!("http://{}{}", self.addr, path_and_query)
    }
}

/// Spawn a server with the given config and ambient environment snapshot.
///
/// The listener is bound before the task is spawned, so the server is
/// reachable as soon as this returns.
pub async fn spawn_server(mut config: ServerConfig, ambient: Vec<(String, String)>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.host = "127.0.0.1".to_string();
    config.port = addr.port();

    let server = HttpServer::new(Arc::new(config), ambient);
    let handle = tokio::spawn(server.run(listener));

    TestServer { addr, handle }
}

/// The test process's own environment, as main would snapshot it.
pub fn ambient_env() -> Vec<(String, String)> {
    std::env::vars().collect()
}

/// An HTTP client that ignores any proxy settings on the host.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
