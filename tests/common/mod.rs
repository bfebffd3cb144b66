//! Shared utilities for integration testing.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use deck_server::config::DeckServerConfig;
use deck_server::{HttpServer, Shutdown};
use tempfile::TempDir;
use tokio::net::TcpListener;

/// A server running on an ephemeral port with its own scratch directory.
pub struct TestServer {
    pub addr: SocketAddr,
    pub dir: TempDir,
    pub shutdown: Shutdown,
    pub client: reqwest::Client,
}

#[allow(dead_code)]
impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn deck_path(&self) -> PathBuf {
        self.dir.path().join("server").join("deck.json")
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.dir.path().join("server").join("AllCards.json")
    }

    pub async fn search(&self, prefix: &str) -> Vec<String> {
        self.client
            .get(self.url("/cards"))
            .query(&[("name", prefix)])
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Write `catalog` (if any) and start a server pointed at the scratch dir.
pub async fn start_server(catalog: Option<&str>) -> TestServer {
    start_server_with(catalog, |_| {}).await
}

/// Like [`start_server`], with a hook to adjust the config first.
pub async fn start_server_with<F>(catalog: Option<&str>, configure: F) -> TestServer
where
    F: FnOnce(&mut DeckServerConfig),
{
    let dir = tempfile::tempdir().unwrap();
    let server_dir = dir.path().join("server");
    std::fs::create_dir_all(&server_dir).unwrap();
    if let Some(contents) = catalog {
        std::fs::write(server_dir.join("AllCards.json"), contents).unwrap();
    }

    let mut config = DeckServerConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.catalog.path = path_string(&server_dir.join("AllCards.json"));
    config.deck.path = path_string(&server_dir.join("deck.json"));
    configure(&mut config);

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap();

    TestServer {
        addr,
        dir,
        shutdown,
        client,
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
