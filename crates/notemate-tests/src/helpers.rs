//! Test helper functions and utilities.

use notemate_api::{AppState, build_app};
use notemate_licensing::{KeymintClient, KeymintConfig, LicenseGate};
use reqwest::Client;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

pub const TEST_ACCESS_TOKEN: &str = "test-access-token";
pub const TEST_PRODUCT_ID: &str = "prod_notemate_test";

/// Start an API server wired to the KeyMint API at `keymint_url` and return its address.
pub async fn start_test_server(
    keymint_url: &str,
) -> anyhow::Result<(SocketAddr, tokio::task::JoinHandle<()>)> {
    crate::init_test_logging();

    let config = KeymintConfig::new(TEST_ACCESS_TOKEN, TEST_PRODUCT_ID).with_api_url(keymint_url);
    let gate = LicenseGate::new(Arc::new(KeymintClient::new(config)), TEST_PRODUCT_ID);
    let app = build_app(Arc::new(AppState::new(Arc::new(gate))));

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "Test server stopped");
        }
    });

    Ok((addr, handle))
}

/// Create an HTTP client for testing.
pub fn test_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .expect("Failed to create test client")
}

/// API test client with base URL.
pub struct ApiTestClient {
    client: Client,
    base_url: String,
}

impl ApiTestClient {
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            client: test_client(),
            base_url: format!("http://{}", addr),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client.get(self.url(path)).send().await
    }

    pub async fn post<T: serde::Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> reqwest::Result<reqwest::Response> {
        self.client.post(self.url(path)).json(body).send().await
    }

    pub async fn post_empty(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client.post(self.url(path)).send().await
    }

    /// Check health endpoint.
    pub async fn health(&self) -> anyhow::Result<bool> {
        let resp = self.get("/health").await?;
        Ok(resp.status().is_success())
    }
}
