//! Mocked KeyMint activation endpoint.

use crate::helpers::TEST_ACCESS_TOKEN;
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct KeymintMock {
    server: MockServer,
}

impl KeymintMock {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    fn activate_endpoint() -> wiremock::MockBuilder {
        Mock::given(method("POST"))
            .and(path("/key/activate"))
            .and(header("authorization", format!("Bearer {}", TEST_ACCESS_TOKEN).as_str()))
    }

    /// Accept every activation, reporting `licensee_name`.
    pub async fn accept(&self, licensee_name: Option<&str>) {
        let mut body = json!({ "code": 0, "message": "License activated" });
        if let Some(name) = licensee_name {
            body["licenseeName"] = json!(name);
        }
        Self::activate_endpoint()
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Reject every activation with `status` and `body`.
    pub async fn reject(&self, status: u16, body: Value) {
        Self::activate_endpoint()
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Drop all mounted responses.
    pub async fn reset(&self) {
        self.server.reset().await;
    }

    /// JSON bodies of the activation requests received so far.
    pub async fn activation_bodies(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == "/key/activate")
            .filter_map(|r| serde_json::from_slice(&r.body).ok())
            .collect()
    }
}
