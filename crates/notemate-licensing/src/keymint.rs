//! KeyMint API client for remote license activation.

use async_trait::async_trait;
use notemate_core::{ActivationError, ActivationPayload, ActivationRequest, ActivationService};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, warn};

/// Public KeyMint API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.keymint.dev";

/// KeyMint API configuration.
#[derive(Debug, Clone)]
pub struct KeymintConfig {
    /// API base URL.
    pub api_url: String,
    /// Bearer token for the KeyMint account.
    pub access_token: String,
    /// Product the license keys belong to.
    pub product_id: String,
}

impl Default for KeymintConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            access_token: String::new(),
            product_id: String::new(),
        }
    }
}

impl KeymintConfig {
    pub fn new(access_token: impl Into<String>, product_id: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            product_id: product_id.into(),
            ..Default::default()
        }
    }

    /// Point the client at a different API host.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Whether both the token and product are set.
    pub fn is_configured(&self) -> bool {
        !self.access_token.is_empty() && !self.product_id.is_empty()
    }
}

/// KeyMint API client.
pub struct KeymintClient {
    config: KeymintConfig,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ActivateKeyRequest<'a> {
    product_id: &'a str,
    license_key: &'a str,
    host_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    device_tag: Option<&'a str>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActivateKeyResponse {
    licensee_name: Option<String>,
    licensee_email: Option<String>,
}

fn key_prefix(license_key: &str) -> String {
    license_key.chars().take(8).collect()
}

fn require(field: &str, value: &str) -> Result<(), ActivationError> {
    if value.trim().is_empty() {
        return Err(ActivationError::new(
            400,
            format!("{} must be a non-empty string", field),
        ));
    }
    Ok(())
}

impl KeymintClient {
    /// Create a new KeyMint client.
    pub fn new(config: KeymintConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn rejection(status: reqwest::StatusCode, body: &[u8]) -> ActivationError {
        let raw: Option<Value> = serde_json::from_slice(body).ok();
        let message = raw
            .as_ref()
            .and_then(|v| v.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Activation rejected")
                    .to_string()
            });

        let err = ActivationError::new(status.as_u16(), message);
        match raw {
            Some(raw) => err.with_raw(raw),
            None => err,
        }
    }
}

#[async_trait]
impl ActivationService for KeymintClient {
    async fn activate(
        &self,
        request: &ActivationRequest,
    ) -> Result<ActivationPayload, ActivationError> {
        require("licenseKey", &request.license_key)?;
        require("hostId", &request.host_id)?;

        if self.config.access_token.is_empty() || request.product_id.trim().is_empty() {
            error!("KeyMint access token or product id is not configured");
            return Err(ActivationError::transport(
                "Licensing service is not configured",
            ));
        }

        info!(
            key_prefix = %key_prefix(&request.license_key),
            host_id = %request.host_id,
            "Activating license key"
        );

        let body = ActivateKeyRequest {
            product_id: &request.product_id,
            license_key: &request.license_key,
            host_id: &request.host_id,
            device_tag: request.device_tag.as_deref(),
        };

        let url = format!("{}/key/activate", self.config.api_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "KeyMint request failed");
                ActivationError::transport(e.to_string())
            })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ActivationError::transport(e.to_string()))?;

        if !status.is_success() {
            let err = Self::rejection(status, &bytes);
            warn!(status = %status, message = %err.message, "License activation rejected");
            return Err(err);
        }

        let parsed: ActivateKeyResponse = if bytes.iter().all(u8::is_ascii_whitespace) {
            ActivateKeyResponse::default()
        } else {
            serde_json::from_slice(&bytes).map_err(|e| {
                error!(error = %e, "Malformed KeyMint activation response");
                ActivationError::transport(format!("Malformed activation response: {}", e))
            })?
        };

        debug!(
            licensee = parsed.licensee_name.as_deref().unwrap_or("-"),
            "License activation accepted"
        );

        Ok(ActivationPayload {
            licensee_name: parsed.licensee_name,
            licensee_email: parsed.licensee_email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(license_key: &str) -> ActivationRequest {
        ActivationRequest {
            product_id: "prod_notemate".to_string(),
            license_key: license_key.to_string(),
            host_id: "host-1".to_string(),
            device_tag: None,
        }
    }

    fn client_for(server: &MockServer) -> KeymintClient {
        KeymintClient::new(
            KeymintConfig::new("test-token", "prod_notemate").with_api_url(server.uri()),
        )
    }

    #[tokio::test]
    async fn test_activate_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/key/activate"))
            .and(header("authorization", "Bearer test-token"))
            .and(body_json(json!({
                "productId": "prod_notemate",
                "licenseKey": "ABC-123",
                "hostId": "host-1",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 0,
                "licenseeName": "Ada",
                "licenseeEmail": "ada@example.com",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let payload = client_for(&server).activate(&request("ABC-123")).await.unwrap();

        assert_eq!(payload.licensee_name.as_deref(), Some("Ada"));
        assert_eq!(payload.licensee_email.as_deref(), Some("ada@example.com"));
    }

    #[tokio::test]
    async fn test_activate_sends_device_tag() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/key/activate"))
            .and(body_json(json!({
                "productId": "prod_notemate",
                "licenseKey": "ABC-123",
                "hostId": "host-1",
                "deviceTag": "laptop",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let mut req = request("ABC-123");
        req.device_tag = Some("laptop".to_string());
        let payload = client_for(&server).activate(&req).await.unwrap();

        assert_eq!(payload, ActivationPayload::default());
    }

    #[tokio::test]
    async fn test_rejection_keeps_remote_status_and_body() {
        let server = MockServer::start().await;
        let body = json!({ "message": "License key already activated", "code": 1 });
        Mock::given(method("POST"))
            .and(path("/key/activate"))
            .respond_with(ResponseTemplate::new(409).set_body_json(body.clone()))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .activate(&request("USED-KEY"))
            .await
            .unwrap_err();

        assert_eq!(err.status_code, 409);
        assert_eq!(err.message, "License key already activated");
        assert_eq!(err.raw, Some(body));
    }

    #[tokio::test]
    async fn test_rejection_without_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .activate(&request("MISSING"))
            .await
            .unwrap_err();

        assert_eq!(err.status_code, 404);
        assert_eq!(err.message, "Not Found");
        assert!(err.raw.is_none());
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .activate(&request("ABC-123"))
            .await
            .unwrap_err();

        assert_eq!(err.status_code, ActivationError::TRANSPORT_STATUS);
    }

    #[tokio::test]
    async fn test_unreachable_service_is_server_error() {
        let client = KeymintClient::new(
            KeymintConfig::new("test-token", "prod_notemate").with_api_url("http://127.0.0.1:1"),
        );

        let err = client.activate(&request("ABC-123")).await.unwrap_err();

        assert_eq!(err.status_code, 500);
    }

    #[tokio::test]
    async fn test_missing_token_fails_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = KeymintClient::new(
            KeymintConfig::new("", "prod_notemate").with_api_url(server.uri()),
        );
        let err = client.activate(&request("ABC-123")).await.unwrap_err();

        assert_eq!(err.status_code, 500);
        assert_eq!(err.message, "Licensing service is not configured");
    }

    #[tokio::test]
    async fn test_missing_product_id_is_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = KeymintClient::new(KeymintConfig::new("tok", "").with_api_url(server.uri()));
        let mut req = request("ABC-123");
        req.product_id = String::new();
        let err = client.activate(&req).await.unwrap_err();

        assert_eq!(err.status_code, 500);
        assert_eq!(err.message, "Licensing service is not configured");
    }

    #[tokio::test]
    async fn test_empty_inputs_rejected_locally() {
        let server = MockServer::start().await;
        let client = client_for(&server);

        let err = client.activate(&request("  ")).await.unwrap_err();
        assert_eq!(err.status_code, 400);

        let mut req = request("ABC-123");
        req.host_id = String::new();
        let err = client.activate(&req).await.unwrap_err();
        assert_eq!(err.status_code, 400);
        assert_eq!(err.message, "hostId must be a non-empty string");
    }

    #[test]
    fn test_config_defaults() {
        let config = KeymintConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(!config.is_configured());
        assert!(KeymintConfig::new("tok", "prod").is_configured());
    }

    #[test]
    fn test_key_prefix_is_char_safe() {
        assert_eq!(key_prefix("ABCDEFGHIJ"), "ABCDEFGH");
        assert_eq!(key_prefix("ключ-лицензии"), "ключ-лиц");
    }
}
