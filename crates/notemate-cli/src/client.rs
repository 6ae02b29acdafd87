use notemate_core::{ActivationSummary, Tier};
use reqwest::{Client, Method, Response, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{message} ({status})")]
    Server { status: StatusCode, message: String },
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Request(e) => e.status(),
            ApiError::Server { status, .. } => Some(*status),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnterLicense<'a> {
    pub license_key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_tag: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseStateView {
    pub tier: Tier,
    #[serde(default)]
    pub features: Vec<String>,
    pub host_id: Option<String>,
    pub activated_at: Option<String>,
    pub licensee_name: Option<String>,
    pub licensee_email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FeatureGrant {
    pub ok: bool,
    pub feature: String,
}

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/api{}", self.base_url, path);
        debug!(%method, %url, "Sending request");
        self.client.request(method, url)
    }

    async fn parse<T: DeserializeOwned>(res: Response) -> Result<T, ApiError> {
        let status = res.status();
        if status.is_success() {
            return Ok(res.json().await?);
        }

        let body: serde_json::Value = res.json().await.unwrap_or_default();
        let message = body
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());
        let message = match body.get("error").and_then(|e| e.as_str()) {
            Some(detail) => format!("{}: {}", message, detail),
            None => message,
        };

        Err(ApiError::Server { status, message })
    }

    pub async fn enter_license(
        &self,
        request: &EnterLicense<'_>,
    ) -> Result<ActivationSummary, ApiError> {
        let res = self
            .request(Method::POST, "/enter-license")
            .json(request)
            .send()
            .await?;
        Self::parse(res).await
    }

    pub async fn license_state(&self) -> Result<LicenseStateView, ApiError> {
        let res = self.request(Method::GET, "/license-state").send().await?;
        Self::parse(res).await
    }

    pub async fn clear_license(&self) -> Result<LicenseStateView, ApiError> {
        let res = self.request(Method::POST, "/clear-license").send().await?;
        Self::parse(res).await
    }

    pub async fn feature(&self, feature_id: &str) -> Result<FeatureGrant, ApiError> {
        let res = self
            .request(Method::GET, &format!("/feature/{}", feature_id))
            .send()
            .await?;
        Self::parse(res).await
    }
}
