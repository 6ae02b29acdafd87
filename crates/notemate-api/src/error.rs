//! Mapping of domain errors onto HTTP responses.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use notemate_core::{DeniedReason, Error};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Error returned by API handlers.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] Error);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(Error::Validation(rejection.body_text()))
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Activation(e) => {
                StatusCode::from_u16(e.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Error::Denied(DeniedReason::NoActiveLicense { .. }) => StatusCode::PAYMENT_REQUIRED,
            Error::Denied(DeniedReason::FeatureNotEntitled { .. }) => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self.0 {
            Error::Validation(message) => json!({
                "message": "Invalid request",
                "error": message,
            }),
            // The licensing service's own body is passed through when it sent one.
            Error::Activation(e) => match e.raw {
                Some(raw) => raw,
                None => {
                    let message = if status.is_server_error() {
                        error!(status = %status, error = %e.message, "Activation failed");
                        "Server error"
                    } else {
                        "Activation failed"
                    };
                    json!({ "message": message, "error": e.message })
                }
            },
            Error::Denied(DeniedReason::NoActiveLicense { feature }) => json!({
                "message": "No active license",
                "feature": feature,
            }),
            Error::Denied(DeniedReason::FeatureNotEntitled { feature }) => json!({
                "message": "Feature not available",
                "feature": feature,
            }),
        };

        (status, Json(body)).into_response()
    }
}
