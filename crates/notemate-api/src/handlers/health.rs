//! Health check handlers.

use axum::{Json, http::StatusCode};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub app: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        app: "NoteMate",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn ready() -> StatusCode {
    StatusCode::OK
}
