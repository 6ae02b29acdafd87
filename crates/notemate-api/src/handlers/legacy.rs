//! Endpoints from the old key-management API, kept only to answer 410.

use axum::{Json, http::StatusCode};
use serde::Serialize;

pub const REMOVED_PATHS: &[&str] = &[
    "/api/create-key",
    "/api/activate-key",
    "/api/deactivate-key",
    "/api/licenses",
];

#[derive(Serialize)]
pub struct GoneResponse {
    pub message: &'static str,
}

pub async fn removed() -> (StatusCode, Json<GoneResponse>) {
    (
        StatusCode::GONE,
        Json(GoneResponse {
            message: "Endpoint removed in NoteMate demo refactor",
        }),
    )
}
