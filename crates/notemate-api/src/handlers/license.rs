//! License activation handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use notemate_core::{ActivationSummary, LicenseState};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnterLicenseRequest {
    pub license_key: String,
    pub device_tag: Option<String>,
    pub host_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EnterLicenseResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub summary: ActivationSummary,
}

#[derive(Debug, Serialize)]
pub struct ClearLicenseResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub state: LicenseState,
}

pub async fn enter_license(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EnterLicenseRequest>, JsonRejection>,
) -> Result<Json<EnterLicenseResponse>, ApiError> {
    let Json(request) = payload?;

    let summary = state
        .license
        .activate(
            &request.license_key,
            request.host_id.as_deref(),
            request.device_tag.as_deref(),
        )
        .await?;

    Ok(Json(EnterLicenseResponse {
        message: "License activated",
        summary,
    }))
}

pub async fn clear_license(State(state): State<Arc<AppState>>) -> Json<ClearLicenseResponse> {
    Json(ClearLicenseResponse {
        message: "License cleared",
        state: state.license.clear().await,
    })
}

pub async fn license_state(State(state): State<Arc<AppState>>) -> Json<LicenseState> {
    Json(state.license.current_state().await)
}
