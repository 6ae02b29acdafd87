//! Premium feature handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use notemate_core::Error;
use serde::Serialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct FeatureResponse {
    pub ok: bool,
    pub feature: String,
}

/// Serve a premium feature if the current license grants it.
pub async fn use_feature(
    State(state): State<Arc<AppState>>,
    Path(feature_id): Path<String>,
) -> Result<Json<FeatureResponse>, ApiError> {
    let granted = state
        .license
        .authorize(&feature_id)
        .await
        .map_err(Error::from)?;

    Ok(Json(FeatureResponse {
        ok: true,
        feature: granted.feature,
    }))
}
