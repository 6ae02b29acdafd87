//! API route definitions.

use axum::{
    Router, middleware as axum_middleware,
    routing::{any, get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::handlers::{features, health, legacy, license};
use crate::middleware::{cors_layer, request_id};
use crate::state::AppState;

/// Create the main API router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(state)
}

/// Router with CORS, request IDs and request tracing applied.
pub fn build_app(state: Arc<AppState>) -> Router {
    create_router(state)
        .layer(axum_middleware::from_fn(request_id))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

fn api_routes() -> Router<Arc<AppState>> {
    let router = Router::new()
        .route("/enter-license", post(license::enter_license))
        .route("/clear-license", post(license::clear_license))
        .route("/license-state", get(license::license_state))
        .route("/feature/{feature_id}", get(features::use_feature));

    legacy::REMOVED_PATHS
        .iter()
        .filter_map(|path| path.strip_prefix("/api"))
        .fold(router, |router, path| router.route(path, any(legacy::removed)))
}
