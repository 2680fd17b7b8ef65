use std::{sync::Arc, time::Duration};

use axum::{routing::get, Json, Router};
use affiliate_roi_core::projections::ProjectionServiceTrait;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::api;

pub struct AppState {
    pub projection_service: Arc<dyn ProjectionServiceTrait>,
    pub simulated_delay: Duration,
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .merge(api::projections::router())
        .with_state(state)
}

pub fn build_app(state: Arc<AppState>, request_timeout: Duration) -> Router {
    Router::new()
        .nest("/api/v1", app_router(state))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
