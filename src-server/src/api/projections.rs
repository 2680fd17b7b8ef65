use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use affiliate_roi_core::projections::{
    GrowthCurvePoint, Milestone, ProjectionForm, ProjectionResult,
};

use crate::{error::ApiResult, main_lib::AppState};

/// Run a projection from raw form values
/// Body: six string fields; commission and COGS are percentages
async fn create_projection(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ProjectionForm>,
) -> ApiResult<Json<ProjectionResult>> {
    if !state.simulated_delay.is_zero() {
        tokio::time::sleep(state.simulated_delay).await;
    }

    let result = state.projection_service.project_form(&form)?;
    tracing::debug!(months = result.months().len(), "Projection computed");
    Ok(Json(result))
}

async fn get_milestones(State(state): State<Arc<AppState>>) -> Json<Vec<Milestone>> {
    Json(state.projection_service.milestones())
}

async fn get_growth_curve(State(state): State<Arc<AppState>>) -> Json<Vec<GrowthCurvePoint>> {
    Json(state.projection_service.growth_curve())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/projections", post(create_projection))
        .route("/projections/milestones", get(get_milestones))
        .route("/projections/growth-curve", get(get_growth_curve))
}
