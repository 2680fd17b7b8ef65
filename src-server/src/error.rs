use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use affiliate_roi_core::errors::Error as CoreError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Core(CoreError::Validation(_)) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            ApiError::Core(CoreError::Calculation(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "CALCULATION_FAILED")
            }
        };
        tracing::warn!(status = %status, "{}", self);
        let body = Json(json!({ "code": code, "message": self.to_string() }));
        (status, body).into_response()
    }
}
