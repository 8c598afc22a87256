mod routes;

pub use routes::create_router;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use scout_core::{BriefError, BriefLog, Orchestrator};
use serde_json::json;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub store: Arc<BriefLog>,
    pub demo_mode: bool,
}

/// Handler error mapped onto the boundary's status convention:
/// absent resource or route → 404 `{error}`, any pipeline failure →
/// 500 `{error, details}`.
pub enum ApiError {
    NotFound(String),
    Pipeline(BriefError),
}

impl From<BriefError> for ApiError {
    fn from(err: BriefError) -> Self {
        ApiError::Pipeline(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": message })),
            )
                .into_response(),
            ApiError::Pipeline(err) => {
                let error = match &err {
                    BriefError::UpstreamTimeout { .. } => "upstream call timed out",
                    BriefError::UpstreamTransport(_) => "upstream call failed",
                    BriefError::InvalidUpstreamResponse(_) => "upstream reply was not a valid document",
                    _ => "brief pipeline failure",
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": error, "details": err.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
