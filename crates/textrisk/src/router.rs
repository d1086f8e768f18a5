use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::error;

use crate::error::AppError;
use crate::service::{AnalysisResponse, AnalysisService};

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Router builder exposing the analysis endpoints.
pub fn analysis_router(service: Arc<AnalysisService>) -> Router {
    Router::new()
        .route("/api/v1/analyze", post(analyze_handler))
        .route("/api/v1/dictionary", get(dictionary_handler))
        .with_state(service)
}

pub(crate) async fn analyze_handler(
    State(service): State<Arc<AnalysisService>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    // Regex evaluation is CPU-bound; keep it off the async workers.
    let response = tokio::task::spawn_blocking(move || {
        service.analyze(&request.text, request.limit)
    })
    .await
    .map_err(|join_error| {
        error!(%join_error, "analysis task failed");
        AppError::from(join_error)
    })??;

    Ok(Json(response))
}

pub(crate) async fn dictionary_handler(State(service): State<Arc<AnalysisService>>) -> Response {
    (StatusCode::OK, Json(service.dictionary_overview())).into_response()
}
