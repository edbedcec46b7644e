//! HTTP surface of the enrichment service.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use enrich_core::AppError;
use enrich_pipeline::{EnrichmentPipeline, FusedResult};
use enrich_relational::RelationalSearch;
use enrich_vector::VectorIndex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::Instrument;

const PROMPT_REQUIRED: &str = "Prompt is required and must be a non-empty string";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<EnrichmentPipeline>,
    pub vector: Arc<dyn VectorIndex>,
    pub relational: Arc<dyn RelationalSearch>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/enrich", post(enrich))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct EnrichRequest {
    prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EnrichResponse {
    success: bool,
    original_prompt: String,
    enriched_prompt: String,
    results: Vec<FusedResult>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
    vector_db: &'static str,
    timestamp: String,
}

/// [`AppError`] adapter for axum responses. Validation errors surface as
/// 400 with the error message; everything else is a 500 with a generic
/// error and the detail in `message`.
struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            AppError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    error: message,
                    message: None,
                }),
            )
                .into_response(),
            other => {
                tracing::error!("Request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: "Internal server error".to_string(),
                        message: Some(other.to_string()),
                    }),
                )
                    .into_response()
            }
        }
    }
}

/// POST /enrich: run one prompt through the pipeline.
///
/// Validation happens before any store is touched; a rejected request
/// never causes retrieval traffic.
async fn enrich(
    State(state): State<AppState>,
    payload: Result<Json<EnrichRequest>, JsonRejection>,
) -> Result<Json<EnrichResponse>, ApiError> {
    let Json(request) =
        payload.map_err(|_| AppError::Validation(PROMPT_REQUIRED.to_string()))?;

    if request.prompt.trim().is_empty() {
        return Err(AppError::Validation(PROMPT_REQUIRED.to_string()).into());
    }

    let request_id = uuid::Uuid::new_v4();
    let output = state
        .pipeline
        .run(&request.prompt)
        .instrument(tracing::info_span!("enrich_request", id = %request_id))
        .await;

    for degradation in &output.degradations {
        tracing::warn!(
            request_id = %request_id,
            "Source '{}' degraded: {}",
            degradation.source,
            degradation.reason
        );
    }

    Ok(Json(EnrichResponse {
        success: true,
        original_prompt: output.original_prompt,
        enriched_prompt: output.enriched_prompt,
        results: output.results,
    }))
}

/// GET /health: probe both stores and report their state.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let (database, vector_db) = futures::join!(
        state.relational.check_connection(),
        state.vector.check_connection(),
    );

    Json(HealthResponse {
        status: "ok",
        database: connection_label(database),
        vector_db: connection_label(vector_db),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

fn connection_label(connected: bool) -> &'static str {
    if connected {
        "connected"
    } else {
        "disconnected"
    }
}
