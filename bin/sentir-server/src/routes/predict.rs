//! `/predict`: validates input, normalizes text, enforces size limits,
//! and returns a numeric sentiment label.  Errors are user-friendly;
//! details go to the logs.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tracing::error;
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::schemas::predict::{PredictRequest, PredictResponse};
use crate::state::AppState;
use crate::validation;

#[derive(OpenApi)]
#[openapi(paths(predict), components(schemas(PredictRequest, PredictResponse)))]
pub struct PredictApi;

/// Register the prediction route.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/predict", post(predict))
}

#[utoipa::path(
    post,
    path = "/predict",
    tag = "predict",
    request_body = PredictRequest,
    responses(
        (status = 200, description = "Predicted sentiment label", body = PredictResponse),
        (status = 400, description = "Missing or invalid text"),
        (status = 413, description = "Text too long"),
        (status = 503, description = "Artifacts not loaded"),
        (status = 500, description = "Inference failed"),
    )
)]
pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictResponse>, ServerError> {
    let Json(body) = payload
        .map_err(|_| ServerError::BadRequest("Expected application/json body".to_owned()))?;

    let text = validation::normalized_text(&body, state.config.max_text_chars)?;

    // Readiness failure, not a client error: both artifacts must be loaded.
    let (Some(vectorizer), Some(classifier)) = (&state.vectorizer, &state.classifier) else {
        error!("model or vectorizer not loaded");
        return Err(ServerError::NotReady("Service not ready".to_owned()));
    };

    let features = vectorizer.transform(&text);
    let prediction = classifier.predict(&features)?;
    Ok(Json(PredictResponse { prediction }))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
