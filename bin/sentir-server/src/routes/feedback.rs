//! `/feedback`: validates the payload, normalizes text, enforces size
//! limits, and writes to the store with rollback on error.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use utoipa::OpenApi;

use crate::db::{FeedbackStore, NewFeedback};
use crate::error::ServerError;
use crate::schemas::feedback::{FeedbackRequest, FeedbackResponse};
use crate::state::AppState;
use crate::validation;

#[derive(OpenApi)]
#[openapi(paths(submit_feedback), components(schemas(FeedbackRequest, FeedbackResponse)))]
pub struct FeedbackApi;

/// Register the feedback route.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/feedback", post(submit_feedback))
}

#[utoipa::path(
    post,
    path = "/feedback",
    tag = "feedback",
    request_body = FeedbackRequest,
    responses(
        (status = 201, description = "Feedback stored", body = FeedbackResponse),
        (status = 400, description = "Missing, invalid, or out-of-range fields"),
        (status = 413, description = "Text too long"),
        (status = 500, description = "Feedback could not be stored"),
    )
)]
pub async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<FeedbackResponse>), ServerError> {
    let Json(body) = payload
        .map_err(|_| ServerError::BadRequest("Expected application/json body".to_owned()))?;

    // All three fields validate before the store is touched at all.
    let text = validation::normalized_text(&body, state.config.max_text_chars)?;
    let predicted_label = validation::label(&body, "predicted_label")?;
    let correct_label = validation::label(&body, "correct_label")?;

    let id = state
        .store
        .insert_feedback(NewFeedback {
            text,
            predicted_label,
            correct_label,
        })
        .await?;

    // Minimal response; the stored text is not echoed back.
    Ok((
        StatusCode::CREATED,
        Json(FeedbackResponse {
            message: "Feedback saved".to_owned(),
            id,
        }),
    ))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
