//! Liveness and readiness probes.
//!
//! `/healthz` answers unconditionally and touches nothing; an external
//! keep-alive poller uses it to tell "process is running" apart from
//! "process can serve traffic".  `/readyz` is the latter: it requires
//! both artifacts in memory and a trivial database round trip.  The two
//! probes never fail into each other.

use std::sync::Arc;

use axum::http::{HeaderValue, StatusCode, header};
use axum::routing::get;
use axum::{Json, Router, extract::State};
use serde_json::{Value, json};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::error;
use utoipa::OpenApi;

use crate::db::FeedbackStore;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(healthz, readyz))]
pub struct HealthApi;

/// Register health-check routes.  Probe responses must never be cached
/// by intermediaries.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}

/// Liveness probe.
///
/// Keep this ultra-cheap: no model, no database.
#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Process is running", body = Value)
    )
)]
pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Readiness probe.
///
/// Ready only when both artifacts are present in memory and the store
/// answers a trivial query.  Reports a machine-readable reason code
/// otherwise; database failures are never propagated raw.
#[utoipa::path(
    get,
    path = "/readyz",
    tag = "health",
    responses(
        (status = 200, description = "Service can serve predictions", body = Value),
        (status = 503, description = "Degraded: model_not_loaded or db_unavailable", body = Value),
    )
)]
pub async fn readyz(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    if state.vectorizer.is_none() || state.classifier.is_none() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "degraded", "error": "model_not_loaded" })),
        );
    }

    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ready" }))),
        Err(e) => {
            error!(error = %e, "database readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "error": "db_unavailable" })),
            )
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Config;
    use crate::db::sqlite::SqliteStore;
    use sentir_model::{LinearClassifier, TfidfVectorizer};

    fn config() -> Config {
        Config {
            bind_address: "127.0.0.1:0".to_owned(),
            database_url: "sqlite::memory:".to_owned(),
            vectorizer_path: String::new(),
            model_path: String::new(),
            max_text_chars: 1000,
            cors_allowed_origins: None,
            log_level: "info".to_owned(),
            log_json: false,
            enable_swagger: false,
        }
    }

    fn artifacts() -> (Arc<TfidfVectorizer>, Arc<LinearClassifier>) {
        let vectorizer =
            TfidfVectorizer::from_json(br#"{"vocabulary": {"amo": 0}, "idf": [1.0]}"#).unwrap();
        let classifier = LinearClassifier::from_json(
            br#"{"coefficients": [[1.0], [-1.0]], "intercepts": [0.0, 0.0], "classes": [1, 0]}"#,
        )
        .unwrap();
        (Arc::new(vectorizer), Arc::new(classifier))
    }

    async fn state(with_artifacts: bool) -> Arc<AppState> {
        let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
        let (vectorizer, classifier) = artifacts();
        Arc::new(AppState {
            config: Arc::new(config()),
            store: Arc::new(store),
            vectorizer: with_artifacts.then_some(vectorizer),
            classifier: with_artifacts.then_some(classifier),
        })
    }

    #[tokio::test]
    async fn healthz_is_unconditionally_ok() {
        let Json(body) = healthz().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn readyz_reports_ready_with_artifacts_and_live_db() {
        let (status, Json(body)) = readyz(State(state(true).await)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }

    #[tokio::test]
    async fn readyz_reports_model_not_loaded_without_artifacts() {
        // The database is alive here; only the artifacts are missing.
        let (status, Json(body)) = readyz(State(state(false).await)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["error"], "model_not_loaded");
    }

    #[tokio::test]
    async fn readyz_reports_db_unavailable_when_the_pool_is_closed() {
        let state = state(true).await;
        state.store.close().await;

        let (status, Json(body)) = readyz(State(state)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "db_unavailable");
    }
}
