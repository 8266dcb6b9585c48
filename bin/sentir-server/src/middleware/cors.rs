use std::sync::Arc;

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

/// Build the CORS layer from the configured origin allow-list.
///
/// Browser-facing clients only ever POST JSON to `/predict` and
/// `/feedback`, so methods and headers are pinned down; only the origin
/// set is configurable.
pub fn cors_layer(state: Arc<AppState>) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if let Some(origins_str) = &state.config.cors_allowed_origins {
        // Parse the comma-separated origin list and build a restrictive layer.
        let origins: Vec<HeaderValue> = origins_str
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        if origins.is_empty() {
            cors.allow_origin(Any)
        } else {
            cors.allow_origin(origins)
        }
    } else {
        // Wildcard – suitable for development; set SENTIR_CORS_ORIGINS in
        // production.
        cors.allow_origin(Any)
    }
}
