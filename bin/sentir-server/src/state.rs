//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use sentir_model::{LinearClassifier, TfidfVectorizer};

use crate::config::Config;
use crate::db::sqlite::SqliteStore;

/// State shared across all HTTP handlers.
///
/// The two artifacts are loaded once at startup and injected here as
/// explicit, immutable dependencies rather than ambient globals, so
/// handlers and tests can construct states with or without them.
/// `None` means the artifact is not loaded and the service is not ready
/// to predict.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Persistent feedback store.
    pub store: Arc<SqliteStore>,
    /// Text → feature-vector transformer.
    pub vectorizer: Option<Arc<TfidfVectorizer>>,
    /// Feature-vector → label classifier.
    pub classifier: Option<Arc<LinearClassifier>>,
}
