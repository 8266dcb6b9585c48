//! Server configuration, loaded from environment variables at startup.

/// Runtime configuration for sentir-server.
///
/// Every field has a sensible default so the server works out-of-the-box
/// without any environment variables set.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:8000"`).
    pub bind_address: String,

    /// SQLite (or other) database URL (default: `"sqlite://sentir.db"`).
    /// Supports any sqlx-compatible connection string.
    pub database_url: String,

    /// Path to the TF-IDF vectorizer artifact.
    pub vectorizer_path: String,

    /// Path to the classifier artifact.
    pub model_path: String,

    /// Maximum accepted text length in characters, applied after trimming
    /// and Unicode normalization.  Keep in sync with the frontend
    /// `<textarea maxLength>`.
    pub max_text_chars: usize,

    /// Comma-separated CORS origin allow-list for browser-facing clients.
    /// `None` falls back to a wildcard, suitable for development only.
    pub cors_allowed_origins: Option<String>,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Mount the Swagger UI at `/swagger-ui`.  Disable in production to
    /// avoid exposing the API structure.
    pub enable_swagger: bool,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: env_or("SENTIR_BIND", "0.0.0.0:8000"),
            database_url: env_or("SENTIR_DATABASE_URL", "sqlite://sentir.db"),
            vectorizer_path: env_or("SENTIR_VECTORIZER_PATH", "data/tfidf_vectorizer.json"),
            model_path: env_or("SENTIR_MODEL_PATH", "data/sentiment_model.json"),
            max_text_chars: parse_env("SENTIR_MAX_TEXT_CHARS", 1000),
            cors_allowed_origins: std::env::var("SENTIR_CORS_ORIGINS").ok(),
            log_level: env_or("SENTIR_LOG", "info"),
            log_json: std::env::var("SENTIR_LOG_JSON")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            enable_swagger: std::env::var("SENTIR_ENABLE_SWAGGER")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true),
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
