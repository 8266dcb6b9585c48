use thiserror::Error;

/// Errors produced while loading or evaluating the sentiment artifacts.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The artifact file could not be read.
    #[error("failed to read artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The artifact file is not a valid JSON document of the expected shape.
    #[error("invalid artifact format: {0}")]
    Format(#[from] serde_json::Error),

    /// The artifact parsed but its contents are structurally inconsistent.
    #[error("artifact failed validation: {0}")]
    Invalid(String),

    /// The classifier was given a feature vector of the wrong width.
    #[error("feature dimension mismatch: classifier expects {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}
