use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for `POST /predict`.
///
/// The handler parses the raw JSON value so the validation layer can
/// report precise field errors; this type documents the contract.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PredictRequest {
    /// Portuguese text to classify, at most `SENTIR_MAX_TEXT_CHARS`
    /// characters after trimming.
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PredictResponse {
    /// Predicted sentiment label: 0 = negative, 1 = positive,
    /// 2 = neutral, 3 = sarcastic.
    pub prediction: i64,
}
