use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for `POST /feedback`.
///
/// The handler parses the raw JSON value so loosely-typed numeric labels
/// (`2.0` ≡ `2`) can be accepted; this type documents the contract.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedbackRequest {
    /// The text the prediction was made for.
    pub text: String,
    /// Label the model produced, in `0..=3`.
    pub predicted_label: i64,
    /// Label the user asserts is correct, in `0..=3`.
    pub correct_label: i64,
}

/// Success body for `POST /feedback`.  The stored text is intentionally
/// not echoed back.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedbackResponse {
    pub message: String,
    /// Identifier assigned to the stored feedback row.
    pub id: i64,
}
