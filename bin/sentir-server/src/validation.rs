//! Shared request validation: Unicode normalization, length capping, and
//! label range checks, used by both the predict and feedback routes.
//!
//! Operates on raw [`serde_json::Value`] bodies so the loose-typing rules
//! can be expressed exactly: labels accept any numeric value with a zero
//! fractional part (`2.0` ≡ `2`), and text is trimmed and normalized to
//! Unicode NFC before any length check so composed and decomposed
//! Portuguese diacritics compare and store identically.

use serde_json::Value;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// The accepted label set: 0..=3 (negative, positive, neutral, sarcastic).
pub const VALID_LABELS: std::ops::RangeInclusive<i64> = 0..=3;

/// Validation failures, mapped onto HTTP statuses by
/// [`crate::error::ServerError`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Expected application/json body")]
    ExpectedJsonObject,

    #[error("Missing or invalid '{0}'")]
    MissingOrInvalid(&'static str),

    #[error("Text is empty after trimming")]
    EmptyText,

    #[error("Text too long")]
    TextTooLong,

    #[error("Label out of range")]
    LabelOutOfRange,
}

/// Extract, trim, and NFC-normalize the `text` field of a JSON body,
/// enforcing the `max_chars` cap on the normalized result.
pub fn normalized_text(body: &Value, max_chars: usize) -> Result<String, ValidationError> {
    let object = body.as_object().ok_or(ValidationError::ExpectedJsonObject)?;
    let raw = object
        .get("text")
        .and_then(Value::as_str)
        .ok_or(ValidationError::MissingOrInvalid("text"))?;

    let text: String = raw.trim().nfc().collect();
    if text.is_empty() {
        return Err(ValidationError::EmptyText);
    }
    if text.chars().count() > max_chars {
        return Err(ValidationError::TextTooLong);
    }
    Ok(text)
}

/// Extract an integral label field from a JSON body and check it against
/// [`VALID_LABELS`].
pub fn label(body: &Value, field: &'static str) -> Result<i64, ValidationError> {
    let object = body.as_object().ok_or(ValidationError::ExpectedJsonObject)?;
    let value = object
        .get(field)
        .and_then(integral)
        .ok_or(ValidationError::MissingOrInvalid(field))?;

    if !VALID_LABELS.contains(&value) {
        return Err(ValidationError::LabelOutOfRange);
    }
    Ok(value)
}

/// Accept a JSON number as an integer when its fractional part is zero.
fn integral(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    const CAP: usize = 1000;

    #[test]
    fn trims_and_passes_plain_text() {
        let body = json!({"text": "  bom dia  "});
        assert_eq!(normalized_text(&body, CAP).unwrap(), "bom dia");
    }

    #[test]
    fn rejects_non_object_body() {
        assert_eq!(
            normalized_text(&json!("bom dia"), CAP),
            Err(ValidationError::ExpectedJsonObject)
        );
    }

    #[test]
    fn rejects_missing_or_non_string_text() {
        assert_eq!(
            normalized_text(&json!({}), CAP),
            Err(ValidationError::MissingOrInvalid("text"))
        );
        assert_eq!(
            normalized_text(&json!({"text": 42}), CAP),
            Err(ValidationError::MissingOrInvalid("text"))
        );
    }

    #[test]
    fn rejects_whitespace_only_text() {
        assert_eq!(
            normalized_text(&json!({"text": "   \t  "}), CAP),
            Err(ValidationError::EmptyText)
        );
    }

    #[test]
    fn rejects_text_over_the_cap() {
        let long = "a".repeat(CAP + 1);
        assert_eq!(
            normalized_text(&json!({"text": long}), CAP),
            Err(ValidationError::TextTooLong)
        );
    }

    #[test]
    fn accepts_text_exactly_at_the_cap() {
        let text = "a".repeat(CAP);
        assert_eq!(normalized_text(&json!({"text": text}), CAP).unwrap(), text);
    }

    #[test]
    fn composed_and_decomposed_accents_normalize_identically() {
        // "café" with a precomposed é vs. "cafe" + combining acute accent.
        let composed = "caf\u{e9}";
        let decomposed = "cafe\u{301}";
        let a = normalized_text(&json!({ "text": composed }), CAP).unwrap();
        let b = normalized_text(&json!({ "text": decomposed }), CAP).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, composed);
    }

    #[test]
    fn nfc_normalization_is_idempotent() {
        let once = normalized_text(&json!({"text": "ação"}), CAP).unwrap();
        let twice = normalized_text(&json!({ "text": once.clone() }), CAP).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn length_cap_counts_normalized_characters() {
        // Each decomposed pair collapses to one character under NFC, so
        // 500 pairs fit within a 500-character cap.
        let text = "e\u{301}".repeat(500);
        let normalized = normalized_text(&json!({ "text": text }), 500).unwrap();
        assert_eq!(normalized.chars().count(), 500);
    }

    #[test]
    fn accepts_integer_labels_in_range() {
        for value in 0..=3 {
            let body = json!({ "correct_label": value });
            assert_eq!(label(&body, "correct_label").unwrap(), value);
        }
    }

    #[test]
    fn accepts_float_labels_with_zero_fraction() {
        let body = json!({"predicted_label": 2.0});
        assert_eq!(label(&body, "predicted_label").unwrap(), 2);
    }

    #[test]
    fn rejects_fractional_labels() {
        let body = json!({"predicted_label": 2.5});
        assert_eq!(
            label(&body, "predicted_label"),
            Err(ValidationError::MissingOrInvalid("predicted_label"))
        );
    }

    #[test]
    fn rejects_missing_and_non_numeric_labels() {
        assert_eq!(
            label(&json!({}), "correct_label"),
            Err(ValidationError::MissingOrInvalid("correct_label"))
        );
        assert_eq!(
            label(&json!({"correct_label": "1"}), "correct_label"),
            Err(ValidationError::MissingOrInvalid("correct_label"))
        );
        assert_eq!(
            label(&json!({"correct_label": true}), "correct_label"),
            Err(ValidationError::MissingOrInvalid("correct_label"))
        );
    }

    #[test]
    fn rejects_labels_outside_the_range() {
        assert_eq!(
            label(&json!({"correct_label": 9}), "correct_label"),
            Err(ValidationError::LabelOutOfRange)
        );
        assert_eq!(
            label(&json!({"correct_label": -1}), "correct_label"),
            Err(ValidationError::LabelOutOfRange)
        );
        assert_eq!(
            label(&json!({"correct_label": 4.0}), "correct_label"),
            Err(ValidationError::LabelOutOfRange)
        );
    }
}
