use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::ModelError;

/// TF-IDF vectorizer exported by the training pipeline.
///
/// Maps a raw text to a dense feature vector: in-vocabulary term counts
/// are weighted by the per-term inverse document frequency and the result
/// is L2-normalized.  The tokenization rule (word-character runs of
/// length ≥ 2, lowercased) must stay identical to the one the vectorizer
/// was fitted with, otherwise the feature space silently drifts.
#[derive(Debug, Clone, Deserialize)]
pub struct TfidfVectorizer {
    /// Term → feature-column index.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per feature column.
    idf: Vec<f32>,
    /// Lowercase input before tokenizing (true for the shipped artifact).
    #[serde(default = "default_lowercase")]
    lowercase: bool,
}

fn default_lowercase() -> bool {
    true
}

impl TfidfVectorizer {
    /// Load and validate a vectorizer artifact from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let raw = std::fs::read(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Load and validate a vectorizer artifact from raw JSON bytes.
    pub fn from_json(raw: &[u8]) -> Result<Self, ModelError> {
        let vectorizer: Self = serde_json::from_slice(raw)?;
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.idf.is_empty() {
            return Err(ModelError::Invalid("idf table is empty".to_owned()));
        }
        if let Some((term, &index)) = self
            .vocabulary
            .iter()
            .find(|&(_, &index)| index >= self.idf.len())
        {
            return Err(ModelError::Invalid(format!(
                "vocabulary entry '{term}' has column {index}, but idf has {} columns",
                self.idf.len()
            )));
        }
        Ok(())
    }

    /// Width of the feature vectors this vectorizer produces.
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Transform one text into a dense, L2-normalized TF-IDF vector.
    ///
    /// Out-of-vocabulary terms contribute nothing; a text with no known
    /// terms maps to the zero vector.
    pub fn transform(&self, text: &str) -> Vec<f32> {
        let mut features = vec![0.0f32; self.idf.len()];

        let lowered;
        let text = if self.lowercase {
            lowered = text.to_lowercase();
            &lowered
        } else {
            text
        };

        for token in tokenize(text) {
            if let Some(&index) = self.vocabulary.get(token) {
                features[index] += self.idf[index];
            }
        }

        let norm = features.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut features {
                *value /= norm;
            }
        }
        features
    }
}

/// Word-character runs of length ≥ 2.
fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|token| token.chars().count() >= 2)
}
