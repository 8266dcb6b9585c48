use std::path::Path;

use serde::Deserialize;

use crate::error::ModelError;
use crate::is_valid_label;

/// Multinomial logistic-regression classifier exported by the training
/// pipeline.
///
/// Prediction computes one decision score per class
/// (`coefficients[class] · features + intercepts[class]`) and returns the
/// class with the highest score.  The class set is validated against the
/// sentiment label range at load time, so `predict` can only ever return
/// a label in `0..=3`.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearClassifier {
    /// Per-class coefficient rows, `[n_classes][n_features]`.
    coefficients: Vec<Vec<f32>>,
    /// Per-class intercepts.
    intercepts: Vec<f32>,
    /// Label value for each coefficient row.
    classes: Vec<i64>,
}

impl LinearClassifier {
    /// Load and validate a classifier artifact from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let raw = std::fs::read(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Load and validate a classifier artifact from raw JSON bytes.
    pub fn from_json(raw: &[u8]) -> Result<Self, ModelError> {
        let classifier: Self = serde_json::from_slice(raw)?;
        classifier.validate()?;
        Ok(classifier)
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.coefficients.is_empty() {
            return Err(ModelError::Invalid("classifier has no classes".to_owned()));
        }
        if self.intercepts.len() != self.coefficients.len()
            || self.classes.len() != self.coefficients.len()
        {
            return Err(ModelError::Invalid(format!(
                "class count mismatch: {} coefficient rows, {} intercepts, {} classes",
                self.coefficients.len(),
                self.intercepts.len(),
                self.classes.len()
            )));
        }
        let width = self.coefficients[0].len();
        if width == 0 {
            return Err(ModelError::Invalid(
                "classifier has zero feature width".to_owned(),
            ));
        }
        if self.coefficients.iter().any(|row| row.len() != width) {
            return Err(ModelError::Invalid(
                "coefficient rows have inconsistent widths".to_owned(),
            ));
        }
        if let Some(&label) = self.classes.iter().find(|&&label| !is_valid_label(label)) {
            return Err(ModelError::Invalid(format!(
                "class label {label} is outside the sentiment label range"
            )));
        }
        Ok(())
    }

    /// Feature-vector width this classifier expects.
    pub fn n_features(&self) -> usize {
        self.coefficients[0].len()
    }

    /// Predict the label for one feature vector.
    pub fn predict(&self, features: &[f32]) -> Result<i64, ModelError> {
        if features.len() != self.n_features() {
            return Err(ModelError::DimensionMismatch {
                expected: self.n_features(),
                got: features.len(),
            });
        }

        let mut best = 0;
        let mut best_score = f32::NEG_INFINITY;
        for (row, (coefficients, intercept)) in
            self.coefficients.iter().zip(&self.intercepts).enumerate()
        {
            let score = coefficients
                .iter()
                .zip(features)
                .map(|(c, x)| c * x)
                .sum::<f32>()
                + intercept;
            if score > best_score {
                best = row;
                best_score = score;
            }
        }
        Ok(self.classes[best])
    }
}
