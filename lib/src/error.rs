//! Error types for training, inference and model persistence.

use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by logistic units, the One-vs-Rest classifier and the
/// model file helpers.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Prediction or evaluation was requested before `fit` or `load`.
    #[error("model is not initialized: call fit or load first")]
    UninitializedModel,

    /// Input dimensions disagree with each other or with the fitted parameters.
    #[error("shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: String, got: String },

    /// Training or evaluation was given no samples, no features or no classes.
    #[error("empty data: {0}")]
    EmptyData(String),

    /// Learning rate or epoch count outside its valid range.
    #[error("invalid hyperparameter {name}: {value}")]
    InvalidHyperparameter { name: &'static str, value: String },

    #[error("model file not found: {}", path.display())]
    PersistenceNotFound { path: PathBuf },

    #[error("permission denied for model file: {}", path.display())]
    PersistenceAccessDenied { path: PathBuf },

    /// The file was readable but its content is not a valid model.
    #[error("corrupt model file {}: {reason}", path.display())]
    PersistenceCorrupt { path: PathBuf, reason: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;

impl ModelError {
    pub(crate) fn shape(expected: impl Into<String>, got: impl Into<String>) -> Self {
        ModelError::ShapeMismatch {
            expected: expected.into(),
            got: got.into(),
        }
    }
}
