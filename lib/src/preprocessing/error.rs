//! Error types for preprocessing operations.

use thiserror::Error;

/// Error type for preprocessing operations.
#[derive(Debug, Error, PartialEq)]
pub enum PreprocessingError {
    /// Empty data provided where non-empty was required.
    #[error("empty data: {0}")]
    EmptyData(String),

    /// Feature dimension differs from the one seen during fit.
    #[error("feature mismatch: expected {expected_features} features, got {got_features}")]
    FeatureMismatch {
        expected_features: usize,
        got_features: usize,
    },

    /// A label outside the configured class list.
    #[error("unknown class {class:?}")]
    UnknownClass { class: String },
}
