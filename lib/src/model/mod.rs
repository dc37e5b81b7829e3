//! Logistic models: the binary unit and its One-vs-Rest composition.

pub mod logistic;
pub mod ovr;

pub use logistic::{BinaryLogisticUnit, LogisticParams, SerializableLogisticParams};
pub use ovr::OneVsRestClassifier;

use crate::backend::{Backend, Scalar};
use crate::error::Result;

/// Parameter arithmetic used by optimizer update steps.
pub trait ParamOps<B: Backend>: Clone {
    fn add(&self, other: &Self) -> Self;
    fn scale(&self, scalar: Scalar<B>) -> Self;
}

/// Inference interface shared by fitted models.
///
/// Prediction fails with [`crate::error::ModelError::UninitializedModel`] before
/// the model is fitted or loaded, and with
/// [`crate::error::ModelError::ShapeMismatch`] when the input width differs
/// from the fitted feature count.
pub trait InferenceModel<B: Backend> {
    type InputSingle;
    type OutputSingle;
    type InputBatch;
    type OutputBatch;

    fn predict(&self, input: &Self::InputSingle) -> Result<Self::OutputSingle>;
    fn predict_batch(&self, input: &Self::InputBatch) -> Result<Self::OutputBatch>;
}
