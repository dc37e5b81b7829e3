//! Training strategies for a [`BinaryLogisticUnit`](crate::model::BinaryLogisticUnit).
//!
//! An optimizer is a capability, not a base class: it turns a feature matrix and
//! a {0, 1} label vector into [`LogisticParams`], and knows how to score a sample
//! with those parameters. Two strategies are provided:
//!
//! - [`BatchGradientDescent`]: one update per epoch from the full training set.
//! - [`StochasticGradientDescent`]: one update per iteration from a single
//!   sample, cycling through the rows in order.
//!
//! [`GradientDescent`] selects between them at runtime from an [`OptimizerKind`].
//!
//! Both run a fixed number of iterations from zero weights; there is no
//! convergence check, so fitting is fully deterministic.

mod batch;
mod stochastic;

pub use batch::{BatchGradientDescent, DEFAULT_BATCH_EPOCHS, DEFAULT_BATCH_LEARNING_RATE};
pub use stochastic::{
    StochasticGradientDescent, DEFAULT_STOCHASTIC_EPOCHS, DEFAULT_STOCHASTIC_LEARNING_RATE,
};

use crate::backend::{Backend, Scalar, Tensor1D, Tensor2D};
use crate::error::{ModelError, Result};
use crate::model::{LogisticParams, ParamOps};
use std::fmt;
use std::str::FromStr;

/// Fitting strategy for a binary logistic unit.
///
/// # Example
/// ```rust
/// use dslr::backend::{CpuBackend, Tensor1D, Tensor2D};
/// use dslr::optimizer::{BatchGradientDescent, Optimizer};
///
/// let x = Tensor2D::<CpuBackend>::from_rows(&[vec![0.0], vec![1.0]]).unwrap();
/// let y = Tensor1D::new(vec![0.0, 1.0]);
///
/// let params = BatchGradientDescent::new(0.5, 200).fit(&x, &y).unwrap();
/// assert_eq!(params.weights.len(), 1);
/// assert!(params.weights.to_vec()[0] > 0.0);
/// ```
pub trait Optimizer<B: Backend>: Clone + Send + Sync {
    /// Trains parameters from zero weights and zero bias.
    ///
    /// # Errors
    /// - [`ModelError::InvalidHyperparameter`] for a non-positive or non-finite
    ///   learning rate, or zero epochs
    /// - [`ModelError::EmptyData`] when `x` has no rows or no columns
    /// - [`ModelError::ShapeMismatch`] when `y.len()` differs from the row count
    fn fit(&self, x: &Tensor2D<B>, y: &Tensor1D<B>) -> Result<LogisticParams<B>>;

    /// Probability `σ(x · w + b)` of the positive class.
    fn predict(&self, x: &Tensor1D<B>, params: &LogisticParams<B>) -> Result<Scalar<B>> {
        params.probability(x)
    }

    fn learning_rate(&self) -> f64;

    fn epochs(&self) -> usize;
}

/// Gradient step `params - learning_rate · grads`.
pub(crate) fn step<B: Backend>(
    params: &LogisticParams<B>,
    grads: &LogisticParams<B>,
    learning_rate: f64,
) -> LogisticParams<B> {
    let neg_lr = Scalar::<B>::new(-learning_rate);
    params.add(&grads.scale(neg_lr))
}

/// Checks hyperparameters and input shapes, returning `(m, n)`.
pub(crate) fn validate_fit<B: Backend>(
    x: &Tensor2D<B>,
    y: &Tensor1D<B>,
    learning_rate: f64,
    epochs: usize,
) -> Result<(usize, usize)> {
    if !learning_rate.is_finite() || learning_rate <= 0.0 {
        return Err(ModelError::InvalidHyperparameter {
            name: "learning_rate",
            value: learning_rate.to_string(),
        });
    }
    if epochs == 0 {
        return Err(ModelError::InvalidHyperparameter {
            name: "epochs",
            value: epochs.to_string(),
        });
    }
    let (m, n) = x.shape();
    if m == 0 || n == 0 {
        return Err(ModelError::EmptyData(format!(
            "feature matrix is {m} x {n}"
        )));
    }
    if y.len() != m {
        return Err(ModelError::shape(
            format!("{m} labels"),
            format!("{} labels", y.len()),
        ));
    }
    Ok((m, n))
}

/// Which gradient-descent variant to train with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OptimizerKind {
    #[default]
    Batch,
    Stochastic,
}

impl FromStr for OptimizerKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "batch" => Ok(OptimizerKind::Batch),
            "stochastic" => Ok(OptimizerKind::Stochastic),
            _ => Err(ModelError::InvalidHyperparameter {
                name: "optimizer",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OptimizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizerKind::Batch => write!(f, "batch"),
            OptimizerKind::Stochastic => write!(f, "stochastic"),
        }
    }
}

/// Runtime-selected optimizer, as chosen on the command line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GradientDescent {
    Batch(BatchGradientDescent),
    Stochastic(StochasticGradientDescent),
}

impl GradientDescent {
    /// Builds the variant for `kind`, using its defaults for any hyperparameter
    /// not overridden.
    pub fn from_kind(kind: OptimizerKind, learning_rate: Option<f64>, epochs: Option<usize>) -> Self {
        match kind {
            OptimizerKind::Batch => GradientDescent::Batch(BatchGradientDescent::new(
                learning_rate.unwrap_or(DEFAULT_BATCH_LEARNING_RATE),
                epochs.unwrap_or(DEFAULT_BATCH_EPOCHS),
            )),
            OptimizerKind::Stochastic => {
                GradientDescent::Stochastic(StochasticGradientDescent::new(
                    learning_rate.unwrap_or(DEFAULT_STOCHASTIC_LEARNING_RATE),
                    epochs.unwrap_or(DEFAULT_STOCHASTIC_EPOCHS),
                ))
            }
        }
    }

    pub fn kind(&self) -> OptimizerKind {
        match self {
            GradientDescent::Batch(_) => OptimizerKind::Batch,
            GradientDescent::Stochastic(_) => OptimizerKind::Stochastic,
        }
    }
}

impl Default for GradientDescent {
    fn default() -> Self {
        GradientDescent::Batch(BatchGradientDescent::default())
    }
}

impl From<BatchGradientDescent> for GradientDescent {
    fn from(value: BatchGradientDescent) -> Self {
        GradientDescent::Batch(value)
    }
}

impl From<StochasticGradientDescent> for GradientDescent {
    fn from(value: StochasticGradientDescent) -> Self {
        GradientDescent::Stochastic(value)
    }
}

impl<B: Backend> Optimizer<B> for GradientDescent {
    fn fit(&self, x: &Tensor2D<B>, y: &Tensor1D<B>) -> Result<LogisticParams<B>> {
        match self {
            GradientDescent::Batch(opt) => opt.fit(x, y),
            GradientDescent::Stochastic(opt) => opt.fit(x, y),
        }
    }

    fn learning_rate(&self) -> f64 {
        match self {
            GradientDescent::Batch(opt) => Optimizer::<B>::learning_rate(opt),
            GradientDescent::Stochastic(opt) => Optimizer::<B>::learning_rate(opt),
        }
    }

    fn epochs(&self) -> usize {
        match self {
            GradientDescent::Batch(opt) => Optimizer::<B>::epochs(opt),
            GradientDescent::Stochastic(opt) => Optimizer::<B>::epochs(opt),
        }
    }
}
