use super::{step, validate_fit, Optimizer};
use crate::backend::{Backend, Scalar, Tensor1D, Tensor2D};
use crate::error::Result;
use crate::model::LogisticParams;
use tracing::{debug, info};

pub const DEFAULT_BATCH_LEARNING_RATE: f64 = 0.01;
pub const DEFAULT_BATCH_EPOCHS: usize = 50_000;

/// Full-batch gradient descent on the logistic cross-entropy loss.
///
/// Each epoch computes the gradient over all `m` samples:
/// ```text
/// p      = σ(X · w + b)
/// grad_w = (1/m) · Xᵗ · (p - y)
/// grad_b = (1/m) · Σ (p - y)
/// ```
/// and moves the parameters against it. Exactly `epochs` updates are made.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BatchGradientDescent {
    learning_rate: f64,
    epochs: usize,
}

impl BatchGradientDescent {
    pub fn new(learning_rate: f64, epochs: usize) -> Self {
        Self {
            learning_rate,
            epochs,
        }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn epochs(&self) -> usize {
        self.epochs
    }
}

impl Default for BatchGradientDescent {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_LEARNING_RATE, DEFAULT_BATCH_EPOCHS)
    }
}

impl<B: Backend> Optimizer<B> for BatchGradientDescent {
    fn fit(&self, x: &Tensor2D<B>, y: &Tensor1D<B>) -> Result<LogisticParams<B>> {
        let (m, n) = validate_fit(x, y, self.learning_rate, self.epochs)?;
        info!(
            samples = m,
            features = n,
            epochs = self.epochs,
            learning_rate = self.learning_rate,
            "batch gradient descent started"
        );

        let inv_m = Scalar::<B>::new(1.0 / m as f64);
        let mut params = LogisticParams::zeros(n);
        for _ in 0..self.epochs {
            let residual = params.probabilities(x)?.sub(y);
            let grads = LogisticParams {
                weights: x.tdot(&residual).scale(&inv_m),
                bias: residual.sum() * inv_m,
            };
            params = step(&params, &grads, self.learning_rate);
        }

        info!(epochs = self.epochs, "batch gradient descent finished");
        debug!(
            weights = ?params.weights.to_vec(),
            bias = params.bias.to_f64(),
            "final parameters"
        );
        Ok(params)
    }

    fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    fn epochs(&self) -> usize {
        self.epochs
    }
}
