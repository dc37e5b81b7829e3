use super::{step, validate_fit, Optimizer};
use crate::backend::{Backend, Scalar, Tensor1D, Tensor2D};
use crate::error::Result;
use crate::model::LogisticParams;
use tracing::{debug, info};

pub const DEFAULT_STOCHASTIC_LEARNING_RATE: f64 = 0.01;
pub const DEFAULT_STOCHASTIC_EPOCHS: usize = 5_000;

/// Single-sample gradient descent with cyclic sample order.
///
/// `epochs` counts single-sample updates, not passes over the data. Iteration `t`
/// visits row `t mod m`; rows are never shuffled, so results are repeatable.
/// For the visited row:
/// ```text
/// err    = σ(x_i · w + b) - y_i
/// grad_w = x_i · err + w / m
/// grad_b = err
/// ```
/// The `w / m` term shrinks the weights every step; the bias has no such term.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StochasticGradientDescent {
    learning_rate: f64,
    epochs: usize,
}

impl StochasticGradientDescent {
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

impl Default for StochasticGradientDescent {
    fn default() -> Self {
        Self::new(DEFAULT_STOCHASTIC_LEARNING_RATE, DEFAULT_STOCHASTIC_EPOCHS)
    }
}

impl<B: Backend> Optimizer<B> for StochasticGradientDescent {
    fn fit(&self, x: &Tensor2D<B>, y: &Tensor1D<B>) -> Result<LogisticParams<B>> {
        let (m, n) = validate_fit(x, y, self.learning_rate, self.epochs)?;
        info!(
            samples = m,
            features = n,
            iterations = self.epochs,
            learning_rate = self.learning_rate,
            "stochastic gradient descent started"
        );

        let rows: Vec<Tensor1D<B>> = (0..m).map(|i| x.row(i)).collect();
        let targets = y.to_vec();
        let shrink = Scalar::<B>::new(1.0 / m as f64);

        let mut params = LogisticParams::zeros(n);
        for i in (0..m).cycle().take(self.epochs) {
            let xi = &rows[i];
            let err = params.probability(xi)? - Scalar::new(targets[i]);
            let grads = LogisticParams {
                weights: xi.scale(&err).add(&params.weights.scale(&shrink)),
                bias: err,
            };
            params = step(&params, &grads, self.learning_rate);
        }

        info!(iterations = self.epochs, "stochastic gradient descent finished");
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
