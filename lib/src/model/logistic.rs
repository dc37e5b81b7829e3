//! Binary logistic unit: one weight vector and one bias producing `σ(w·x + b)`.
//!
//! The unit does not know how it is trained. The optimizer supplied at construction
//! ([`crate::optimizer::Optimizer`]) turns a feature matrix and a {0, 1} label
//! vector into [`LogisticParams`], and the unit stores the result.

use crate::backend::{Backend, Scalar, Tensor1D, Tensor2D};
use crate::error::{ModelError, Result};
use crate::model::{InferenceModel, ParamOps};
use crate::optimizer::Optimizer;

/// Trainable parameters of a logistic unit: weights and bias.
#[derive(Clone, Debug)]
pub struct LogisticParams<B: Backend> {
    pub weights: Tensor1D<B>,
    pub bias: Scalar<B>,
}

impl<B: Backend> LogisticParams<B> {
    /// Zero weights of length `n_features` and a zero bias.
    pub fn zeros(n_features: usize) -> Self {
        Self {
            weights: Tensor1D::zeros(n_features),
            bias: Scalar::new(0.0),
        }
    }

    pub fn n_features(&self) -> usize {
        self.weights.len()
    }

    /// `σ(x · w + b)` for a single sample.
    pub fn probability(&self, x: &Tensor1D<B>) -> Result<Scalar<B>> {
        self.check_width(x.len())?;
        Ok((x.dot(&self.weights) + self.bias).sigmoid())
    }

    /// `σ(X · w + b)` for every row of `x`.
    pub fn probabilities(&self, x: &Tensor2D<B>) -> Result<Tensor1D<B>> {
        self.check_width(x.cols())?;
        Ok(x.dot(&self.weights).add_scalar(&self.bias).sigmoid())
    }

    fn check_width(&self, got: usize) -> Result<()> {
        if got != self.n_features() {
            return Err(ModelError::shape(
                format!("{} features", self.n_features()),
                format!("{got} features"),
            ));
        }
        Ok(())
    }
}

impl<B: Backend> ParamOps<B> for LogisticParams<B> {
    fn add(&self, other: &Self) -> Self {
        Self {
            weights: self.weights.add(&other.weights),
            bias: self.bias + other.bias,
        }
    }

    fn scale(&self, scalar: Scalar<B>) -> Self {
        Self {
            weights: self.weights.scale(&scalar),
            bias: self.bias * scalar,
        }
    }
}

/// Plain representation of [`LogisticParams`] written to model files.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SerializableLogisticParams {
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl<B: Backend> From<&LogisticParams<B>> for SerializableLogisticParams {
    fn from(params: &LogisticParams<B>) -> Self {
        Self {
            weights: params.weights.to_vec(),
            bias: params.bias.to_f64(),
        }
    }
}

impl<B: Backend> From<SerializableLogisticParams> for LogisticParams<B> {
    fn from(value: SerializableLogisticParams) -> Self {
        Self {
            weights: Tensor1D::new(value.weights),
            bias: Scalar::new(value.bias),
        }
    }
}

/// A single-class probability estimator trained by an injected optimizer.
///
/// Created empty; usable for prediction only after [`fit`](Self::fit) or when
/// built from stored parameters with [`with_params`](Self::with_params).
///
/// # Example
/// ```
/// use dslr::backend::{CpuBackend, Tensor1D, Tensor2D};
/// use dslr::model::{BinaryLogisticUnit, InferenceModel};
/// use dslr::optimizer::BatchGradientDescent;
///
/// let x = Tensor2D::<CpuBackend>::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
/// let y = Tensor1D::new(vec![0.0, 1.0, 0.0]);
///
/// let mut unit = BinaryLogisticUnit::new(BatchGradientDescent::new(0.01, 1000));
/// unit.fit(&x, &y).unwrap();
///
/// let p = unit.predict(&Tensor1D::new(vec![2.0, 3.0])).unwrap().to_f64();
/// assert!(p > 0.0 && p < 1.0);
/// ```
#[derive(Clone, Debug)]
pub struct BinaryLogisticUnit<B: Backend, O> {
    optimizer: O,
    params: Option<LogisticParams<B>>,
}

impl<B: Backend, O: Optimizer<B>> BinaryLogisticUnit<B, O> {
    pub fn new(optimizer: O) -> Self {
        Self {
            optimizer,
            params: None,
        }
    }

    /// Builds a fitted unit from existing parameters, without training.
    pub fn with_params(optimizer: O, params: LogisticParams<B>) -> Self {
        Self {
            optimizer,
            params: Some(params),
        }
    }

    /// Trains from zero weights on `x` (m × n) against labels `y` (length m).
    ///
    /// Previously fitted parameters are discarded; if training fails they are
    /// kept as they were.
    pub fn fit(&mut self, x: &Tensor2D<B>, y: &Tensor1D<B>) -> Result<()> {
        let params = self.optimizer.fit(x, y)?;
        self.params = Some(params);
        Ok(())
    }

    pub fn params(&self) -> Option<&LogisticParams<B>> {
        self.params.as_ref()
    }

    pub fn optimizer(&self) -> &O {
        &self.optimizer
    }

    pub fn n_features(&self) -> Option<usize> {
        self.params.as_ref().map(LogisticParams::n_features)
    }

    pub fn is_fitted(&self) -> bool {
        self.params.is_some()
    }

    fn fitted_params(&self) -> Result<&LogisticParams<B>> {
        self.params.as_ref().ok_or(ModelError::UninitializedModel)
    }
}

impl<B: Backend, O: Optimizer<B>> InferenceModel<B> for BinaryLogisticUnit<B, O> {
    type InputSingle = Tensor1D<B>;
    type OutputSingle = Scalar<B>;
    type InputBatch = Tensor2D<B>;
    type OutputBatch = Tensor1D<B>;

    fn predict(&self, input: &Tensor1D<B>) -> Result<Scalar<B>> {
        self.optimizer.predict(input, self.fitted_params()?)
    }

    fn predict_batch(&self, input: &Tensor2D<B>) -> Result<Tensor1D<B>> {
        self.fitted_params()?.probabilities(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;
    use crate::optimizer::{BatchGradientDescent, StochasticGradientDescent};
    use approx::assert_relative_eq;

    fn tensor2d(rows: &[Vec<f64>]) -> Tensor2D<CpuBackend> {
        Tensor2D::from_rows(rows).unwrap()
    }

    fn separable() -> (Tensor2D<CpuBackend>, Tensor1D<CpuBackend>) {
        // label 1: x1 + x2 > 10, label 0: x1 + x2 < 5
        let x = tensor2d(&[
            vec![6.0, 6.0],
            vec![7.0, 5.0],
            vec![8.0, 4.0],
            vec![5.0, 7.0],
            vec![9.0, 9.0],
            vec![1.0, 1.0],
            vec![2.0, 1.0],
            vec![1.0, 2.0],
            vec![0.0, 3.0],
            vec![2.0, 2.0],
        ]);
        let y = Tensor1D::new(vec![1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        (x, y)
    }

    #[test]
    fn test_param_ops_add() {
        let p1 = LogisticParams {
            weights: Tensor1D::<CpuBackend>::new(vec![1.0, 2.0]),
            bias: Scalar::<CpuBackend>::new(0.5),
        };
        let p2 = LogisticParams {
            weights: Tensor1D::<CpuBackend>::new(vec![0.5, 1.0]),
            bias: Scalar::<CpuBackend>::new(0.5),
        };

        let result = p1.add(&p2);

        assert_eq!(result.weights.to_vec(), vec![1.5, 3.0]);
        assert_eq!(result.bias.to_f64(), 1.0);
    }

    #[test]
    fn test_param_ops_scale_negative() {
        let p = LogisticParams {
            weights: Tensor1D::<CpuBackend>::new(vec![2.0]),
            bias: Scalar::<CpuBackend>::new(1.0),
        };

        let result = p.scale(Scalar::<CpuBackend>::new(-1.0));

        assert_eq!(result.weights.to_vec(), vec![-2.0]);
        assert_eq!(result.bias.to_f64(), -1.0);
    }

    #[test]
    fn test_zero_params_predict_half() {
        let params = LogisticParams::<CpuBackend>::zeros(3);
        let p = params
            .probability(&Tensor1D::new(vec![4.0, -2.0, 7.0]))
            .unwrap();
        assert_eq!(p.to_f64(), 0.5);
    }

    #[test]
    fn test_serializable_params_conversion() {
        let params = LogisticParams {
            weights: Tensor1D::<CpuBackend>::new(vec![0.1, -0.2]),
            bias: Scalar::<CpuBackend>::new(0.3),
        };
        let repr = SerializableLogisticParams::from(&params);
        assert_eq!(repr.weights, vec![0.1, -0.2]);
        assert_eq!(repr.bias, 0.3);

        let back: LogisticParams<CpuBackend> = repr.into();
        assert_eq!(back.weights.to_vec(), vec![0.1, -0.2]);
        assert_eq!(back.bias.to_f64(), 0.3);
    }

    #[test]
    fn test_predict_before_fit_is_uninitialized() {
        let unit = BinaryLogisticUnit::<CpuBackend, _>::new(BatchGradientDescent::default());
        let err = unit.predict(&Tensor1D::new(vec![1.0])).unwrap_err();
        assert!(matches!(err, ModelError::UninitializedModel));

        let err = unit.predict_batch(&tensor2d(&[vec![1.0]])).unwrap_err();
        assert!(matches!(err, ModelError::UninitializedModel));
        assert!(!unit.is_fitted());
        assert_eq!(unit.n_features(), None);
    }

    #[test]
    fn test_fit_small_example() {
        let x = tensor2d(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]);
        let y = Tensor1D::new(vec![0.0, 1.0, 0.0]);

        let mut unit = BinaryLogisticUnit::new(BatchGradientDescent::new(0.01, 1000));
        unit.fit(&x, &y).unwrap();

        assert_eq!(unit.n_features(), Some(2));
        let p = unit.predict(&Tensor1D::new(vec![2.0, 3.0])).unwrap().to_f64();
        assert!(p > 0.0 && p < 1.0, "p = {p}");
    }

    #[test]
    fn test_predict_wrong_width_is_shape_mismatch() {
        let x = tensor2d(&[vec![1.0, 2.0], vec![3.0, 4.0]]);
        let y = Tensor1D::new(vec![0.0, 1.0]);
        let mut unit = BinaryLogisticUnit::new(BatchGradientDescent::new(0.1, 10));
        unit.fit(&x, &y).unwrap();

        let err = unit.predict(&Tensor1D::new(vec![1.0, 2.0, 3.0])).unwrap_err();
        assert!(matches!(err, ModelError::ShapeMismatch { .. }));

        let err = unit.predict_batch(&tensor2d(&[vec![1.0]])).unwrap_err();
        assert!(matches!(err, ModelError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_batch_converges_on_separable_data() {
        let (x, y) = separable();
        let mut unit = BinaryLogisticUnit::new(BatchGradientDescent::new(0.1, 10_000));
        unit.fit(&x, &y).unwrap();

        let probs = unit.predict_batch(&x).unwrap().to_vec();
        for (p, label) in probs.iter().zip(y.to_vec()) {
            if label == 1.0 {
                assert!(*p > 0.9, "positive sample scored {p}");
            } else {
                assert!(*p < 0.1, "negative sample scored {p}");
            }
        }
    }

    #[test]
    fn test_predict_matches_predict_batch() {
        let (x, y) = separable();
        let mut unit = BinaryLogisticUnit::new(StochasticGradientDescent::new(0.1, 500));
        unit.fit(&x, &y).unwrap();

        let batch = unit.predict_batch(&x).unwrap().to_vec();
        for (i, expected) in batch.iter().enumerate() {
            let single = unit.predict(&x.row(i)).unwrap().to_f64();
            assert_relative_eq!(single, *expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_refit_replaces_params() {
        let (x, y) = separable();
        let mut unit = BinaryLogisticUnit::new(BatchGradientDescent::new(0.1, 50));
        unit.fit(&x, &y).unwrap();
        let first = unit.params().unwrap().weights.to_vec();

        let x_narrow = tensor2d(&[vec![1.0], vec![-1.0]]);
        unit.fit(&x_narrow, &Tensor1D::new(vec![1.0, 0.0])).unwrap();
        assert_eq!(unit.n_features(), Some(1));
        assert_ne!(unit.params().unwrap().weights.to_vec().len(), first.len());
    }

    #[test]
    fn test_failed_fit_keeps_previous_params() {
        let (x, y) = separable();
        let mut unit = BinaryLogisticUnit::new(BatchGradientDescent::new(0.1, 50));
        unit.fit(&x, &y).unwrap();
        let before = unit.params().unwrap().weights.to_vec();

        let err = unit.fit(&x, &Tensor1D::new(vec![1.0])).unwrap_err();
        assert!(matches!(err, ModelError::ShapeMismatch { .. }));
        assert_eq!(unit.params().unwrap().weights.to_vec(), before);
    }
}
