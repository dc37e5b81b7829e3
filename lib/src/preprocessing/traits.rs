//! Core traits for preprocessing transformers.
//!
//! - [`Transformer`]: the unfitted state; learns statistics from data.
//! - [`FittedTransformer`]: holds the learned statistics and applies them.

use crate::backend::{Backend, Tensor2D};
use crate::preprocessing::error::PreprocessingError;

/// Trait for unfitted transformers.
///
/// # Example
/// ```
/// use dslr::backend::{CpuBackend, Tensor2D};
/// use dslr::preprocessing::{FittedTransformer, MaxAbsScaler, Transformer};
///
/// let data = Tensor2D::<CpuBackend>::from_rows(&[vec![2.0, -4.0], vec![1.0, 1.0]]).unwrap();
/// let fitted = MaxAbsScaler::new().fit(&data).unwrap();
/// let scaled = fitted.transform(&data).unwrap();
/// assert_eq!(scaled.row(0).to_vec(), vec![1.0, -1.0]);
/// ```
pub trait Transformer<B: Backend> {
    /// The fitted transformer type ready for inference.
    type Fitted: FittedTransformer<B>;

    /// Learns per-column statistics from `data`.
    ///
    /// # Errors
    /// [`PreprocessingError::EmptyData`] if `data` has no rows.
    fn fit(&self, data: &Tensor2D<B>) -> Result<Self::Fitted, PreprocessingError>;

    /// Fit the transformer and transform the same data in one step.
    fn fit_transform(&self, data: &Tensor2D<B>) -> Result<Tensor2D<B>, PreprocessingError> {
        self.fit(data)?.transform(data)
    }
}

/// Trait for fitted transformers ready for inference.
pub trait FittedTransformer<B: Backend> {
    /// Transform data using learned statistics.
    ///
    /// # Errors
    /// [`PreprocessingError::FeatureMismatch`] if `data` does not have
    /// [`n_features_in`](Self::n_features_in) columns.
    fn transform(&self, data: &Tensor2D<B>) -> Result<Tensor2D<B>, PreprocessingError>;

    /// Returns the number of features seen during fit.
    fn n_features_in(&self) -> usize;
}

pub(crate) fn check_non_empty<B: Backend>(
    data: &Tensor2D<B>,
    name: &str,
) -> Result<(), PreprocessingError> {
    if data.rows() == 0 {
        return Err(PreprocessingError::EmptyData(format!(
            "cannot fit {name} on empty data"
        )));
    }
    Ok(())
}

pub(crate) fn check_features<B: Backend>(
    data: &Tensor2D<B>,
    expected: usize,
) -> Result<(), PreprocessingError> {
    if data.cols() != expected {
        return Err(PreprocessingError::FeatureMismatch {
            expected_features: expected,
            got_features: data.cols(),
        });
    }
    Ok(())
}

/// Applies `f` to every row and reassembles the matrix.
pub(crate) fn map_rows<B: Backend>(
    data: &Tensor2D<B>,
    mut f: impl FnMut(Vec<f64>) -> Vec<f64>,
) -> Tensor2D<B> {
    let (rows, cols) = data.shape();
    let mut out = Vec::with_capacity(rows * cols);
    for i in 0..rows {
        out.extend(f(data.row(i).to_vec()));
    }
    Tensor2D::new(out, rows, cols)
}
