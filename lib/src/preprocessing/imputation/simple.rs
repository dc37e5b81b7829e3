//! Mean imputation.
//!
//! Each missing value is replaced by the mean of the present values in its
//! column. A column with no present values is filled with 0.0.

use crate::backend::{Backend, Tensor1D, Tensor2D};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{
    check_features, check_non_empty, map_rows, FittedTransformer, Transformer,
};
use std::marker::PhantomData;

/// Mean imputer (unfitted).
#[derive(Clone, Copy, Debug)]
pub struct MeanImputer<B: Backend> {
    _backend: PhantomData<B>,
}

impl<B: Backend> MeanImputer<B> {
    pub fn new() -> Self {
        Self {
            _backend: PhantomData,
        }
    }
}

impl<B: Backend> Default for MeanImputer<B> {
    fn default() -> Self {
        Self::new()
    }
}

fn nan_mean(values: &[f64]) -> f64 {
    let (sum, count) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, c), &v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

impl<B: Backend> Transformer<B> for MeanImputer<B> {
    type Fitted = FittedMeanImputer<B>;

    fn fit(&self, data: &Tensor2D<B>) -> Result<Self::Fitted, PreprocessingError> {
        check_non_empty(data, "MeanImputer")?;
        let means = (0..data.cols())
            .map(|j| nan_mean(&data.column(j).to_vec()))
            .collect();
        Ok(FittedMeanImputer {
            statistics: Tensor1D::new(means),
        })
    }
}

/// Fitted mean imputer ready for inference.
#[derive(Clone, Debug)]
pub struct FittedMeanImputer<B: Backend> {
    statistics: Tensor1D<B>,
}

impl<B: Backend> FittedMeanImputer<B> {
    /// Fill value for each feature.
    pub fn statistics(&self) -> &Tensor1D<B> {
        &self.statistics
    }
}

impl<B: Backend> FittedTransformer<B> for FittedMeanImputer<B> {
    fn transform(&self, data: &Tensor2D<B>) -> Result<Tensor2D<B>, PreprocessingError> {
        check_features(data, self.n_features_in())?;
        let fill = self.statistics.to_vec();
        Ok(map_rows(data, |row| {
            row.into_iter()
                .zip(&fill)
                .map(|(v, &f)| if v.is_nan() { f } else { v })
                .collect()
        }))
    }

    fn n_features_in(&self) -> usize {
        self.statistics.len()
    }
}
