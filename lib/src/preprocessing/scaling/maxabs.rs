//! Max-Abs Scaler.
//!
//! Scales each feature by its maximum absolute value, so the largest magnitude
//! in every column of the fitted data becomes 1.0. Data is not shifted.
//!
//! Missing values (`NaN`) are ignored when computing the maximum and stay `NaN`
//! after scaling.

use crate::backend::{Backend, Tensor1D, Tensor2D};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{
    check_features, check_non_empty, map_rows, FittedTransformer, Transformer,
};
use std::marker::PhantomData;
use tracing::debug;

/// MaxAbsScaler transformer (unfitted).
#[derive(Clone, Copy, Debug)]
pub struct MaxAbsScaler<B: Backend> {
    _backend: PhantomData<B>,
}

impl<B: Backend> MaxAbsScaler<B> {
    pub fn new() -> Self {
        Self {
            _backend: PhantomData,
        }
    }
}

impl<B: Backend> Default for MaxAbsScaler<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> Transformer<B> for MaxAbsScaler<B> {
    type Fitted = FittedMaxAbsScaler<B>;

    fn fit(&self, data: &Tensor2D<B>) -> Result<Self::Fitted, PreprocessingError> {
        check_non_empty(data, "MaxAbsScaler")?;

        let max_abs: Vec<f64> = (0..data.cols())
            .map(|j| {
                data.column(j)
                    .to_vec()
                    .into_iter()
                    .fold(0.0_f64, |acc, v| acc.max(v.abs()))
            })
            .collect();
        // A zero column is left unscaled.
        let scale: Vec<f64> = max_abs
            .iter()
            .map(|&m| if m == 0.0 { 1.0 } else { 1.0 / m })
            .collect();
        debug!(?max_abs, "max-abs scaler fitted");

        Ok(FittedMaxAbsScaler {
            max_abs: Tensor1D::new(max_abs),
            scale: Tensor1D::new(scale),
        })
    }
}

/// Fitted MaxAbsScaler ready for inference.
#[derive(Clone, Debug)]
pub struct FittedMaxAbsScaler<B: Backend> {
    max_abs: Tensor1D<B>,
    scale: Tensor1D<B>,
}

impl<B: Backend> FittedMaxAbsScaler<B> {
    /// Maximum absolute value of each feature in the fitted data.
    pub fn max_abs(&self) -> &Tensor1D<B> {
        &self.max_abs
    }

    /// Factor each feature is multiplied by.
    pub fn scale(&self) -> &Tensor1D<B> {
        &self.scale
    }
}

impl<B: Backend> FittedTransformer<B> for FittedMaxAbsScaler<B> {
    fn transform(&self, data: &Tensor2D<B>) -> Result<Tensor2D<B>, PreprocessingError> {
        check_features(data, self.n_features_in())?;
        Ok(map_rows(data, |row| {
            Tensor1D::<B>::new(row).mul(&self.scale).to_vec()
        }))
    }

    fn n_features_in(&self) -> usize {
        self.scale.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;

    fn data(rows: &[Vec<f64>]) -> Tensor2D<CpuBackend> {
        Tensor2D::from_rows(rows).unwrap()
    }

    #[test]
    fn test_fit_transform() {
        let x = data(&[vec![1.0, -8.0, 0.0], vec![-2.0, 4.0, 0.0], vec![0.5, 2.0, 0.0]]);
        let scaled = MaxAbsScaler::new().fit_transform(&x).unwrap();

        assert_eq!(scaled.row(0).to_vec(), vec![0.5, -1.0, 0.0]);
        assert_eq!(scaled.row(1).to_vec(), vec![-1.0, 0.5, 0.0]);
        assert_eq!(scaled.row(2).to_vec(), vec![0.25, 0.25, 0.0]);
    }

    #[test]
    fn test_zero_column_keeps_unit_scale() {
        let fitted = MaxAbsScaler::new().fit(&data(&[vec![0.0], vec![0.0]])).unwrap();
        assert_eq!(fitted.scale().to_vec(), vec![1.0]);
        assert_eq!(fitted.max_abs().to_vec(), vec![0.0]);
    }

    #[test]
    fn test_nan_ignored_and_preserved() {
        let x = data(&[vec![f64::NAN], vec![-5.0], vec![2.5]]);
        let fitted = MaxAbsScaler::new().fit(&x).unwrap();
        assert_eq!(fitted.max_abs().to_vec(), vec![5.0]);

        let scaled = fitted.transform(&x).unwrap();
        assert!(scaled.row(0).to_vec()[0].is_nan());
        assert_eq!(scaled.row(2).to_vec(), vec![0.5]);
    }

    #[test]
    fn test_transform_uses_fitted_statistics() {
        let fitted = MaxAbsScaler::new().fit(&data(&[vec![10.0]])).unwrap();
        let scaled = fitted.transform(&data(&[vec![20.0]])).unwrap();
        assert_eq!(scaled.row(0).to_vec(), vec![2.0]);
    }

    #[test]
    fn test_errors() {
        let empty = Tensor2D::<CpuBackend>::new(vec![], 0, 2);
        assert!(matches!(
            MaxAbsScaler::new().fit(&empty),
            Err(PreprocessingError::EmptyData(_))
        ));

        let fitted = MaxAbsScaler::new().fit(&data(&[vec![1.0, 2.0]])).unwrap();
        assert_eq!(
            fitted.transform(&data(&[vec![1.0]])).unwrap_err(),
            PreprocessingError::FeatureMismatch {
                expected_features: 2,
                got_features: 1
            }
        );
    }
}
