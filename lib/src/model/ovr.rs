//! One-vs-Rest composition of binary logistic units.
//!
//! Class `c` is modelled by its own [`BinaryLogisticUnit`] trained on column `c`
//! of the label matrix against all other classes. Units are independent, so
//! fitting can run one class per rayon task (see [`Parallelism`]). Predictions
//! are one probability per class; they are not normalized to sum to 1.

use crate::backend::{Backend, Tensor1D, Tensor2D};
use crate::error::{ModelError, Result};
use crate::model::{BinaryLogisticUnit, InferenceModel, LogisticParams, SerializableLogisticParams};
use crate::optimizer::Optimizer;
use crate::parallel::Parallelism;
use crate::serialization::{read_params, write_params};
use std::path::Path;
use tracing::{debug, info};

/// Multi-class classifier holding one binary logistic unit per class.
///
/// Lifecycle: created empty, populated by [`fit`](Self::fit) or
/// [`load`](Self::load); each of those replaces all units.
///
/// # Example
/// ```
/// use dslr::backend::{CpuBackend, Tensor1D, Tensor2D};
/// use dslr::model::{InferenceModel, OneVsRestClassifier};
/// use dslr::optimizer::BatchGradientDescent;
///
/// let x = Tensor2D::<CpuBackend>::from_rows(&[vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
/// let y = Tensor2D::<CpuBackend>::from_rows(&[vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
///
/// let mut ovr = OneVsRestClassifier::new(BatchGradientDescent::new(0.5, 500));
/// ovr.fit(&x, &y).unwrap();
///
/// assert_eq!(ovr.n_classes(), 2);
/// assert_eq!(ovr.predict(&Tensor1D::new(vec![0.0, 1.0])).unwrap().len(), 2);
/// assert_eq!(ovr.accuracy(&x, &y).unwrap(), 1.0);
/// ```
#[derive(Clone, Debug)]
pub struct OneVsRestClassifier<B: Backend, O> {
    optimizer: O,
    units: Vec<BinaryLogisticUnit<B, O>>,
    parallelism: Parallelism,
}

impl<B: Backend, O: Optimizer<B>> OneVsRestClassifier<B, O> {
    pub fn new(optimizer: O) -> Self {
        Self {
            optimizer,
            units: Vec::new(),
            parallelism: Parallelism::Sequential,
        }
    }

    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Builds a ready classifier from already-trained parameters, one per class.
    ///
    /// # Errors
    /// [`ModelError::EmptyData`] for an empty list, [`ModelError::ShapeMismatch`]
    /// if the weight vectors differ in length.
    pub fn from_params(optimizer: O, params: Vec<LogisticParams<B>>) -> Result<Self> {
        let n_features = params
            .first()
            .map(LogisticParams::n_features)
            .ok_or_else(|| ModelError::EmptyData("no class parameters".to_string()))?;
        if let Some((c, p)) = params
            .iter()
            .enumerate()
            .find(|(_, p)| p.n_features() != n_features)
        {
            return Err(ModelError::shape(
                format!("{n_features} weights"),
                format!("{} weights for class {c}", p.n_features()),
            ));
        }
        let units = params
            .into_iter()
            .map(|p| BinaryLogisticUnit::with_params(optimizer.clone(), p))
            .collect();
        Ok(Self {
            optimizer,
            units,
            parallelism: Parallelism::Sequential,
        })
    }

    /// Creates a classifier and loads its units from a model file.
    pub fn from_file(optimizer: O, path: impl AsRef<Path>) -> Result<Self> {
        let mut ovr = Self::new(optimizer);
        ovr.load(path)?;
        Ok(ovr)
    }

    /// Trains one unit per column of `y` (m × C) on `x` (m × n).
    ///
    /// All previously held units are replaced. If any class fails to train, the
    /// previous units are kept and the first error (in class order) is returned.
    pub fn fit(&mut self, x: &Tensor2D<B>, y: &Tensor2D<B>) -> Result<()> {
        let (m, n) = x.shape();
        let (y_rows, classes) = y.shape();
        if y_rows != m {
            return Err(ModelError::shape(
                format!("{m} label rows"),
                format!("{y_rows} label rows"),
            ));
        }
        if classes == 0 {
            return Err(ModelError::EmptyData("label matrix has no columns".to_string()));
        }

        info!(
            classes,
            samples = m,
            features = n,
            parallel = self.parallelism.is_parallel(),
            "one-vs-rest training started"
        );
        let optimizer = &self.optimizer;
        let trained = self
            .parallelism
            .maybe_par_map(0..classes, |class| -> Result<BinaryLogisticUnit<B, O>> {
                let mut unit = BinaryLogisticUnit::new(optimizer.clone());
                unit.fit(x, &y.column(class))?;
                info!(class, "class unit trained");
                Ok(unit)
            });
        self.units = trained.into_iter().collect::<Result<Vec<_>>>()?;
        info!(classes, "one-vs-rest training finished");
        Ok(())
    }

    /// Index of the most probable class for `x`; ties go to the lowest index.
    pub fn predict_class(&self, x: &Tensor1D<B>) -> Result<usize> {
        Ok(argmax(&self.predict(x)?))
    }

    /// Fraction of rows of `x` whose predicted class equals the arg-max of the
    /// corresponding row of `y`.
    pub fn accuracy(&self, x: &Tensor2D<B>, y: &Tensor2D<B>) -> Result<f64> {
        let pairs = self.predicted_and_true(x, y)?;
        Ok(ratio(&pairs))
    }

    /// Same as [`accuracy`](Self::accuracy), additionally emitting one `debug`
    /// event per row with the predicted class name.
    pub fn accuracy_with_labels<S: AsRef<str>>(
        &self,
        x: &Tensor2D<B>,
        y: &Tensor2D<B>,
        class_names: &[S],
    ) -> Result<f64> {
        let pairs = self.predicted_and_true(x, y)?;
        for (row, (predicted, _)) in pairs.iter().enumerate() {
            match class_names.get(*predicted) {
                Some(name) => debug!(row, predicted = name.as_ref(), "prediction"),
                None => debug!(row, predicted, "prediction"),
            }
        }
        Ok(ratio(&pairs))
    }

    /// Writes the ordered `{weights, bias}` records to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.ensure_fitted()?;
        let path = path.as_ref();
        let records: Vec<SerializableLogisticParams> = self
            .units
            .iter()
            .filter_map(BinaryLogisticUnit::params)
            .map(SerializableLogisticParams::from)
            .collect();
        write_params(path, &records)?;
        info!(path = %path.display(), classes = records.len(), "model saved");
        Ok(())
    }

    /// Replaces all units with the records stored at `path`.
    ///
    /// On any error the classifier is left exactly as it was.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let records: Vec<SerializableLogisticParams> = read_params(path)?;
        validate_records(&records).map_err(|reason| ModelError::PersistenceCorrupt {
            path: path.to_path_buf(),
            reason,
        })?;

        self.units = records
            .into_iter()
            .map(|r| BinaryLogisticUnit::with_params(self.optimizer.clone(), r.into()))
            .collect();
        info!(
            path = %path.display(),
            classes = self.units.len(),
            features = ?self.n_features(),
            "model loaded"
        );
        Ok(())
    }

    pub fn units(&self) -> &[BinaryLogisticUnit<B, O>] {
        &self.units
    }

    pub fn n_classes(&self) -> usize {
        self.units.len()
    }

    pub fn n_features(&self) -> Option<usize> {
        self.units.first().and_then(BinaryLogisticUnit::n_features)
    }

    pub fn is_fitted(&self) -> bool {
        !self.units.is_empty()
    }

    pub fn optimizer(&self) -> &O {
        &self.optimizer
    }

    pub fn parallelism(&self) -> Parallelism {
        self.parallelism
    }

    fn ensure_fitted(&self) -> Result<()> {
        if self.units.is_empty() {
            return Err(ModelError::UninitializedModel);
        }
        Ok(())
    }

    fn predicted_and_true(&self, x: &Tensor2D<B>, y: &Tensor2D<B>) -> Result<Vec<(usize, usize)>> {
        self.ensure_fitted()?;
        let (m, _) = x.shape();
        let (y_rows, y_cols) = y.shape();
        if m == 0 {
            return Err(ModelError::EmptyData("no samples to evaluate".to_string()));
        }
        if y_rows != m {
            return Err(ModelError::shape(
                format!("{m} label rows"),
                format!("{y_rows} label rows"),
            ));
        }
        if y_cols != self.n_classes() {
            return Err(ModelError::shape(
                format!("{} label columns", self.n_classes()),
                format!("{y_cols} label columns"),
            ));
        }

        let probabilities = self.predict_batch(x)?;
        Ok(probabilities
            .iter()
            .enumerate()
            .map(|(i, p)| (argmax(p), argmax(&y.row(i).to_vec())))
            .collect())
    }
}

impl<B: Backend, O: Optimizer<B>> InferenceModel<B> for OneVsRestClassifier<B, O> {
    type InputSingle = Tensor1D<B>;
    type OutputSingle = Vec<f64>;
    type InputBatch = Tensor2D<B>;
    type OutputBatch = Vec<Vec<f64>>;

    /// One probability per class, in class order.
    fn predict(&self, input: &Tensor1D<B>) -> Result<Vec<f64>> {
        self.ensure_fitted()?;
        self.units
            .iter()
            .map(|unit| unit.predict(input).map(|p| p.to_f64()))
            .collect()
    }

    /// One row of per-class probabilities per input row.
    fn predict_batch(&self, input: &Tensor2D<B>) -> Result<Vec<Vec<f64>>> {
        self.ensure_fitted()?;
        let columns = self
            .units
            .iter()
            .map(|unit| unit.predict_batch(input).map(|p| p.to_vec()))
            .collect::<Result<Vec<_>>>()?;
        Ok((0..input.rows())
            .map(|i| columns.iter().map(|col| col[i]).collect())
            .collect())
    }
}

fn validate_records(records: &[SerializableLogisticParams]) -> std::result::Result<(), String> {
    let first = records
        .first()
        .ok_or_else(|| "model holds no class records".to_string())?;
    if first.weights.is_empty() {
        return Err("class 0 has no weights".to_string());
    }
    if let Some((c, r)) = records
        .iter()
        .enumerate()
        .find(|(_, r)| r.weights.len() != first.weights.len())
    {
        return Err(format!(
            "class {c} has {} weights, expected {}",
            r.weights.len(),
            first.weights.len()
        ));
    }
    Ok(())
}

fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

fn ratio(pairs: &[(usize, usize)]) -> f64 {
    let hits = pairs.iter().filter(|(p, t)| p == t).count();
    hits as f64 / pairs.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{CpuBackend, Scalar};
    use crate::optimizer::{BatchGradientDescent, GradientDescent, StochasticGradientDescent};
    use std::fs;

    fn tensor2d(rows: &[Vec<f64>]) -> Tensor2D<CpuBackend> {
        Tensor2D::from_rows(rows).unwrap()
    }

    /// Three well separated clusters, three samples each.
    fn blobs() -> (Tensor2D<CpuBackend>, Tensor2D<CpuBackend>) {
        let xs = [
            [0.1, 0.1],
            [0.2, 0.1],
            [0.1, 0.2],
            [0.9, 0.1],
            [0.8, 0.2],
            [0.9, 0.2],
            [0.1, 0.9],
            [0.2, 0.8],
            [0.1, 0.8],
        ];
        let x: Vec<Vec<f64>> = xs.iter().map(|r| r.to_vec()).collect();
        let y: Vec<Vec<f64>> = (0..xs.len())
            .map(|i| (0..3).map(|c| if i / 3 == c { 1.0 } else { 0.0 }).collect())
            .collect();
        (tensor2d(&x), tensor2d(&y))
    }

    fn hand_built() -> OneVsRestClassifier<CpuBackend, BatchGradientDescent> {
        let params = vec![
            LogisticParams {
                weights: Tensor1D::new(vec![10.0, -10.0]),
                bias: Scalar::new(0.0),
            },
            LogisticParams {
                weights: Tensor1D::new(vec![-10.0, 10.0]),
                bias: Scalar::new(0.0),
            },
        ];
        OneVsRestClassifier::from_params(BatchGradientDescent::default(), params).unwrap()
    }

    #[test]
    fn test_shape_law() {
        let (x, y) = blobs();
        let mut ovr = OneVsRestClassifier::new(BatchGradientDescent::new(0.5, 100));
        assert!(!ovr.is_fitted());

        ovr.fit(&x, &y).unwrap();

        assert_eq!(ovr.n_classes(), 3);
        assert_eq!(ovr.units().len(), 3);
        assert_eq!(ovr.n_features(), Some(2));
        let p = ovr.predict(&Tensor1D::new(vec![0.5, 0.5])).unwrap();
        assert_eq!(p.len(), 3);
        assert!(p.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_batch_blobs_accuracy() {
        let (x, y) = blobs();
        let mut ovr = OneVsRestClassifier::new(BatchGradientDescent::new(0.5, 5_000));
        ovr.fit(&x, &y).unwrap();
        assert_eq!(ovr.accuracy(&x, &y).unwrap(), 1.0);
        assert_eq!(ovr.predict_class(&Tensor1D::new(vec![0.85, 0.15])).unwrap(), 1);
    }

    #[test]
    fn test_stochastic_blobs_accuracy() {
        let (x, y) = blobs();
        let mut ovr = OneVsRestClassifier::new(StochasticGradientDescent::new(0.1, 2_000));
        ovr.fit(&x, &y).unwrap();
        assert_eq!(ovr.accuracy(&x, &y).unwrap(), 1.0);
    }

    #[test]
    fn test_parallel_fit_matches_sequential() {
        let (x, y) = blobs();
        let opt = GradientDescent::from(BatchGradientDescent::new(0.5, 300));

        let mut seq = OneVsRestClassifier::new(opt);
        seq.fit(&x, &y).unwrap();
        let mut par = OneVsRestClassifier::new(opt).with_parallelism(Parallelism::Parallel);
        par.fit(&x, &y).unwrap();

        for (a, b) in seq.units().iter().zip(par.units()) {
            let (a, b) = (a.params().unwrap(), b.params().unwrap());
            assert_eq!(a.weights.to_vec(), b.weights.to_vec());
            assert_eq!(a.bias.to_f64().to_bits(), b.bias.to_f64().to_bits());
        }
    }

    #[test]
    fn test_refit_replaces_units() {
        let (x, y) = blobs();
        let mut ovr = OneVsRestClassifier::new(BatchGradientDescent::new(0.5, 50));
        ovr.fit(&x, &y).unwrap();
        assert_eq!(ovr.n_classes(), 3);

        let y2 = tensor2d(&(0..9).map(|i| vec![(i % 2) as f64, 1.0 - (i % 2) as f64]).collect::<Vec<_>>());
        ovr.fit(&x, &y2).unwrap();
        assert_eq!(ovr.n_classes(), 2);
    }

    #[test]
    fn test_fit_errors() {
        let (x, _) = blobs();
        let mut ovr = OneVsRestClassifier::new(BatchGradientDescent::new(0.5, 10));

        let short = tensor2d(&[vec![1.0, 0.0]]);
        assert!(matches!(
            ovr.fit(&x, &short).unwrap_err(),
            ModelError::ShapeMismatch { .. }
        ));

        let no_classes = Tensor2D::<CpuBackend>::new(vec![], 9, 0);
        assert!(matches!(
            ovr.fit(&x, &no_classes).unwrap_err(),
            ModelError::EmptyData(_)
        ));
    }

    #[test]
    fn test_failed_fit_keeps_previous_units() {
        let (x, y) = blobs();
        let mut ovr = OneVsRestClassifier::new(BatchGradientDescent::new(0.5, 10));
        ovr.fit(&x, &y).unwrap();

        let no_features = Tensor2D::<CpuBackend>::new(vec![], 9, 0);
        let err = ovr.fit(&no_features, &y).unwrap_err();
        assert!(matches!(err, ModelError::EmptyData(_)));
        assert_eq!(ovr.n_classes(), 3);
        assert_eq!(ovr.n_features(), Some(2));
    }

    #[test]
    fn test_uninitialized_errors() {
        let ovr = OneVsRestClassifier::<CpuBackend, _>::new(BatchGradientDescent::default());
        let x = tensor2d(&[vec![1.0, 0.0]]);
        let y = tensor2d(&[vec![1.0, 0.0]]);

        assert!(matches!(
            ovr.predict(&x.row(0)).unwrap_err(),
            ModelError::UninitializedModel
        ));
        assert!(matches!(
            ovr.predict_batch(&x).unwrap_err(),
            ModelError::UninitializedModel
        ));
        assert!(matches!(
            ovr.accuracy(&x, &y).unwrap_err(),
            ModelError::UninitializedModel
        ));

        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ovr.save(dir.path().join("m.json")).unwrap_err(),
            ModelError::UninitializedModel
        ));
    }

    #[test]
    fn test_accuracy_boundaries() {
        let ovr = hand_built();
        let x = tensor2d(&[vec![1.0, 0.0], vec![0.0, 1.0], vec![0.9, 0.1]]);
        let right = tensor2d(&[vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0]]);
        let wrong = tensor2d(&[vec![0.0, 1.0], vec![1.0, 0.0], vec![0.0, 1.0]]);

        assert_eq!(ovr.accuracy(&x, &right).unwrap(), 1.0);
        assert_eq!(ovr.accuracy(&x, &wrong).unwrap(), 0.0);

        let half = tensor2d(&[vec![1.0, 0.0], vec![1.0, 0.0]]);
        let x2 = tensor2d(&[vec![1.0, 0.0], vec![0.0, 1.0]]);
        assert_eq!(ovr.accuracy_with_labels(&x2, &half, &["left", "right"]).unwrap(), 0.5);
    }

    #[test]
    fn test_accuracy_shape_checks() {
        let ovr = hand_built();
        let x = tensor2d(&[vec![1.0, 0.0]]);

        let three_cols = tensor2d(&[vec![1.0, 0.0, 0.0]]);
        assert!(matches!(
            ovr.accuracy(&x, &three_cols).unwrap_err(),
            ModelError::ShapeMismatch { .. }
        ));

        let two_rows = tensor2d(&[vec![1.0, 0.0], vec![0.0, 1.0]]);
        assert!(matches!(
            ovr.accuracy(&x, &two_rows).unwrap_err(),
            ModelError::ShapeMismatch { .. }
        ));

        let empty = Tensor2D::<CpuBackend>::new(vec![], 0, 2);
        assert!(matches!(
            ovr.accuracy(&empty, &empty).unwrap_err(),
            ModelError::EmptyData(_)
        ));

        let wide = tensor2d(&[vec![1.0, 0.0, 3.0]]);
        assert!(matches!(
            ovr.accuracy(&wide, &tensor2d(&[vec![1.0, 0.0]])).unwrap_err(),
            ModelError::ShapeMismatch { .. }
        ));
    }

    #[test]
    fn test_predict_class_ties_go_to_lowest_index() {
        let params = vec![LogisticParams::zeros(2), LogisticParams::zeros(2), LogisticParams::zeros(2)];
        let ovr =
            OneVsRestClassifier::<CpuBackend, _>::from_params(BatchGradientDescent::default(), params)
                .unwrap();
        assert_eq!(ovr.predict_class(&Tensor1D::new(vec![3.0, -1.0])).unwrap(), 0);
        assert_eq!(argmax(&[0.2, 0.7, 0.7]), 1);
    }

    #[test]
    fn test_from_params_rejects_mixed_widths() {
        let params = vec![
            LogisticParams::<CpuBackend>::zeros(2),
            LogisticParams::<CpuBackend>::zeros(3),
        ];
        let err = OneVsRestClassifier::from_params(BatchGradientDescent::default(), params).unwrap_err();
        assert!(matches!(err, ModelError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_save_load_round_trip() {
        let (x, y) = blobs();
        let mut ovr = OneVsRestClassifier::new(StochasticGradientDescent::new(0.1, 500));
        ovr.fit(&x, &y).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        ovr.save(&path).unwrap();

        let loaded =
            OneVsRestClassifier::<CpuBackend, _>::from_file(StochasticGradientDescent::default(), &path)
                .unwrap();
        assert_eq!(loaded.n_classes(), 3);
        for (a, b) in ovr.units().iter().zip(loaded.units()) {
            let (a, b) = (a.params().unwrap(), b.params().unwrap());
            let bits = |v: Vec<f64>| v.into_iter().map(f64::to_bits).collect::<Vec<_>>();
            assert_eq!(bits(a.weights.to_vec()), bits(b.weights.to_vec()));
            assert_eq!(a.bias.to_f64().to_bits(), b.bias.to_f64().to_bits());
        }
        assert_eq!(ovr.predict_batch(&x).unwrap(), loaded.predict_batch(&x).unwrap());
    }

    #[test]
    fn test_failed_load_leaves_state_untouched() {
        let mut ovr = hand_built();
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            ovr.load(&missing).unwrap_err(),
            ModelError::PersistenceNotFound { .. }
        ));

        let no_bias = dir.path().join("no_bias.json");
        fs::write(&no_bias, r#"[{"weights": [1.0, 2.0]}]"#).unwrap();
        assert!(matches!(
            ovr.load(&no_bias).unwrap_err(),
            ModelError::PersistenceCorrupt { .. }
        ));

        let empty_list = dir.path().join("empty.json");
        fs::write(&empty_list, "[]").unwrap();
        assert!(matches!(
            ovr.load(&empty_list).unwrap_err(),
            ModelError::PersistenceCorrupt { .. }
        ));

        let ragged = dir.path().join("ragged.json");
        fs::write(
            &ragged,
            r#"[{"weights": [1.0, 2.0], "bias": 0.0}, {"weights": [1.0], "bias": 0.0}]"#,
        )
        .unwrap();
        assert!(matches!(
            ovr.load(&ragged).unwrap_err(),
            ModelError::PersistenceCorrupt { .. }
        ));

        assert_eq!(ovr.n_classes(), 2);
        assert_eq!(
            ovr.units()[0].params().unwrap().weights.to_vec(),
            vec![10.0, -10.0]
        );
    }

    #[test]
    fn test_load_replaces_fitted_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("three.json");
        fs::write(
            &path,
            r#"[
                {"weights": [1.0], "bias": 0.5},
                {"weights": [2.0], "bias": -0.5},
                {"weights": [3.0], "bias": 0.0}
            ]"#,
        )
        .unwrap();

        let mut ovr = hand_built();
        ovr.load(&path).unwrap();
        assert_eq!(ovr.n_classes(), 3);
        assert_eq!(ovr.n_features(), Some(1));
        assert_eq!(ovr.units()[1].params().unwrap().bias.to_f64(), -0.5);
    }
}
