//! Tabular dataset ingestion.
//!
//! A dataset is a CSV file with a header row. A [`DatasetSchema`] names the columns
//! the classifier cares about: an optional row index, the class label and the
//! numeric feature columns. Everything else in the file is ignored.
//!
//! Loading produces a [`LabeledTable`]: one row of features per record (missing
//! cells as `NaN`), the label when present, and the row index.
//!
//! # Example
//!
//! ```no_run
//! use dslr::dataset::{read_csv, DatasetSchema};
//!
//! let schema = DatasetSchema::default();
//! let table = read_csv("datasets/dataset_train.csv", &schema)?.drop_incomplete();
//! println!("{} complete rows", table.len());
//! # Ok::<(), dslr::dataset::DatasetError>(())
//! ```

mod csv_reader;
mod csv_writer;

pub use csv_reader::read_csv;
pub use csv_writer::write_predictions;

use crate::backend::{Backend, Tensor2D};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a dataset or writing predictions.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("could not read dataset {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("required column `{column}` not found")]
    MissingColumn { column: String },

    #[error("invalid value {value:?} in column `{column}` at row {row}")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
    },

    /// A row lacks the class label where one is required.
    #[error("row {row} has no label")]
    MissingLabel { row: usize },

    #[error("{indices} row indices but {names} predictions")]
    LengthMismatch { indices: usize, names: usize },
}

/// Column layout of a dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct DatasetSchema {
    /// Column holding the row index; row positions are used when absent.
    pub index_column: String,
    pub label_column: String,
    pub feature_columns: Vec<String>,
    /// Class names in model order: class `c` is trained on label `classes[c]`.
    pub classes: Vec<String>,
}

pub const HOGWARTS_COURSES: [&str; 13] = [
    "Arithmancy",
    "Astronomy",
    "Herbology",
    "Defense Against the Dark Arts",
    "Divination",
    "Muggle Studies",
    "Ancient Runes",
    "History of Magic",
    "Transfiguration",
    "Potions",
    "Care of Magical Creatures",
    "Charms",
    "Flying",
];

pub const HOGWARTS_HOUSES: [&str; 4] = ["Gryffindor", "Hufflepuff", "Ravenclaw", "Slytherin"];

impl Default for DatasetSchema {
    /// The Hogwarts student records: 13 course scores, 4 houses.
    fn default() -> Self {
        Self {
            index_column: "Index".to_string(),
            label_column: "Hogwarts House".to_string(),
            feature_columns: HOGWARTS_COURSES.iter().map(|c| c.to_string()).collect(),
            classes: HOGWARTS_HOUSES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Rows read from a dataset file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabeledTable {
    feature_names: Vec<String>,
    indices: Vec<usize>,
    features: Vec<Vec<f64>>,
    labels: Vec<Option<String>>,
}

impl LabeledTable {
    /// # Panics
    /// If `indices`, `features` and `labels` differ in length, or a feature row
    /// is not as wide as `feature_names`.
    pub(crate) fn new(
        feature_names: Vec<String>,
        indices: Vec<usize>,
        features: Vec<Vec<f64>>,
        labels: Vec<Option<String>>,
    ) -> Self {
        assert_eq!(indices.len(), features.len(), "index/feature row count");
        assert_eq!(labels.len(), features.len(), "label/feature row count");
        assert!(
            features.iter().all(|r| r.len() == feature_names.len()),
            "feature row width"
        );
        Self {
            feature_names,
            indices,
            features,
            labels,
        }
    }

    /// Keeps only rows with every feature present and a label.
    pub fn drop_incomplete(self) -> Self {
        let before = self.len();
        let mut table = LabeledTable {
            feature_names: self.feature_names,
            ..Default::default()
        };
        for ((index, row), label) in self
            .indices
            .into_iter()
            .zip(self.features)
            .zip(self.labels)
        {
            if label.is_some() && row.iter().all(|v| !v.is_nan()) {
                table.indices.push(index);
                table.features.push(row);
                table.labels.push(label);
            }
        }
        tracing::debug!(before, after = table.len(), "incomplete rows dropped");
        table
    }

    /// Labels of every row, failing on the first row without one.
    pub fn required_labels(&self) -> Result<Vec<&str>, DatasetError> {
        self.labels
            .iter()
            .zip(&self.indices)
            .map(|(label, &row)| label.as_deref().ok_or(DatasetError::MissingLabel { row }))
            .collect()
    }

    /// Features as a `len × feature_names.len()` tensor.
    pub fn feature_matrix<B: Backend>(&self) -> Tensor2D<B> {
        let flat = self.features.iter().flatten().copied().collect();
        Tensor2D::new(flat, self.len(), self.feature_names.len())
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    pub fn labels(&self) -> &[Option<String>] {
        &self.labels
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
