//! Imputation transformers for handling missing values.
//!
//! Missing values are `NaN` cells, as produced by
//! [`read_csv`](crate::dataset::read_csv) for empty fields.

pub mod simple;

pub use simple::{FittedMeanImputer, MeanImputer};
