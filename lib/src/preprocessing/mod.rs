//! Data preprocessing for classifier inputs.
//!
//! Features go through [`MeanImputer`] (fill missing cells) and
//! [`MaxAbsScaler`] (bring every column into `[-1, 1]`); labels go through
//! [`LabelBinarizer`] to become the one-hot matrix the
//! [`OneVsRestClassifier`](crate::model::OneVsRestClassifier) trains on.
//!
//! Fitting follows a two-state pattern: a [`Transformer`] learns statistics
//! and returns a [`FittedTransformer`] that applies them.
//!
//! # Example
//!
//! ```
//! use dslr::backend::{CpuBackend, Tensor2D};
//! use dslr::preprocessing::{MaxAbsScaler, MeanImputer, Transformer};
//!
//! let raw = Tensor2D::<CpuBackend>::from_rows(&[
//!     vec![1.0, f64::NAN],
//!     vec![-4.0, 2.0],
//! ]).unwrap();
//!
//! let filled = MeanImputer::new().fit_transform(&raw).unwrap();
//! let scaled = MaxAbsScaler::new().fit_transform(&filled).unwrap();
//! assert_eq!(scaled.row(0).to_vec(), vec![0.25, 1.0]);
//! ```

pub mod encoding;
pub mod error;
pub mod imputation;
pub mod scaling;
pub mod traits;

pub use encoding::LabelBinarizer;
pub use error::PreprocessingError;
pub use imputation::{FittedMeanImputer, MeanImputer};
pub use scaling::{FittedMaxAbsScaler, MaxAbsScaler};
pub use traits::{FittedTransformer, Transformer};
