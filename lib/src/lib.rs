//! # dslr
//!
//! Multi-class classification with One-vs-Rest logistic regression, trained by
//! batch or stochastic gradient descent over pluggable tensor backends.
//!
//! ## Core Design Principles
//!
//! - **Backend Agnosticism**: models and optimizers are generic over the
//!   [`Backend`] trait; a pure-Rust CPU backend is always available and an
//!   `ndarray` one sits behind the `ndarray` feature.
//! - **Training/Inference Separation**: optimizers own the training algorithm
//!   and return plain parameters; models hold parameters and predict.
//! - **Explicit errors**: every fallible operation returns [`ModelError`] or a
//!   module-specific error; nothing panics on bad input data.
//!
//! ## Quick Start
//!
//! ```rust
//! use dslr::backend::{CpuBackend, Tensor1D, Tensor2D};
//! use dslr::model::{InferenceModel, OneVsRestClassifier};
//! use dslr::optimizer::{GradientDescent, OptimizerKind};
//!
//! let x = Tensor2D::<CpuBackend>::from_rows(&[
//!     vec![0.9, 0.1],
//!     vec![0.8, 0.2],
//!     vec![0.1, 0.9],
//!     vec![0.2, 0.8],
//! ]).unwrap();
//! let y = Tensor2D::<CpuBackend>::from_rows(&[
//!     vec![1.0, 0.0],
//!     vec![1.0, 0.0],
//!     vec![0.0, 1.0],
//!     vec![0.0, 1.0],
//! ]).unwrap();
//!
//! let optimizer = GradientDescent::from_kind(OptimizerKind::Batch, Some(0.5), Some(2_000));
//! let mut model = OneVsRestClassifier::new(optimizer);
//! model.fit(&x, &y).unwrap();
//!
//! assert_eq!(model.predict_class(&Tensor1D::new(vec![0.85, 0.15])).unwrap(), 0);
//! assert_eq!(model.accuracy(&x, &y).unwrap(), 1.0);
//! ```
//!
//! ## Module Structure
//!
//! - `backend`: tensor abstractions and computation primitives (`Tensor1D`, `Tensor2D`)
//! - `activation`: the numerically stable logistic sigmoid
//! - `model`: the binary logistic unit and the One-vs-Rest classifier
//! - `optimizer`: batch and stochastic gradient descent
//! - `serialization`: model file reading and writing
//! - `parallel`: optional rayon parallelism for per-class training
//! - `dataset`: CSV ingestion
//! - `preprocessing`: imputation, scaling and label encoding
//! - `logging`: tracing subscriber setup for the binaries

pub mod backend;

/// Logistic sigmoid.
pub mod activation;

/// Error type shared by models, optimizers and persistence.
pub mod error;

/// Logistic models with explicit fitted/unfitted state.
pub mod model;

/// Gradient descent strategies.
pub mod optimizer;

/// Model persistence.
pub mod serialization;

pub mod parallel;

/// CSV dataset loading.
pub mod dataset;

/// Data preprocessing transformers.
pub mod preprocessing;

pub mod logging;

pub use backend::{Backend, CpuBackend, ScalarOps, Tensor1D, Tensor2D};
pub use error::{ModelError, Result};
