//! # Backend Abstraction
//!
//! This module provides a trait-based abstraction over computation backends,
//! so the logistic units and their optimizers run unchanged on different tensor
//! libraries.
//!
//! ## Design Philosophy
//!
//! - **Minimal trait surface**: only the operations gradient-descent training of a
//!   logistic unit needs (matrix-vector products, element-wise arithmetic,
//!   reductions, sigmoid, row/column slicing).
//! - **Zero-cost generics**: backend selection happens at compile time via type
//!   parameters, avoiding runtime dispatch overhead.
//! - **Type-safe tensor handling**: each backend defines its own tensor types that
//!   the [`Tensor1D`], [`Tensor2D`] and [`Scalar`] wrappers carry around together
//!   with the backend marker.
//!
//! ## Available Backends
//!
//! | Backend          | Feature   | Use Case                          |
//! |------------------|-----------|-----------------------------------|
//! | `CpuBackend`     | always on | Default, pure-Rust implementation |
//! | `NdarrayBackend` | `ndarray` | Interop with `ndarray` ecosystem  |
//!
//! ## Example
//!
//! ```rust
//! use dslr::backend::{CpuBackend, Tensor1D, Tensor2D};
//!
//! let x: Tensor1D<CpuBackend> = Tensor1D::new(vec![1.0, 2.0]);
//! let w: Tensor2D<CpuBackend> = Tensor2D::new(vec![0.5, 0.5, 0.5, 0.5], 2, 2);
//!
//! let y = w.dot(&x);
//! assert_eq!(y.to_vec(), vec![1.5, 1.5]);
//! ```

pub mod cpu;
/// Pure-Rust CPU backend implementation with zero external dependencies.
pub use cpu::{CpuBackend, CpuTensor2D};

#[cfg(feature = "ndarray")]
mod ndarray_backend;
#[cfg(feature = "ndarray")]
/// Backend backed by the `ndarray` crate for ecosystem interoperability.
pub use ndarray_backend::{NdarrayBackend, NdarrayTensor2D};

/// Scalar value representation and arithmetic operations.
pub mod scalar;
/// One-dimensional tensor abstraction.
pub mod tensor1d;
/// Two-dimensional tensor abstraction.
pub mod tensor2d;

pub use scalar::{Scalar, ScalarOps};
pub use tensor1d::Tensor1D;
pub use tensor2d::Tensor2D;

/// Abstraction over tensor storage and the operations used by training and inference.
///
/// # Safety Guarantees
///
/// - Shape-sensitive operations (`matvec`, `matvec_transposed`, element-wise ops)
///   panic on mismatch; the model layer validates shapes before calling them and
///   reports [`crate::error::ModelError::ShapeMismatch`] instead.
/// - Tensor types are `Clone + Send + Sync` so a feature matrix can be shared
///   across per-class training threads.
pub trait Backend: Clone + Copy + Send + Sync + 'static {
    /// Scalar type supporting arithmetic operations.
    type Scalar: ScalarOps;

    /// One-dimensional tensor type.
    type Tensor1D: Clone + Send + Sync;

    /// Two-dimensional tensor type (row-major semantics).
    type Tensor2D: Clone + Send + Sync;

    // --- Constructors ---

    /// Creates a 1D tensor filled with zeros of given length.
    fn zeros_1d(len: usize) -> Self::Tensor1D;

    /// Constructs a 1D tensor from owned data.
    fn from_vec_1d(data: Vec<f64>) -> Self::Tensor1D;

    /// Constructs a 2D tensor from row-major ordered data.
    ///
    /// # Panics
    /// If `data.len() != rows * cols`.
    fn from_vec_2d(data: Vec<f64>, rows: usize, cols: usize) -> Self::Tensor2D;

    // --- Element-wise operations (1D) ---

    /// Element-wise addition of two 1D tensors.
    fn add_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D;

    /// Element-wise subtraction of two 1D tensors.
    fn sub_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D;

    /// Element-wise multiplication of two 1D tensors.
    fn mul_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D;

    /// Multiplies each element of tensor by a scalar.
    fn mul_scalar_1d(t: &Self::Tensor1D, s: &Self::Scalar) -> Self::Tensor1D;

    /// Adds a scalar to each element of tensor.
    fn add_scalar_1d(t: &Self::Tensor1D, s: &Self::Scalar) -> Self::Tensor1D;

    /// Element-wise logistic function, see [`crate::activation::sigmoid`].
    fn sigmoid_1d(t: &Self::Tensor1D) -> Self::Tensor1D;

    // --- Reductions and access ---

    /// Computes the sum of all elements in a 1D tensor.
    fn sum_all_1d(t: &Self::Tensor1D) -> Self::Scalar;

    /// Creates a backend-specific scalar from an f64 value.
    fn scalar_f64(value: f64) -> Self::Scalar;

    /// Converts a 1D tensor to a Vec of f64 values.
    fn to_vec_1d(t: &Self::Tensor1D) -> Vec<f64>;

    /// Returns the number of elements in a 1D tensor.
    fn len_1d(t: &Self::Tensor1D) -> usize;

    // --- Linear algebra ---

    /// Computes `A · x` where `A` is (m × n) and `x` is (n,).
    fn matvec(a: &Self::Tensor2D, x: &Self::Tensor1D) -> Self::Tensor1D;

    /// Computes `Aᵗ · x` where `A` is (m × n) and `x` is (m,).
    fn matvec_transposed(a: &Self::Tensor2D, x: &Self::Tensor1D) -> Self::Tensor1D;

    /// Returns the shape of a 2D tensor as (rows, cols).
    fn shape(t: &Self::Tensor2D) -> (usize, usize);

    /// Copies row `index` of a 2D tensor into a 1D tensor.
    fn row_2d(t: &Self::Tensor2D, index: usize) -> Self::Tensor1D;

    /// Copies column `index` of a 2D tensor into a 1D tensor.
    fn column_2d(t: &Self::Tensor2D, index: usize) -> Self::Tensor1D;
}
