use super::scalar::Scalar;
use crate::backend::Backend;
use std::marker::PhantomData;

/// Backend-typed 1D tensor.
///
/// Wraps a backend's native 1D tensor (`B::Tensor1D`) and carries the backend as a
/// phantom type so tensors from different backends cannot be combined.
///
/// ```compile_fail
/// use dslr::backend::{CpuBackend, NdarrayBackend, Tensor1D};
///
/// let cpu_tensor: Tensor1D<CpuBackend> = Tensor1D::zeros(3);
/// let ndarray_tensor: Tensor1D<NdarrayBackend> = Tensor1D::zeros(3);
/// let _ = cpu_tensor.sub(&ndarray_tensor);
/// ```
///
/// # Example
/// ```
/// use dslr::backend::{CpuBackend, Scalar, Tensor1D};
///
/// let x: Tensor1D<CpuBackend> = Tensor1D::new(vec![1.0, 2.0, 3.0]);
/// assert_eq!(x.len(), 3);
///
/// let y = x.scale(&Scalar::<CpuBackend>::new(2.0));
/// assert_eq!(y.to_vec(), vec![2.0, 4.0, 6.0]);
/// ```
#[derive(Clone)]
pub struct Tensor1D<B: Backend> {
    pub(crate) data: B::Tensor1D,
    pub(crate) backend: PhantomData<B>,
}

impl<B: Backend> std::fmt::Debug for Tensor1D<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Tensor1D").field(&self.to_vec()).finish()
    }
}

impl<B: Backend> Tensor1D<B> {
    fn wrap(data: B::Tensor1D) -> Self {
        Self {
            data,
            backend: PhantomData,
        }
    }

    /// Creates a new 1D tensor from owned `f64` values.
    ///
    /// ```
    /// use dslr::backend::{CpuBackend, Tensor1D};
    ///
    /// let t: Tensor1D<CpuBackend> = Tensor1D::new(vec![1.0, 2.5, 3.75]);
    /// assert_eq!(t.to_vec(), vec![1.0, 2.5, 3.75]);
    /// ```
    pub fn new(data: Vec<f64>) -> Self {
        Self::wrap(B::from_vec_1d(data))
    }

    /// Creates a 1D tensor filled with zeros of specified length.
    pub fn zeros(len: usize) -> Self {
        Self::wrap(B::zeros_1d(len))
    }

    /// Element-wise addition: `self + other`.
    ///
    /// # Panics
    /// If tensors have different lengths.
    pub fn add(&self, other: &Self) -> Self {
        Self::wrap(B::add_1d(&self.data, &other.data))
    }

    /// Element-wise subtraction: `self - other`.
    ///
    /// # Panics
    /// If tensors have different lengths.
    pub fn sub(&self, other: &Self) -> Self {
        Self::wrap(B::sub_1d(&self.data, &other.data))
    }

    /// Element-wise (Hadamard) product.
    pub fn mul(&self, other: &Self) -> Self {
        Self::wrap(B::mul_1d(&self.data, &other.data))
    }

    /// Multiplies every element by `a`.
    pub fn scale(&self, a: &Scalar<B>) -> Self {
        Self::wrap(B::mul_scalar_1d(&self.data, &a.data))
    }

    /// Adds `a` to every element.
    pub fn add_scalar(&self, a: &Scalar<B>) -> Self {
        Self::wrap(B::add_scalar_1d(&self.data, &a.data))
    }

    /// Sum of all elements.
    pub fn sum(&self) -> Scalar<B> {
        Scalar {
            data: B::sum_all_1d(&self.data),
            backend: PhantomData,
        }
    }

    /// Inner product `Σ self[i] * other[i]`.
    ///
    /// ```
    /// use dslr::backend::{CpuBackend, Tensor1D};
    ///
    /// let a = Tensor1D::<CpuBackend>::new(vec![1.0, 2.0, 3.0]);
    /// let b = Tensor1D::<CpuBackend>::new(vec![4.0, 5.0, 6.0]);
    /// assert_eq!(a.dot(&b).to_f64(), 32.0);
    /// ```
    pub fn dot(&self, other: &Self) -> Scalar<B> {
        self.mul(other).sum()
    }

    /// Element-wise logistic function.
    pub fn sigmoid(&self) -> Self {
        Self::wrap(B::sigmoid_1d(&self.data))
    }

    /// Copies the contents into a host vector.
    pub fn to_vec(&self) -> Vec<f64> {
        B::to_vec_1d(&self.data)
    }

    pub fn len(&self) -> usize {
        B::len_1d(&self.data)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
