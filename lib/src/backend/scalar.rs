use crate::backend::Backend;
use std::marker::PhantomData;

/// Scalar operations required by numerical backends.
///
/// Implemented for the primitive floating-point type used by the backends (`f64`).
/// Arithmetic comes from the standard operator traits; the trait itself only adds
/// the host conversion.
///
/// # Example
/// ```
/// use dslr::backend::ScalarOps;
///
/// assert_eq!(2.5f64.to_f64(), 2.5);
/// ```
pub trait ScalarOps:
    Clone
    + Copy
    + Send
    + Sync
    + std::fmt::Debug
    + std::ops::Add<Output = Self>
    + std::ops::Mul<Output = Self>
    + std::ops::Sub<Output = Self>
{
    /// Converts this scalar to an `f64` host value.
    fn to_f64(self) -> f64;
}

impl ScalarOps for f64 {
    fn to_f64(self) -> f64 {
        self
    }
}

/// Backend-typed scalar wrapper.
///
/// Carries phantom information about its originating backend so scalars from
/// different backends cannot be mixed.
///
/// ```compile_fail
/// use dslr::backend::{CpuBackend, NdarrayBackend, Scalar};
///
/// let cpu_scalar: Scalar<CpuBackend> = Scalar::new(1.0);
/// let ndarray_scalar: Scalar<NdarrayBackend> = Scalar::new(2.0);
/// let _ = cpu_scalar + ndarray_scalar;
/// ```
///
/// # Example
/// ```
/// use dslr::backend::{CpuBackend, Scalar};
///
/// let s: Scalar<CpuBackend> = Scalar::new(2.0);
/// assert_eq!((s * s).to_f64(), 4.0);
/// ```
#[derive(Clone, Debug, Copy)]
pub struct Scalar<B: Backend> {
    pub(crate) data: B::Scalar,
    pub(crate) backend: PhantomData<B>,
}

impl<B: Backend> Scalar<B> {
    /// Creates a new scalar from an `f64` host value.
    pub fn new(f: f64) -> Self {
        Self {
            data: B::scalar_f64(f),
            backend: PhantomData,
        }
    }

    /// Converts this backend scalar to a host `f64` value.
    pub fn to_f64(&self) -> f64 {
        self.data.to_f64()
    }

    /// Applies the logistic function to this scalar.
    ///
    /// ```
    /// use dslr::backend::{CpuBackend, Scalar};
    ///
    /// let s: Scalar<CpuBackend> = Scalar::new(0.0);
    /// assert_eq!(s.sigmoid().to_f64(), 0.5);
    /// ```
    pub fn sigmoid(&self) -> Self {
        Self::new(crate::activation::sigmoid(self.to_f64()))
    }
}

impl<B: Backend> std::ops::Add for Scalar<B> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            data: self.data + rhs.data,
            backend: PhantomData,
        }
    }
}

impl<B: Backend> std::ops::Sub for Scalar<B> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            data: self.data - rhs.data,
            backend: PhantomData,
        }
    }
}

impl<B: Backend> std::ops::Mul for Scalar<B> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            data: self.data * rhs.data,
            backend: PhantomData,
        }
    }
}
