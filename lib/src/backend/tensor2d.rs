use super::tensor1d::Tensor1D;
use crate::backend::Backend;
use crate::error::{ModelError, Result};
use std::marker::PhantomData;

/// Backend-typed 2D tensor: one sample per row, one feature per column.
///
/// # Example
/// ```
/// use dslr::backend::{CpuBackend, Tensor2D};
///
/// let x = Tensor2D::<CpuBackend>::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// assert_eq!(x.shape(), (2, 2));
/// assert_eq!(x.row(1).to_vec(), vec![3.0, 4.0]);
/// ```
#[derive(Clone)]
pub struct Tensor2D<B: Backend> {
    pub(crate) data: B::Tensor2D,
    pub(crate) backend: PhantomData<B>,
}

impl<B: Backend> std::fmt::Debug for Tensor2D<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (rows, cols) = self.shape();
        f.debug_struct("Tensor2D")
            .field("rows", &rows)
            .field("cols", &cols)
            .finish()
    }
}

impl<B: Backend> Tensor2D<B> {
    /// Creates a tensor from row-major data.
    ///
    /// # Panics
    /// If `data.len() != rows * cols`.
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> Self {
        Self {
            data: B::from_vec_2d(data, rows, cols),
            backend: PhantomData,
        }
    }

    /// Builds a tensor from a slice of rows.
    ///
    /// An empty slice yields a `0 × 0` tensor.
    ///
    /// # Errors
    /// [`ModelError::ShapeMismatch`] if the rows have different lengths.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(ModelError::ShapeMismatch {
                expected: format!("{cols} columns"),
                got: format!("{} columns in row {i}", row.len()),
            });
        }
        let data: Vec<f64> = rows.iter().flatten().copied().collect();
        Ok(Self::new(data, rows.len(), cols))
    }

    /// Matrix-vector product `self · x`.
    pub fn dot(&self, x: &Tensor1D<B>) -> Tensor1D<B> {
        Tensor1D {
            data: B::matvec(&self.data, &x.data),
            backend: PhantomData,
        }
    }

    /// Transposed matrix-vector product `selfᵗ · x`.
    pub fn tdot(&self, x: &Tensor1D<B>) -> Tensor1D<B> {
        Tensor1D {
            data: B::matvec_transposed(&self.data, &x.data),
            backend: PhantomData,
        }
    }

    /// Returns `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        B::shape(&self.data)
    }

    pub fn rows(&self) -> usize {
        self.shape().0
    }

    pub fn cols(&self) -> usize {
        self.shape().1
    }

    /// Copies row `index` out as a 1D tensor.
    pub fn row(&self, index: usize) -> Tensor1D<B> {
        Tensor1D {
            data: B::row_2d(&self.data, index),
            backend: PhantomData,
        }
    }

    /// Copies column `index` out as a 1D tensor.
    pub fn column(&self, index: usize) -> Tensor1D<B> {
        Tensor1D {
            data: B::column_2d(&self.data, index),
            backend: PhantomData,
        }
    }
}
