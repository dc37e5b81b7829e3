use super::Backend;
use crate::activation::sigmoid;
use ndarray::{Array1, Array2, Axis};

/// Tensor backend implemented on top of the `ndarray` crate.
///
/// # Type mappings
/// - `Scalar`: `f64`
/// - `Tensor1D`: `ndarray::Array1<f64>`
/// - `Tensor2D`: [`NdarrayTensor2D`] wrapper around `ndarray::Array2<f64>`
#[derive(Clone, Debug, Copy)]
pub struct NdarrayBackend;

/// Wrapper type for 2D tensors using ndarray's `Array2<f64>`.
///
/// # Example
/// ```
/// use dslr::backend::{Backend, NdarrayBackend};
///
/// let tensor = NdarrayBackend::from_vec_2d(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3);
/// assert_eq!(tensor.0.shape(), &[2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct NdarrayTensor2D(pub Array2<f64>);

fn array2_from_row_major(data: &[f64], rows: usize, cols: usize) -> Array2<f64> {
    assert_eq!(data.len(), rows * cols, "Inconsistent shape");
    Array2::from_shape_fn((rows, cols), |(i, j)| data[i * cols + j])
}

impl Backend for NdarrayBackend {
    type Scalar = f64;
    type Tensor1D = Array1<f64>;
    type Tensor2D = NdarrayTensor2D;

    fn zeros_1d(len: usize) -> Self::Tensor1D {
        Array1::zeros(len)
    }

    fn from_vec_1d(data: Vec<f64>) -> Self::Tensor1D {
        Array1::from_vec(data)
    }

    fn from_vec_2d(data: Vec<f64>, rows: usize, cols: usize) -> Self::Tensor2D {
        NdarrayTensor2D(array2_from_row_major(&data, rows, cols))
    }

    fn add_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        assert_eq!(a.len(), b.len(), "Length mismatch");
        a + b
    }

    fn sub_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        assert_eq!(a.len(), b.len(), "Length mismatch");
        a - b
    }

    fn mul_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        assert_eq!(a.len(), b.len(), "Length mismatch");
        a * b
    }

    fn mul_scalar_1d(t: &Self::Tensor1D, s: &Self::Scalar) -> Self::Tensor1D {
        t * *s
    }

    fn add_scalar_1d(t: &Self::Tensor1D, s: &Self::Scalar) -> Self::Tensor1D {
        t + *s
    }

    fn sigmoid_1d(x: &Self::Tensor1D) -> Self::Tensor1D {
        x.mapv(sigmoid)
    }

    // Reductions fold left from 0.0 in row order, matching the CPU backend bit
    // for bit. `dot` and `sum` do not fix their summation order.
    fn sum_all_1d(t: &Self::Tensor1D) -> Self::Scalar {
        t.iter().fold(0.0, |acc, v| acc + v)
    }

    fn scalar_f64(value: f64) -> Self::Scalar {
        value
    }

    fn to_vec_1d(t: &Self::Tensor1D) -> Vec<f64> {
        t.to_vec()
    }

    fn len_1d(t: &Self::Tensor1D) -> usize {
        t.len()
    }

    fn matvec(a: &Self::Tensor2D, x: &Self::Tensor1D) -> Self::Tensor1D {
        assert_eq!(a.0.ncols(), x.len(), "matvec: A.cols != x.len");
        a.0.outer_iter()
            .map(|row| row.iter().zip(x.iter()).fold(0.0, |acc, (a, b)| acc + a * b))
            .collect()
    }

    fn matvec_transposed(a: &Self::Tensor2D, x: &Self::Tensor1D) -> Self::Tensor1D {
        assert_eq!(a.0.nrows(), x.len(), "matvec_transposed: A.rows != x.len");
        let mut out = Array1::zeros(a.0.ncols());
        for (row, xi) in a.0.outer_iter().zip(x.iter()) {
            for (acc, aij) in out.iter_mut().zip(row.iter()) {
                *acc += aij * xi;
            }
        }
        out
    }

    fn shape(t: &Self::Tensor2D) -> (usize, usize) {
        t.0.dim()
    }

    fn row_2d(t: &Self::Tensor2D, index: usize) -> Self::Tensor1D {
        t.0.index_axis(Axis(0), index).to_owned()
    }

    fn column_2d(t: &Self::Tensor2D, index: usize) -> Self::Tensor1D {
        t.0.index_axis(Axis(1), index).to_owned()
    }
}
