use super::Backend;
use crate::activation::sigmoid;

/// Pure-Rust backend storing 1D tensors as `Vec<f64>` and 2D tensors row-major.
#[derive(Clone, Debug, Copy)]
pub struct CpuBackend;

/// Row-major matrix: `(data, rows, cols)`.
#[derive(Debug, Clone)]
pub struct CpuTensor2D(pub Vec<f64>, pub usize, pub usize);

impl CpuTensor2D {
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> Self {
        assert_eq!(data.len(), rows * cols, "Inconsistent shape");
        Self(data, rows, cols)
    }

    fn row(&self, index: usize) -> &[f64] {
        let cols = self.2;
        &self.0[index * cols..(index + 1) * cols]
    }
}

impl Backend for CpuBackend {
    type Scalar = f64;
    type Tensor1D = Vec<f64>;
    type Tensor2D = CpuTensor2D;

    // --- Constructors ---
    fn zeros_1d(len: usize) -> Self::Tensor1D {
        vec![0.; len]
    }

    fn from_vec_1d(data: Vec<f64>) -> Self::Tensor1D {
        data
    }

    fn from_vec_2d(data: Vec<f64>, rows: usize, cols: usize) -> Self::Tensor2D {
        CpuTensor2D::new(data, rows, cols)
    }

    // --- Element-wise ops ---
    fn add_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        assert_eq!(a.len(), b.len(), "Length mismatch");
        a.iter().zip(b.iter()).map(|(a, b)| a + b).collect()
    }

    fn sub_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        assert_eq!(a.len(), b.len(), "Length mismatch");
        a.iter().zip(b.iter()).map(|(a, b)| a - b).collect()
    }

    fn mul_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        assert_eq!(a.len(), b.len(), "Length mismatch");
        a.iter().zip(b.iter()).map(|(a, b)| a * b).collect()
    }

    fn mul_scalar_1d(t: &Self::Tensor1D, s: &Self::Scalar) -> Self::Tensor1D {
        t.iter().map(|x| x * s).collect()
    }

    fn add_scalar_1d(t: &Self::Tensor1D, s: &Self::Scalar) -> Self::Tensor1D {
        t.iter().map(|x| x + s).collect()
    }

    fn sigmoid_1d(t: &Self::Tensor1D) -> Self::Tensor1D {
        t.iter().map(|&z| sigmoid(z)).collect()
    }

    // --- Reductions ---
    // Left fold from 0.0; the ndarray backend sums in the same order.
    fn sum_all_1d(t: &Self::Tensor1D) -> Self::Scalar {
        t.iter().fold(0.0, |acc, v| acc + v)
    }

    fn scalar_f64(value: f64) -> Self::Scalar {
        value
    }

    // --- Access ---
    fn to_vec_1d(t: &Self::Tensor1D) -> Vec<f64> {
        t.clone()
    }

    fn len_1d(t: &Self::Tensor1D) -> usize {
        t.len()
    }

    // --- Linear algebra ---
    fn matvec(a: &CpuTensor2D, x: &Vec<f64>) -> Vec<f64> {
        let CpuTensor2D(_, rows, cols) = a;
        assert_eq!(*cols, x.len(), "matvec: A.cols != x.len");
        (0..*rows)
            .map(|i| {
                a.row(i)
                    .iter()
                    .zip(x.iter())
                    .fold(0.0, |acc, (a, b)| acc + a * b)
            })
            .collect()
    }

    fn matvec_transposed(a: &CpuTensor2D, x: &Vec<f64>) -> Vec<f64> {
        let CpuTensor2D(_, rows, cols) = a;
        assert_eq!(*rows, x.len(), "matvec_transposed: A.rows != x.len");
        // Accumulate row by row: same summation order as the column-wise definition.
        let mut out = vec![0.0; *cols];
        for (i, xi) in x.iter().enumerate() {
            for (acc, aij) in out.iter_mut().zip(a.row(i)) {
                *acc += aij * xi;
            }
        }
        out
    }

    fn shape(t: &Self::Tensor2D) -> (usize, usize) {
        (t.1, t.2)
    }

    fn row_2d(t: &Self::Tensor2D, index: usize) -> Self::Tensor1D {
        t.row(index).to_vec()
    }

    fn column_2d(t: &Self::Tensor2D, index: usize) -> Self::Tensor1D {
        assert!(index < t.2, "column index out of bounds");
        (0..t.1).map(|i| t.0[i * t.2 + index]).collect()
    }
}

#[cfg(test)]
mod matvec_tests {
    use super::*;

    #[test]
    fn test_matvec_transpose() {
        // X = [[1.0, 2.0],
        //      [3.0, 4.0],
        //      [5.0, 6.0]]
        // v = [1.0, 0.0, 2.0]
        // Xᵀ @ v = [1*1 + 3*0 + 5*2, 2*1 + 4*0 + 6*2] = [11.0, 14.0]
        let x = CpuTensor2D::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3, 2);
        let v = vec![1.0, 0.0, 2.0];

        let result = CpuBackend::matvec_transposed(&x, &v);
        assert_eq!(result, vec![11.0, 14.0]);

        // (4, 1) column vector: Xᵀ @ ones = sum
        let x2 = CpuTensor2D::new(vec![2.0, 3.0, 4.0, 5.0], 4, 1);
        let result2 = CpuBackend::matvec_transposed(&x2, &vec![1.0; 4]);
        assert_eq!(result2, vec![14.0]);
    }

    #[test]
    fn test_matvec() {
        let a = CpuTensor2D::new(vec![1.0, 2.0, 3.0, 4.0], 2, 2);
        assert_eq!(CpuBackend::matvec(&a, &vec![1.0, 0.0]), vec![1.0, 3.0]);
        assert_eq!(CpuBackend::matvec(&a, &vec![1.0, 1.0]), vec![3.0, 7.0]);
    }

    #[test]
    #[should_panic(expected = "matvec")]
    fn test_matvec_shape_mismatch_panics() {
        let a = CpuTensor2D::new(vec![1.0, 2.0, 3.0, 4.0], 2, 2);
        CpuBackend::matvec(&a, &vec![1.0, 0.0, 3.0]);
    }

    #[test]
    fn test_row_and_column() {
        let a = CpuTensor2D::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3, 2);
        assert_eq!(CpuBackend::row_2d(&a, 1), vec![3.0, 4.0]);
        assert_eq!(CpuBackend::column_2d(&a, 1), vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_sum_of_empty_is_positive_zero() {
        let sum = CpuBackend::sum_all_1d(&Vec::new());
        assert_eq!(sum.to_bits(), 0.0f64.to_bits());
        assert_eq!(CpuBackend::sum_all_1d(&vec![0.5, 0.25, 2.0]), 2.75);
    }

    #[test]
    fn test_sigmoid_1d_is_bounded() {
        let out = CpuBackend::sigmoid_1d(&vec![-1000.0, 0.0, 1000.0]);
        assert_eq!(out[1], 0.5);
        assert!(out.iter().all(|p| (0.0..=1.0).contains(p)));
    }
}
