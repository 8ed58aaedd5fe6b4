use ndarray::{Array2, ArrayView2};
use num_complex::Complex64;

pub struct MatrixHelper;

impl MatrixHelper {
    /// Swaps spectral quadrants so the zero-frequency term lands at the center.
    ///
    /// For odd extents the extra row/column stays with the quadrant nearer the
    /// origin, i.e. `out[j] = in[(j + n/2) % n]`.
    pub fn center_shift<T: Clone>(matrix: ArrayView2<T>) -> Array2<T> {
        let (rows, cols) = matrix.dim();
        let (y_half, x_half) = (rows / 2, cols / 2);
        Array2::from_shape_fn((rows, cols), |(j, i)| {
            matrix[[(j + y_half) % rows, (i + x_half) % cols]].clone()
        })
    }

    /// Exact inverse of [`MatrixHelper::center_shift`] for any shape.
    pub fn center_unshift<T: Clone>(matrix: ArrayView2<T>) -> Array2<T> {
        let (rows, cols) = matrix.dim();
        let y_back = rows - rows / 2;
        let x_back = cols - cols / 2;
        Array2::from_shape_fn((rows, cols), |(j, i)| {
            matrix[[(j + y_back) % rows, (i + x_back) % cols]].clone()
        })
    }

    pub fn to_complex(matrix: ArrayView2<f64>) -> Array2<Complex64> {
        matrix.mapv(|value| Complex64::new(value, 0.0))
    }
}
