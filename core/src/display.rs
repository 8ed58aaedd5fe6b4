//! Conversions that make matrices legible to a renderer.

use crate::math::stats::StatsHelper;
use crate::prelude::{ComplexMatrix, RealMatrix};

/// Per-cell magnitude `|z|`.
pub fn magnitude(matrix: &ComplexMatrix) -> RealMatrix {
    matrix.mapv(|z| z.norm())
}

/// Per-cell `log2(1 + |z|)`, compressing wide dynamic-range spectra.
pub fn log_compress(matrix: &ComplexMatrix) -> RealMatrix {
    matrix.mapv(|z| (1.0 + z.norm()).log2())
}

/// Min-max scales into `[0, 1]`. Constant input is returned unchanged.
pub fn normalize(matrix: &RealMatrix) -> RealMatrix {
    match StatsHelper::min_max(matrix.view()) {
        Some((min, max)) if max != min => {
            let span = max - min;
            matrix.mapv(|v| (v - min) / span)
        }
        _ => matrix.clone(),
    }
}

/// Normalizes and quantizes to row-major 8-bit gray levels.
pub fn to_gray_bytes(matrix: &RealMatrix) -> Vec<u8> {
    normalize(matrix)
        .iter()
        .map(|&v| (v.clamp(0.0, 1.0) * 255.0) as u8)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use num_complex::Complex64;

    #[test]
    fn log_compress_maps_zero_to_zero() {
        let spectrum = array![
            [Complex64::new(0.0, 0.0), Complex64::new(3.0, 4.0)],
            [Complex64::new(1.0, 0.0), Complex64::new(0.0, -7.0)]
        ];
        let compressed = log_compress(&spectrum);
        assert_eq!(compressed[[0, 0]], 0.0);
        assert!((compressed[[0, 1]] - 6.0_f64.log2()).abs() < 1e-12);
        assert!((compressed[[1, 0]] - 1.0).abs() < 1e-12);
        assert!((compressed[[1, 1]] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_spans_unit_interval() {
        let scaled = normalize(&array![[2.0, 4.0], [6.0, 10.0]]);
        assert_eq!(scaled, array![[0.0, 0.25], [0.5, 1.0]]);
    }

    #[test]
    fn normalize_leaves_constant_matrix_alone() {
        let flat = array![[5.0, 5.0], [5.0, 5.0]];
        assert_eq!(normalize(&flat), flat);
    }

    #[test]
    fn gray_bytes_cover_full_range() {
        assert_eq!(to_gray_bytes(&array![[0.0, 1.0], [0.5, 2.0]]), vec![0, 127, 63, 255]);
    }
}
