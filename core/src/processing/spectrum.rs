use crate::math::fft::{fft2d, Direction};
use crate::math::matrix::MatrixHelper;
use crate::prelude::{ComplexMatrix, FilterPassMode, RealMatrix, SkipReason};
use ndarray::Array2;

/// Lifts to complex, transforms forward and centers the spectrum.
pub fn forward_and_center(source: &RealMatrix) -> Result<ComplexMatrix, SkipReason> {
    if source.is_empty() {
        return Err(SkipReason::EmptyInput);
    }
    let mut spectrum = MatrixHelper::to_complex(source.view());
    fft2d(&mut spectrum, Direction::Forward);
    Ok(MatrixHelper::center_shift(spectrum.view()))
}

/// Mask radius in whole pixels: `mask_size` times half the diagonal, truncated.
pub fn mask_radius(width: usize, height: usize, mask_size: f64) -> usize {
    let diagonal = ((width * width + height * height) as f64).sqrt();
    (diagonal * mask_size / 2.0) as usize
}

/// Binary radial mask centered at `(width / 2, height / 2)`.
///
/// Low pass keeps cells with squared distance strictly below `radius²`; high
/// pass keeps the rest, so a cell exactly on the boundary belongs to the
/// high-pass side and the two masks always sum to one.
pub fn generate_mask(
    width: usize,
    height: usize,
    radius: usize,
    pass: FilterPassMode,
) -> RealMatrix {
    let center_x = (width / 2) as f64;
    let center_y = (height / 2) as f64;
    let radius = radius as f64;
    let limit = radius * radius;

    Array2::from_shape_fn((height, width), |(j, i)| {
        let dx = i as f64 - center_x;
        let dy = j as f64 - center_y;
        let inside = dx * dx + dy * dy < limit;
        match (pass, inside) {
            (FilterPassMode::Low, true) | (FilterPassMode::High, false) => 1.0,
            _ => 0.0,
        }
    })
}

/// Multiplies the centered spectrum by a radial mask. `mask_size` must lie in `[0, 1]`.
pub fn apply_mask(
    spectrum: &ComplexMatrix,
    mask_size: f64,
    pass: FilterPassMode,
) -> Result<ComplexMatrix, SkipReason> {
    if spectrum.is_empty() {
        return Err(SkipReason::EmptyInput);
    }
    if !(0.0..=1.0).contains(&mask_size) {
        return Err(SkipReason::InvalidParameter);
    }
    let (height, width) = spectrum.dim();
    let mask = generate_mask(width, height, mask_radius(width, height, mask_size), pass);

    let mut masked = spectrum.clone();
    masked.zip_mut_with(&mask, |cell, &keep| *cell *= keep);
    Ok(masked)
}

/// Un-centers, transforms back, divides by the element count and clamps to
/// non-negative intensities.
pub fn inverse_and_normalize(masked: &ComplexMatrix) -> Result<RealMatrix, SkipReason> {
    if masked.is_empty() {
        return Err(SkipReason::EmptyInput);
    }
    let mut signal = MatrixHelper::center_unshift(masked.view());
    fft2d(&mut signal, Direction::Inverse);

    let count = signal.len() as f64;
    Ok(signal.mapv(|z| (z.re / count).max(0.0)))
}
