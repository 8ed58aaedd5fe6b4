use crate::prelude::{RealMatrix, StageError, StageResult};
use image::DynamicImage;
use log::debug;
use ndarray::Array2;
use std::path::Path;

const RED_WEIGHT: f64 = 0.299;
const GREEN_WEIGHT: f64 = 0.587;
const BLUE_WEIGHT: f64 = 0.114;

/// Decodes an image file into a luminance matrix on the 0-255 scale.
pub fn load_matrix(path: &Path) -> StageResult<RealMatrix> {
    let image = image::open(path).map_err(|source| StageError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    let matrix = luminance(&image);
    debug!(
        "loaded {} as {}x{} luminance matrix",
        path.display(),
        matrix.ncols(),
        matrix.nrows()
    );
    Ok(matrix)
}

/// Weighted `0.299 R + 0.587 G + 0.114 B`, row 0 being the top of the image.
pub fn luminance(image: &DynamicImage) -> RealMatrix {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    Array2::from_shape_fn((height as usize, width as usize), |(j, i)| {
        let [r, g, b] = rgb.get_pixel(i as u32, j as u32).0;
        RED_WEIGHT * f64::from(r) + GREEN_WEIGHT * f64::from(g) + BLUE_WEIGHT * f64::from(b)
    })
}

/// Writing matrices back to image files is not supported.
pub fn save_matrix(_matrix: &RealMatrix, path: &Path) -> StageResult<()> {
    Err(StageError::Unsupported(format!(
        "saving matrices is not implemented ({})",
        path.display()
    )))
}
