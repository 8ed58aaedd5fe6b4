use crate::prelude::{RealMatrix, ResizeMode, SkipReason};
use ndarray::Array2;

/// Resamples `source` onto a `width` x `height` canvas.
pub fn resize(
    source: &RealMatrix,
    width: usize,
    height: usize,
    mode: ResizeMode,
) -> Result<RealMatrix, SkipReason> {
    if source.is_empty() {
        return Err(SkipReason::EmptyInput);
    }
    if width == 0 || height == 0 {
        return Err(SkipReason::InvalidDimensions);
    }

    Ok(match mode {
        ResizeMode::ZeroPadding => zero_pad(source, width, height),
        ResizeMode::Bilinear => bilinear(source, width, height),
    })
}

fn zero_pad(source: &RealMatrix, width: usize, height: usize) -> RealMatrix {
    Array2::from_shape_fn((height, width), |(j, i)| {
        source.get((j, i)).copied().unwrap_or(0.0)
    })
}

fn bilinear(source: &RealMatrix, width: usize, height: usize) -> RealMatrix {
    let (src_height, src_width) = source.dim();
    let last_row = src_height - 1;
    let last_col = src_width - 1;
    let dx = last_col as f64 / width as f64;
    let dy = last_row as f64 / height as f64;

    Array2::from_shape_fn((height, width), |(j, i)| {
        let x = i as f64 * dx;
        let y = j as f64 * dy;
        let x0 = (x.floor() as usize).min(last_col);
        let y0 = (y.floor() as usize).min(last_row);
        let xf = x - x0 as f64;
        let yf = y - y0 as f64;
        let x1 = (x0 + 1).min(last_col);
        let y1 = (y0 + 1).min(last_row);

        let a = source[[y0, x0]];
        let b = source[[y0, x1]];
        let c = source[[y1, x1]];
        let d = source[[y1, x0]];

        a * (1.0 - xf) * (1.0 - yf) + b * xf * (1.0 - yf) + d * yf * (1.0 - xf) + c * xf * yf
    })
}
