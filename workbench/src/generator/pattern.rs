use std::f64::consts::PI;

/// Horizontal sine grating in `[0, 1]` with `cycles` periods across `width`.
pub fn sine_grating(x: usize, width: usize, cycles: f64) -> f64 {
    0.5 + 0.5 * ((x as f64 * cycles) / width as f64 * 2.0 * PI).sin()
}

/// 1 inside a centered disc covering `fraction` of the shorter side, else 0.
pub fn centered_disc(x: usize, y: usize, width: usize, height: usize, fraction: f64) -> f64 {
    let radius = width.min(height) as f64 * fraction / 2.0;
    let dx = x as f64 - width as f64 / 2.0;
    let dy = y as f64 - height as f64 / 2.0;
    if dx * dx + dy * dy < radius * radius {
        1.0
    } else {
        0.0
    }
}
