use ndarray::{Array2, Axis};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Sign of the transform exponent.
///
/// `Forward` uses `+1` and `Inverse` uses `-1`. Neither direction normalizes;
/// callers running the inverse divide by the element count themselves.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Inverse,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Inverse => -1.0,
        }
    }
}

/// Direct O(N²) transform for any length, in place.
pub fn slow_dft(data: &mut [Complex64], direction: Direction) {
    let size = data.len();
    if size == 0 {
        return;
    }
    let input = data.to_vec();
    let step = direction.sign() * 2.0 * PI / size as f64;

    for (k, out) in data.iter_mut().enumerate() {
        *out = input
            .iter()
            .enumerate()
            .map(|(n, &value)| {
                // k * n can be large; reduce before converting to keep the phase exact.
                let phase = ((k * n) % size) as f64 * step;
                value * Complex64::cis(phase)
            })
            .sum();
    }
}

/// Recursive decimation-in-time transform, in place.
///
/// Even lengths split into even/odd halves; any odd length (including the
/// top-level one) is handed to [`slow_dft`].
pub fn fft(data: &mut [Complex64], direction: Direction) {
    let size = data.len();
    if size <= 1 {
        return;
    }
    if size % 2 == 1 {
        slow_dft(data, direction);
        return;
    }

    let half = size / 2;
    let mut even: Vec<Complex64> = data.iter().step_by(2).copied().collect();
    let mut odd: Vec<Complex64> = data.iter().skip(1).step_by(2).copied().collect();

    fft(&mut even, direction);
    fft(&mut odd, direction);

    let step = direction.sign() * 2.0 * PI / size as f64;
    for k in 0..half {
        let twiddled = Complex64::cis(step * k as f64) * odd[k];
        data[k] = even[k] + twiddled;
        data[k + half] = even[k] - twiddled;
    }
}

/// Separable 2D transform: every row first, then every column.
pub fn fft2d(matrix: &mut Array2<Complex64>, direction: Direction) {
    if matrix.is_empty() {
        return;
    }
    transform_lanes(matrix, Axis(1), direction);
    transform_lanes(matrix, Axis(0), direction);
}

fn transform_lanes(matrix: &mut Array2<Complex64>, axis: Axis, direction: Direction) {
    let mut buffer = Vec::with_capacity(matrix.len_of(axis));
    for mut lane in matrix.lanes_mut(axis) {
        buffer.clear();
        buffer.extend(lane.iter().copied());
        fft(&mut buffer, direction);
        for (cell, &value) in lane.iter_mut().zip(buffer.iter()) {
            *cell = value;
        }
    }
}
