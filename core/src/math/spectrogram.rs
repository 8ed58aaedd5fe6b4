use crate::math::fft::{fft, Direction};
use num_complex::Complex64;

/// Sliding-window magnitude frames over a 1D signal.
///
/// Each call to `next` copies one window (zero-padded past the end of the
/// input), transforms it forward and yields `|X[k]|` for every bin. Cloning the
/// iterator before consuming it restarts from the same offset.
#[derive(Debug, Clone)]
pub struct Spectrogram<'a> {
    data: &'a [Complex64],
    window_size: usize,
    hop: usize,
    offset: usize,
}

/// Builds the frame iterator. Yields nothing when `window_size <= window_overlap`.
pub fn spectrogram(
    data: &[Complex64],
    window_size: usize,
    window_overlap: usize,
) -> Spectrogram<'_> {
    Spectrogram {
        data,
        window_size,
        hop: window_size.saturating_sub(window_overlap),
        offset: 0,
    }
}

impl Iterator for Spectrogram<'_> {
    type Item = Vec<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.hop == 0 || self.offset >= self.data.len() {
            return None;
        }

        let mut window = vec![Complex64::new(0.0, 0.0); self.window_size];
        let available = &self.data[self.offset..];
        let copied = available.len().min(self.window_size);
        window[..copied].copy_from_slice(&available[..copied]);

        fft(&mut window, Direction::Forward);
        self.offset += self.hop;

        Some(window.iter().map(|bin| bin.norm()).collect())
    }
}
