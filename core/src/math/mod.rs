pub mod fft;
pub mod matrix;
pub mod spectrogram;
pub mod stats;

pub use fft::{fft, fft2d, slow_dft, Direction};
pub use matrix::MatrixHelper;
pub use spectrogram::{spectrogram, Spectrogram};
pub use stats::StatsHelper;
