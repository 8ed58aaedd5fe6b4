//! Fourier-transform engine and frequency-domain image filtering pipeline.
//!
//! A grayscale matrix is resized, mixed with energy-matched noise, transformed
//! and centered, masked with a radial low/high-pass window and transformed
//! back. Each stage caches its result inside [`FilterPipeline`] and clears
//! everything downstream of it when re-run.

pub mod display;
pub mod imaging;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod telemetry;

pub use prelude::{
    ComplexMatrix, FilterConfig, FilterPassMode, RealMatrix, ResizeMode, StageError, StageStatus,
};
pub use processing::FilterPipeline;
