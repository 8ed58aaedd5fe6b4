use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Row-major grayscale image or spectrum magnitude (rows = height).
pub type RealMatrix = Array2<f64>;

/// Frequency-domain or intermediate complex-valued signal.
pub type ComplexMatrix = Array2<Complex64>;

/// Which side of the radial boundary in the centered spectrum is kept.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FilterPassMode {
    #[default]
    Low,
    High,
}

/// Resampling policy used when the target canvas differs from the source.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeMode {
    #[default]
    ZeroPadding,
    Bilinear,
}

/// Target canvas for the resize stage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResizeConfig {
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub mode: ResizeMode,
}

/// Parameters for one complete pass through the filtering pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilterConfig {
    /// When absent the source is passed through at its own size.
    pub resize: Option<ResizeConfig>,
    /// Noise energy as a percentage of signal energy.
    pub noise_percent: f64,
    /// Mask radius as a fraction of half the spectrum diagonal, in `[0, 1]`.
    pub mask_size: f64,
    pub pass_mode: FilterPassMode,
    pub seed: Option<u64>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            resize: None,
            noise_percent: 0.0,
            mask_size: 0.1,
            pass_mode: FilterPassMode::Low,
            seed: None,
        }
    }
}

/// Why a stage declined to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptyInput,
    InvalidDimensions,
    InvalidParameter,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::EmptyInput => f.write_str("input slot is empty"),
            SkipReason::InvalidDimensions => f.write_str("target dimensions must be positive"),
            SkipReason::InvalidParameter => f.write_str("parameter out of range"),
        }
    }
}

/// Outcome of a pipeline stage call. Skipping leaves every slot untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Applied,
    Skipped(SkipReason),
}

impl StageStatus {
    pub fn is_applied(&self) -> bool {
        matches!(self, StageStatus::Applied)
    }
}

/// Common error type for operations that can genuinely fail.
#[derive(thiserror::Error, Debug)]
pub enum StageError {
    #[error("failed to load image {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

pub type StageResult<T> = Result<T, StageError>;
