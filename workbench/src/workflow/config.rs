use anyhow::Context;
use serde::{Deserialize, Serialize};
use spectralcore::prelude::{FilterConfig, FilterPassMode, ResizeConfig, ResizeMode};
use std::fs;
use std::path::Path;

/// Sliding-window analysis of one row of the processed image.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpectrogramConfig {
    pub row: usize,
    pub window_size: usize,
    pub window_overlap: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub resize_mode: ResizeMode,
    pub noise_percent: f64,
    pub mask_size: f64,
    pub pass_mode: FilterPassMode,
    pub seed: Option<u64>,
    pub spectrogram: Option<SpectrogramConfig>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        let filter = FilterConfig::default();
        Self {
            width: None,
            height: None,
            resize_mode: ResizeMode::default(),
            noise_percent: filter.noise_percent,
            mask_size: filter.mask_size,
            pass_mode: filter.pass_mode,
            seed: None,
            spectrogram: None,
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn from_args(
        width: Option<usize>,
        height: Option<usize>,
        resize_mode: ResizeMode,
        noise_percent: f64,
        mask_size: f64,
        pass_mode: FilterPassMode,
        seed: Option<u64>,
        spectrogram: Option<SpectrogramConfig>,
    ) -> Self {
        Self {
            width,
            height,
            resize_mode,
            noise_percent,
            mask_size,
            pass_mode,
            seed,
            spectrogram,
        }
    }

    /// Resizing only happens when both target dimensions are given.
    pub fn to_filter_config(&self) -> FilterConfig {
        let resize = match (self.width, self.height) {
            (Some(width), Some(height)) => Some(ResizeConfig {
                width,
                height,
                mode: self.resize_mode,
            }),
            _ => None,
        };
        FilterConfig {
            resize,
            noise_percent: self.noise_percent,
            mask_size: self.mask_size,
            pass_mode: self.pass_mode,
            seed: self.seed,
        }
    }
}
