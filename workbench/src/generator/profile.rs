use anyhow::{ensure, Context};
use ndarray::Array2;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use spectralcore::prelude::RealMatrix;

use crate::generator::pattern::{centered_disc, sine_grating};

/// Configuration for generating a synthetic luminance test image.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub width: usize,
    pub height: usize,
    /// Grating periods across the image width.
    pub frequency: f64,
    /// Peak-to-peak jitter added to every pixel, in gray levels.
    pub noise: f64,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            frequency: 16.0,
            noise: 4.0,
            seed: 0,
        }
    }
}

/// Bright disc over a faint grating, on the 0-255 scale an 8-bit image loads to.
pub fn build_test_pattern_from_config(config: &GeneratorConfig) -> anyhow::Result<RealMatrix> {
    ensure!(
        config.width > 0 && config.height > 0,
        "test pattern needs positive dimensions, got {}x{}",
        config.width,
        config.height
    );
    config
        .width
        .checked_mul(config.height)
        .context("overflow computing pixel count for generator")?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let half_noise = config.noise.abs() / 2.0;

    Ok(Array2::from_shape_fn((config.height, config.width), |(y, x)| {
        let grating = sine_grating(x, config.width, config.frequency);
        let disc = centered_disc(x, y, config.width, config.height, 0.5);
        let jitter = if half_noise > 0.0 {
            rng.gen_range(-half_noise..half_noise)
        } else {
            0.0
        };
        (40.0 + 60.0 * grating + 150.0 * disc + jitter).clamp(0.0, 255.0)
    }))
}

pub fn build_test_pattern(width: usize, height: usize, seed: u64) -> anyhow::Result<RealMatrix> {
    let config = GeneratorConfig {
        width,
        height,
        seed,
        ..Default::default()
    };
    build_test_pattern_from_config(&config)
}
