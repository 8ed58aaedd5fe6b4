use crate::workflow::config::{SpectrogramConfig, WorkflowConfig};
use anyhow::{bail, Context};
use log::info;
use num_complex::Complex64;
use spectralcore::math::spectrogram;
use spectralcore::prelude::{RealMatrix, StageStatus};
use spectralcore::processing::{FilterPipeline, Slot};
use std::path::Path;

pub struct WorkflowResult {
    pub pipeline: FilterPipeline,
    pub statuses: Vec<(Slot, StageStatus)>,
    pub spectrogram: Vec<Vec<f64>>,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn execute_file(&self, path: &Path) -> anyhow::Result<WorkflowResult> {
        let mut pipeline = self.pipeline();
        pipeline
            .load_source(path)
            .with_context(|| format!("loading source image {}", path.display()))?;
        self.run(pipeline)
    }

    pub fn execute(&self, source: RealMatrix) -> anyhow::Result<WorkflowResult> {
        let mut pipeline = self.pipeline();
        if let StageStatus::Skipped(reason) = pipeline.set_source(source) {
            bail!("source rejected: {}", reason);
        }
        self.run(pipeline)
    }

    fn pipeline(&self) -> FilterPipeline {
        match self.config.seed {
            Some(seed) => FilterPipeline::with_seed(seed),
            None => FilterPipeline::new(),
        }
    }

    fn run(&self, mut pipeline: FilterPipeline) -> anyhow::Result<WorkflowResult> {
        let filter_config = self.config.to_filter_config();
        let statuses = pipeline.run(&filter_config);

        for (slot, status) in &statuses {
            if let StageStatus::Skipped(reason) = status {
                bail!("{} stage skipped: {}", slot, reason);
            }
        }

        let spectrogram = match self.config.spectrogram {
            Some(settings) => row_spectrogram(pipeline.processed(), settings)
                .context("computing processed-row spectrogram")?,
            None => Vec::new(),
        };

        let (applied, skipped) = pipeline.metrics().snapshot();
        info!("workflow finished: {} stages applied, {} skipped", applied, skipped);

        Ok(WorkflowResult {
            pipeline,
            statuses,
            spectrogram,
        })
    }
}

fn row_spectrogram(
    matrix: &RealMatrix,
    settings: SpectrogramConfig,
) -> anyhow::Result<Vec<Vec<f64>>> {
    if settings.row >= matrix.nrows() {
        bail!(
            "row {} is outside the {}-row image",
            settings.row,
            matrix.nrows()
        );
    }
    let samples: Vec<Complex64> = matrix
        .row(settings.row)
        .iter()
        .map(|&v| Complex64::new(v, 0.0))
        .collect();
    Ok(spectrogram(&samples, settings.window_size, settings.window_overlap).collect())
}
