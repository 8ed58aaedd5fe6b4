use crate::workflow::runner::WorkflowResult;
use serde::{Deserialize, Serialize};
use spectralcore::math::StatsHelper;
use spectralcore::prelude::StageStatus;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StageReport {
    pub slot: String,
    pub status: String,
}

/// JSON summary of one workflow run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunReport {
    pub source_dims: (usize, usize),
    pub output_dims: (usize, usize),
    pub stages: Vec<StageReport>,
    pub applied: usize,
    pub skipped: usize,
    pub invalidations: usize,
    pub processed_rms: f64,
    pub processed_range: Option<(f64, f64)>,
    pub spectrogram: Vec<Vec<f64>>,
}

impl RunReport {
    pub fn from_result(result: &WorkflowResult) -> Self {
        let pipeline = &result.pipeline;
        let processed = pipeline.processed();
        let (applied, skipped) = pipeline.metrics().snapshot();
        let dims = |m: &spectralcore::RealMatrix| (m.ncols(), m.nrows());

        Self {
            source_dims: dims(pipeline.source()),
            output_dims: dims(processed),
            stages: result
                .statuses
                .iter()
                .map(|(slot, status)| StageReport {
                    slot: slot.to_string(),
                    status: match status {
                        StageStatus::Applied => "applied".to_string(),
                        StageStatus::Skipped(reason) => format!("skipped ({})", reason),
                    },
                })
                .collect(),
            applied,
            skipped,
            invalidations: pipeline.metrics().invalidations(),
            processed_rms: StatsHelper::rms(processed.view()),
            processed_range: StatsHelper::min_max(processed.view()),
            spectrogram: result.spectrogram.clone(),
        }
    }
}
