use crate::display::log_compress;
use crate::imaging::{MatrixAccess, MatrixLoader, MatrixSlot, Resettable};
use crate::math::stats::StatsHelper;
use crate::prelude::{
    ComplexMatrix, FilterConfig, FilterPassMode, RealMatrix, ResizeMode, SkipReason, StageResult,
    StageStatus,
};
use crate::processing::{noise, resize, spectrum};
use crate::telemetry::{LogManager, StageMetrics};
use num_complex::Complex64;
use rand::{rngs::StdRng, SeedableRng};
use std::fmt;
use std::path::Path;

/// Matrix slots in data-flow order. Writing a slot empties every later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    Source,
    Resized,
    Noisy,
    Spectrum,
    MaskedSpectrum,
    Processed,
}

impl Slot {
    pub const ORDER: [Slot; 6] = [
        Slot::Source,
        Slot::Resized,
        Slot::Noisy,
        Slot::Spectrum,
        Slot::MaskedSpectrum,
        Slot::Processed,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Slot::Source => "source",
            Slot::Resized => "resized",
            Slot::Noisy => "noisy",
            Slot::Spectrum => "spectrum",
            Slot::MaskedSpectrum => "masked-spectrum",
            Slot::Processed => "processed",
        }
    }

    /// Slots that must be recomputed after this one is written.
    pub fn downstream(self) -> impl Iterator<Item = Slot> {
        Self::ORDER.into_iter().filter(move |slot| *slot > self)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Five-stage spectral filter with cached intermediate results.
///
/// Stages read the slot before their own and return [`StageStatus::Skipped`]
/// without touching any state when that input is empty or a parameter is out
/// of range. Reading a slot that has not been computed yields a 0x0 matrix.
pub struct FilterPipeline {
    source: MatrixSlot<f64>,
    resized: MatrixSlot<f64>,
    noisy: MatrixSlot<f64>,
    spectrum: MatrixSlot<Complex64>,
    masked: MatrixSlot<Complex64>,
    processed: MatrixSlot<f64>,
    rng: StdRng,
    logger: LogManager,
    metrics: StageMetrics,
}

impl FilterPipeline {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic noise for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            source: MatrixSlot::new(Slot::Source.name()),
            resized: MatrixSlot::new(Slot::Resized.name()),
            noisy: MatrixSlot::new(Slot::Noisy.name()),
            spectrum: MatrixSlot::new(Slot::Spectrum.name()),
            masked: MatrixSlot::new(Slot::MaskedSpectrum.name()),
            processed: MatrixSlot::new(Slot::Processed.name()),
            rng,
            logger: LogManager::new(),
            metrics: StageMetrics::new(),
        }
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Replaces the source image. All five stage slots are emptied.
    pub fn set_source(&mut self, matrix: RealMatrix) -> StageStatus {
        if matrix.is_empty() {
            return self.skipped(Slot::Source, SkipReason::EmptyInput);
        }
        self.source.set_matrix(matrix);
        self.commit(Slot::Source)
    }

    /// Loads the source from an image file. On failure no slot is modified.
    pub fn load_source(&mut self, path: &Path) -> StageResult<()> {
        self.source.load_from_file(path)?;
        self.commit(Slot::Source);
        Ok(())
    }

    pub fn resize(&mut self, width: usize, height: usize, mode: ResizeMode) -> StageStatus {
        match resize::resize(self.source.matrix(), width, height, mode) {
            Ok(matrix) => {
                self.resized.set_matrix(matrix);
                self.commit(Slot::Resized)
            }
            Err(reason) => self.skipped(Slot::Resized, reason),
        }
    }

    pub fn inject_noise(&mut self, percent: f64) -> StageStatus {
        match noise::inject_noise(self.resized.matrix(), percent, &mut self.rng) {
            Ok(matrix) => {
                self.noisy.set_matrix(matrix);
                self.commit(Slot::Noisy)
            }
            Err(reason) => self.skipped(Slot::Noisy, reason),
        }
    }

    pub fn forward_transform(&mut self) -> StageStatus {
        match spectrum::forward_and_center(self.noisy.matrix()) {
            Ok(matrix) => {
                self.spectrum.set_matrix(matrix);
                self.commit(Slot::Spectrum)
            }
            Err(reason) => self.skipped(Slot::Spectrum, reason),
        }
    }

    pub fn apply_mask(&mut self, mask_size: f64, pass: FilterPassMode) -> StageStatus {
        match spectrum::apply_mask(self.spectrum.matrix(), mask_size, pass) {
            Ok(matrix) => {
                self.masked.set_matrix(matrix);
                self.commit(Slot::MaskedSpectrum)
            }
            Err(reason) => self.skipped(Slot::MaskedSpectrum, reason),
        }
    }

    pub fn inverse_transform(&mut self) -> StageStatus {
        match spectrum::inverse_and_normalize(self.masked.matrix()) {
            Ok(matrix) => {
                self.processed.set_matrix(matrix);
                self.commit(Slot::Processed)
            }
            Err(reason) => self.skipped(Slot::Processed, reason),
        }
    }

    /// Runs every stage after the source in order.
    ///
    /// Without a resize target the source is copied through at its own size.
    pub fn run(&mut self, config: &FilterConfig) -> Vec<(Slot, StageStatus)> {
        if let Some(seed) = config.seed {
            self.reseed(seed);
        }
        let (height, width) = self.source.matrix().dim();
        let (width, height, mode) = match config.resize {
            Some(target) => (target.width, target.height, target.mode),
            None => (width, height, ResizeMode::ZeroPadding),
        };

        vec![
            (Slot::Resized, self.resize(width, height, mode)),
            (Slot::Noisy, self.inject_noise(config.noise_percent)),
            (Slot::Spectrum, self.forward_transform()),
            (
                Slot::MaskedSpectrum,
                self.apply_mask(config.mask_size, config.pass_mode),
            ),
            (Slot::Processed, self.inverse_transform()),
        ]
    }

    /// Empties every slot, the source included.
    pub fn reset(&mut self) {
        self.source.reset();
        self.clear_downstream(Slot::Source);
    }

    pub fn source(&self) -> &RealMatrix {
        self.source.matrix()
    }

    pub fn resized(&self) -> &RealMatrix {
        self.resized.matrix()
    }

    pub fn noisy(&self) -> &RealMatrix {
        self.noisy.matrix()
    }

    pub fn spectrum(&self) -> &ComplexMatrix {
        self.spectrum.matrix()
    }

    pub fn masked_spectrum(&self) -> &ComplexMatrix {
        self.masked.matrix()
    }

    pub fn processed(&self) -> &RealMatrix {
        self.processed.matrix()
    }

    pub fn log_spectrum(&self) -> RealMatrix {
        log_compress(self.spectrum.matrix())
    }

    pub fn log_masked_spectrum(&self) -> RealMatrix {
        log_compress(self.masked.matrix())
    }

    pub fn is_populated(&self, slot: Slot) -> bool {
        match slot {
            Slot::Source => !self.source.is_empty(),
            Slot::Resized => !self.resized.is_empty(),
            Slot::Noisy => !self.noisy.is_empty(),
            Slot::Spectrum => !self.spectrum.is_empty(),
            Slot::MaskedSpectrum => !self.masked.is_empty(),
            Slot::Processed => !self.processed.is_empty(),
        }
    }

    pub fn metrics(&self) -> StageMetrics {
        self.metrics
    }

    fn commit(&mut self, slot: Slot) -> StageStatus {
        self.clear_downstream(slot);
        self.metrics.record_applied();
        self.logger.record(&self.describe(slot));
        StageStatus::Applied
    }

    fn skipped(&mut self, slot: Slot, reason: SkipReason) -> StageStatus {
        self.metrics.record_skipped();
        self.logger.skip(slot.name(), reason);
        StageStatus::Skipped(reason)
    }

    fn clear_downstream(&mut self, slot: Slot) {
        let mut cleared = 0;
        for later in slot.downstream() {
            if self.is_populated(later) {
                cleared += 1;
            }
            match later {
                Slot::Source => self.source.reset(),
                Slot::Resized => self.resized.reset(),
                Slot::Noisy => self.noisy.reset(),
                Slot::Spectrum => self.spectrum.reset(),
                Slot::MaskedSpectrum => self.masked.reset(),
                Slot::Processed => self.processed.reset(),
            }
        }
        if cleared > 0 {
            self.logger
                .detail(&format!("{} cleared {} downstream slot(s)", slot, cleared));
            self.metrics.record_invalidated(cleared);
        }
    }

    fn describe(&self, slot: Slot) -> String {
        let real = match slot {
            Slot::Source => Some(self.source.matrix()),
            Slot::Resized => Some(self.resized.matrix()),
            Slot::Noisy => Some(self.noisy.matrix()),
            Slot::Processed => Some(self.processed.matrix()),
            Slot::Spectrum | Slot::MaskedSpectrum => None,
        };
        match real {
            Some(matrix) => format!(
                "{} {}x{} RMS {:.4}",
                slot,
                matrix.ncols(),
                matrix.nrows(),
                StatsHelper::rms(matrix.view())
            ),
            None => {
                let matrix = if slot == Slot::Spectrum {
                    self.spectrum.matrix()
                } else {
                    self.masked.matrix()
                };
                format!("{} {}x{}", slot, matrix.ncols(), matrix.nrows())
            }
        }
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::ResizeConfig;
    use ndarray::{array, Array2};

    fn gradient(rows: usize, cols: usize) -> RealMatrix {
        Array2::from_shape_fn((rows, cols), |(j, i)| (i + 2 * j) as f64 + 1.0)
    }

    fn populated(pipeline: &FilterPipeline) -> Vec<Slot> {
        Slot::ORDER
            .into_iter()
            .filter(|slot| pipeline.is_populated(*slot))
            .collect()
    }

    fn run_all(pipeline: &mut FilterPipeline) {
        assert!(pipeline.resize(8, 8, ResizeMode::ZeroPadding).is_applied());
        assert!(pipeline.inject_noise(0.0).is_applied());
        assert!(pipeline.forward_transform().is_applied());
        assert!(pipeline.apply_mask(0.5, FilterPassMode::Low).is_applied());
        assert!(pipeline.inverse_transform().is_applied());
    }

    #[test]
    fn stages_populate_slots_in_order() {
        let mut pipeline = FilterPipeline::with_seed(1);
        pipeline.set_source(gradient(6, 6));
        run_all(&mut pipeline);
        assert_eq!(populated(&pipeline), Slot::ORDER.to_vec());
        assert_eq!(pipeline.processed().dim(), (8, 8));
    }

    #[test]
    fn rerunning_a_stage_empties_downstream_slots() {
        let mut pipeline = FilterPipeline::with_seed(2);
        pipeline.set_source(gradient(4, 4));
        run_all(&mut pipeline);

        assert!(pipeline.inject_noise(10.0).is_applied());
        assert_eq!(
            populated(&pipeline),
            vec![Slot::Source, Slot::Resized, Slot::Noisy]
        );
        assert!(pipeline.spectrum().is_empty());
        assert!(pipeline.processed().is_empty());
    }

    #[test]
    fn reapplying_mask_only_clears_processed() {
        let mut pipeline = FilterPipeline::with_seed(3);
        pipeline.set_source(gradient(4, 4));
        run_all(&mut pipeline);

        assert!(pipeline.apply_mask(0.2, FilterPassMode::High).is_applied());
        assert!(!pipeline.is_populated(Slot::Processed));
        assert!(pipeline.is_populated(Slot::Spectrum));
    }

    #[test]
    fn stage_on_empty_input_is_a_no_op() {
        let mut pipeline = FilterPipeline::with_seed(4);
        assert_eq!(
            pipeline.forward_transform(),
            StageStatus::Skipped(SkipReason::EmptyInput)
        );
        pipeline.set_source(gradient(4, 4));
        assert_eq!(
            pipeline.inject_noise(5.0),
            StageStatus::Skipped(SkipReason::EmptyInput)
        );
        assert_eq!(pipeline.metrics().snapshot(), (1, 2));
    }

    #[test]
    fn skipped_stage_keeps_existing_downstream_results() {
        let mut pipeline = FilterPipeline::with_seed(5);
        pipeline.set_source(gradient(4, 4));
        run_all(&mut pipeline);

        assert_eq!(
            pipeline.resize(0, 8, ResizeMode::Bilinear),
            StageStatus::Skipped(SkipReason::InvalidDimensions)
        );
        assert_eq!(populated(&pipeline), Slot::ORDER.to_vec());
    }

    #[test]
    fn out_of_range_mask_size_keeps_existing_results() {
        let mut pipeline = FilterPipeline::with_seed(12);
        pipeline.set_source(gradient(4, 4));
        run_all(&mut pipeline);

        assert_eq!(
            pipeline.apply_mask(1e12, FilterPassMode::Low),
            StageStatus::Skipped(SkipReason::InvalidParameter)
        );
        assert_eq!(populated(&pipeline), Slot::ORDER.to_vec());
    }

    #[test]
    fn new_source_invalidates_everything() {
        let mut pipeline = FilterPipeline::with_seed(6);
        pipeline.set_source(gradient(4, 4));
        run_all(&mut pipeline);
        pipeline.set_source(array![[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(populated(&pipeline), vec![Slot::Source]);
        assert_eq!(pipeline.metrics().invalidations(), 5);
    }

    #[test]
    fn failed_load_leaves_pipeline_untouched() {
        let mut pipeline = FilterPipeline::with_seed(7);
        pipeline.set_source(gradient(4, 4));
        run_all(&mut pipeline);
        assert!(pipeline
            .load_source(Path::new("missing/input.png"))
            .is_err());
        assert_eq!(populated(&pipeline), Slot::ORDER.to_vec());
    }

    #[test]
    fn full_pass_without_noise_or_masking_restores_source() {
        let mut pipeline = FilterPipeline::with_seed(8);
        let source = gradient(5, 6);
        pipeline.set_source(source.clone());
        // A zero radius high pass keeps every bin.
        let config = FilterConfig {
            mask_size: 0.0,
            pass_mode: FilterPassMode::High,
            ..FilterConfig::default()
        };
        let statuses = pipeline.run(&config);
        assert!(statuses.iter().all(|(_, status)| status.is_applied()));
        for (a, b) in pipeline.processed().iter().zip(source.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let config = FilterConfig {
            resize: Some(ResizeConfig {
                width: 8,
                height: 4,
                mode: ResizeMode::Bilinear,
            }),
            noise_percent: 15.0,
            mask_size: 0.3,
            pass_mode: FilterPassMode::High,
            seed: Some(99),
        };
        let mut first = FilterPipeline::new();
        first.set_source(gradient(6, 6));
        first.run(&config);
        let mut second = FilterPipeline::new();
        second.set_source(gradient(6, 6));
        second.run(&config);
        assert_eq!(first.noisy(), second.noisy());
        assert_eq!(first.processed(), second.processed());
    }

    #[test]
    fn log_spectrum_matches_slot_shape() {
        let mut pipeline = FilterPipeline::with_seed(10);
        pipeline.set_source(gradient(4, 6));
        pipeline.run(&FilterConfig::default());
        assert_eq!(pipeline.log_spectrum().dim(), (4, 6));
        assert_eq!(pipeline.log_masked_spectrum().dim(), (4, 6));
    }

    #[test]
    fn reset_empties_every_slot() {
        let mut pipeline = FilterPipeline::with_seed(11);
        pipeline.set_source(gradient(4, 4));
        run_all(&mut pipeline);
        pipeline.reset();
        assert!(populated(&pipeline).is_empty());
    }
}
