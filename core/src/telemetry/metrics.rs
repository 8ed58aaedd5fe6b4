use serde::Serialize;

/// Counts of stage calls that ran versus ones that fell back to a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StageMetrics {
    applied: usize,
    skipped: usize,
    invalidations: usize,
}

impl StageMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_applied(&mut self) {
        self.applied += 1;
    }

    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Number of non-empty slots cleared by an upstream write.
    pub fn record_invalidated(&mut self, slots: usize) {
        self.invalidations += slots;
    }

    pub fn snapshot(&self) -> (usize, usize) {
        (self.applied, self.skipped)
    }

    pub fn invalidations(&self) -> usize {
        self.invalidations
    }
}
