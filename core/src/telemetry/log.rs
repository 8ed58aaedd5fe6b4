use crate::prelude::SkipReason;
use log::{debug, info, warn};

/// Thin wrapper over the `log` facade used by the pipeline stages.
pub struct LogManager {
    target: &'static str,
}

impl LogManager {
    pub fn new() -> Self {
        Self::with_target("pipeline")
    }

    pub fn with_target(target: &'static str) -> Self {
        Self { target }
    }

    pub fn record(&self, message: &str) {
        info!("[{}] {}", self.target, message);
    }

    pub fn detail(&self, message: &str) {
        debug!("[{}] {}", self.target, message);
    }

    pub fn skip(&self, stage: &str, reason: SkipReason) {
        warn!("[{}] {} skipped: {}", self.target, stage, reason);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
