use crate::preview::report::RunReport;
use anyhow::{Context, Result};
use image::GrayImage;
use log::debug;
use spectralcore::display::{magnitude, to_gray_bytes};
use spectralcore::processing::FilterPipeline;
use spectralcore::RealMatrix;
use std::fs;
use std::path::PathBuf;

/// Writes normalized 8-bit previews and the JSON report into one directory.
pub struct PreviewExporter {
    directory: PathBuf,
}

impl PreviewExporter {
    pub fn new<P: Into<PathBuf>>(directory: P) -> Result<Self> {
        let directory = directory.into();
        fs::create_dir_all(&directory)
            .with_context(|| format!("creating output directory {}", directory.display()))?;
        Ok(Self { directory })
    }

    /// One PNG per populated view; empty slots are left out.
    pub fn export_pipeline(&self, pipeline: &FilterPipeline) -> Result<Vec<PathBuf>> {
        let views = [
            ("source", pipeline.source().clone()),
            ("noisy", pipeline.noisy().clone()),
            ("spectrum", magnitude(pipeline.spectrum())),
            ("spectrum-log", pipeline.log_spectrum()),
            ("masked-spectrum-log", pipeline.log_masked_spectrum()),
            ("processed", pipeline.processed().clone()),
        ];

        let mut written = Vec::new();
        for (name, matrix) in views.iter() {
            if matrix.is_empty() {
                continue;
            }
            written.push(self.write_png(name, matrix)?);
        }
        Ok(written)
    }

    pub fn write_png(&self, name: &str, matrix: &RealMatrix) -> Result<PathBuf> {
        let path = self.directory.join(format!("{name}.png"));
        let (height, width) = matrix.dim();
        let image = GrayImage::from_raw(width as u32, height as u32, to_gray_bytes(matrix))
            .context("pixel buffer does not match preview dimensions")?;
        image
            .save(&path)
            .with_context(|| format!("writing preview {}", path.display()))?;
        debug!("wrote {}", path.display());
        Ok(path)
    }

    pub fn write_report(&self, report: &RunReport) -> Result<PathBuf> {
        let path = self.directory.join("report.json");
        let json = serde_json::to_string_pretty(report).context("serializing run report")?;
        fs::write(&path, json).with_context(|| format!("writing report {}", path.display()))?;
        Ok(path)
    }
}
