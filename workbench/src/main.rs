use anyhow::Context;
use clap::{Parser, ValueEnum};
use generator::profile::build_test_pattern;
use preview::exporter::PreviewExporter;
use preview::report::RunReport;
use spectralcore::prelude::{FilterPassMode, ResizeMode};
use std::path::PathBuf;
use workflow::config::{SpectrogramConfig, WorkflowConfig};
use workflow::runner::Runner;

mod generator;
mod preview;
mod workflow;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ResizeArg {
    ZeroPadding,
    Bilinear,
}

impl From<ResizeArg> for ResizeMode {
    fn from(arg: ResizeArg) -> Self {
        match arg {
            ResizeArg::ZeroPadding => ResizeMode::ZeroPadding,
            ResizeArg::Bilinear => ResizeMode::Bilinear,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PassArg {
    Low,
    High,
}

impl From<PassArg> for FilterPassMode {
    fn from(arg: PassArg) -> Self {
        match arg {
            PassArg::Low => FilterPassMode::Low,
            PassArg::High => FilterPassMode::High,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about = "Frequency-domain image filtering workbench")]
struct Args {
    /// Image to filter; a synthetic test pattern is used when omitted
    #[arg(long)]
    input: Option<PathBuf>,
    /// Load a workflow config from YAML (overrides the filter flags below)
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    #[arg(long, value_enum, default_value_t = ResizeArg::ZeroPadding)]
    resize_mode: ResizeArg,
    /// Noise energy as a percentage of signal energy
    #[arg(long, default_value_t = 0.0)]
    noise: f64,
    /// Mask radius as a fraction of half the spectrum diagonal
    #[arg(long, default_value_t = 0.1)]
    mask_size: f64,
    #[arg(long, value_enum, default_value_t = PassArg::Low)]
    pass: PassArg,
    #[arg(long)]
    seed: Option<u64>,
    /// Side length of the synthetic test pattern
    #[arg(long, default_value_t = 128)]
    pattern_size: usize,
    /// Row of the processed image to analyse with a sliding-window spectrogram
    #[arg(long)]
    spectrogram_row: Option<usize>,
    #[arg(long, default_value_t = 64)]
    window_size: usize,
    #[arg(long, default_value_t = 32)]
    window_overlap: usize,
    /// Directory receiving PNG previews and report.json
    #[arg(long, default_value = "out")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = &args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(
            args.width,
            args.height,
            args.resize_mode.into(),
            args.noise,
            args.mask_size,
            args.pass.into(),
            args.seed,
            args.spectrogram_row.map(|row| SpectrogramConfig {
                row,
                window_size: args.window_size,
                window_overlap: args.window_overlap,
            }),
        )
    };

    let runner = Runner::new(workflow_config.clone());
    let result = match &args.input {
        Some(path) => runner.execute_file(path)?,
        None => {
            let pattern = build_test_pattern(
                args.pattern_size,
                args.pattern_size,
                workflow_config.seed.unwrap_or(0),
            )
            .context("generating synthetic test pattern")?;
            runner.execute(pattern)?
        }
    };

    let exporter = PreviewExporter::new(&args.output)?;
    let previews = exporter.export_pipeline(&result.pipeline)?;
    let report = RunReport::from_result(&result);
    let report_path = exporter.write_report(&report)?;

    println!(
        "Filtered {}x{} -> {}x{}, stages applied {}, previews {}, spectrogram frames {}",
        report.source_dims.0,
        report.source_dims.1,
        report.output_dims.0,
        report.output_dims.1,
        report.applied,
        previews.len(),
        report.spectrogram.len()
    );
    println!("Report written to {}", report_path.display());

    Ok(())
}
