pub mod exporter;
pub mod report;
