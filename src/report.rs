//! Report Exporter Module
//! Writes a dashboard view to a directory: JSON data plus PNG charts.

use crate::charts::{RenderError, StaticChartRenderer};
use crate::config::ChartSettings;
use crate::pipeline::DashboardView;
use crate::stats::Comparison;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const REPORT_FILE: &str = "report.json";
pub const SERIES_CHART: &str = "series.png";
pub const COMPARISON_CHART: &str = "comparison.png";
pub const CORRELATION_CHART: &str = "correlation.png";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Render(#[from] RenderError),
}

pub struct ReportExporter;

impl ReportExporter {
    /// Write `report.json` and the three charts into `dir`, creating it if needed.
    /// Returns the files written.
    pub fn export(
        view: &DashboardView,
        dir: &Path,
        settings: ChartSettings,
    ) -> Result<Vec<PathBuf>, ReportError> {
        let mut written = vec![Self::write_json(view, dir)?];

        let series_path = dir.join(SERIES_CHART);
        StaticChartRenderer::render_series(&view.series, &series_path, settings)?;
        written.push(series_path);

        if let Some(comparison @ Comparison::Available { .. }) = &view.comparison {
            let comparison_path = dir.join(COMPARISON_CHART);
            StaticChartRenderer::render_comparison(comparison, &comparison_path, settings)?;
            written.push(comparison_path);
        }

        let correlation_path = dir.join(CORRELATION_CHART);
        StaticChartRenderer::render_correlation(&view.correlation, &correlation_path, settings)?;
        written.push(correlation_path);

        info!(dir = %dir.display(), files = written.len(), "exported report");
        Ok(written)
    }

    /// Only the JSON part of the report.
    pub fn write_json(view: &DashboardView, dir: &Path) -> Result<PathBuf, ReportError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(REPORT_FILE);
        let writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(writer, view)?;
        Ok(path)
    }
}
