//! Fuel Dash - Fuel Price Analysis & Interactive Dashboard
//!
//! Opens the dashboard window, or with `--export` writes a report and exits.

mod gui;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use fuel_dash::report::ReportExporter;
use fuel_dash::{compute_dashboard, load_table, AppConfig};
use gui::FuelDashApp;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fuel_dash", version, about = "Fuel price analysis dashboard")]
struct Cli {
    /// Dataset to load (.csv or .parquet)
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the report into this directory and exit without opening a window
    #[arg(short, long, value_name = "DIR")]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fuel_dash=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    if cli.source.is_some() {
        config.source = cli.source.clone();
    }

    if let Some(dir) = cli.export {
        return export_headless(&config, dir);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("Fuel Dash"),
        ..Default::default()
    };

    eframe::run_native(
        "Fuel Dash",
        options,
        Box::new(|cc| Ok(Box::new(FuelDashApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {e}"))
}

fn export_headless(config: &AppConfig, dir: PathBuf) -> Result<()> {
    let source = config
        .source
        .as_ref()
        .context("--export needs a dataset: pass --source or set \"source\" in the config")?;
    let table = load_table(source).with_context(|| format!("loading {}", source.display()))?;
    let selection = config.selection_for(&table);
    let view = compute_dashboard(&table, &selection);
    let files = ReportExporter::export(&view, &dir, config.chart)
        .with_context(|| format!("exporting report to {}", dir.display()))?;
    for file in &files {
        info!(file = %file.display(), "written");
    }
    Ok(())
}
