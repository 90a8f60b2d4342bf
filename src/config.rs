//! Configuration Module
//! Caller-owned filter selection and the optional JSON settings file.

use crate::data::{FilterEngine, FuelType, Table};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fuels plotted when nothing else is configured.
pub const DEFAULT_FUELS: [FuelType; 2] = [FuelType::RegularGasoline, FuelType::HydratedEthanol];

/// Rows shown in the data sample.
pub const SAMPLE_ROWS: usize = 20;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Month used by the fuel comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonTarget {
    pub year: i32,
    pub month: u32,
}

/// The user's current selection, passed explicitly into every computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub years: BTreeSet<i32>,
    pub fuels: Vec<FuelType>,
    /// `None` compares at the first year and month of the filtered table.
    pub comparison: Option<ComparisonTarget>,
}

impl Selection {
    /// Every year of `table`, the default fuels, automatic comparison month.
    pub fn for_table(table: &Table) -> Self {
        Self {
            years: FilterEngine::available_years(table).into_iter().collect(),
            fuels: DEFAULT_FUELS.to_vec(),
            comparison: None,
        }
    }

    /// Replace the year filter. An explicit comparison whose year is no longer
    /// selected falls back to automatic.
    pub fn set_years(&mut self, years: BTreeSet<i32>) {
        self.years = years;
        if let Some(target) = self.comparison {
            if !self.years.contains(&target.year) {
                self.comparison = None;
            }
        }
    }
}

/// Pixel size of exported charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 700,
        }
    }
}

/// Settings file contents. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub source: Option<PathBuf>,
    /// Absent means every year in the dataset.
    pub years: Option<Vec<i32>>,
    pub fuels: Option<Vec<FuelType>>,
    pub comparison: Option<ComparisonTarget>,
    pub export_dir: Option<PathBuf>,
    pub chart: ChartSettings,
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Resolve the configured selection against a loaded table.
    pub fn selection_for(&self, table: &Table) -> Selection {
        let mut selection = Selection::for_table(table);
        if let Some(years) = &self.years {
            selection.years = years.iter().copied().collect();
        }
        if let Some(fuels) = &self.fuels {
            selection.fuels = fuels.clone();
        }
        selection.comparison = self.comparison;
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.chart, ChartSettings { width: 1200, height: 700 });
    }

    #[test]
    fn parses_full_document() {
        let config = AppConfig::from_json(
            r#"{
                "source": "combustivel_dataset.csv",
                "years": [2022, 2023],
                "fuels": ["oleo_diesel", "gas_cozinha_glp"],
                "comparison": {"year": 2023, "month": 6},
                "chart": {"width": 800}
            }"#,
        )
        .unwrap();
        assert_eq!(config.source, Some(PathBuf::from("combustivel_dataset.csv")));
        assert_eq!(config.years, Some(vec![2022, 2023]));
        assert_eq!(config.fuels, Some(vec![FuelType::Diesel, FuelType::Lpg]));
        assert_eq!(config.comparison, Some(ComparisonTarget { year: 2023, month: 6 }));
        assert_eq!(config.chart.width, 800);
        assert_eq!(config.chart.height, 700);
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(AppConfig::from_json(r#"{"colour": "red"}"#).is_err());
        assert!(AppConfig::from_json(r#"{"fuels": ["kerosene"]}"#).is_err());
    }

    #[test]
    fn unselecting_comparison_year_resets_target() {
        let mut selection = Selection {
            years: [2022, 2023].into_iter().collect(),
            fuels: DEFAULT_FUELS.to_vec(),
            comparison: Some(ComparisonTarget { year: 2023, month: 4 }),
        };

        selection.set_years([2022, 2023, 2024].into_iter().collect());
        assert_eq!(selection.comparison, Some(ComparisonTarget { year: 2023, month: 4 }));

        selection.set_years([2022].into_iter().collect());
        assert_eq!(selection.comparison, None);
        assert_eq!(selection.years, [2022].into_iter().collect());
    }
}
