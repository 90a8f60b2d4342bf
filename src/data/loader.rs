//! Dataset Loader Module
//! Reads the fuel price table (CSV or Parquet) into typed rows using Polars.

use crate::data::fuel::{FuelType, PriceField};
use crate::data::record::{Quote, RawRecord, RawTable};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const YEAR_COLUMN: &str = "ano";
pub const MONTH_COLUMN: &str = "mes";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Source not found: {0}")]
    NotFound(PathBuf),
    #[error("Unsupported source format '{0}'; use .csv or .parquet")]
    UnsupportedFormat(String),
    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("Column '{column}', row {row}: value is not numeric")]
    NonNumeric { column: String, row: usize },
    #[error("Failed to read source: {0}")]
    Polars(#[from] PolarsError),
}

/// Loads the whole dataset into memory in one blocking read.
pub struct DataLoader;

impl DataLoader {
    /// Read `path` and extract the year, month and per-fuel price columns.
    pub fn load(path: impl AsRef<Path>) -> Result<RawTable, LoaderError> {
        let df = Self::read_frame(path.as_ref())?;
        Self::from_dataframe(&df)
    }

    /// Read the source file into a DataFrame, dispatching on the file extension.
    pub fn read_frame(path: &Path) -> Result<DataFrame, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        let df = match extension.as_str() {
            "csv" => LazyCsvReader::new(path)
                .with_has_header(true)
                .with_infer_schema_length(Some(10000))
                .finish()?
                .collect()?,
            "parquet" => LazyFrame::scan_parquet(path, ScanArgsParquet::default())?.collect()?,
            other => return Err(LoaderError::UnsupportedFormat(other.to_string())),
        };

        debug!(
            path = %path.display(),
            rows = df.height(),
            columns = df.width(),
            "read source frame"
        );
        Ok(df)
    }

    /// Column names that every source must carry.
    pub fn required_columns() -> Vec<String> {
        let mut columns = vec![YEAR_COLUMN.to_string(), MONTH_COLUMN.to_string()];
        columns.extend(FuelType::ALL.iter().map(|fuel| fuel.avg_column()));
        columns
    }

    /// Convert a DataFrame into raw rows. Min/max columns are optional.
    pub fn from_dataframe(df: &DataFrame) -> Result<RawTable, LoaderError> {
        let present: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let missing: Vec<String> = Self::required_columns()
            .into_iter()
            .filter(|col| !present.contains(col))
            .collect();
        if !missing.is_empty() {
            return Err(LoaderError::MissingColumns(missing));
        }

        // Read as floats so the normalizer can reject fractional periods.
        let years = Self::float_column(df, YEAR_COLUMN)?;
        let months = Self::float_column(df, MONTH_COLUMN)?;

        let mut rows: Vec<RawRecord> = years
            .into_iter()
            .zip(months)
            .map(|(year, month)| RawRecord {
                year,
                month,
                quotes: [Quote::default(); FuelType::COUNT],
            })
            .collect();

        for fuel in FuelType::ALL {
            for field in PriceField::ALL {
                let name = fuel.column(field);
                if !present.contains(&name) {
                    continue;
                }
                let values = Self::float_column(df, &name)?;
                for (row, value) in rows.iter_mut().zip(values) {
                    row.quotes[fuel.index()].set(field, value);
                }
            }
        }

        Ok(RawTable { rows })
    }

    /// Float column with NaN treated as missing. A cell that is present in the
    /// source but does not parse as a number is an error, not a missing value.
    fn float_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, LoaderError> {
        let source = df.column(name)?.as_materialized_series();
        let cast = source.cast(&DataType::Float64)?;
        let values: Vec<Option<f64>> = cast.f64()?.into_iter().collect();

        let lost = source
            .is_null()
            .into_iter()
            .zip(&values)
            .position(|(was_null, value)| was_null == Some(false) && value.is_none());
        if let Some(row) = lost {
            return Err(LoaderError::NonNumeric {
                column: name.to_string(),
                row,
            });
        }

        Ok(values
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect())
    }
}
