//! Shared test fixtures for the fuel_dash integration tests.
//!
//! Rows are written as CSV files into a temporary directory and loaded back
//! through the public API, the same way the dashboard reads its dataset.

#![allow(dead_code)]

use fuel_dash::{load_table, FuelType, Table};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const EPS: f64 = 1e-9;

pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

/// One source row. Min/max columns are written as avg -/+ 0.10.
#[derive(Debug, Clone)]
pub struct CsvRow {
    pub year: i64,
    pub month: i64,
    pub avg: [Option<f64>; FuelType::COUNT],
}

impl CsvRow {
    pub fn new(year: i64, month: i64) -> Self {
        Self {
            year,
            month,
            avg: [None; FuelType::COUNT],
        }
    }

    pub fn with(mut self, fuel: FuelType, price: f64) -> Self {
        self.avg[fuel.index()] = Some(price);
        self
    }
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_default()
}

/// Render rows as CSV text with the full column layout.
pub fn csv_text(rows: &[CsvRow]) -> String {
    let mut header = vec!["ano".to_string(), "mes".to_string()];
    for fuel in FuelType::ALL {
        header.push(fuel.avg_column());
        header.push(fuel.avg_column().replace("_avg", "_min"));
        header.push(fuel.avg_column().replace("_avg", "_max"));
    }

    let mut text = header.join(",");
    text.push('\n');
    for row in rows {
        let mut fields = vec![row.year.to_string(), row.month.to_string()];
        for fuel in FuelType::ALL {
            let avg = row.avg[fuel.index()];
            fields.push(cell(avg));
            fields.push(cell(avg.map(|v| v - 0.10)));
            fields.push(cell(avg.map(|v| v + 0.10)));
        }
        writeln!(text, "{}", fields.join(",")).unwrap();
    }
    text
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

pub fn write_csv(dir: &Path, name: &str, rows: &[CsvRow]) -> PathBuf {
    write_file(dir, name, &csv_text(rows))
}

/// Load `rows` through `load_table`. Keep the `TempDir` alive while the table is used.
pub fn load_rows(rows: &[CsvRow]) -> (Table, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "combustivel_dataset.csv", rows);
    let table = load_table(&path).unwrap();
    (table, dir)
}

/// `[(2023,1,5.00), (2023,2,5.20), (2024,1,5.50)]` for regular gasoline.
pub fn scenario_rows() -> Vec<CsvRow> {
    vec![
        CsvRow::new(2023, 1).with(FuelType::RegularGasoline, 5.00),
        CsvRow::new(2023, 2).with(FuelType::RegularGasoline, 5.20),
        CsvRow::new(2024, 1).with(FuelType::RegularGasoline, 5.50),
    ]
}

/// Three years of data with gaps, an unsorted month and a duplicated month.
pub fn mixed_rows() -> Vec<CsvRow> {
    vec![
        CsvRow::new(2022, 3)
            .with(FuelType::RegularGasoline, 6.10)
            .with(FuelType::HydratedEthanol, 4.20)
            .with(FuelType::Diesel, 5.90),
        CsvRow::new(2022, 1)
            .with(FuelType::RegularGasoline, 6.00)
            .with(FuelType::HydratedEthanol, 4.00)
            .with(FuelType::Diesel, 5.50),
        CsvRow::new(2022, 2)
            .with(FuelType::RegularGasoline, 6.30)
            .with(FuelType::Diesel, 5.70),
        CsvRow::new(2023, 1)
            .with(FuelType::RegularGasoline, 5.40)
            .with(FuelType::HydratedEthanol, 3.60)
            .with(FuelType::Diesel, 6.20)
            .with(FuelType::Lpg, 110.0),
        CsvRow::new(2023, 1)
            .with(FuelType::RegularGasoline, 5.60)
            .with(FuelType::HydratedEthanol, 3.80)
            .with(FuelType::Diesel, 6.40),
        CsvRow::new(2024, 6)
            .with(FuelType::RegularGasoline, 5.90)
            .with(FuelType::HydratedEthanol, 4.10)
            .with(FuelType::Diesel, 6.00),
    ]
}
