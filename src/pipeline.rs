//! Pipeline Module
//! Entry points used by the presentation layer. Every call recomputes from
//! the table and selection it is given; nothing is remembered between calls.

use crate::config::{Selection, SAMPLE_ROWS};
use crate::data::{
    DataLoader, DatasetOverview, DateNormalizer, DomainError, FilterEngine, FuelSeries, FuelType,
    LoaderError, PriceRecord, SeriesBuilder, Table,
};
use crate::stats::{
    AggregateComparator, Comparison, CorrelationEngine, CorrelationMatrix, FuelStats,
    StatsCalculator,
};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum TableError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Load and validate the dataset. Fails as a whole; never returns a partial table.
pub fn load_table(path: impl AsRef<Path>) -> Result<Table, TableError> {
    let path = path.as_ref();
    let raw = DataLoader::load(path)?;
    let table = DateNormalizer::normalize(raw)?;
    let overview = FilterEngine::overview(&table);
    info!(
        path = %path.display(),
        rows = overview.record_count,
        first_year = ?overview.first_year,
        last_year = ?overview.last_year,
        "loaded fuel price table"
    );
    Ok(table)
}

pub fn list_available_years(table: &Table) -> Vec<i32> {
    FilterEngine::available_years(table)
}

pub fn filter_by_years(table: &Table, years: &BTreeSet<i32>) -> Table {
    FilterEngine::filter(table, years)
}

pub fn get_series(table: &Table, fuels: &[FuelType]) -> Vec<FuelSeries> {
    SeriesBuilder::build(table, fuels)
}

pub fn get_comparison(table: &Table, year: i32, month: u32, fuels: &[FuelType]) -> Comparison {
    let comparison = AggregateComparator::compare_at(table, year, month, fuels);
    if comparison.is_insufficient() {
        warn!(year, month, "no rows for comparison month");
    }
    comparison
}

pub fn get_descriptive_stats(table: &Table, fuels: &[FuelType]) -> Vec<FuelStats> {
    StatsCalculator::describe(table, fuels)
}

pub fn get_correlation_matrix(table: &Table, fuels: &[FuelType]) -> CorrelationMatrix {
    CorrelationEngine::correlate(table, fuels)
}

/// Everything the dashboard renders for one selection.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    /// Whole dataset, ignoring the year filter.
    pub overview: DatasetOverview,
    pub selection: Selection,
    pub filtered_rows: usize,
    /// Comparison choices offered for the filtered table.
    pub comparison_years: Vec<i32>,
    pub comparison_months: Vec<u32>,
    pub sample: Vec<PriceRecord>,
    pub series: Vec<FuelSeries>,
    /// Always over every fuel.
    pub comparison: Option<Comparison>,
    pub stats: Vec<FuelStats>,
    pub correlation: CorrelationMatrix,
}

/// Filter once, then run each independent computation on the filtered table.
pub fn compute_dashboard(table: &Table, selection: &Selection) -> DashboardView {
    let filtered = filter_by_years(table, &selection.years);
    debug!(
        years = ?selection.years,
        fuels = ?selection.fuels,
        rows = filtered.len(),
        "recomputing dashboard"
    );

    let comparison_years = FilterEngine::available_years(&filtered);
    let comparison_months = FilterEngine::available_months(&filtered);

    // Without an explicit target, compare at the first year/month on offer.
    let target = selection.comparison.map(|t| (t.year, t.month)).or_else(|| {
        Some((
            *comparison_years.first()?,
            *comparison_months.first()?,
        ))
    });
    let comparison =
        target.map(|(year, month)| get_comparison(&filtered, year, month, &FuelType::ALL));

    DashboardView {
        overview: FilterEngine::overview(table),
        selection: selection.clone(),
        filtered_rows: filtered.len(),
        sample: FilterEngine::sample(&filtered, SAMPLE_ROWS),
        series: get_series(&filtered, &selection.fuels),
        comparison,
        stats: get_descriptive_stats(&filtered, &FuelType::ALL),
        correlation: get_correlation_matrix(&filtered, &FuelType::ALL),
        comparison_years,
        comparison_months,
    }
}
