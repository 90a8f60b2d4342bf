//! Filter Module
//! Year filtering and selection helpers over a `Table`.

use crate::data::record::{PriceRecord, Table};
use serde::Serialize;
use std::collections::BTreeSet;

/// Headline figures for the whole (unfiltered) dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatasetOverview {
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
    pub record_count: usize,
}

/// Restricts tables to a set of years.
pub struct FilterEngine;

impl FilterEngine {
    /// Records whose year is in `years`, in their original relative order.
    ///
    /// An empty `years` set yields an empty table.
    pub fn filter(table: &Table, years: &BTreeSet<i32>) -> Table {
        let rows = table
            .row_indices()
            .iter()
            .zip(table.iter())
            .filter(|(_, record)| years.contains(&record.year))
            .map(|(&row, _)| row)
            .collect();
        table.view(rows)
    }

    /// Distinct years in ascending order.
    pub fn available_years(table: &Table) -> Vec<i32> {
        table
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct months in ascending order.
    pub fn available_months(table: &Table) -> Vec<u32> {
        table
            .iter()
            .map(|r| r.month)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn overview(table: &Table) -> DatasetOverview {
        DatasetOverview {
            first_year: table.iter().map(|r| r.year).min(),
            last_year: table.iter().map(|r| r.year).max(),
            record_count: table.len(),
        }
    }

    /// First `n` records, for display.
    pub fn sample(table: &Table, n: usize) -> Vec<PriceRecord> {
        table.iter().take(n).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fuel::FuelType;
    use crate::data::record::Quote;
    use chrono::NaiveDate;

    fn record(year: i32, month: u32) -> PriceRecord {
        PriceRecord {
            year,
            month,
            timestamp: NaiveDate::from_ymd_opt(year, month, 1).unwrap(),
            quotes: [Quote::default(); FuelType::COUNT],
        }
    }

    fn table() -> Table {
        Table::new(vec![
            record(2024, 3),
            record(2023, 1),
            record(2024, 1),
            record(2022, 7),
        ])
    }

    #[test]
    fn keeps_relative_order() {
        let t = table();
        let years = BTreeSet::from([2024, 2022]);
        let filtered = FilterEngine::filter(&t, &years);
        let got: Vec<(i32, u32)> = filtered.iter().map(|r| (r.year, r.month)).collect();
        assert_eq!(got, vec![(2024, 3), (2024, 1), (2022, 7)]);
        assert!(filtered.shares_records_with(&t));
    }

    #[test]
    fn empty_years_yield_empty_table() {
        assert!(FilterEngine::filter(&table(), &BTreeSet::new()).is_empty());
    }

    #[test]
    fn all_years_is_identity() {
        let t = table();
        let years: BTreeSet<i32> = FilterEngine::available_years(&t).into_iter().collect();
        assert_eq!(FilterEngine::filter(&t, &years), t);
    }

    #[test]
    fn filtering_a_view_again_narrows_it() {
        let t = table();
        let first = FilterEngine::filter(&t, &BTreeSet::from([2023, 2024]));
        let second = FilterEngine::filter(&first, &BTreeSet::from([2023]));
        assert_eq!(second.len(), 1);
        assert_eq!(second.get(0).map(|r| r.month), Some(1));
    }

    #[test]
    fn years_months_and_overview() {
        let t = table();
        assert_eq!(FilterEngine::available_years(&t), vec![2022, 2023, 2024]);
        assert_eq!(FilterEngine::available_months(&t), vec![1, 3, 7]);
        let overview = FilterEngine::overview(&t);
        assert_eq!(overview.first_year, Some(2022));
        assert_eq!(overview.last_year, Some(2024));
        assert_eq!(overview.record_count, 4);
        assert_eq!(FilterEngine::sample(&t, 2).len(), 2);
    }
}
