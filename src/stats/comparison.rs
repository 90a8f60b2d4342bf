//! Aggregate Comparator Module
//! Mean price per fuel for one (year, month).

use crate::data::{dedup_fuels, FuelType, Table};
use serde::Serialize;
use statrs::statistics::Statistics;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FuelMean {
    pub fuel: FuelType,
    /// NaN when every matched row lacks a quotation for this fuel.
    pub mean: f64,
}

/// Comparison of fuels at one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Comparison {
    /// No row matched the requested month.
    InsufficientData { year: i32, month: u32 },
    Available {
        year: i32,
        month: u32,
        /// Rows averaged together (more than one when the source repeats a month).
        matched_rows: usize,
        means: Vec<FuelMean>,
    },
}

impl Comparison {
    pub fn is_insufficient(&self) -> bool {
        matches!(self, Comparison::InsufficientData { .. })
    }

    pub fn period(&self) -> (i32, u32) {
        match self {
            Comparison::InsufficientData { year, month }
            | Comparison::Available { year, month, .. } => (*year, *month),
        }
    }

    pub fn means(&self) -> &[FuelMean] {
        match self {
            Comparison::InsufficientData { .. } => &[],
            Comparison::Available { means, .. } => means,
        }
    }

    /// Mean for `fuel`; `None` when the comparison has no data or the fuel was not requested.
    pub fn mean_for(&self, fuel: FuelType) -> Option<f64> {
        self.means().iter().find(|m| m.fuel == fuel).map(|m| m.mean)
    }
}

pub struct AggregateComparator;

impl AggregateComparator {
    /// Average the non-missing prices of each fuel over the rows of `(year, month)`.
    pub fn compare_at(table: &Table, year: i32, month: u32, fuels: &[FuelType]) -> Comparison {
        let matched: Vec<_> = table
            .iter()
            .filter(|r| r.year == year && r.month == month)
            .collect();

        if matched.is_empty() {
            return Comparison::InsufficientData { year, month };
        }

        let means = dedup_fuels(fuels)
            .into_iter()
            .map(|fuel| FuelMean {
                fuel,
                // mean() of an empty iterator is NaN
                mean: matched.iter().filter_map(|r| r.avg(fuel)).mean(),
            })
            .collect();

        Comparison::Available {
            year,
            month,
            matched_rows: matched.len(),
            means,
        }
    }
}
