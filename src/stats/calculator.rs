//! Statistics Calculator Module
//! Descriptive statistics per fuel column with skip-missing semantics.

use crate::data::{dedup_fuels, FuelType, Table};
use rayon::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;

/// Summary of the non-missing average prices of one fuel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelStats {
    pub fuel: FuelType,
    /// Non-missing observations.
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (N-1); NaN below two observations.
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

impl FuelStats {
    fn empty(fuel: FuelType) -> Self {
        Self {
            fuel,
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            p25: f64::NAN,
            p50: f64::NAN,
            p75: f64::NAN,
            max: f64::NAN,
        }
    }
}

/// Handles statistical calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Statistics for every requested fuel, in request order.
    pub fn describe(table: &Table, fuels: &[FuelType]) -> Vec<FuelStats> {
        dedup_fuels(fuels)
            .par_iter()
            .map(|&fuel| {
                let values: Vec<f64> = table.iter().filter_map(|r| r.avg(fuel)).collect();
                Self::compute_descriptive_stats(fuel, &values)
            })
            .collect()
    }

    /// Compute descriptive statistics for already-present values.
    pub fn compute_descriptive_stats(fuel: FuelType, values: &[f64]) -> FuelStats {
        let n = values.len();
        if n == 0 {
            return FuelStats::empty(fuel);
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        FuelStats {
            fuel,
            count: n,
            mean: values.iter().mean(),
            std: values.iter().std_dev(),
            min: sorted[0],
            p25: Self::percentile(&sorted, 25.0),
            p50: Self::percentile(&sorted, 50.0),
            p75: Self::percentile(&sorted, 75.0),
            max: sorted[n - 1],
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }
}
