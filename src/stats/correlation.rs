//! Correlation Engine Module
//! Pairwise-complete Pearson correlation between fuel price columns.

use crate::data::{dedup_fuels, FuelType, Table};
use serde::Serialize;
use statrs::statistics::Statistics;

/// Symmetric correlation matrix indexed by `fuels`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub fuels: Vec<FuelType>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.fuels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fuels.is_empty()
    }

    pub fn get(&self, a: FuelType, b: FuelType) -> Option<f64> {
        let i = self.fuels.iter().position(|&f| f == a)?;
        let j = self.fuels.iter().position(|&f| f == b)?;
        Some(self.values[i][j])
    }
}

pub struct CorrelationEngine;

impl CorrelationEngine {
    pub fn correlate(table: &Table, fuels: &[FuelType]) -> CorrelationMatrix {
        let fuels = dedup_fuels(fuels);
        let columns: Vec<Vec<Option<f64>>> =
            fuels.iter().map(|&fuel| table.avg_column(fuel)).collect();

        let n = fuels.len();
        let mut values = vec![vec![f64::NAN; n]; n];
        for i in 0..n {
            let observed = columns[i].iter().flatten().count();
            values[i][i] = if observed >= 2 { 1.0 } else { f64::NAN };
            for j in (i + 1)..n {
                let r = Self::pearson_pairwise(&columns[i], &columns[j]);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        CorrelationMatrix { fuels, values }
    }

    /// Pearson coefficient over the rows where both columns are present.
    /// NaN with fewer than two such rows or when either side is constant.
    pub fn pearson_pairwise(xs: &[Option<f64>], ys: &[Option<f64>]) -> f64 {
        let (x, y): (Vec<f64>, Vec<f64>) = xs
            .iter()
            .zip(ys)
            .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
            .unzip();

        if x.len() < 2 {
            return f64::NAN;
        }

        let sx = x.iter().std_dev();
        let sy = y.iter().std_dev();
        if sx == 0.0 || sy == 0.0 {
            return f64::NAN;
        }

        let r = x.iter().covariance(y.iter()) / (sx * sy);
        r.clamp(-1.0, 1.0)
    }
}
