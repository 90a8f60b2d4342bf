//! Series Builder Module
//! Per-fuel time series of average prices, ordered by timestamp.

use crate::data::fuel::{dedup_fuels, FuelType};
use crate::data::record::Table;
use chrono::NaiveDate;
use serde::Serialize;

/// One observation; `price` is `None` where the fuel had no quotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub timestamp: NaiveDate,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelSeries {
    pub fuel: FuelType,
    pub points: Vec<SeriesPoint>,
}

impl FuelSeries {
    /// Runs of consecutive non-missing points, used to draw lines broken at gaps.
    pub fn segments(&self) -> Vec<Vec<(NaiveDate, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for point in &self.points {
            match point.price {
                Some(price) => current.push((point.timestamp, price)),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

pub struct SeriesBuilder;

impl SeriesBuilder {
    /// Build one series per requested fuel, in request order.
    ///
    /// Missing prices stay in the series as gaps; duplicate timestamps are all
    /// kept, in their table order.
    pub fn build(table: &Table, fuels: &[FuelType]) -> Vec<FuelSeries> {
        dedup_fuels(fuels)
            .into_iter()
            .map(|fuel| Self::build_one(table, fuel))
            .collect()
    }

    pub fn build_one(table: &Table, fuel: FuelType) -> FuelSeries {
        let mut points: Vec<SeriesPoint> = table
            .iter()
            .map(|record| SeriesPoint {
                timestamp: record.timestamp,
                price: record.avg(fuel),
            })
            .collect();
        // sort_by_key is stable
        points.sort_by_key(|p| p.timestamp);
        FuelSeries { fuel, points }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::{PriceRecord, Quote};

    fn record(year: i32, month: u32, gas: Option<f64>) -> PriceRecord {
        let mut quotes = [Quote::default(); FuelType::COUNT];
        quotes[FuelType::RegularGasoline.index()].avg = gas;
        PriceRecord {
            year,
            month,
            timestamp: NaiveDate::from_ymd_opt(year, month, 1).unwrap(),
            quotes,
        }
    }

    fn date(year: i32, month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, 1).unwrap()
    }

    #[test]
    fn sorts_by_timestamp_and_keeps_gaps() {
        let table = Table::new(vec![
            record(2023, 3, Some(5.3)),
            record(2023, 1, None),
            record(2023, 2, Some(5.2)),
        ]);
        let series = SeriesBuilder::build_one(&table, FuelType::RegularGasoline);
        let got: Vec<(NaiveDate, Option<f64>)> =
            series.points.iter().map(|p| (p.timestamp, p.price)).collect();
        assert_eq!(
            got,
            vec![
                (date(2023, 1), None),
                (date(2023, 2), Some(5.2)),
                (date(2023, 3), Some(5.3)),
            ]
        );
    }

    #[test]
    fn duplicate_timestamps_keep_table_order() {
        let table = Table::new(vec![
            record(2023, 2, Some(2.0)),
            record(2023, 1, Some(9.0)),
            record(2023, 2, Some(1.0)),
        ]);
        let series = SeriesBuilder::build_one(&table, FuelType::RegularGasoline);
        let prices: Vec<Option<f64>> = series.points.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![Some(9.0), Some(2.0), Some(1.0)]);
    }

    #[test]
    fn segments_split_at_gaps() {
        let table = Table::new(vec![
            record(2023, 1, Some(1.0)),
            record(2023, 2, Some(2.0)),
            record(2023, 3, None),
            record(2023, 4, Some(4.0)),
        ]);
        let segments = SeriesBuilder::build_one(&table, FuelType::RegularGasoline).segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].len(), 2);
        assert_eq!(segments[1], vec![(date(2023, 4), 4.0)]);
    }

    #[test]
    fn empty_fuel_selection_yields_no_series() {
        let table = Table::new(vec![record(2023, 1, Some(1.0))]);
        assert!(SeriesBuilder::build(&table, &[]).is_empty());
    }
}
