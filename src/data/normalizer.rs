//! Date Normalizer Module
//! Validates year/month/prices and derives the first-of-month timestamp.

use crate::data::fuel::{FuelType, PriceField};
use crate::data::record::{PriceRecord, RawRecord, RawTable, Table};
use chrono::NaiveDate;
use thiserror::Error;

/// Earliest calendar year accepted in the source.
pub const MIN_YEAR: i64 = 1900;
/// Latest calendar year accepted in the source.
pub const MAX_YEAR: i64 = 2200;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Row {row}: missing year")]
    MissingYear { row: usize },
    #[error("Row {row}: missing month")]
    MissingMonth { row: usize },
    #[error("Row {row}: year {value} is not a whole number")]
    FractionalYear { row: usize, value: f64 },
    #[error("Row {row}: month {value} is not a whole number")]
    FractionalMonth { row: usize, value: f64 },
    #[error("Row {row}: year {year} outside [{}, {}]", MIN_YEAR, MAX_YEAR)]
    YearOutOfRange { row: usize, year: i64 },
    #[error("Row {row}: month {month} outside [1, 12]")]
    MonthOutOfRange { row: usize, month: i64 },
    #[error("Row {row}: negative price {value} in {column}")]
    NegativePrice {
        row: usize,
        column: String,
        value: f64,
    },
}

/// Turns raw rows into validated, timestamped records.
pub struct DateNormalizer;

impl DateNormalizer {
    /// Validate every row and build the table. Rejects the whole input on the
    /// first invalid row; never drops rows.
    pub fn normalize(raw: RawTable) -> Result<Table, DomainError> {
        let records = raw
            .rows
            .into_iter()
            .enumerate()
            .map(|(row, record)| Self::normalize_row(row, record))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Table::new(records))
    }

    fn normalize_row(row: usize, raw: RawRecord) -> Result<PriceRecord, DomainError> {
        let year = raw.year.ok_or(DomainError::MissingYear { row })?;
        let month = raw.month.ok_or(DomainError::MissingMonth { row })?;
        if year.fract() != 0.0 {
            return Err(DomainError::FractionalYear { row, value: year });
        }
        if month.fract() != 0.0 {
            return Err(DomainError::FractionalMonth { row, value: month });
        }
        let (year, month) = (year as i64, month as i64);

        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(DomainError::YearOutOfRange { row, year });
        }
        if !(1..=12).contains(&month) {
            return Err(DomainError::MonthOutOfRange { row, month });
        }

        for fuel in FuelType::ALL {
            for field in PriceField::ALL {
                if let Some(value) = raw.quotes[fuel.index()].get(field) {
                    if value < 0.0 {
                        return Err(DomainError::NegativePrice {
                            row,
                            column: fuel.column(field),
                            value,
                        });
                    }
                }
            }
        }

        // Both values are range-checked above.
        let (year, month) = (year as i32, month as u32);
        let timestamp = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(DomainError::MonthOutOfRange { row, month: month as i64 })?;

        Ok(PriceRecord {
            year,
            month,
            timestamp,
            quotes: raw.quotes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::Quote;

    fn raw(year: Option<i64>, month: Option<i64>) -> RawRecord {
        RawRecord {
            year: year.map(|y| y as f64),
            month: month.map(|m| m as f64),
            quotes: [Quote::default(); FuelType::COUNT],
        }
    }

    #[test]
    fn derives_first_of_month() {
        let table = DateNormalizer::normalize(RawTable {
            rows: vec![raw(Some(2023), Some(2))],
        })
        .unwrap();
        let record = table.get(0).unwrap();
        assert_eq!(record.timestamp, NaiveDate::from_ymd_opt(2023, 2, 1).unwrap());
        assert_eq!((record.year, record.month), (2023, 2));
    }

    #[test]
    fn rejects_month_out_of_range() {
        let err = DateNormalizer::normalize(RawTable {
            rows: vec![raw(Some(2023), Some(1)), raw(Some(2023), Some(13))],
        })
        .unwrap_err();
        assert_eq!(err, DomainError::MonthOutOfRange { row: 1, month: 13 });
    }

    #[test]
    fn rejects_non_positive_year_and_nulls() {
        assert!(matches!(
            DateNormalizer::normalize(RawTable { rows: vec![raw(Some(0), Some(1))] }),
            Err(DomainError::YearOutOfRange { row: 0, year: 0 })
        ));
        assert!(matches!(
            DateNormalizer::normalize(RawTable { rows: vec![raw(None, Some(1))] }),
            Err(DomainError::MissingYear { row: 0 })
        ));
        assert!(matches!(
            DateNormalizer::normalize(RawTable { rows: vec![raw(Some(2020), None)] }),
            Err(DomainError::MissingMonth { row: 0 })
        ));
    }

    #[test]
    fn rejects_negative_price() {
        let mut record = raw(Some(2023), Some(5));
        record.quotes[FuelType::Diesel.index()].min = Some(-0.1);
        let err = DateNormalizer::normalize(RawTable { rows: vec![record] }).unwrap_err();
        assert!(matches!(err, DomainError::NegativePrice { row: 0, .. }));
    }

    #[test]
    fn keeps_every_row() {
        let rows = vec![raw(Some(2023), Some(1)), raw(Some(2023), Some(1))];
        let table = DateNormalizer::normalize(RawTable { rows }).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn rejects_fractional_period() {
        let mut half_month = raw(Some(2023), None);
        half_month.month = Some(1.5);
        let err = DateNormalizer::normalize(RawTable {
            rows: vec![raw(Some(2023), Some(1)), half_month],
        })
        .unwrap_err();
        assert_eq!(err, DomainError::FractionalMonth { row: 1, value: 1.5 });

        let mut odd_year = raw(None, Some(3));
        odd_year.year = Some(2023.25);
        assert!(matches!(
            DateNormalizer::normalize(RawTable { rows: vec![odd_year] }),
            Err(DomainError::FractionalYear { row: 0, .. })
        ));
    }
}
