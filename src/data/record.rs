//! Record Module
//! Typed rows of the price table and the shared, read-only `Table` view.

use crate::data::fuel::{FuelType, PriceField};
use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::sync::Arc;

/// Average, minimum and maximum resale price of one fuel in one period.
/// `None` means no quotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Quote {
    pub avg: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Quote {
    pub fn get(&self, field: PriceField) -> Option<f64> {
        match field {
            PriceField::Avg => self.avg,
            PriceField::Min => self.min,
            PriceField::Max => self.max,
        }
    }

    pub fn set(&mut self, field: PriceField, value: Option<f64>) {
        match field {
            PriceField::Avg => self.avg = value,
            PriceField::Min => self.min = value,
            PriceField::Max => self.max = value,
        }
    }
}

/// A row as read from the source, before year/month validation.
/// Year and month stay floats until the normalizer checks they are whole.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub year: Option<f64>,
    pub month: Option<f64>,
    pub quotes: [Quote; FuelType::COUNT],
}

/// Rows as delivered by the loader.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub rows: Vec<RawRecord>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One validated monthly observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRecord {
    pub year: i32,
    pub month: u32,
    /// First day of `year`-`month`.
    pub timestamp: NaiveDate,
    #[serde(serialize_with = "serialize_quotes")]
    pub quotes: [Quote; FuelType::COUNT],
}

impl PriceRecord {
    pub fn quote(&self, fuel: FuelType) -> &Quote {
        &self.quotes[fuel.index()]
    }

    /// Average resale price of `fuel`, the only price the analytics consume.
    pub fn avg(&self, fuel: FuelType) -> Option<f64> {
        self.quote(fuel).avg
    }
}

/// Quotes keyed by fuel column key, in `FuelType::ALL` order.
fn serialize_quotes<S: Serializer>(
    quotes: &[Quote; FuelType::COUNT],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(FuelType::ALL.iter().map(|f| (f.key(), &quotes[f.index()])))
}

/// Read-only view over a shared set of records.
///
/// Filtering produces another view on the same records; nothing is copied
/// and nothing can be mutated through a view.
#[derive(Debug, Clone)]
pub struct Table {
    records: Arc<[PriceRecord]>,
    rows: Arc<[usize]>,
}

impl Table {
    pub fn new(records: Vec<PriceRecord>) -> Self {
        let rows: Arc<[usize]> = (0..records.len()).collect();
        Self {
            records: records.into(),
            rows,
        }
    }

    /// A view over the same records restricted to `rows` (indices into the base records).
    pub(crate) fn view(&self, rows: Vec<usize>) -> Self {
        Self {
            records: Arc::clone(&self.records),
            rows: rows.into(),
        }
    }

    pub(crate) fn row_indices(&self) -> &[usize] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&PriceRecord> {
        self.rows.get(i).map(|&row| &self.records[row])
    }

    pub fn iter(&self) -> impl Iterator<Item = &PriceRecord> + '_ {
        self.rows.iter().map(move |&row| &self.records[row])
    }

    /// Whether both views are backed by the same loaded records.
    pub fn shares_records_with(&self, other: &Table) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }

    /// Average prices of `fuel` in row order, missing values kept as `None`.
    pub fn avg_column(&self, fuel: FuelType) -> Vec<Option<f64>> {
        self.iter().map(|r| r.avg(fuel)).collect()
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}
