//! Data module - loading, validation, filtering and series extraction

mod filter;
mod fuel;
mod loader;
mod normalizer;
mod record;
mod series;

pub use filter::{DatasetOverview, FilterEngine};
pub use fuel::{dedup_fuels, FuelType, PriceField, UnknownFuel};
pub use loader::{DataLoader, LoaderError, MONTH_COLUMN, YEAR_COLUMN};
pub use normalizer::{DateNormalizer, DomainError, MAX_YEAR, MIN_YEAR};
pub use record::{PriceRecord, Quote, RawRecord, RawTable, Table};
pub use series::{FuelSeries, SeriesBuilder, SeriesPoint};
