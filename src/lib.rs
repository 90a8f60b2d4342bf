//! Fuel Dash - monthly fuel price analysis
//!
//! Loads a table of monthly fuel price observations and derives price series,
//! month comparisons, descriptive statistics and correlations for a
//! caller-supplied selection of years and fuels.

pub mod charts;
pub mod config;
pub mod data;
pub mod pipeline;
pub mod report;
pub mod stats;

pub use config::{AppConfig, ChartSettings, ComparisonTarget, Selection};
pub use data::{FuelType, PriceRecord, Table};
pub use pipeline::{
    compute_dashboard, filter_by_years, get_comparison, get_correlation_matrix,
    get_descriptive_stats, get_series, list_available_years, load_table, DashboardView,
    TableError,
};
