//! Stats module - descriptive statistics, month comparison and correlation

mod calculator;
mod comparison;
mod correlation;

pub use calculator::{FuelStats, StatsCalculator};
pub use comparison::{AggregateComparator, Comparison, FuelMean};
pub use correlation::{CorrelationEngine, CorrelationMatrix};
