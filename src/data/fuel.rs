//! Fuel Type Module
//! Fixed set of fuel categories and their column keys in the source table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Suffix shared by every price column in the source table.
const PRICE_INFIX: &str = "preco_revenda";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown fuel type: {0}")]
pub struct UnknownFuel(pub String);

/// Fuel categories tracked by the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FuelType {
    #[serde(rename = "gasolina_comum")]
    RegularGasoline,
    #[serde(rename = "gasolina_aditivada")]
    AdditizedGasoline,
    #[serde(rename = "etanol_hidratado")]
    HydratedEthanol,
    #[serde(rename = "oleo_diesel")]
    Diesel,
    #[serde(rename = "oleo_diesel_s10")]
    DieselS10,
    #[serde(rename = "gas_cozinha_glp")]
    Lpg,
    #[serde(rename = "gas_natural_veicular_gnv")]
    Cng,
}

/// (fuel, column key, display label). Order matches `FuelType::index`.
const FUEL_TABLE: [(FuelType, &str, &str); FuelType::COUNT] = [
    (FuelType::RegularGasoline, "gasolina_comum", "Gasolina Comum"),
    (FuelType::AdditizedGasoline, "gasolina_aditivada", "Gasolina Aditivada"),
    (FuelType::HydratedEthanol, "etanol_hidratado", "Etanol Hidratado"),
    (FuelType::Diesel, "oleo_diesel", "Óleo Diesel"),
    (FuelType::DieselS10, "oleo_diesel_s10", "Óleo Diesel S10"),
    (FuelType::Lpg, "gas_cozinha_glp", "GLP (Gás de Cozinha)"),
    (FuelType::Cng, "gas_natural_veicular_gnv", "GNV"),
];

/// Which of the three price columns of a fuel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceField {
    Avg,
    Min,
    Max,
}

impl PriceField {
    pub const ALL: [PriceField; 3] = [PriceField::Avg, PriceField::Min, PriceField::Max];

    fn suffix(self) -> &'static str {
        match self {
            PriceField::Avg => "avg",
            PriceField::Min => "min",
            PriceField::Max => "max",
        }
    }
}

impl FuelType {
    pub const COUNT: usize = 7;

    pub const ALL: [FuelType; FuelType::COUNT] = [
        FuelType::RegularGasoline,
        FuelType::AdditizedGasoline,
        FuelType::HydratedEthanol,
        FuelType::Diesel,
        FuelType::DieselS10,
        FuelType::Lpg,
        FuelType::Cng,
    ];

    /// Position of this fuel in `FuelType::ALL` and in per-record quote arrays.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable field-name key, e.g. `gasolina_comum`.
    pub fn key(self) -> &'static str {
        FUEL_TABLE[self.index()].1
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        FUEL_TABLE[self.index()].2
    }

    /// Column name for one of the price fields, e.g. `gasolina_comum_preco_revenda_avg`.
    pub fn column(self, field: PriceField) -> String {
        format!("{}_{}_{}", self.key(), PRICE_INFIX, field.suffix())
    }

    pub fn avg_column(self) -> String {
        self.column(PriceField::Avg)
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FuelType {
    type Err = UnknownFuel;

    /// Accepts either the column key or the display label (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        FUEL_TABLE
            .iter()
            .find(|(_, key, label)| {
                key.eq_ignore_ascii_case(needle) || label.to_lowercase() == needle.to_lowercase()
            })
            .map(|(fuel, _, _)| *fuel)
            .ok_or_else(|| UnknownFuel(s.to_string()))
    }
}

/// Remove repeated fuels, keeping the first occurrence and the caller's order.
pub fn dedup_fuels(fuels: &[FuelType]) -> Vec<FuelType> {
    let mut seen = [false; FuelType::COUNT];
    fuels
        .iter()
        .copied()
        .filter(|fuel| !std::mem::replace(&mut seen[fuel.index()], true))
        .collect()
}
