//! Charts module - Chart rendering

mod plotter;
mod renderer;

pub use plotter::ChartPlotter;
pub use renderer::{RenderError, StaticChartRenderer};

use chrono::{Datelike, NaiveDate};

/// Line/bar colors, one per fuel in `FuelType::ALL` order.
pub const PALETTE: [[u8; 3]; 10] = [
    [52, 152, 219],  // Blue
    [231, 76, 60],   // Red
    [46, 204, 113],  // Green
    [155, 89, 182],  // Purple
    [243, 156, 18],  // Orange
    [26, 188, 156],  // Teal
    [233, 30, 99],   // Pink
    [0, 188, 212],   // Cyan
    [121, 85, 72],   // Brown
    [96, 125, 139],  // Blue Grey
];

/// Viridis control points, low to high.
const VIRIDIS: [[u8; 3]; 5] = [
    [68, 1, 84],
    [59, 82, 139],
    [33, 145, 140],
    [94, 201, 98],
    [253, 231, 37],
];

pub fn fuel_color(index: usize) -> [u8; 3] {
    PALETTE[index % PALETTE.len()]
}

/// Months since year 0, so consecutive months are one unit apart on a plot axis.
pub fn month_ordinal(date: NaiveDate) -> f64 {
    (date.year() as f64) * 12.0 + date.month0() as f64
}

/// `MM/YYYY` label for a month ordinal.
pub fn month_label(ordinal: f64) -> String {
    let ordinal = ordinal.round() as i64;
    format!("{:02}/{}", ordinal.rem_euclid(12) + 1, ordinal.div_euclid(12))
}

/// Map a correlation in [-1, 1] onto the viridis palette. NaN maps to gray.
pub fn correlation_color(value: f64) -> [u8; 3] {
    if value.is_nan() {
        return [200, 200, 200];
    }
    let t = ((value.clamp(-1.0, 1.0) + 1.0) / 2.0) * (VIRIDIS.len() - 1) as f64;
    let lower = t.floor() as usize;
    let upper = (lower + 1).min(VIRIDIS.len() - 1);
    let frac = t - lower as f64;
    let mut rgb = [0u8; 3];
    for (c, out) in rgb.iter_mut().enumerate() {
        let a = VIRIDIS[lower][c] as f64;
        let b = VIRIDIS[upper][c] as f64;
        *out = (a + (b - a) * frac).round() as u8;
    }
    rgb
}

/// Dark text on the bright end of the palette, light text elsewhere.
pub fn correlation_text_is_dark(value: f64) -> bool {
    value.is_nan() || value > 0.3
}

/// Cell label with two decimals, or "-" for an undefined coefficient.
pub fn format_coefficient(value: f64) -> String {
    if value.is_nan() {
        "-".to_string()
    } else {
        format!("{:.2}", value)
    }
}
