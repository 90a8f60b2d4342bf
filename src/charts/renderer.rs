//! Static Chart Renderer
//! Renders the dashboard charts to PNG files with plotters.
//!
//! Charts:
//! 1. Price evolution: one line per selected fuel, broken where a month has no quotation
//! 2. Fuel comparison: one bar per fuel for the comparison month
//! 3. Correlation heatmap: annotated with two-decimal coefficients

use crate::charts::{
    correlation_color, correlation_text_is_dark, format_coefficient, fuel_color, month_label,
    month_ordinal,
};
use crate::config::ChartSettings;
use crate::data::FuelSeries;
use crate::stats::{Comparison, CorrelationMatrix};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use thiserror::Error;

const FONT: &str = "sans-serif";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Chart rendering failed: {0}")]
    Draw(String),
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

fn rgb([r, g, b]: [u8; 3]) -> RGBColor {
    RGBColor(r, g, b)
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Price evolution line chart.
    pub fn render_series(
        series: &[FuelSeries],
        path: &Path,
        settings: ChartSettings,
    ) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, (settings.width, settings.height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let points: Vec<(f64, f64)> = series
            .iter()
            .flat_map(|s| s.points.iter())
            .filter_map(|p| Some((month_ordinal(p.timestamp), p.price?)))
            .collect();
        if points.is_empty() {
            Self::draw_no_data(&root, settings)?;
            return root.present().map_err(draw_err);
        }

        let (x_range, y_range) = Self::padded_ranges(&points);
        let mut chart = ChartBuilder::on(&root)
            .caption("Evolução dos Preços Médios", (FONT, 28))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range, y_range)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_label_formatter(&|x| month_label(*x))
            .y_label_formatter(&|y| format!("{:.2}", y))
            .y_desc("Preço (R$)")
            .draw()
            .map_err(draw_err)?;

        for s in series {
            let color = rgb(fuel_color(s.fuel.index()));
            let mut labelled = false;
            for segment in s.segments() {
                let coords: Vec<(f64, f64)> = segment
                    .iter()
                    .map(|(date, price)| (month_ordinal(*date), *price))
                    .collect();
                let annotation = chart
                    .draw_series(LineSeries::new(coords.clone(), color.stroke_width(2)))
                    .map_err(draw_err)?;
                if !labelled {
                    annotation.label(s.fuel.label()).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
                    labelled = true;
                }
                // Isolated months would be invisible as a line
                if coords.len() == 1 {
                    chart
                        .draw_series(coords.iter().map(|&c| Circle::new(c, 3, color.filled())))
                        .map_err(draw_err)?;
                }
            }
        }

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(draw_err)?;

        root.present().map_err(draw_err)
    }

    /// Bar chart of the mean price of each fuel in the comparison month.
    pub fn render_comparison(
        comparison: &Comparison,
        path: &Path,
        settings: ChartSettings,
    ) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, (settings.width, settings.height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let means = comparison.means();
        let finite_max = means
            .iter()
            .map(|m| m.mean)
            .filter(|v| v.is_finite())
            .fold(f64::NEG_INFINITY, f64::max);
        if means.is_empty() || !finite_max.is_finite() {
            Self::draw_no_data(&root, settings)?;
            return root.present().map_err(draw_err);
        }

        let (year, month) = comparison.period();
        let labels: Vec<&str> = means.iter().map(|m| m.fuel.label()).collect();
        let n = means.len() as u32;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("Comparação de Preços Médios ({:02}/{})", month, year),
                (FONT, 28),
            )
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(60)
            .build_cartesian_2d((0u32..n).into_segmented(), 0.0..finite_max * 1.15)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(labels.len())
            .x_label_formatter(&|v| match v {
                SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => {
                    labels.get(*i as usize).map(|s| s.to_string()).unwrap_or_default()
                }
                SegmentValue::Last => String::new(),
            })
            .y_desc("Preço (R$)")
            .draw()
            .map_err(draw_err)?;

        for (i, m) in means.iter().enumerate() {
            if m.mean.is_nan() {
                continue;
            }
            let color = rgb(fuel_color(m.fuel.index()));
            chart
                .draw_series(
                    Histogram::vertical(&chart)
                        .margin(12)
                        .style(color.filled())
                        .data(std::iter::once((i as u32, m.mean))),
                )
                .map_err(draw_err)?;
        }

        root.present().map_err(draw_err)
    }

    /// Annotated correlation heatmap; the first fuel is the top row.
    pub fn render_correlation(
        matrix: &CorrelationMatrix,
        path: &Path,
        settings: ChartSettings,
    ) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, (settings.width, settings.height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        if matrix.is_empty() {
            Self::draw_no_data(&root, settings)?;
            return root.present().map_err(draw_err);
        }

        let n = matrix.len() as u32;
        let labels: Vec<&str> = matrix.fuels.iter().map(|f| f.label()).collect();
        let label_of = |v: &SegmentValue<u32>, flip: bool| match v {
            SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => {
                let idx = if flip { n - 1 - (*i).min(n - 1) } else { *i };
                labels.get(idx as usize).map(|s| s.to_string()).unwrap_or_default()
            }
            SegmentValue::Last => String::new(),
        };

        let mut chart = ChartBuilder::on(&root)
            .caption("Matriz de Correlação entre Combustíveis", (FONT, 28))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(160)
            .build_cartesian_2d((0u32..n).into_segmented(), (0u32..n).into_segmented())
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(n as usize)
            .y_labels(n as usize)
            .x_label_formatter(&|v| label_of(v, false))
            .y_label_formatter(&|v| label_of(v, true))
            .draw()
            .map_err(draw_err)?;

        let centered = Pos::new(HPos::Center, VPos::Center);
        for (i, row) in matrix.values.iter().enumerate() {
            let y = n - 1 - i as u32;
            for (j, &value) in row.iter().enumerate() {
                let x = j as u32;
                let cell = Rectangle::new(
                    [
                        (SegmentValue::Exact(x), SegmentValue::Exact(y)),
                        (SegmentValue::Exact(x + 1), SegmentValue::Exact(y + 1)),
                    ],
                    rgb(correlation_color(value)).filled(),
                );
                let text_color = if correlation_text_is_dark(value) {
                    BLACK
                } else {
                    WHITE
                };
                let label = Text::new(
                    format_coefficient(value),
                    (SegmentValue::CenterOf(x), SegmentValue::CenterOf(y)),
                    (FONT, 18).into_font().color(&text_color).pos(centered),
                );
                chart.draw_series(std::iter::once(cell)).map_err(draw_err)?;
                chart.draw_series(std::iter::once(label)).map_err(draw_err)?;
            }
        }

        root.present().map_err(draw_err)
    }

    fn draw_no_data(
        root: &DrawingArea<BitMapBackend<'_>, Shift>,
        settings: ChartSettings,
    ) -> Result<(), RenderError> {
        let style = (FONT, 28)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        root.draw(&Text::new(
            "Sem dados",
            ((settings.width / 2) as i32, (settings.height / 2) as i32),
            style,
        ))
        .map_err(draw_err)
    }

    fn padded_ranges(points: &[(f64, f64)]) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
        let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for &(x, y) in points {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
        if x_min == x_max {
            x_min -= 1.0;
            x_max += 1.0;
        }
        let pad = ((y_max - y_min) * 0.1).max(0.1);
        (x_min..x_max, (y_min - pad).max(0.0)..y_max + pad)
    }
}
