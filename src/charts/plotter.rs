//! Chart Plotter Module
//! Creates interactive visualizations using egui_plot.

use crate::charts::{
    correlation_color, correlation_text_is_dark, format_coefficient, fuel_color, month_label,
    month_ordinal,
};
use crate::data::{FuelSeries, FuelType, PriceRecord};
use crate::stats::{Comparison, CorrelationMatrix, FuelStats};
use egui::{Align2, Color32, FontId, RichText, ScrollArea};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

const PLOT_HEIGHT: f32 = 320.0;
const HEATMAP_CELL: egui::Vec2 = egui::vec2(72.0, 30.0);

fn color32(fuel: FuelType) -> Color32 {
    let [r, g, b] = fuel_color(fuel.index());
    Color32::from_rgb(r, g, b)
}

/// Fixed three-decimal cell, "-" when undefined.
fn fmt_stat(value: f64) -> String {
    if value.is_nan() {
        "-".to_string()
    } else {
        format!("{:.3}", value)
    }
}

fn fmt_price(value: Option<f64>) -> String {
    value.map(|v| format!("{:.3}", v)).unwrap_or_else(|| "-".to_string())
}

/// Creates the dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Price evolution, one line per fuel. Gaps break the line.
    pub fn draw_series_chart(ui: &mut egui::Ui, series: &[FuelSeries]) {
        Plot::new("price_evolution")
            .height(PLOT_HEIGHT)
            .legend(Legend::default())
            .allow_scroll(false)
            .y_axis_label("Preço (R$)")
            .x_axis_formatter(|mark, _range| month_label(mark.value))
            .label_formatter(|name, value| {
                if name.is_empty() {
                    String::new()
                } else {
                    format!("{}\n{}: R$ {:.3}", name, month_label(value.x), value.y)
                }
            })
            .show(ui, |plot_ui| {
                for s in series {
                    let color = color32(s.fuel);
                    for segment in s.segments() {
                        let points: PlotPoints = segment
                            .iter()
                            .map(|(date, price)| [month_ordinal(*date), *price])
                            .collect();
                        if segment.len() == 1 {
                            plot_ui.points(
                                Points::new(points).radius(3.0).color(color).name(s.fuel.label()),
                            );
                        } else {
                            plot_ui.line(
                                Line::new(points).color(color).width(2.0).name(s.fuel.label()),
                            );
                        }
                    }
                }
            });
    }

    /// Bars of the comparison month means.
    pub fn draw_comparison_chart(ui: &mut egui::Ui, comparison: &Comparison) {
        let means = comparison.means().to_vec();
        let labels: Vec<String> = means.iter().map(|m| m.fuel.label().to_string()).collect();

        Plot::new("fuel_comparison")
            .height(PLOT_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .y_axis_label("Preço (R$)")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                    return String::new();
                }
                labels.get(idx as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                for (i, m) in means.iter().enumerate() {
                    if m.mean.is_nan() {
                        continue;
                    }
                    let color = color32(m.fuel);
                    let bar = Bar::new(i as f64, m.mean)
                        .width(0.6)
                        .name(m.fuel.label())
                        .fill(color.gamma_multiply(0.8));
                    plot_ui.bar_chart(BarChart::new(vec![bar]).color(color).name(m.fuel.label()));
                }
            });
    }

    /// Descriptive statistics, one row per fuel.
    pub fn draw_stats_table(ui: &mut egui::Ui, stats: &[FuelStats]) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("descriptive_stats")
                    .striped(true)
                    .min_col_width(55.0)
                    .spacing([10.0, 4.0])
                    .show(ui, |ui| {
                        for header in
                            ["Combustível", "N", "Média", "Desvio", "Mín", "25%", "50%", "75%", "Máx"]
                        {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.end_row();

                        for s in stats {
                            ui.label(RichText::new(s.fuel.label()).size(11.0).color(color32(s.fuel)));
                            ui.label(RichText::new(s.count.to_string()).size(11.0));
                            for value in [s.mean, s.std, s.min, s.p25, s.p50, s.p75, s.max] {
                                ui.label(RichText::new(fmt_stat(value)).size(11.0));
                            }
                            ui.end_row();
                        }
                    });
            });
    }

    /// Annotated correlation heatmap.
    pub fn draw_correlation_heatmap(ui: &mut egui::Ui, matrix: &CorrelationMatrix) {
        egui::Grid::new("correlation_heatmap")
            .spacing([2.0, 2.0])
            .show(ui, |ui| {
                ui.label("");
                for fuel in &matrix.fuels {
                    ui.add_sized(
                        [HEATMAP_CELL.x, HEATMAP_CELL.y],
                        egui::Label::new(RichText::new(fuel.label()).size(10.0)).wrap(),
                    );
                }
                ui.end_row();

                for (i, row) in matrix.values.iter().enumerate() {
                    let row_fuel = matrix.fuels[i];
                    ui.label(RichText::new(row_fuel.label()).size(10.0));
                    for (j, &value) in row.iter().enumerate() {
                        let (rect, response) =
                            ui.allocate_exact_size(HEATMAP_CELL, egui::Sense::hover());
                        let [r, g, b] = correlation_color(value);
                        ui.painter().rect_filled(rect, 2.0, Color32::from_rgb(r, g, b));
                        let text_color = if correlation_text_is_dark(value) {
                            Color32::BLACK
                        } else {
                            Color32::WHITE
                        };
                        ui.painter().text(
                            rect.center(),
                            Align2::CENTER_CENTER,
                            format_coefficient(value),
                            FontId::proportional(12.0),
                            text_color,
                        );
                        response.on_hover_text(format!(
                            "{} × {}: {}",
                            row_fuel.label(),
                            matrix.fuels[j].label(),
                            format_coefficient(value)
                        ));
                    }
                    ui.end_row();
                }
            });
    }

    /// First rows of the filtered table with every price column.
    pub fn draw_sample_table(ui: &mut egui::Ui, sample: &[PriceRecord]) {
        ScrollArea::horizontal().show(ui, |ui| {
            egui::Grid::new("data_sample")
                .striped(true)
                .min_col_width(40.0)
                .show(ui, |ui| {
                    ui.label(RichText::new("ano").strong().size(10.0));
                    ui.label(RichText::new("mes").strong().size(10.0));
                    for fuel in FuelType::ALL {
                        for suffix in ["avg", "min", "max"] {
                            ui.label(
                                RichText::new(format!("{} {}", fuel.key(), suffix))
                                    .strong()
                                    .size(10.0),
                            );
                        }
                    }
                    ui.end_row();

                    for record in sample {
                        ui.label(RichText::new(record.year.to_string()).size(10.0));
                        ui.label(RichText::new(record.month.to_string()).size(10.0));
                        for fuel in FuelType::ALL {
                            let quote = record.quote(fuel);
                            for value in [quote.avg, quote.min, quote.max] {
                                ui.label(RichText::new(fmt_price(value)).size(10.0));
                            }
                        }
                        ui.end_row();
                    }
                });
        });
    }
}
