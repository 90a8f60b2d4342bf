//! Chart Viewer Widget
//! Right side scrollable panel with the dashboard sections, top to bottom.

use fuel_dash::charts::ChartPlotter;
use fuel_dash::stats::Comparison;
use fuel_dash::DashboardView;
use egui::{Color32, RichText, ScrollArea};

const SECTION_SPACING: f32 = 15.0;

/// Scrollable dashboard display.
#[derive(Default)]
pub struct ChartViewer {
    pub view: Option<DashboardView>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.view = None;
    }

    pub fn set_view(&mut self, view: DashboardView) {
        self.view = Some(view);
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(view) = &self.view else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("⛽ Dashboard de Preços de Combustíveis");
                ui.label(
                    RichText::new(
                        "Fonte: Dataset de preços médios, mínimos e máximos por tipo de combustível.",
                    )
                    .color(Color32::GRAY),
                );
                ui.add_space(SECTION_SPACING);

                Self::overview(ui, view);
                ui.add_space(SECTION_SPACING);

                egui::CollapsingHeader::new("👀 Amostra dos Dados")
                    .default_open(false)
                    .show(ui, |ui| ChartPlotter::draw_sample_table(ui, &view.sample));
                ui.add_space(SECTION_SPACING);

                Self::section(ui, "📈 Evolução dos Preços Médios");
                if view.series.is_empty() {
                    Self::no_data(ui, "Selecione ao menos um combustível.");
                } else {
                    ChartPlotter::draw_series_chart(ui, &view.series);
                }
                ui.add_space(SECTION_SPACING);

                Self::section(ui, "⚖️ Comparação de Combustíveis");
                match &view.comparison {
                    Some(comparison @ Comparison::Available { .. }) => {
                        let (year, month) = comparison.period();
                        ui.label(format!("Preços médios em {:02}/{}", month, year));
                        ChartPlotter::draw_comparison_chart(ui, comparison);
                    }
                    Some(Comparison::InsufficientData { year, month }) => {
                        Self::no_data(ui, &format!("Sem registros para {:02}/{}.", month, year));
                    }
                    None => Self::no_data(ui, "Nenhum ano selecionado."),
                }
                ui.add_space(SECTION_SPACING);

                Self::section(ui, "📐 Estatísticas Descritivas");
                ChartPlotter::draw_stats_table(ui, &view.stats);
                ui.add_space(SECTION_SPACING);

                Self::section(ui, "🧠 Correlação entre Preços Médios");
                ChartPlotter::draw_correlation_heatmap(ui, &view.correlation);
            });
    }

    fn overview(ui: &mut egui::Ui, view: &DashboardView) {
        let period = match (view.overview.first_year, view.overview.last_year) {
            (Some(first), Some(last)) => format!("{} - {}", first, last),
            _ => "-".to_string(),
        };
        ui.columns(3, |columns| {
            Self::metric(&mut columns[0], "Período", &period);
            Self::metric(
                &mut columns[1],
                "Nº Registros",
                &view.overview.record_count.to_string(),
            );
            Self::metric(
                &mut columns[2],
                "Registros filtrados",
                &view.filtered_rows.to_string(),
            );
        });
    }

    fn metric(ui: &mut egui::Ui, label: &str, value: &str) {
        ui.label(RichText::new(label).size(12.0).color(Color32::GRAY));
        ui.label(RichText::new(value).size(22.0).strong());
    }

    fn section(ui: &mut egui::Ui, title: &str) {
        ui.separator();
        ui.label(RichText::new(title).size(18.0).strong());
        ui.add_space(5.0);
    }

    fn no_data(ui: &mut egui::Ui, message: &str) {
        ui.label(RichText::new(message).italics().color(Color32::GRAY));
    }
}
