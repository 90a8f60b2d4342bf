//! Control Panel Widget
//! Left side panel with the data source and all filter selections.

use egui::{Color32, ComboBox, RichText, ScrollArea};
use fuel_dash::{ComparisonTarget, FuelType, Selection};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Left side control panel with file selection and filters.
pub struct ControlPanel {
    pub source_path: Option<PathBuf>,
    /// `None` until a table is loaded.
    pub selection: Option<Selection>,
    pub available_years: Vec<i32>,
    /// Comparison choices for the current filtered table.
    pub comparison_years: Vec<i32>,
    pub comparison_months: Vec<u32>,
    pub status: String,
    pub busy: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            source_path: None,
            selection: None,
            available_years: Vec::new(),
            comparison_years: Vec::new(),
            comparison_months: Vec::new(),
            status: "Ready".to_string(),
            busy: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the selection for a freshly loaded table.
    pub fn set_table(&mut self, available_years: Vec<i32>, selection: Selection) {
        self.available_years = available_years;
        self.selection = Some(selection);
    }

    pub fn set_comparison_choices(&mut self, years: Vec<i32>, months: Vec<u32>) {
        self.comparison_years = years;
        self.comparison_months = months;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("⛽ Fuel Dash")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(RichText::new("Preços de Combustíveis").size(11.0).color(Color32::GRAY));
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .source_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.source_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.add_enabled_ui(!self.busy, |ui| {
                            if ui.button("📂 Browse").clicked() {
                                action = ControlPanelAction::BrowseSource;
                            }
                        });
                    });
                });
            });

        ui.add_space(10.0);
        ui.separator();

        let Some(selection) = self.selection.as_mut() else {
            Self::show_status(ui, &self.status);
            return action;
        };
        let mut changed = false;

        // ===== Years =====
        ui.label(RichText::new("📅 Anos").size(14.0).strong());
        ui.add_space(5.0);
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical()
                    .id_salt("years")
                    .max_height(140.0)
                    .show(ui, |ui| {
                        for &year in &self.available_years {
                            let mut checked = selection.years.contains(&year);
                            if ui.checkbox(&mut checked, year.to_string()).changed() {
                                let mut years = selection.years.clone();
                                if checked {
                                    years.insert(year);
                                } else {
                                    years.remove(&year);
                                }
                                selection.set_years(years);
                                changed = true;
                            }
                        }
                    });
            });
        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                selection.set_years(self.available_years.iter().copied().collect());
                changed = true;
            }
            if ui.small_button("Clear All").clicked() {
                selection.set_years(BTreeSet::new());
                changed = true;
            }
        });

        ui.add_space(10.0);
        ui.separator();

        // ===== Fuels =====
        ui.label(RichText::new("⛽ Combustíveis").size(14.0).strong());
        ui.add_space(5.0);
        for fuel in FuelType::ALL {
            let mut checked = selection.fuels.contains(&fuel);
            if ui.checkbox(&mut checked, fuel.label()).changed() {
                if checked {
                    // Keep the plot order stable: FuelType::ALL order
                    selection.fuels.push(fuel);
                    selection.fuels.sort();
                } else {
                    selection.fuels.retain(|&f| f != fuel);
                }
                changed = true;
            }
        }

        ui.add_space(10.0);
        ui.separator();

        // ===== Comparison =====
        ui.label(RichText::new("⚖️ Comparação").size(14.0).strong());
        ui.add_space(5.0);

        let label_width = 60.0;
        let combo_width = 150.0;
        let current = selection.comparison;
        let shown_year = current
            .map(|t| t.year.to_string())
            .unwrap_or_else(|| "Auto".to_string());
        let shown_month = current
            .map(|t| format!("{:02}", t.month))
            .unwrap_or_else(|| "Auto".to_string());

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Ano:"));
            ComboBox::from_id_salt("comparison_year")
                .width(combo_width)
                .selected_text(shown_year)
                .show_ui(ui, |ui| {
                    if ui.selectable_label(current.is_none(), "Auto").clicked() {
                        selection.comparison = None;
                        changed = true;
                    }
                    for &year in &self.comparison_years {
                        let selected = current.map(|t| t.year) == Some(year);
                        if ui.selectable_label(selected, year.to_string()).clicked() {
                            let month = current
                                .map(|t| t.month)
                                .or_else(|| self.comparison_months.first().copied())
                                .unwrap_or(1);
                            selection.comparison = Some(ComparisonTarget { year, month });
                            changed = true;
                        }
                    }
                });
        });

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Mês:"));
            ComboBox::from_id_salt("comparison_month")
                .width(combo_width)
                .selected_text(shown_month)
                .show_ui(ui, |ui| {
                    for &month in &self.comparison_months {
                        let selected = current.map(|t| t.month) == Some(month);
                        if ui.selectable_label(selected, format!("{:02}", month)).clicked() {
                            let year = current
                                .map(|t| t.year)
                                .or_else(|| self.comparison_years.first().copied());
                            if let Some(year) = year {
                                selection.comparison = Some(ComparisonTarget { year, month });
                                changed = true;
                            }
                        }
                    }
                });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(!self.busy, |ui| {
                let button = egui::Button::new(RichText::new("📄 Export Report").size(14.0))
                    .min_size(egui::vec2(180.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::Export;
                }
            });
        });

        ui.add_space(10.0);
        Self::show_status(ui, &self.status);

        if changed && action == ControlPanelAction::None {
            action = ControlPanelAction::SelectionChanged;
        }
        action
    }

    fn show_status(ui: &mut egui::Ui, status: &str) {
        let status_color = if status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if status.starts_with("Loaded") || status.starts_with("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(status).size(11.0).color(status_color));
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseSource,
    SelectionChanged,
    Export,
}
