//! Fuel Dash Main Application
//! Main window with control panel and dashboard viewer.

use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use fuel_dash::report::ReportExporter;
use fuel_dash::{compute_dashboard, list_available_years, load_table, AppConfig, Table};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use tracing::{error, warn};

/// Dataset loading result from background thread
enum LoadResult {
    Complete(Table),
    Error(String),
}

/// Non-blocking check on the loader channel. `None` while the thread is
/// still working; a thread that died without sending counts as a failure.
fn poll_load(rx: &Receiver<LoadResult>) -> Option<LoadResult> {
    match rx.try_recv() {
        Ok(result) => Some(result),
        Err(TryRecvError::Empty) => None,
        Err(TryRecvError::Disconnected) => Some(LoadResult::Error(
            "loading stopped unexpectedly".to_string(),
        )),
    }
}

/// Main application window.
pub struct FuelDashApp {
    config: AppConfig,
    table: Option<Table>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl FuelDashApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut app = Self {
            config,
            table: None,
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            load_rx: None,
            is_loading: false,
        };
        if let Some(source) = app.config.source.clone() {
            app.start_loading(source);
        }
        app
    }

    /// Handle source file selection
    fn handle_browse_source(&mut self) {
        if self.is_loading {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Fuel price table", &["csv", "parquet"])
            .pick_file()
        {
            self.start_loading(path);
        }
    }

    /// Load the table in a background thread
    fn start_loading(&mut self, path: PathBuf) {
        self.chart_viewer.clear();
        self.control_panel.source_path = Some(path.clone());
        self.control_panel.set_status("Loading dataset...");
        self.control_panel.busy = true;
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let result = match load_table(&path) {
                Ok(table) => LoadResult::Complete(table),
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    /// Check for loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match poll_load(&rx) {
            Some(LoadResult::Complete(table)) => {
                let selection = self.config.selection_for(&table);
                self.control_panel
                    .set_table(list_available_years(&table), selection);
                self.control_panel
                    .set_status(format!("Loaded {} records", table.len()));
                self.table = Some(table);
                self.finish_loading();
                self.recompute();
            }
            Some(LoadResult::Error(message)) => {
                error!(%message, "failed to load dataset");
                self.table = None;
                self.control_panel.selection = None;
                self.control_panel.set_status(format!("Error: {}", message));
                self.finish_loading();
            }
            None => {
                // Still loading
                self.load_rx = Some(rx);
            }
        }
    }

    fn finish_loading(&mut self) {
        self.is_loading = false;
        self.control_panel.busy = false;
    }

    /// Recompute every dashboard section from the table and current selection.
    fn recompute(&mut self) {
        let (Some(table), Some(selection)) = (&self.table, &self.control_panel.selection) else {
            return;
        };
        let view = compute_dashboard(table, selection);
        self.control_panel
            .set_comparison_choices(view.comparison_years.clone(), view.comparison_months.clone());
        self.chart_viewer.set_view(view);
    }

    /// Export the current view into a folder chosen by the user
    fn handle_export(&mut self) {
        let Some(view) = &self.chart_viewer.view else {
            self.control_panel.set_status("Nothing to export");
            return;
        };

        let mut dialog = rfd::FileDialog::new();
        if let Some(dir) = &self.config.export_dir {
            dialog = dialog.set_directory(dir);
        }
        let Some(dir) = dialog.pick_folder() else {
            return; // User cancelled
        };

        match ReportExporter::export(view, &dir, self.config.chart) {
            Ok(files) => {
                self.control_panel
                    .set_status(format!("Exported {} files", files.len()));
                if let Err(e) = open::that(&dir) {
                    warn!(error = %e, dir = %dir.display(), "could not open export folder");
                }
            }
            Err(e) => {
                error!(error = %e, "report export failed");
                self.control_panel.set_status(format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for FuelDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseSource => self.handle_browse_source(),
                        ControlPanelAction::SelectionChanged => self.recompute(),
                        ControlPanelAction::Export => self.handle_export(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_load_polls_empty() {
        let (_tx, rx) = channel::<LoadResult>();
        assert!(poll_load(&rx).is_none());
    }

    #[test]
    fn dead_loader_thread_is_an_error() {
        let (tx, rx) = channel::<LoadResult>();
        let handle = thread::spawn(move || {
            let _tx = tx;
            panic!("loader failed");
        });
        assert!(handle.join().is_err());

        match poll_load(&rx) {
            Some(LoadResult::Error(message)) => assert!(message.contains("unexpectedly")),
            _ => panic!("expected a load error"),
        }
    }
}
