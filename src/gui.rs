// Rampart - gui.rs
//
// Top-level eframe::App implementation.
// Wires together all UI pages and drives the ingestion queue.

use std::time::Instant;

use crate::app::state::{AppState, ExportFormat, Page};
use crate::ui;

/// The Rampart application.
pub struct RampartApp {
    pub state: AppState,
}

impl RampartApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Admit one dropped or picked file into the ingestion queue.
    fn submit_path(&mut self, path: &std::path::Path, now: Instant) {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        // Unreadable paths submit as zero bytes; admission only gates
        // on the size ceiling, so they simply queue as empty files.
        let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        self.state.submit_upload(&name, size, now);
    }

    /// Reload the fixture catalogue from disk (File > Refresh Data).
    fn refresh_catalogue(&mut self) {
        let override_dir = self.state.fixtures_dir.clone();
        match crate::app::catalogue::load_catalogue(override_dir.as_deref()) {
            Ok((catalogue, errors)) => {
                for error in &errors {
                    self.state.push_warning(error.to_string());
                }
                self.state.replace_catalogue(catalogue);
            }
            Err(e) => {
                let message = format!("Refresh failed: {e}");
                tracing::warn!("{}", message);
                self.state.push_warning(message.clone());
                self.state.status_message = message;
            }
        }
    }

    /// Save-dialog plus export of the current filtered repository view.
    fn export_filtered(&mut self, format: ExportFormat) {
        let Some(dest) = rfd::FileDialog::new()
            .add_filter(format.label(), &[format.extension()])
            .set_file_name(format!("repository.{}", format.extension()))
            .save_file()
        else {
            return;
        };

        let filtered_records: Vec<_> = self
            .state
            .filtered_indices
            .iter()
            .filter_map(|&i| self.state.records.get(i))
            .cloned()
            .collect();

        match std::fs::File::create(&dest) {
            Ok(f) => {
                let result = match format {
                    ExportFormat::Csv => {
                        crate::core::export::export_csv(&filtered_records, f, &dest)
                    }
                    ExportFormat::Json => {
                        crate::core::export::export_json(&filtered_records, f, &dest)
                    }
                };
                match result {
                    Ok(n) => {
                        tracing::info!(count = n, path = %dest.display(), "Repository exported");
                        self.state.status_message =
                            format!("Exported {n} records to {}.", format.label());
                    }
                    Err(e) => {
                        self.state.status_message =
                            format!("{} export failed: {e}", format.label());
                    }
                }
            }
            Err(e) => {
                self.state.status_message = format!("Cannot create file: {e}");
            }
        }
    }

    /// Save-dialog plus JSON export of the currently open report.
    fn export_selected_report(&mut self) {
        let Some(report) = self.state.selected_report().cloned() else {
            return;
        };

        let Some(dest) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(format!("report_{}.json", report.id))
            .save_file()
        else {
            return;
        };

        match std::fs::File::create(&dest) {
            Ok(f) => match crate::core::export::export_report_json(&report, f, &dest) {
                Ok(()) => {
                    tracing::info!(record = %report.id, path = %dest.display(), "Report exported");
                    self.state.status_message =
                        format!("Exported report for record {} to JSON.", report.id);
                }
                Err(e) => {
                    self.state.status_message = format!("Report export failed: {e}");
                }
            },
            Err(e) => {
                self.state.status_message = format!("Cannot create file: {e}");
            }
        }
    }
}

impl eframe::App for RampartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Advance the ingestion pipeline. All timing flows through this
        // single tick; the queue never reads the wall clock itself.
        let now = Instant::now();
        self.state.queue.tick(now);
        if self.state.queue.is_busy() {
            // Wake up exactly when the next pipeline step is due rather
            // than repainting every frame.
            match self.state.queue.next_due() {
                Some(due) => ctx.request_repaint_after(due.saturating_duration_since(now)),
                None => ctx.request_repaint(),
            }
        }

        // Files dropped onto the window queue immediately; navigate to
        // the scan page so the new items are visible.
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if !dropped.is_empty() {
            self.state.active_page = Page::Scan;
            for file in dropped {
                if let Some(path) = file.path {
                    self.submit_path(&path, now);
                }
            }
        }

        // ---- Handle flags set by pages last frame ----
        // request_pick_files: the scan page's Browse button.
        if self.state.request_pick_files {
            self.state.request_pick_files = false;
            if let Some(files) = rfd::FileDialog::new()
                .add_filter("Samples", crate::util::constants::ACCEPTED_EXTENSIONS)
                .pick_files()
            {
                for path in files {
                    self.submit_path(&path, now);
                }
            }
        }
        // request_export: repository page export buttons.
        if let Some(format) = self.state.request_export.take() {
            self.export_filtered(format);
        }
        // request_report_export: the detail page's export button.
        if self.state.request_report_export {
            self.state.request_report_export = false;
            self.export_selected_report();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Refresh Data").clicked() {
                        self.refresh_catalogue();
                        ui.close_menu();
                    }
                    ui.separator();
                    // Export -- enabled only when there are filtered records
                    let has_records = !self.state.filtered_indices.is_empty();
                    ui.add_enabled_ui(has_records, |ui| {
                        if ui.button("Export CSV\u{2026}").clicked() {
                            self.state.request_export = Some(ExportFormat::Csv);
                            ui.close_menu();
                        }
                        if ui.button("Export JSON\u{2026}").clicked() {
                            self.state.request_export = Some(ExportFormat::Json);
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    let warn_label = format!("Warnings ({})", self.state.warnings.len());
                    if ui.button(warn_label).clicked() {
                        self.state.show_warnings = true;
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("About Rampart").clicked() {
                        self.state.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                // Pipeline badge, shown while the queue is working.
                if self.state.queue.is_busy() {
                    ui.label(
                        egui::RichText::new(" \u{25cf} ANALYZING ")
                            .strong()
                            .color(ui::theme::BLUE)
                            .background_color(egui::Color32::from_rgba_premultiplied(
                                96, 165, 250, 30,
                            )),
                    );
                    ui.separator();
                }
                ui.label(&self.state.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let total = self.state.records.len();
                    let filtered = self.state.filtered_indices.len();
                    if total > 0 {
                        ui.label(format!("{filtered}/{total} records"));
                    }
                    if !self.state.warnings.is_empty() {
                        let badge = format!(
                            "\u{26a0} {} warning{}",
                            self.state.warnings.len(),
                            if self.state.warnings.len() == 1 { "" } else { "s" }
                        );
                        if ui
                            .small_button(
                                egui::RichText::new(badge)
                                    .color(egui::Color32::from_rgb(217, 119, 6)),
                            )
                            .clicked()
                        {
                            self.state.show_warnings = true;
                        }
                        ui.separator();
                    }
                });
            });
        });

        // Left sidebar: page navigation.
        egui::SidePanel::left("sidebar")
            .default_width(ui::theme::SIDEBAR_WIDTH)
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new("\u{1f6e1} Rampart").size(20.0).strong());
                });
                ui.add_space(8.0);
                ui.separator();

                for page in Page::nav_pages() {
                    // The detail page is reached from Reports, so keep
                    // that nav entry highlighted while it is open.
                    let active = self.state.active_page == *page
                        || (*page == Page::Reports
                            && self.state.active_page == Page::ReportDetail);
                    if ui.selectable_label(active, page.label()).clicked()
                        && self.state.active_page != *page
                    {
                        self.state.active_page = *page;
                        self.state.save_session();
                    }
                }

                if self.state.debug_mode {
                    ui.with_layout(egui::Layout::bottom_up(egui::Align::Center), |ui| {
                        ui.add_space(8.0);
                        ui.label(egui::RichText::new("debug logging").small().weak());
                    });
                }
            });

        // Central panel (active page)
        egui::CentralPanel::default().show(ctx, |ui| match self.state.active_page {
            Page::Dashboard => ui::pages::dashboard::render(ui, &mut self.state),
            Page::Scan => ui::pages::scan::render(ui, &mut self.state),
            Page::Repository => ui::pages::repository::render(ui, &mut self.state),
            Page::Reports => ui::pages::reports::render(ui, &mut self.state),
            Page::ReportDetail => ui::pages::report_detail::render(ui, &mut self.state),
            Page::Profile => ui::pages::profile::render(ui, &mut self.state),
        });

        // Modal windows
        ui::pages::about::render(ctx, &mut self.state);
        ui::pages::warnings::render(ctx, &mut self.state);
    }

    /// Called by eframe when the application window is about to close.
    ///
    /// Saves the current session so the next launch can restore it.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.save_session();
    }
}
