// Rampart - ui/pages/scan.rs
//
// Scan/upload page: analysis mode selector, drag-and-drop target, and
// the live ingestion queue.
//
// Dropped files are consumed centrally in gui.rs (egui surfaces them
// on the context input, not per-widget); this page only renders the
// target and flags `request_pick_files` when the user clicks Browse.
// Queue items advance on their own via the tick in gui.rs, so rows
// here are pure presentation.

use crate::app::state::AppState;
use crate::core::model::{AnalysisMode, UploadStatus};
use crate::core::stats;
use crate::ui::{format, theme};
use crate::util::constants;

/// Render the scan page (central area).
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Scan");
    ui.separator();

    render_mode_selector(ui, state);
    ui.add_space(8.0);
    render_drop_zone(ui, state);
    ui.add_space(12.0);
    render_queue(ui, state);
}

fn render_mode_selector(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Mode:").weak());
        for mode in AnalysisMode::all() {
            if ui
                .selectable_label(state.analysis_mode == *mode, mode.label())
                .clicked()
            {
                state.analysis_mode = *mode;
            }
        }
        ui.label(
            egui::RichText::new(format!(
                "estimated turnaround {}",
                state.analysis_mode.estimated_duration()
            ))
            .small()
            .weak(),
        );
    });
}

fn render_drop_zone(ui: &mut egui::Ui, state: &mut AppState) {
    let hovering = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());

    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.set_min_height(110.0);
        ui.vertical_centered(|ui| {
            ui.add_space(18.0);
            if hovering {
                ui.label(
                    egui::RichText::new("Release to queue files")
                        .size(18.0)
                        .strong()
                        .color(theme::BLUE),
                );
            } else {
                ui.label(egui::RichText::new("Drag & drop samples here").size(18.0).strong());
            }
            ui.add_space(4.0);
            if ui.button("Browse Files\u{2026}").clicked() {
                state.request_pick_files = true;
            }
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new(format!(
                    "Accepted: {}",
                    constants::ACCEPTED_EXTENSIONS.join(", ")
                ))
                .small()
                .weak(),
            );
            ui.label(
                egui::RichText::new(format!(
                    "Maximum file size {}",
                    format::format_size(constants::MAX_UPLOAD_SIZE_BYTES)
                ))
                .small()
                .weak(),
            );
            ui.add_space(14.0);
        });
    });
}

fn render_queue(ui: &mut egui::Ui, state: &mut AppState) {
    let summary = stats::queue_summary(state.queue.items());

    ui.horizontal(|ui| {
        ui.strong(format!("Upload Queue ({})", summary.total));
        if summary.total > 0 {
            ui.label(
                egui::RichText::new(format!(
                    "{} uploading \u{00b7} {} analyzing \u{00b7} {} completed \u{00b7} {} failed",
                    summary.uploading, summary.analyzing, summary.completed, summary.failed
                ))
                .small()
                .weak(),
            );
        }
    });
    ui.separator();

    if state.queue.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label("Queue is empty. Files you submit appear here.");
        });
        return;
    }

    // Removal is deferred so the ✕ button does not mutate the queue
    // while we iterate its items.
    let mut remove: Option<(u64, String)> = None;

    egui::ScrollArea::vertical()
        .id_salt("scan_queue")
        .auto_shrink([false, true])
        .show(ui, |ui| {
            for item in state.queue.items() {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(format!(
                            "{:<32}",
                            format::truncate_left(&item.name, 32)
                        ))
                        .monospace(),
                    );
                    ui.label(
                        egui::RichText::new(format::format_size(item.size))
                            .small()
                            .weak(),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .small_button("\u{2715}")
                            .on_hover_text("Remove from queue")
                            .clicked()
                        {
                            remove = Some((item.id, item.name.clone()));
                        }

                        match item.status {
                            UploadStatus::Uploading => {
                                ui.add(
                                    egui::ProgressBar::new(item.progress / 100.0)
                                        .desired_width(180.0)
                                        .fill(theme::BLUE)
                                        .text(format!("{}%", item.percent())),
                                );
                            }
                            UploadStatus::Analyzing => {
                                ui.label(
                                    egui::RichText::new("Analyzing\u{2026}").color(theme::BLUE),
                                );
                                ui.spinner();
                            }
                            UploadStatus::Completed => {
                                if let Some(ref result) = item.result {
                                    ui.label(
                                        egui::RichText::new(format!(
                                            "{} \u{00b7} score {}/10",
                                            result.malware_type, result.score
                                        ))
                                        .color(theme::risk_level_colour(&result.risk_level)),
                                    );
                                }
                            }
                            UploadStatus::Failed => {
                                ui.label(
                                    egui::RichText::new("Analysis failed").color(theme::RED),
                                );
                            }
                        }
                    });
                });
            }
        });

    if let Some((id, name)) = remove {
        if state.queue.remove(id) {
            state.status_message = format!("Removed {name} from the queue.");
        }
    }
}
