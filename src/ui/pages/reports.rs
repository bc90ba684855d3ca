// Rampart - ui/pages/reports.rs
//
// Report index: every record with full analysis findings, joined with
// its repository metadata. Opening a row switches to the detail page.

use crate::app::state::AppState;
use crate::ui::{format, theme};

/// Render the reports page (central area).
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Analysis Reports");
    ui.separator();

    if state.reports.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label("No analysis reports available.");
        });
        return;
    }

    ui.label(
        egui::RichText::new(format!(
            "{} completed analyses with full findings.",
            state.reports.len()
        ))
        .small()
        .weak(),
    );
    ui.add_space(4.0);

    let mut open_report: Option<String> = None;

    egui::ScrollArea::vertical()
        .id_salt("reports_list")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            for report in &state.reports {
                // Header metadata lives on the paired record; a report
                // without one (possible after a fixture refresh) still
                // renders, just with the raw ID.
                let record = state.records.iter().find(|r| r.id == report.id);
                let risk_colour = theme::risk_score_colour(report.risk_score);

                ui.group(|ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            match record {
                                Some(record) => {
                                    ui.strong(&record.name);
                                    ui.label(
                                        egui::RichText::new(format!(
                                            "{} \u{00b7} {} \u{00b7} uploaded {} by {}",
                                            record.file_type,
                                            format::format_size(record.size),
                                            format::format_timestamp_short(&record.upload_date),
                                            record.uploaded_by,
                                        ))
                                        .small()
                                        .weak(),
                                    );
                                }
                                None => {
                                    ui.strong(format!("Record {}", report.id));
                                    ui.label(
                                        egui::RichText::new("No repository metadata")
                                            .small()
                                            .weak(),
                                    );
                                }
                            }
                        });
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                if ui.button("Open Report").clicked() {
                                    open_report = Some(report.id.clone());
                                }
                                ui.label(
                                    egui::RichText::new(format!("{:.1}", report.risk_score))
                                        .strong()
                                        .color(risk_colour),
                                );
                                ui.label(
                                    egui::RichText::new(&report.malware_type).color(risk_colour),
                                );
                            },
                        );
                    });
                });
            }
        });

    if let Some(record_id) = open_report {
        state.open_report(&record_id);
    }
}
