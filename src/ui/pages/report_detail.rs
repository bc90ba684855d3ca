// Rampart - ui/pages/report_detail.rs
//
// Full analysis report for one sample, split across six tabs.
//
// Header actions (back, export) are collected as flags and applied
// after rendering, because `state.selected_report()` holds a borrow of
// `state` for the whole tab body. Tab switching happens before that
// borrow is taken.

use crate::app::state::{AppState, ReportTab};
use crate::core::model::{EngineReport, FileRecord, ReportDetail};
use crate::ui::{format, theme};

/// Render the report detail page (central area).
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let mut go_back = false;
    let mut export_clicked = false;

    // Owned copy of the paired record so the header and overview can
    // use it while `state` is borrowed by the report below.
    let record: Option<FileRecord> = state
        .selected_report_id
        .as_ref()
        .and_then(|id| state.records.iter().find(|r| &r.id == id))
        .cloned();

    ui.horizontal(|ui| {
        if ui.button("\u{2190} Back").clicked() {
            go_back = true;
        }
        match record {
            Some(ref record) => ui.heading(&record.name),
            None => ui.heading("Analysis Report"),
        };
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Export Report JSON\u{2026}").clicked() {
                export_clicked = true;
            }
        });
    });
    ui.separator();

    ui.horizontal(|ui| {
        for tab in ReportTab::all() {
            if ui
                .selectable_label(state.report_tab == *tab, tab.label())
                .clicked()
            {
                state.report_tab = *tab;
            }
        }
    });
    ui.separator();

    let tab = state.report_tab;
    match state.selected_report() {
        None => {
            ui.centered_and_justified(|ui| {
                ui.label("No detailed report available for this record.");
            });
        }
        Some(report) => {
            egui::ScrollArea::vertical()
                .id_salt("report_detail")
                .auto_shrink([false; 2])
                .show(ui, |ui| match tab {
                    ReportTab::Overview => render_overview(ui, report, record.as_ref()),
                    ReportTab::Behaviors => render_behaviors(ui, report),
                    ReportTab::Signatures => render_signatures(ui, report),
                    ReportTab::StaticAnalysis => render_static(ui, report),
                    ReportTab::DynamicAnalysis => render_dynamic(ui, report),
                    ReportTab::Network => render_network(ui, report),
                });
        }
    }

    if export_clicked {
        state.request_report_export = true;
    }
    if go_back {
        state.close_report();
    }
}

// =============================================================================
// Tab bodies
// =============================================================================

fn render_overview(ui: &mut egui::Ui, report: &ReportDetail, record: Option<&FileRecord>) {
    let risk_colour = theme::risk_score_colour(report.risk_score);

    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(&report.malware_type)
                    .size(18.0)
                    .strong()
                    .color(risk_colour),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(format!("{:.1} / 10", report.risk_score))
                        .size(18.0)
                        .strong()
                        .color(risk_colour),
                );
                ui.label(egui::RichText::new("Risk score").weak());
            });
        });
    });
    ui.add_space(8.0);

    match record {
        Some(record) => {
            egui::Grid::new("report_overview_grid")
                .num_columns(2)
                .spacing([16.0, 4.0])
                .striped(true)
                .show(ui, |ui| {
                    ui.label(egui::RichText::new("File name").weak());
                    ui.label(&record.name);
                    ui.end_row();

                    ui.label(egui::RichText::new("Size").weak());
                    ui.label(format::format_size(record.size));
                    ui.end_row();

                    ui.label(egui::RichText::new("Type").weak());
                    ui.label(&record.file_type);
                    ui.end_row();

                    ui.label(egui::RichText::new("Uploaded").weak());
                    ui.label(format::format_timestamp(&record.upload_date));
                    ui.end_row();

                    ui.label(egui::RichText::new("Uploader").weak());
                    ui.label(&record.uploaded_by);
                    ui.end_row();

                    ui.label(egui::RichText::new("Status").weak());
                    ui.colored_label(
                        theme::status_colour(&record.status),
                        record.status.label(),
                    );
                    ui.end_row();

                    ui.label(egui::RichText::new("MD5").weak());
                    ui.label(egui::RichText::new(&record.hashes.md5).monospace().small());
                    ui.end_row();

                    ui.label(egui::RichText::new("SHA-1").weak());
                    ui.label(egui::RichText::new(&record.hashes.sha1).monospace().small());
                    ui.end_row();

                    ui.label(egui::RichText::new("SHA-256").weak());
                    ui.label(
                        egui::RichText::new(&record.hashes.sha256).monospace().small(),
                    );
                    ui.end_row();
                });
        }
        None => {
            ui.label(egui::RichText::new("No repository metadata for this record.").weak());
        }
    }

    ui.add_space(12.0);
    ui.strong("Engine Results");
    ui.add_space(4.0);
    render_engine(ui, "CAPEv2", &report.engines.capev2);
    render_engine(ui, "MobSF", &report.engines.mobsf);

    ui.add_space(12.0);
    ui.strong("Artefacts");
    ui.add_space(4.0);
    for (label, path) in [
        ("PDF report", &report.download_links.report_pdf),
        ("JSON report", &report.download_links.report_json),
        ("Analysis log", &report.download_links.analysis_log),
    ] {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(label).weak());
            ui.label(egui::RichText::new(path).monospace().small());
        });
    }
}

fn render_engine(ui: &mut egui::Ui, name: &str, engine: &EngineReport) {
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.strong(name);
            ui.label(
                egui::RichText::new(engine.status.label())
                    .small()
                    .color(theme::engine_run_colour(&engine.status)),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(format!("score {:.1}", engine.score))
                        .strong()
                        .color(theme::risk_score_colour(engine.score)),
                );
            });
        });
        if let Some(ref detection) = engine.detection {
            ui.label(egui::RichText::new(detection).monospace().small());
        }
        for finding in &engine.findings {
            ui.label(egui::RichText::new(format!("\u{2022} {finding}")).small());
        }
    });
}

fn render_behaviors(ui: &mut egui::Ui, report: &ReportDetail) {
    string_list(ui, "File Creations", &report.behaviors.file_creations, None);
    string_list(ui, "Registry Changes", &report.behaviors.registry_changes, None);
    string_list(
        ui,
        "Network Connections",
        &report.behaviors.network_connections,
        None,
    );
    string_list(
        ui,
        "Suspicious Domains",
        &report.behaviors.suspicious_domains,
        Some(theme::RED),
    );
    string_list(ui, "API Calls", &report.behaviors.api_calls, None);
}

fn render_signatures(ui: &mut egui::Ui, report: &ReportDetail) {
    if report.signatures.is_empty() {
        ui.label(egui::RichText::new("No signatures matched.").weak());
        return;
    }

    ui.label(
        egui::RichText::new(format!("{} signatures matched.", report.signatures.len()))
            .small()
            .weak(),
    );
    ui.add_space(4.0);

    for signature in &report.signatures {
        let colour = theme::risk_level_colour(&signature.severity);
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(signature.severity.label().to_uppercase())
                        .small()
                        .strong()
                        .color(colour),
                );
                ui.strong(&signature.name);
            });
            ui.label(egui::RichText::new(&signature.description).small().weak());
        });
    }
}

fn render_static(ui: &mut egui::Ui, report: &ReportDetail) {
    string_list(ui, "Imports", &report.static_analysis.imports, None);
    string_list(ui, "Strings", &report.static_analysis.strings, None);
    string_list(ui, "Resources", &report.static_analysis.resources, None);
}

fn render_dynamic(ui: &mut egui::Ui, report: &ReportDetail) {
    string_list(ui, "Processes", &report.dynamic_analysis.processes, None);
    string_list(
        ui,
        "Network Traffic",
        &report.dynamic_analysis.network_traffic,
        None,
    );
    string_list(ui, "System Changes", &report.dynamic_analysis.system_changes, None);
}

/// Every network observation across the static behaviour findings and
/// the sandbox run, in one place.
fn render_network(ui: &mut egui::Ui, report: &ReportDetail) {
    string_list(ui, "Connections", &report.behaviors.network_connections, None);
    string_list(
        ui,
        "Suspicious Domains",
        &report.behaviors.suspicious_domains,
        Some(theme::RED),
    );
    string_list(
        ui,
        "Sandbox Traffic",
        &report.dynamic_analysis.network_traffic,
        None,
    );
}

/// Collapsible list of findings with a count in the header.
fn string_list(ui: &mut egui::Ui, title: &str, items: &[String], colour: Option<egui::Color32>) {
    egui::CollapsingHeader::new(format!("{title} ({})", items.len()))
        .default_open(true)
        .show(ui, |ui| {
            if items.is_empty() {
                ui.label(egui::RichText::new("None observed.").weak());
            }
            for item in items {
                let mut text = egui::RichText::new(item).monospace().size(12.0);
                if let Some(colour) = colour {
                    text = text.color(colour);
                }
                ui.label(text);
            }
        });
}
