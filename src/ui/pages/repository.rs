// Rampart - ui/pages/repository.rs
//
// Virtual-scrolling repository table with search, status/type filters,
// and sortable columns.
//
// Uses egui's `ScrollArea::show_rows` which renders only the rows
// currently visible in the viewport, giving O(1) rendering cost
// regardless of record count. Filter edits are detected by comparing
// the filter state before and after the control row, so every control
// reapplies filters through the same path.
//
// Clicking a row opens the record's report; the open request is
// collected inside show_rows and applied after it, so we do not
// mutable-borrow `state` while `record` still holds an immutable
// reference into `state.records`.

use crate::app::state::{AppState, ExportFormat};
use crate::core::filter::SortBy;
use crate::core::model::FileStatus;
use crate::ui::{format, theme};
use egui::text::{LayoutJob, TextFormat};

/// Render the repository page (central area).
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading("Repository");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let has_rows = !state.filtered_indices.is_empty();
            ui.add_enabled_ui(has_rows, |ui| {
                if ui.button("Export JSON\u{2026}").clicked() {
                    state.request_export = Some(ExportFormat::Json);
                }
                if ui.button("Export CSV\u{2026}").clicked() {
                    state.request_export = Some(ExportFormat::Csv);
                }
            });
        });
    });
    ui.separator();

    render_filter_controls(ui, state);
    ui.add_space(4.0);
    render_table(ui, state);
}

/// Search box, status/type dropdowns, sort chips, and the clear button.
fn render_filter_controls(ui: &mut egui::Ui, state: &mut AppState) {
    let before = state.filter_state.clone();

    ui.horizontal(|ui| {
        ui.add(
            egui::TextEdit::singleline(&mut state.filter_state.search_term)
                .hint_text("\u{1f50d} name, uploader, or MD5\u{2026}")
                .desired_width(240.0),
        );

        egui::ComboBox::from_id_salt("repo_status_filter")
            .selected_text(
                state
                    .filter_state
                    .status
                    .map(|status| status.label())
                    .unwrap_or("All statuses"),
            )
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut state.filter_state.status, None, "All statuses");
                for status in FileStatus::all() {
                    ui.selectable_value(
                        &mut state.filter_state.status,
                        Some(*status),
                        status.label(),
                    );
                }
            });

        // The type list is derived from the loaded records, so the
        // dropdown never offers a type that cannot match anything.
        let types = state.record_types();
        egui::ComboBox::from_id_salt("repo_type_filter")
            .selected_text(
                state
                    .filter_state
                    .file_type
                    .clone()
                    .unwrap_or_else(|| "All types".to_string()),
            )
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut state.filter_state.file_type, None, "All types");
                for file_type in types {
                    ui.selectable_value(
                        &mut state.filter_state.file_type,
                        Some(file_type.clone()),
                        file_type,
                    );
                }
            });

        if !state.filter_state.is_empty() && ui.small_button("Clear").clicked() {
            state.filter_state.search_term.clear();
            state.filter_state.status = None;
            state.filter_state.file_type = None;
        }
    });

    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Sort:").small().weak());
        for key in SortBy::all() {
            let active = state.filter_state.sort_by == *key;
            let text = if active {
                format!("{} {}", key.label(), state.filter_state.sort_order.arrow())
            } else {
                key.label().to_string()
            };
            if ui
                .selectable_label(active, egui::RichText::new(text).small())
                .clicked()
            {
                state.filter_state.toggle_sort(*key);
            }
        }
    });

    if state.filter_state != before {
        state.apply_filters();
    }
}

/// Virtual-scroll record table.
fn render_table(ui: &mut egui::Ui, state: &mut AppState) {
    let filtered = state.filtered_indices.len();

    if filtered == 0 {
        ui.centered_and_justified(|ui| {
            if state.records.is_empty() {
                ui.label("Repository is empty.");
            } else {
                ui.label("No records match the current filters.");
            }
        });
        return;
    }

    // Monospace header aligned with the row columns below.
    ui.label(
        egui::RichText::new(format!(
            "{:<28} {:>10}  {:<4}  {:<16}  {:<10} {:<9} {:>5}",
            "Name", "Size", "Type", "Uploaded", "Uploader", "Status", "Risk"
        ))
        .monospace()
        .weak(),
    );
    ui.separator();

    let row_height = theme::ROW_HEIGHT;
    let mut open_report: Option<String> = None;

    egui::ScrollArea::vertical()
        .id_salt("repository_table")
        .auto_shrink([false; 2])
        .show_rows(ui, row_height, filtered, |ui, row_range| {
            for display_idx in row_range {
                let Some(&record_idx) = state.filtered_indices.get(display_idx) else {
                    continue;
                };
                let Some(record) = state.records.get(record_idx) else {
                    continue;
                };

                let font = egui::FontId::monospace(12.0);
                let body_colour = ui.style().visuals.text_color();
                let status_colour = theme::status_colour(&record.status);

                let mut row_job = LayoutJob::default();
                row_job.append(
                    &format!(
                        "{:<28} {:>10}  {:<4}  {:<16}  {:<10} ",
                        format::truncate_left(&record.name, 28),
                        format::format_size(record.size),
                        record.file_type,
                        format::format_timestamp_short(&record.upload_date),
                        record.uploaded_by,
                    ),
                    0.0,
                    TextFormat {
                        font_id: font.clone(),
                        color: body_colour,
                        ..Default::default()
                    },
                );
                row_job.append(
                    &format!("{:<9} ", record.status.label()),
                    0.0,
                    TextFormat {
                        font_id: font.clone(),
                        color: status_colour,
                        ..Default::default()
                    },
                );
                let (risk_text, risk_colour) = match record.risk_score {
                    Some(score) => (format!("{score:>5.1}"), theme::risk_score_colour(score)),
                    None => (format!("{:>5}", "-"), theme::DIM),
                };
                row_job.append(
                    &risk_text,
                    0.0,
                    TextFormat {
                        font_id: font,
                        color: risk_colour,
                        ..Default::default()
                    },
                );

                let response = ui.selectable_label(false, row_job);
                if response.clicked() {
                    open_report = Some(record.id.clone());
                }
                response.on_hover_ui(|ui| {
                    ui.label(&record.name);
                    if let Some(ref family) = record.malware_type {
                        let colour = record
                            .risk_score
                            .map(theme::risk_score_colour)
                            .unwrap_or(theme::DIM);
                        ui.label(egui::RichText::new(family).color(colour));
                    }
                    ui.label(
                        egui::RichText::new(format!("MD5    {}", record.hashes.md5))
                            .monospace()
                            .small(),
                    );
                    ui.label(
                        egui::RichText::new(format!("SHA256 {}", record.hashes.sha256))
                            .monospace()
                            .small(),
                    );
                    ui.label(
                        egui::RichText::new("Click to open the analysis report")
                            .small()
                            .weak(),
                    );
                });
            }
        });

    // Apply any pending navigation after the scroll area releases `state`.
    if let Some(record_id) = open_report {
        state.open_report(&record_id);
    }
}
