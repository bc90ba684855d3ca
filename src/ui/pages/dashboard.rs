// Rampart - ui/pages/dashboard.rs
//
// Dashboard page: sample counts, malware family ranking, per-type risk
// scores, recent pipeline activity, and engine health.
// All data comes from the catalogue's dashboard document; the only
// mutation here is the daily/monthly range toggle.

use crate::app::state::AppState;
use crate::core::model::{FileCounts, StatsRange};
use crate::core::stats;
use crate::ui::{format, theme};

/// Render the dashboard page (central area).
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading("Dashboard");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            // Right-to-left layout: iterate reversed so Daily lands first.
            for range in StatsRange::all().iter().rev() {
                let active = state.stats_range == *range;
                if ui.selectable_label(active, range.label()).clicked() {
                    state.stats_range = *range;
                }
            }
            ui.label(egui::RichText::new("Ranking:").weak());
        });
    });
    ui.separator();

    egui::ScrollArea::vertical()
        .id_salt("dashboard")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            render_stat_cards(ui, state);
            ui.add_space(12.0);

            ui.columns(2, |columns| {
                render_malware_ranking(&mut columns[0], state);
                render_risk_scores(&mut columns[1], state);
            });
            ui.add_space(12.0);

            render_recent_activities(ui, state);
            ui.add_space(12.0);

            render_system_status(ui, state);
        });
}

/// Top row of stat cards: platform totals, the analyst's own samples,
/// and the registered user count.
fn render_stat_cards(ui: &mut egui::Ui, state: &AppState) {
    let stats = &state.dashboard;
    ui.columns(3, |columns| {
        count_card(&mut columns[0], "Total Samples", &stats.total_files);
        count_card(&mut columns[1], "My Samples", &stats.user_files);

        columns[2].group(|ui| {
            ui.set_min_width(theme::CARD_MIN_WIDTH);
            ui.label(egui::RichText::new("Registered Users").small().weak());
            ui.label(
                egui::RichText::new(state.dashboard.total_users.to_string())
                    .size(26.0)
                    .strong(),
            );
            ui.label(egui::RichText::new("platform-wide").small().weak());
        });
    });
}

/// One card with a total and its completed/pending/failed breakdown.
fn count_card(ui: &mut egui::Ui, title: &str, counts: &FileCounts) {
    ui.group(|ui| {
        ui.set_min_width(theme::CARD_MIN_WIDTH);
        ui.label(egui::RichText::new(title).small().weak());
        ui.label(
            egui::RichText::new(counts.total.to_string())
                .size(26.0)
                .strong(),
        );
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(format!("{} completed", counts.success))
                    .small()
                    .color(theme::GREEN),
            );
            ui.label(
                egui::RichText::new(format!("{} pending", counts.pending))
                    .small()
                    .color(theme::YELLOW),
            );
            ui.label(
                egui::RichText::new(format!("{} failed", counts.failed))
                    .small()
                    .color(theme::RED),
            );
        });
    });
}

/// Malware family ranking for the selected time range, drawn as
/// labelled bars proportional to the largest family count.
fn render_malware_ranking(ui: &mut egui::Ui, state: &AppState) {
    ui.group(|ui| {
        ui.set_min_width(theme::CARD_MIN_WIDTH);
        ui.strong(format!(
            "Top Malware Types ({})",
            state.stats_range.label()
        ));
        ui.add_space(4.0);

        let counts = state.dashboard.top_malware_types.for_range(state.stats_range);
        if counts.is_empty() {
            ui.label(egui::RichText::new("No detections in range.").weak());
            return;
        }

        let fractions = stats::ranking_fractions(counts);
        for (entry, fraction) in counts.iter().zip(fractions) {
            ui.horizontal(|ui| {
                ui.label(&entry.malware_type);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(entry.count.to_string()).strong());
                });
            });
            bar(ui, fraction, theme::BLUE);
            ui.add_space(2.0);
        }
    });
}

/// Average risk score per file extension, banded by the risk thresholds.
fn render_risk_scores(ui: &mut egui::Ui, state: &AppState) {
    ui.group(|ui| {
        ui.set_min_width(theme::CARD_MIN_WIDTH);
        ui.strong("Risk Score by File Type");
        ui.add_space(4.0);

        if state.dashboard.risk_scores.is_empty() {
            ui.label(egui::RichText::new("No scored samples yet.").weak());
            return;
        }

        for entry in &state.dashboard.risk_scores {
            let colour = theme::risk_score_colour(entry.risk_score);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&entry.file_type).monospace());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format!("{:.1}", entry.risk_score))
                            .strong()
                            .color(colour),
                    );
                });
            });
            bar(ui, stats::risk_fraction(entry.risk_score), colour);
            ui.add_space(2.0);
        }
    });
}

/// Horizontal bar: dimmed track with a proportional coloured fill.
fn bar(ui: &mut egui::Ui, fraction: f32, colour: egui::Color32) {
    let (rect, _) =
        ui.allocate_exact_size(egui::vec2(ui.available_width(), 6.0), egui::Sense::hover());
    ui.painter()
        .rect_filled(rect, 2.0, ui.style().visuals.extreme_bg_color);
    if fraction > 0.0 {
        let fill = egui::Rect::from_min_size(
            rect.min,
            egui::vec2(rect.width() * fraction.clamp(0.0, 1.0), rect.height()),
        );
        ui.painter().rect_filled(fill, 2.0, colour);
    }
}

/// Most recent pipeline events, newest first.
fn render_recent_activities(ui: &mut egui::Ui, state: &AppState) {
    ui.group(|ui| {
        ui.set_min_width(ui.available_width());
        ui.strong("Recent Activity");
        ui.add_space(4.0);

        if state.dashboard.recent_activities.is_empty() {
            ui.label(egui::RichText::new("No recent activity.").weak());
            return;
        }

        egui::Grid::new("recent_activities")
            .num_columns(4)
            .spacing([16.0, 4.0])
            .striped(true)
            .show(ui, |ui| {
                for activity in &state.dashboard.recent_activities {
                    let colour = theme::activity_colour(&activity.status);
                    ui.colored_label(colour, format!("\u{25cf} {}", activity.status.label()));
                    ui.label(&activity.file_name);
                    ui.label(egui::RichText::new(&activity.file_type).monospace().weak());
                    ui.label(
                        egui::RichText::new(format::format_timestamp(&activity.timestamp)).weak(),
                    );
                    ui.end_row();
                }
            });
    });
}

/// Engine and API health row, one coloured dot per component.
fn render_system_status(ui: &mut egui::Ui, state: &AppState) {
    let status = &state.dashboard.system_status;
    ui.group(|ui| {
        ui.set_min_width(ui.available_width());
        ui.strong("System Status");
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            health_badge(ui, "CAPEv2", &status.capev2);
            ui.separator();
            health_badge(ui, "MobSF", &status.mobsf);
            ui.separator();
            health_badge(ui, "API Gateway", &status.api);
        });
    });
}

fn health_badge(ui: &mut egui::Ui, name: &str, health: &crate::core::model::EngineHealth) {
    let colour = theme::engine_health_colour(health);
    let (dot_rect, _) = ui.allocate_exact_size(egui::vec2(8.0, 8.0), egui::Sense::hover());
    ui.painter().circle_filled(dot_rect.center(), 4.0, colour);
    ui.label(name);
    ui.label(egui::RichText::new(health.label()).small().color(colour));
}
