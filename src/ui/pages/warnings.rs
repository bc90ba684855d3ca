// Rampart - ui/pages/warnings.rs
//
// Warnings window: non-fatal problems accumulated since startup
// (config validation, fixture overrides, rejected uploads). Opened
// from the View menu or by clicking the status-bar badge.

use crate::app::state::AppState;

/// Render the warnings window (if `state.show_warnings` is true).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_warnings {
        return;
    }

    let mut open = true;
    let mut clear = false;

    egui::Window::new(format!("Warnings ({})", state.warnings.len()))
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .min_width(420.0)
        .default_height(260.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            if state.warnings.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(16.0);
                    ui.label(egui::RichText::new("No warnings.").weak());
                    ui.add_space(16.0);
                });
                return;
            }

            egui::ScrollArea::vertical()
                .id_salt("warnings_window")
                .auto_shrink([false, true])
                .max_height(320.0)
                .show(ui, |ui| {
                    for warning in &state.warnings {
                        ui.label(
                            egui::RichText::new(format!("\u{26a0} {warning}"))
                                .small()
                                .color(egui::Color32::from_rgb(217, 119, 6)),
                        );
                    }
                });

            ui.separator();
            if ui.small_button("Clear all").clicked() {
                clear = true;
            }
        });

    if clear {
        state.warnings.clear();
    }
    if !open {
        state.show_warnings = false;
    }
}
