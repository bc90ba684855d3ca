// Rampart - ui/pages/profile.rs
//
// Analyst profile: account overview plus login, upload, and download
// histories. Histories are bounded (the backend trims them), so plain
// striped grids are enough here, no virtual scrolling.

use crate::app::state::{AppState, ProfileTab};
use crate::core::model::{DownloadRecord, LoginRecord, ProfileData, UploadRecord};
use crate::ui::{format, theme};

/// Render the profile page (central area).
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Profile");
    ui.separator();

    ui.horizontal(|ui| {
        for tab in ProfileTab::all() {
            if ui
                .selectable_label(state.profile_tab == *tab, tab.label())
                .clicked()
            {
                state.profile_tab = *tab;
            }
        }
    });
    ui.separator();

    let tab = state.profile_tab;
    let profile = &state.profile;

    egui::ScrollArea::vertical()
        .id_salt("profile_page")
        .auto_shrink([false; 2])
        .show(ui, |ui| match tab {
            ProfileTab::Overview => render_overview(ui, profile),
            ProfileTab::Logins => render_logins(ui, &profile.login_history),
            ProfileTab::Uploads => render_uploads(ui, &profile.upload_history),
            ProfileTab::Downloads => render_downloads(ui, &profile.download_history),
        });
}

fn render_overview(ui: &mut egui::Ui, profile: &ProfileData) {
    let user = &profile.user;

    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            // Initial-letter avatar, like the web console's.
            let (rect, _) = ui.allocate_exact_size(egui::vec2(40.0, 40.0), egui::Sense::hover());
            ui.painter()
                .circle_filled(rect.center(), 20.0, egui::Color32::from_rgb(30, 64, 175));
            let initial = user
                .username
                .chars()
                .next()
                .map(|c| c.to_ascii_uppercase())
                .unwrap_or('?');
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                initial,
                egui::FontId::proportional(20.0),
                egui::Color32::WHITE,
            );

            ui.vertical(|ui| {
                ui.label(egui::RichText::new(&user.username).size(20.0).strong());
                ui.label(egui::RichText::new(&user.email).weak());
                ui.label(egui::RichText::new(&user.role).small().color(theme::BLUE));
            });
        });
    });
    ui.add_space(8.0);

    egui::Grid::new("profile_user_grid")
        .num_columns(2)
        .spacing([16.0, 4.0])
        .striped(true)
        .show(ui, |ui| {
            ui.label(egui::RichText::new("Joined").weak());
            ui.label(format::format_timestamp_short(&user.join_date));
            ui.end_row();

            ui.label(egui::RichText::new("Last login").weak());
            ui.label(format::format_timestamp(&user.last_login));
            ui.end_row();

            ui.label(egui::RichText::new("Sign-ins on record").weak());
            ui.label(profile.login_history.len().to_string());
            ui.end_row();

            ui.label(egui::RichText::new("Uploads on record").weak());
            ui.label(profile.upload_history.len().to_string());
            ui.end_row();

            ui.label(egui::RichText::new("Report downloads").weak());
            ui.label(profile.download_history.len().to_string());
            ui.end_row();
        });
}

fn render_logins(ui: &mut egui::Ui, logins: &[LoginRecord]) {
    if logins.is_empty() {
        ui.label(egui::RichText::new("No login history.").weak());
        return;
    }

    egui::Grid::new("profile_logins")
        .num_columns(5)
        .spacing([16.0, 4.0])
        .striped(true)
        .show(ui, |ui| {
            ui.label(egui::RichText::new("Time").weak());
            ui.label(egui::RichText::new("IP Address").weak());
            ui.label(egui::RichText::new("Location").weak());
            ui.label(egui::RichText::new("Device").weak());
            ui.label(egui::RichText::new("Status").weak());
            ui.end_row();

            for login in logins {
                ui.label(format::format_timestamp_short(&login.timestamp));
                ui.label(egui::RichText::new(&login.ip_address).monospace());
                ui.label(&login.location);
                ui.label(&login.device);
                ui.colored_label(
                    theme::login_status_colour(&login.status),
                    login.status.label(),
                );
                ui.end_row();
            }
        });
}

fn render_uploads(ui: &mut egui::Ui, uploads: &[UploadRecord]) {
    if uploads.is_empty() {
        ui.label(egui::RichText::new("No upload history.").weak());
        return;
    }

    egui::Grid::new("profile_uploads")
        .num_columns(5)
        .spacing([16.0, 4.0])
        .striped(true)
        .show(ui, |ui| {
            ui.label(egui::RichText::new("Time").weak());
            ui.label(egui::RichText::new("File").weak());
            ui.label(egui::RichText::new("Type").weak());
            ui.label(egui::RichText::new("Status").weak());
            ui.label(egui::RichText::new("Risk").weak());
            ui.end_row();

            for upload in uploads {
                ui.label(format::format_timestamp_short(&upload.timestamp));
                ui.label(&upload.file_name);
                ui.label(egui::RichText::new(&upload.file_type).monospace());
                ui.colored_label(theme::status_colour(&upload.status), upload.status.label());
                match upload.risk_score {
                    Some(score) => {
                        ui.colored_label(
                            theme::risk_score_colour(score),
                            format!("{score:.1}"),
                        );
                    }
                    None => {
                        ui.label(egui::RichText::new("-").weak());
                    }
                }
                ui.end_row();
            }
        });
}

fn render_downloads(ui: &mut egui::Ui, downloads: &[DownloadRecord]) {
    if downloads.is_empty() {
        ui.label(egui::RichText::new("No download history.").weak());
        return;
    }

    egui::Grid::new("profile_downloads")
        .num_columns(4)
        .spacing([16.0, 4.0])
        .striped(true)
        .show(ui, |ui| {
            ui.label(egui::RichText::new("Time").weak());
            ui.label(egui::RichText::new("File").weak());
            ui.label(egui::RichText::new("Report").weak());
            ui.label(egui::RichText::new("Size").weak());
            ui.end_row();

            for download in downloads {
                ui.label(format::format_timestamp_short(&download.timestamp));
                ui.label(&download.file_name);
                ui.label(&download.report_type);
                ui.label(format::format_size(download.file_size));
                ui.end_row();
            }
        });
}
