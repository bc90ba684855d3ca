// Rampart - tests/e2e_listing.rs
//
// End-to-end tests for the repository listing flow: the embedded
// fixture catalogue loaded into application state, then filtered,
// sorted, navigated, exported, and refreshed exactly as the GUI
// drives it. Real JSON fixtures, real chrono parsing, real CSV
// writing. No mocks, no stubs.

use rampart::app::state::{AppState, Page};
use rampart::core::export;
use rampart::core::filter::{SortBy, SortOrder};
use rampart::core::fixtures;
use rampart::core::ingest::IngestQueue;
use rampart::core::model::{FileRecord, FileStatus};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::{Duration, Instant};

// =============================================================================
// Helpers
// =============================================================================

/// Application state over the embedded catalogue, with a seeded
/// ingestion queue so nothing here depends on entropy.
fn new_state() -> AppState {
    let catalogue = fixtures::load_builtin().expect("embedded catalogue must load");
    let queue = IngestQueue::with_rng(
        Duration::from_millis(200),
        Duration::from_millis(3000),
        StdRng::seed_from_u64(7),
    );
    AppState::new(catalogue, queue, false)
}

/// Record names in display order, as the repository table would show them.
fn visible_names(state: &AppState) -> Vec<String> {
    state
        .filtered_indices
        .iter()
        .map(|&idx| state.records[idx].name.clone())
        .collect()
}

/// Owned copies of the visible records, in display order. This is the
/// exact slice the export path receives.
fn visible_records(state: &AppState) -> Vec<FileRecord> {
    state
        .filtered_indices
        .iter()
        .map(|&idx| state.records[idx].clone())
        .collect()
}

// =============================================================================
// Listing and filtering E2E
// =============================================================================

/// A fresh launch shows every fixture record, newest upload first.
#[test]
fn e2e_builtin_catalogue_lists_newest_first() {
    let state = new_state();

    assert_eq!(state.records.len(), 5);
    assert_eq!(
        visible_names(&state),
        vec![
            "suspicious_app.apk",
            "system_tool.exe",
            "document_reader.msi",
            "backup_script.bat",
            "installer_package.dmg",
        ]
    );
    assert_eq!(state.status_message, "Ready. 5 records in the repository.");
}

/// The status dropdown narrows the table to one pipeline phase.
#[test]
fn e2e_status_filter_narrows_to_completed() {
    let mut state = new_state();

    state.filter_state.status = Some(FileStatus::Completed);
    state.apply_filters();

    assert_eq!(
        visible_names(&state),
        vec![
            "suspicious_app.apk",
            "backup_script.bat",
            "installer_package.dmg",
        ]
    );
}

/// Search covers filename, uploader, and MD5, case-insensitively, and
/// clearing the term restores the full listing.
#[test]
fn e2e_search_spans_uploader_and_hash() {
    let mut state = new_state();

    // Two records were uploaded by "admin".
    state.filter_state.search_term = "admin".to_string();
    state.apply_filters();
    assert_eq!(
        visible_names(&state),
        vec!["suspicious_app.apk", "backup_script.bat"]
    );

    // An uppercase MD5 prefix still finds its record.
    state.filter_state.search_term = "D41D8CD98F".to_string();
    state.apply_filters();
    assert_eq!(visible_names(&state), vec!["suspicious_app.apk"]);

    state.filter_state.search_term.clear();
    state.apply_filters();
    assert_eq!(state.filtered_indices.len(), 5);
}

/// The type dropdown is built from the distinct extensions actually in
/// the catalogue, and selecting one narrows the table to it.
#[test]
fn e2e_type_filter_uses_catalogue_extensions() {
    let mut state = new_state();

    assert_eq!(state.record_types(), vec!["apk", "bat", "dmg", "exe", "msi"]);

    state.filter_state.file_type = Some("exe".to_string());
    state.apply_filters();
    assert_eq!(visible_names(&state), vec!["system_tool.exe"]);
}

/// Clicking a new column header sorts descending by it; clicking it
/// again flips the direction.
#[test]
fn e2e_sort_chips_toggle_direction() {
    let mut state = new_state();

    state.filter_state.toggle_sort(SortBy::Size);
    state.apply_filters();
    assert_eq!(state.filter_state.sort_order, SortOrder::Desc);
    let names = visible_names(&state);
    assert_eq!(names.first().map(String::as_str), Some("installer_package.dmg"));
    assert_eq!(names.last().map(String::as_str), Some("backup_script.bat"));

    state.filter_state.toggle_sort(SortBy::Size);
    state.apply_filters();
    assert_eq!(state.filter_state.sort_order, SortOrder::Asc);
    assert_eq!(
        visible_names(&state).first().map(String::as_str),
        Some("backup_script.bat")
    );
}

// =============================================================================
// Report navigation E2E
// =============================================================================

/// Opening a completed record lands on the detail page with the full
/// report loaded and the tab bar reset to the overview.
#[test]
fn e2e_open_report_lands_on_detail_page() {
    let mut state = new_state();

    state.open_report("1");

    assert_eq!(state.active_page, Page::ReportDetail);
    let report = state.selected_report().expect("record 1 carries a report");
    assert_eq!(report.malware_type, "Trojan.AndroidOS.FakeApp");
    assert!((report.risk_score - 8.5).abs() < f32::EPSILON);
    assert_eq!(report.signatures.len(), 4);
}

/// A record still in analysis has no report; the click reports via the
/// status bar and navigation stays where it was.
#[test]
fn e2e_record_without_report_stays_put() {
    let mut state = new_state();
    let page_before = state.active_page;

    state.open_report("2");

    assert_eq!(state.active_page, page_before);
    assert!(state.selected_report().is_none());
    assert_eq!(
        state.status_message,
        "No detailed report available for record 2."
    );
}

/// The back button drops the selection and returns to the report list.
#[test]
fn e2e_closing_report_returns_to_list() {
    let mut state = new_state();

    state.open_report("1");
    state.close_report();

    assert_eq!(state.active_page, Page::Reports);
    assert!(state.selected_report().is_none());
}

// =============================================================================
// Filtered export E2E
// =============================================================================

/// CSV export writes exactly the records the active filter shows, in
/// display order, and nothing else.
#[test]
fn e2e_csv_export_covers_only_the_filtered_view() {
    let mut state = new_state();
    state.filter_state.status = Some(FileStatus::Completed);
    state.apply_filters();

    let records = visible_records(&state);
    let mut buf = Vec::new();
    let count = export::export_csv(&records, &mut buf, &PathBuf::from("repository.csv"))
        .expect("filtered export must succeed");

    assert_eq!(count, 3);
    let output = String::from_utf8(buf).unwrap();
    assert!(output.starts_with("name,size,type,uploaded"));
    assert!(output.contains("suspicious_app.apk"));
    assert!(output.contains("backup_script.bat"));
    assert!(output.contains("installer_package.dmg"));
    // Records hidden by the filter never reach the file.
    assert!(!output.contains("system_tool.exe"));
    assert!(!output.contains("document_reader.msi"));
}

/// Exporting the open report writes its complete detail document.
#[test]
fn e2e_report_export_carries_full_detail() {
    let mut state = new_state();
    state.open_report("5");

    let report = state.selected_report().expect("record 5 carries a report");
    let mut buf = Vec::new();
    export::export_report_json(report, &mut buf, &PathBuf::from("report_5.json"))
        .expect("report export must succeed");

    let output = String::from_utf8(buf).unwrap();
    assert!(output.contains("Adware.OSX.Bundlore"));
    assert!(output.contains("downloadLinks"));
}

// =============================================================================
// Catalogue refresh E2E
// =============================================================================

/// Refreshing data keeps the active filters, reapplies them to the new
/// records, and closes a detail page whose report no longer exists.
#[test]
fn e2e_refresh_keeps_filters_and_closes_vanished_report() {
    let mut state = new_state();
    state.filter_state.status = Some(FileStatus::Completed);
    state.apply_filters();
    state.open_report("1");
    assert_eq!(state.active_page, Page::ReportDetail);

    // A reload in which record 1 and its report have been withdrawn.
    let mut catalogue = fixtures::load_builtin().unwrap();
    catalogue.files.retain(|record| record.id != "1");
    catalogue.reports.retain(|report| report.id != "1");

    state.replace_catalogue(catalogue);

    assert_eq!(state.records.len(), 4);
    assert_eq!(state.active_page, Page::Reports);
    assert!(state.selected_report().is_none());
    // The completed-only filter survived the swap.
    assert_eq!(
        visible_names(&state),
        vec!["backup_script.bat", "installer_package.dmg"]
    );
    assert_eq!(state.status_message, "Data refreshed. 4 records.");
}

// =============================================================================
// Upload admission E2E
// =============================================================================

/// An oversized file is refused at the door: the queue is untouched and
/// the refusal reaches the user as a warning and a status message.
#[test]
fn e2e_oversized_upload_warns_without_entering_queue() {
    let mut state = new_state();
    let t0 = Instant::now();

    assert!(state.submit_upload("dropper.exe", 4096, t0));
    let admitted = state.submit_upload("disk_image.iso", 150 * 1024 * 1024, t0);

    assert!(!admitted);
    assert_eq!(
        state.queue.items().len(),
        1,
        "rejected file must not join the queue"
    );
    assert_eq!(state.warnings.len(), 1);
    assert!(
        state.warnings[0].contains("disk_image.iso"),
        "warning names the offending file: {}",
        state.warnings[0]
    );
    assert!(state.status_message.starts_with("Rejected"));
}
