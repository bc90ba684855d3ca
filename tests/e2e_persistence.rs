// Rampart - tests/e2e_persistence.rs
//
// End-to-end tests for everything Rampart reads from and writes to
// disk around a session: the persisted view state across a simulated
// restart, config.toml loading and validation, and fixture override
// directories. Real temp directories, real TOML and JSON parsing.

use rampart::app::catalogue::load_catalogue;
use rampart::app::session;
use rampart::app::state::{AppState, Page};
use rampart::core::filter::{SortBy, SortOrder};
use rampart::core::fixtures;
use rampart::core::ingest::IngestQueue;
use rampart::core::model::{AnalysisMode, FileStatus, StatsRange};
use rampart::platform::config::{load_config, load_config_file};
use rampart::util::error::FixtureError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tempfile::TempDir;

// =============================================================================
// Helpers
// =============================================================================

fn new_state() -> AppState {
    let catalogue = fixtures::load_builtin().expect("embedded catalogue must load");
    let queue = IngestQueue::with_rng(
        Duration::from_millis(200),
        Duration::from_millis(3000),
        StdRng::seed_from_u64(3),
    );
    AppState::new(catalogue, queue, false)
}

fn visible_names(state: &AppState) -> Vec<String> {
    state
        .filtered_indices
        .iter()
        .map(|&idx| state.records[idx].name.clone())
        .collect()
}

// =============================================================================
// Session restart E2E
// =============================================================================

/// Closing the app and reopening it lands the user exactly where they
/// were: same page, same filters, same dashboard and scan selectors,
/// with the table already filtered accordingly.
#[test]
fn e2e_view_state_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = session::session_path(dir.path());

    let mut before = new_state();
    before.active_page = Page::Repository;
    before.filter_state.search_term = "admin".to_string();
    before.filter_state.status = Some(FileStatus::Completed);
    before.filter_state.sort_by = SortBy::Risk;
    before.filter_state.sort_order = SortOrder::Asc;
    before.apply_filters();
    before.stats_range = StatsRange::Monthly;
    before.analysis_mode = AnalysisMode::Deep;
    before.session_path = Some(path.clone());
    before.save_session();

    let mut after = new_state();
    let restored = session::load(&path).expect("session written by save_session must load");
    after.restore_session(restored);

    assert_eq!(after.active_page, Page::Repository);
    assert_eq!(after.filter_state.search_term, "admin");
    assert_eq!(after.filter_state.status, Some(FileStatus::Completed));
    assert_eq!(after.filter_state.sort_by, SortBy::Risk);
    assert_eq!(after.filter_state.sort_order, SortOrder::Asc);
    assert_eq!(after.stats_range, StatsRange::Monthly);
    assert_eq!(after.analysis_mode, AnalysisMode::Deep);

    // The filters were reapplied to the reloaded catalogue: the two
    // completed admin uploads, lowest risk first.
    assert_eq!(
        visible_names(&after),
        vec!["backup_script.bat", "suspicious_app.apk"]
    );
}

/// A session saved on the report detail page reopens on the report
/// list. The open report is not persisted, so the detail page would
/// have nothing to show.
#[test]
fn e2e_detail_page_restarts_on_report_list() {
    let dir = TempDir::new().unwrap();
    let path = session::session_path(dir.path());

    let mut before = new_state();
    before.open_report("1");
    assert_eq!(before.active_page, Page::ReportDetail);
    before.session_path = Some(path.clone());
    before.save_session();

    let mut after = new_state();
    after.restore_session(session::load(&path).unwrap());

    assert_eq!(after.active_page, Page::Reports);
    assert!(after.selected_report().is_none());
}

/// A first run has no session file; the app starts on its defaults.
#[test]
fn e2e_first_run_starts_fresh() {
    let dir = TempDir::new().unwrap();
    let path = session::session_path(dir.path());

    assert!(session::load(&path).is_none());

    let state = new_state();
    assert_eq!(state.active_page, Page::Dashboard);
    assert!(state.filter_state.is_empty());
    assert_eq!(state.stats_range, StatsRange::Daily);
    assert_eq!(state.analysis_mode, AnalysisMode::Quick);
}

// =============================================================================
// Configuration E2E
// =============================================================================

/// No config.toml is the normal first run: defaults, no warnings.
#[test]
fn e2e_missing_config_is_a_silent_first_run() {
    let dir = TempDir::new().unwrap();
    let (config, warnings) = load_config(&dir.path().join("config"));

    assert!(warnings.is_empty());
    assert_eq!(config.tick_interval_ms, 200);
    assert_eq!(config.analysis_delay_ms, 3000);
    assert!(config.dark_mode);
    assert_eq!(config.font_size, 14.5);
    assert!(config.log_level.is_none());
    assert!(config.log_file.is_none());
}

/// A fully populated config.toml applies every value without warnings.
#[test]
fn e2e_valid_config_applies_every_section() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[ingest]
tick_interval_ms = 500
analysis_delay_ms = 1000

[ui]
theme = "light"
font_size = 18.0

[logging]
level = "debug"
file = "rampart.log"
"#,
    )
    .unwrap();

    let (config, warnings) = load_config_file(&path);

    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    assert_eq!(config.tick_interval_ms, 500);
    assert_eq!(config.analysis_delay_ms, 1000);
    assert!(!config.dark_mode);
    assert_eq!(config.font_size, 18.0);
    assert_eq!(config.log_level.as_deref(), Some("debug"));
    assert_eq!(config.log_file.as_deref(), Some("rampart.log"));
}

/// Out-of-range and unrecognised values each produce one actionable
/// warning and fall back to the default, field by field.
#[test]
fn e2e_invalid_config_values_warn_and_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[ingest]
tick_interval_ms = 10
analysis_delay_ms = 2000

[ui]
theme = "solarized"
font_size = 99.0

[logging]
level = "loud"
file = ""
"#,
    )
    .unwrap();

    let (config, warnings) = load_config_file(&path);

    assert_eq!(warnings.len(), 4, "warnings: {warnings:?}");
    assert!(warnings.iter().any(|w| w.contains("tick_interval_ms")));
    assert!(warnings.iter().any(|w| w.contains("theme")));
    assert!(warnings.iter().any(|w| w.contains("font_size")));
    assert!(warnings.iter().any(|w| w.contains("level")));

    // Invalid fields fall back; the valid one still applies.
    assert_eq!(config.tick_interval_ms, 200);
    assert_eq!(config.analysis_delay_ms, 2000);
    assert!(config.dark_mode);
    assert_eq!(config.font_size, 14.5);
    assert!(config.log_level.is_none());
    // An empty log file path means "stderr only", not a file named "".
    assert!(config.log_file.is_none());
}

/// Unparseable TOML does not stop the app: defaults plus one warning.
#[test]
fn e2e_malformed_config_warns_and_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not { toml").unwrap();

    let (config, warnings) = load_config_file(&path);

    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("parse"));
    assert_eq!(config.tick_interval_ms, 200);
}

/// An explicit --config path that does not exist is reported, not
/// silently ignored like the default location.
#[test]
fn e2e_explicit_config_path_missing_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.toml");

    let (config, warnings) = load_config_file(&path);

    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("Could not read"));
    assert_eq!(config.tick_interval_ms, 200);
}

// =============================================================================
// Fixture override E2E
// =============================================================================

/// An override directory replaces exactly the documents it contains;
/// the other builtin documents stay in place.
#[test]
fn e2e_override_replaces_one_document() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("files.json"),
        r#"[
            {
                "id": "x1",
                "name": "capture_one.exe",
                "size": 2048,
                "type": "exe",
                "uploadDate": "2024-03-01 08:00:00",
                "uploadedBy": "tester",
                "status": "completed",
                "riskScore": 4.0,
                "malwareType": "Adware",
                "hashes": {"md5": "0", "sha1": "1", "sha256": "2"}
            },
            {
                "id": "x2",
                "name": "capture_two.dll",
                "size": 4096,
                "type": "dll",
                "uploadDate": "2024-03-01 09:00:00",
                "uploadedBy": "tester",
                "status": "analyzing",
                "hashes": {"md5": "0", "sha1": "1", "sha256": "2"}
            }
        ]"#,
    )
    .unwrap();

    let (catalogue, errors) = load_catalogue(Some(dir.path())).expect("builtin must load");

    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert_eq!(catalogue.files.len(), 2);
    assert_eq!(catalogue.files[0].name, "capture_one.exe");
    // Reports were not overridden; the builtin document is intact.
    assert!(catalogue.report_for("1").is_some());
    assert!(!catalogue.profile.login_history.is_empty());
}

/// Broken override files are collected as warnings and skipped; every
/// affected document keeps its builtin content. One bad capture never
/// takes the app down.
#[test]
fn e2e_bad_overrides_are_skipped_not_fatal() {
    let dir = TempDir::new().unwrap();
    // Valid JSON under a name that matches no catalogue document.
    std::fs::write(dir.path().join("unknown_name.json"), "[]").unwrap();
    // A capture that is not JSON at all.
    std::fs::write(dir.path().join("files.json"), "{ not json").unwrap();
    // A capture over the size ceiling.
    std::fs::write(
        dir.path().join("reports.json"),
        vec![b' '; 1024 * 1024 + 1],
    )
    .unwrap();
    // Non-JSON files are not overrides and are ignored outright.
    std::fs::write(dir.path().join("notes.txt"), "scratch").unwrap();

    let (catalogue, errors) = load_catalogue(Some(dir.path())).expect("builtin must load");

    assert_eq!(errors.len(), 3, "errors: {errors:?}");
    assert!(errors
        .iter()
        .any(|e| matches!(e, FixtureError::UnknownDocument { .. })));
    assert!(errors
        .iter()
        .any(|e| matches!(e, FixtureError::JsonParse { .. })));
    assert!(errors
        .iter()
        .any(|e| matches!(e, FixtureError::FileTooLarge { .. })));

    // Both damaged documents fell back to the builtin content.
    assert_eq!(catalogue.files.len(), 5);
    assert!(catalogue.report_for("1").is_some());
}

/// Pointing --fixtures at a directory that does not exist simply skips
/// the override step.
#[test]
fn e2e_missing_override_dir_is_skipped() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("not_here");

    let (catalogue, errors) = load_catalogue(Some(&missing)).unwrap();

    assert!(errors.is_empty());
    assert_eq!(catalogue.files.len(), 5);
}
