// Rampart - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "Rampart";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "Rampart";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Ingestion limits
// =============================================================================

/// Maximum accepted upload size in bytes. Larger files are rejected before
/// they enter the queue, matching the service-side ceiling.
pub const MAX_UPLOAD_SIZE_BYTES: u64 = 100 * 1024 * 1024; // 100 MB

/// Hard upper bound on the number of items held in the upload queue at once.
/// Admissions beyond this are rejected with a warning so the queue Vec cannot
/// grow without bound from a bulk drop.
pub const MAX_QUEUE_ITEMS: usize = 100;

/// Interval between simulated upload progress ticks (ms).
pub const UPLOAD_TICK_INTERVAL_MS: u64 = 200;

/// Minimum user-configurable upload tick interval (ms).
pub const MIN_UPLOAD_TICK_INTERVAL_MS: u64 = 50;

/// Maximum user-configurable upload tick interval (ms).
pub const MAX_UPLOAD_TICK_INTERVAL_MS: u64 = 2_000; // 2 s

/// Upper bound (exclusive) of the random progress increment applied per tick
/// while an item is uploading. Progress clamps at 100.
pub const PROGRESS_INCREMENT_MAX: f32 = 20.0;

/// Delay between an item entering the analysing phase and its verdict (ms).
pub const ANALYSIS_DELAY_MS: u64 = 3_000;

/// Minimum user-configurable analysis delay (ms).
pub const MIN_ANALYSIS_DELAY_MS: u64 = 500;

/// Maximum user-configurable analysis delay (ms).
pub const MAX_ANALYSIS_DELAY_MS: u64 = 60_000; // 60 s

/// Inclusive verdict score range fabricated for completed analyses.
pub const MIN_VERDICT_SCORE: u8 = 1;
pub const MAX_VERDICT_SCORE: u8 = 10;

/// Malware family labels the simulated engines report, uniformly chosen.
pub const MALWARE_TYPE_LABELS: &[&str] =
    &["Trojan", "Ransomware", "Spyware", "Adware", "Worm", "Clean"];

/// File extensions (lower-case, no dot) the ingestion pipeline accepts.
/// Uploads with any other extension are failed by the engine after upload.
pub const ACCEPTED_EXTENSIONS: &[&str] = &[
    "exe", "dll", "msi", "apk", "jar", "pdf", "doc", "docx", "xls", "xlsx", "ps1", "bat", "cmd",
    "vbs", "js", "zip", "rar", "7z", "tar", "gz",
];

// =============================================================================
// Risk score thresholds
// =============================================================================

/// Risk scores at or above this are rendered as high risk.
pub const RISK_HIGH_THRESHOLD: f32 = 8.0;

/// Risk scores at or above this (and below the high threshold) are rendered
/// as medium risk.
pub const RISK_MEDIUM_THRESHOLD: f32 = 6.0;

// =============================================================================
// Fixture catalogue limits
// =============================================================================

/// Maximum size of a fixture override JSON document in bytes.
pub const MAX_FIXTURE_FILE_SIZE: u64 = 1024 * 1024; // 1 MB

/// User fixtures subdirectory name (under the platform config directory).
pub const FIXTURES_DIR_NAME: &str = "fixtures";

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

/// Maximum number of non-fatal warnings accumulated in the warnings pane.
/// Prevents the warnings Vec from growing without bound across a session.
pub const MAX_WARNINGS: usize = 100;

// =============================================================================
// Export
// =============================================================================

/// Maximum number of records that can be exported in a single operation.
pub const MAX_EXPORT_RECORDS: usize = 100_000;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Session persistence file name (stored in the platform data directory).
pub const SESSION_FILE_NAME: &str = "session.json";
