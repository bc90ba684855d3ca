// Rampart - app/session.rs
//
// Session persistence: save and restore the active page, filter state,
// and dashboard/scan selectors between application restarts.
//
// Design principles:
// - Session is saved atomically (write→temp, rename→final) so a crash
//   during save never corrupts the previous good session.
// - Load errors are silently discarded (corrupt or incompatible sessions
//   just start the app fresh rather than surfacing errors to the user).
// - The data directory is created on first save; no user action required.
// - Catalogue data and queue items are NOT persisted. The catalogue is
//   reloaded from fixtures at startup, and queue items are transient by
//   design, so only view state crosses a restart.

use crate::app::state::{AppState, Page};
use crate::core::filter::{SortBy, SortOrder};
use crate::core::model::{AnalysisMode, FileStatus, StatsRange};
use crate::util::constants::SESSION_FILE_NAME;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Version stamp for forward-compatibility checks.
///
/// Increment this constant whenever `SessionData` gains or removes fields
/// in a breaking way. Version mismatches silently discard the session.
pub const SESSION_VERSION: u32 = 1;

// =============================================================================
// On-disk data structures
// =============================================================================

/// Complete persistent session snapshot.
///
/// All fields are optional-friendly; deserialisation failures for individual
/// fields are handled by serde defaults so minor format additions are tolerated
/// without bumping the version.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionData {
    /// Schema version; must equal `SESSION_VERSION` to be accepted.
    pub version: u32,

    /// Page that was active when the session was saved.
    #[serde(default)]
    pub active_page: Page,

    /// Filter state: the serialisable subset of `FilterState`.
    #[serde(default)]
    pub filter: PersistedFilter,

    /// Time range selected for the dashboard malware ranking.
    #[serde(default)]
    pub stats_range: StatsRange,

    /// Analysis depth selected on the scan page.
    #[serde(default)]
    pub analysis_mode: AnalysisMode,
}

impl SessionData {
    /// Snapshot the persistable subset of the application state.
    pub fn from_state(state: &AppState) -> Self {
        Self {
            version: SESSION_VERSION,
            active_page: state.active_page,
            filter: PersistedFilter {
                search_term: state.filter_state.search_term.clone(),
                status: state.filter_state.status,
                file_type: state.filter_state.file_type.clone(),
                sort_by: state.filter_state.sort_by,
                sort_order: state.filter_state.sort_order,
            },
            stats_range: state.stats_range,
            analysis_mode: state.analysis_mode,
        }
    }
}

/// Serialisable snapshot of `FilterState`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PersistedFilter {
    /// Text search term across filename, uploader, and MD5 hash.
    #[serde(default)]
    pub search_term: String,

    /// Active status filter. `None` = all statuses shown.
    #[serde(default)]
    pub status: Option<FileStatus>,

    /// Active file type filter. `None` = all types shown.
    #[serde(default)]
    pub file_type: Option<String>,

    /// Active sort key.
    #[serde(default)]
    pub sort_by: SortBy,

    /// Active sort direction.
    #[serde(default)]
    pub sort_order: SortOrder,
}

// =============================================================================
// I/O helpers
// =============================================================================

/// Resolve the session file path from the platform data directory.
pub fn session_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SESSION_FILE_NAME)
}

/// Save `data` to `path` atomically (write temp → rename).
///
/// Creates all parent directories as needed.  Returns a descriptive error
/// string suitable for a tracing warn! call; the caller decides whether to
/// surface it to the user (typically it is logged and ignored).
pub fn save(data: &SessionData, path: &Path) -> Result<(), String> {
    // Ensure the parent directory exists before writing.
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            format!(
                "cannot create session directory '{}': {e}",
                parent.display()
            )
        })?;
    }

    let json = serde_json::to_string_pretty(data)
        .map_err(|e| format!("failed to serialise session: {e}"))?;

    // Atomic write: write to a sibling temp file then rename.
    // A crash between write and rename loses the new session but never
    // corrupts the previous one (rename is atomic on all supported platforms).
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json.as_bytes())
        .map_err(|e| format!("failed to write session temp file '{}': {e}", tmp.display()))?;

    std::fs::rename(&tmp, path).map_err(|e| {
        // Clean up the temp file on failure; ignore any secondary error.
        let _ = std::fs::remove_file(&tmp);
        format!("failed to finalise session file '{}': {e}", path.display())
    })?;

    tracing::debug!(path = %path.display(), "Session saved");
    Ok(())
}

/// Load and validate a `SessionData` from `path`.
///
/// Returns `None` on any error (file not found, JSON parse failure,
/// version mismatch).  The caller should treat `None` as "start fresh".
pub fn load(path: &Path) -> Option<SessionData> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| {
            // Distinguish "file not found" (normal first run) from other errors.
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!(path = %path.display(), error = %e, "Cannot read session file");
            }
        })
        .ok()?;

    let data: SessionData = serde_json::from_str(&content)
        .map_err(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Session file is malformed; starting fresh"
            );
        })
        .ok()?;

    if data.version != SESSION_VERSION {
        tracing::warn!(
            found = data.version,
            expected = SESSION_VERSION,
            "Session file version mismatch; starting fresh"
        );
        return None;
    }

    tracing::info!(path = %path.display(), "Session file loaded");
    Some(data)
}

// =============================================================================
// Unit tests
// =============================================================================
