// Rampart - app/state.rs
//
// Application state management. Holds the catalogue-backed data,
// filter state, upload queue, navigation, and pending UI requests.
// Owned by the eframe::App implementation.

use crate::core::filter::FilterState;
use crate::core::fixtures::FixtureCatalogue;
use crate::core::ingest::IngestQueue;
use crate::core::model::{
    AnalysisMode, DashboardStats, FileRecord, ProfileData, ReportDetail, StatsRange,
};
use crate::util::constants::MAX_WARNINGS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Instant;

// =============================================================================
// Navigation
// =============================================================================

/// Top-level navigation target. Exactly one page is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Dashboard,
    Scan,
    Repository,
    Reports,
    ReportDetail,
    Profile,
}

impl Page {
    /// Pages listed in the navigation sidebar, in display order.
    /// ReportDetail is reached by selecting a report, never from the nav.
    pub fn nav_pages() -> &'static [Page] {
        &[
            Page::Dashboard,
            Page::Scan,
            Page::Repository,
            Page::Reports,
            Page::Profile,
        ]
    }

    /// Human-readable label for the sidebar and window title.
    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Scan => "Scan",
            Page::Repository => "Repository",
            Page::Reports => "Reports",
            Page::ReportDetail => "Report Detail",
            Page::Profile => "Profile",
        }
    }
}

/// Tab selector on the report detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportTab {
    #[default]
    Overview,
    Behaviors,
    Signatures,
    StaticAnalysis,
    DynamicAnalysis,
    Network,
}

impl ReportTab {
    pub fn all() -> &'static [ReportTab] {
        &[
            ReportTab::Overview,
            ReportTab::Behaviors,
            ReportTab::Signatures,
            ReportTab::StaticAnalysis,
            ReportTab::DynamicAnalysis,
            ReportTab::Network,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportTab::Overview => "Overview",
            ReportTab::Behaviors => "Behaviors",
            ReportTab::Signatures => "Signatures",
            ReportTab::StaticAnalysis => "Static Analysis",
            ReportTab::DynamicAnalysis => "Dynamic Analysis",
            ReportTab::Network => "Network",
        }
    }
}

/// Tab selector on the profile page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileTab {
    #[default]
    Overview,
    Logins,
    Uploads,
    Downloads,
}

impl ProfileTab {
    pub fn all() -> &'static [ProfileTab] {
        &[
            ProfileTab::Overview,
            ProfileTab::Logins,
            ProfileTab::Uploads,
            ProfileTab::Downloads,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProfileTab::Overview => "Overview",
            ProfileTab::Logins => "Login History",
            ProfileTab::Uploads => "Upload History",
            ProfileTab::Downloads => "Download History",
        }
    }
}

/// Repository export format requested from the menu or repository page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
        }
    }

    /// File extension without the dot, for the save dialog filter.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

// =============================================================================
// Application state
// =============================================================================

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Repository records from the active catalogue.
    pub records: Vec<FileRecord>,

    /// Dashboard aggregates from the active catalogue.
    pub dashboard: DashboardStats,

    /// Report details from the active catalogue, keyed by record ID.
    pub reports: Vec<ReportDetail>,

    /// Analyst profile from the active catalogue.
    pub profile: ProfileData,

    /// Indices of records matching the current filter (into `records`),
    /// in display order.
    pub filtered_indices: Vec<usize>,

    /// Current filter and sort configuration.
    pub filter_state: FilterState,

    /// Simulated ingestion queue backing the scan page.
    pub queue: IngestQueue,

    /// Analysis depth selected on the scan page.
    pub analysis_mode: AnalysisMode,

    /// Currently active page.
    pub active_page: Page,

    /// Time range for the dashboard malware ranking.
    pub stats_range: StatsRange,

    /// Record ID of the open report, if the detail page is in use.
    pub selected_report_id: Option<String>,

    /// Active tab on the report detail page.
    pub report_tab: ReportTab,

    /// Active tab on the profile page.
    pub profile_tab: ProfileTab,

    /// Status message for the status bar.
    pub status_message: String,

    /// Non-fatal warnings accumulated since startup (capped).
    pub warnings: Vec<String>,

    /// Whether to show the warnings window.
    pub show_warnings: bool,

    /// Whether to show the about window.
    pub show_about: bool,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,

    /// Fixture override directory, for the refresh action.
    pub fixtures_dir: Option<PathBuf>,

    /// Resolved session file path. None disables persistence.
    pub session_path: Option<PathBuf>,

    /// Set by the scan page; the frame loop opens the file picker.
    pub request_pick_files: bool,

    /// Set by pages or the menu; the frame loop runs the export dialog.
    pub request_export: Option<ExportFormat>,

    /// Set by the report detail page; the frame loop exports the report.
    pub request_report_export: bool,
}

impl AppState {
    /// Create initial state from a loaded catalogue.
    pub fn new(catalogue: FixtureCatalogue, queue: IngestQueue, debug_mode: bool) -> Self {
        let record_count = catalogue.files.len();
        let mut state = Self {
            records: catalogue.files,
            dashboard: catalogue.dashboard,
            reports: catalogue.reports,
            profile: catalogue.profile,
            filtered_indices: Vec::new(),
            filter_state: FilterState::default(),
            queue,
            analysis_mode: AnalysisMode::default(),
            active_page: Page::default(),
            stats_range: StatsRange::default(),
            selected_report_id: None,
            report_tab: ReportTab::default(),
            profile_tab: ProfileTab::default(),
            status_message: format!("Ready. {record_count} records in the repository."),
            warnings: Vec::new(),
            show_warnings: false,
            show_about: false,
            debug_mode,
            fixtures_dir: None,
            session_path: None,
            request_pick_files: false,
            request_export: None,
            request_report_export: false,
        };
        state.apply_filters();
        state
    }

    /// Recompute filtered indices from current records and filter state.
    pub fn apply_filters(&mut self) {
        self.filtered_indices =
            crate::core::filter::apply_filters(&self.records, &self.filter_state);
    }

    /// Distinct file extensions across all records, sorted, for the
    /// type filter dropdown.
    pub fn record_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self
            .records
            .iter()
            .map(|record| record.file_type.clone())
            .collect();
        types.sort();
        types.dedup();
        types
    }

    /// Append a warning, dropping the oldest once the cap is reached.
    pub fn push_warning(&mut self, message: String) {
        if self.warnings.len() >= MAX_WARNINGS {
            self.warnings.remove(0);
        }
        self.warnings.push(message);
    }

    /// Admit one file into the ingestion queue.
    ///
    /// Rejections leave the queue unchanged and become a warning plus a
    /// status-bar message. Returns true when the file was admitted.
    pub fn submit_upload(&mut self, name: &str, size: u64, now: Instant) -> bool {
        match self.queue.submit(name, size, now) {
            Ok(_) => {
                tracing::info!(file = %name, size, "File queued for analysis");
                self.status_message = format!("Queued {name} for analysis.");
                true
            }
            Err(reason) => {
                let message = format!("Rejected {name}: {reason}");
                tracing::warn!("{}", message);
                self.push_warning(message.clone());
                self.status_message = message;
                false
            }
        }
    }

    /// Open the detail page for a record's report.
    ///
    /// Records without a matching report (failed or still analyzing)
    /// leave the current page in place and report via the status bar.
    pub fn open_report(&mut self, record_id: &str) {
        if self.reports.iter().any(|report| report.id == record_id) {
            self.selected_report_id = Some(record_id.to_string());
            self.report_tab = ReportTab::default();
            self.active_page = Page::ReportDetail;
        } else {
            self.status_message = format!("No detailed report available for record {record_id}.");
        }
    }

    /// Leave the detail page and return to the report list.
    pub fn close_report(&mut self) {
        self.selected_report_id = None;
        self.active_page = Page::Reports;
    }

    /// The open report's detail, if the detail page is in use.
    pub fn selected_report(&self) -> Option<&ReportDetail> {
        self.selected_report_id
            .as_deref()
            .and_then(|id| self.reports.iter().find(|report| report.id == id))
    }

    /// Swap in a freshly loaded catalogue, preserving filters and navigation.
    pub fn replace_catalogue(&mut self, catalogue: FixtureCatalogue) {
        self.records = catalogue.files;
        self.dashboard = catalogue.dashboard;
        self.reports = catalogue.reports;
        self.profile = catalogue.profile;
        self.apply_filters();

        // The open report may not exist in the new catalogue.
        if self.active_page == Page::ReportDetail && self.selected_report().is_none() {
            self.close_report();
        }

        self.status_message = format!("Data refreshed. {} records.", self.records.len());
    }

    /// Persist the session snapshot, if a session path is configured.
    /// Failures are logged and ignored; persistence is best-effort.
    pub fn save_session(&self) {
        let Some(path) = &self.session_path else {
            return;
        };
        let data = crate::app::session::SessionData::from_state(self);
        if let Err(e) = crate::app::session::save(&data, path) {
            tracing::warn!("Session save failed: {e}");
        }
    }

    /// Apply a restored session snapshot.
    pub fn restore_session(&mut self, data: crate::app::session::SessionData) {
        // The detail page needs a live selection, which is not persisted.
        self.active_page = match data.active_page {
            Page::ReportDetail => Page::Reports,
            page => page,
        };
        self.filter_state.search_term = data.filter.search_term;
        self.filter_state.status = data.filter.status;
        self.filter_state.file_type = data.filter.file_type;
        self.filter_state.sort_by = data.filter.sort_by;
        self.filter_state.sort_order = data.filter.sort_order;
        self.stats_range = data.stats_range;
        self.analysis_mode = data.analysis_mode;
        self.apply_filters();
    }
}
