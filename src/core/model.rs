// Rampart - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies. The core layer depends on std, serde,
// chrono, and rand only.
//
// These types are the shared vocabulary across all layers. The serde
// field names mirror the analysis backend's JSON payloads so that the
// embedded fixture documents (and any captured responses loaded via
// --fixtures) deserialise without an adaptation layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// File Record (one analysed sample in the repository)
// =============================================================================

/// A single sample in the analysis repository.
///
/// This is the core data unit that flows through filtering, display,
/// and export. Records are loaded wholesale from the fixture catalogue
/// and replaced wholesale on refresh; the ingestion queue fabricates
/// its own transient items and never mutates this list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Backend-assigned record ID. Opaque string, also keys report details.
    pub id: String,

    /// Original filename as uploaded.
    pub name: String,

    /// File size in bytes.
    pub size: u64,

    /// Lowercase file extension ("apk", "exe", "bat", ...).
    #[serde(rename = "type")]
    pub file_type: String,

    /// Upload timestamp in UTC.
    #[serde(with = "ts_format")]
    pub upload_date: DateTime<Utc>,

    /// Username of the uploader.
    pub uploaded_by: String,

    /// Analysis pipeline state for this sample.
    pub status: FileStatus,

    /// Composite risk score on a 0-10 scale. `None` until analysis
    /// completes (sorted as 0 so unfinished samples group together).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f32>,

    /// Malware family label from the verdict. `None` until analysis
    /// completes; "Clean" for benign samples.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub malware_type: Option<String>,

    /// Content hashes computed at upload time.
    pub hashes: Hashes,
}

/// Content hashes for a sample. All lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hashes {
    pub md5: String,
    pub sha1: String,
    pub sha256: String,
}

// =============================================================================
// File Status
// =============================================================================

/// Analysis pipeline state of a repository record.
///
/// The backend reports these as lowercase strings; serde renames keep
/// the wire form stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Completed,
    Analyzing,
    Failed,
}

impl FileStatus {
    /// Returns all variants in display order.
    pub fn all() -> &'static [FileStatus] {
        &[
            FileStatus::Completed,
            FileStatus::Analyzing,
            FileStatus::Failed,
        ]
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            FileStatus::Completed => "Completed",
            FileStatus::Analyzing => "Analyzing",
            FileStatus::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Upload Queue (transient items owned by the ingestion simulator)
// =============================================================================

/// A file moving through the simulated ingestion pipeline.
///
/// Queue items exist only for the lifetime of the session; they are
/// never persisted and never merged into the repository records.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadItem {
    /// Monotonically increasing unique ID within the session.
    pub id: u64,

    /// Original filename as submitted.
    pub name: String,

    /// File size in bytes.
    pub size: u64,

    /// Lowercase file extension, or "unknown" for extensionless names.
    pub file_type: String,

    /// Current pipeline phase.
    pub status: UploadStatus,

    /// Upload progress, 0.0 to 100.0. Monotonically non-decreasing;
    /// reaches exactly 100.0 before the item leaves the Uploading phase.
    pub progress: f32,

    /// Fabricated verdict. `Some` once status is Completed, `None` otherwise.
    pub result: Option<AnalysisResult>,
}

impl UploadItem {
    /// Progress as a whole percentage for display.
    pub fn percent(&self) -> u8 {
        self.progress.round().clamp(0.0, 100.0) as u8
    }
}

/// Phase of a queue item in the ingestion pipeline.
///
/// Legal transitions: Uploading -> Analyzing -> Completed | Failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Uploading,
    Analyzing,
    Completed,
    Failed,
}

impl UploadStatus {
    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            UploadStatus::Uploading => "Uploading",
            UploadStatus::Analyzing => "Analyzing",
            UploadStatus::Completed => "Completed",
            UploadStatus::Failed => "Failed",
        }
    }

    /// True once the item has reached a terminal phase.
    pub fn is_terminal(&self) -> bool {
        matches!(self, UploadStatus::Completed | UploadStatus::Failed)
    }
}

impl std::fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Fabricated verdict attached to a completed queue item.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    /// Coarse risk classification.
    pub risk_level: RiskLevel,

    /// Malware family label drawn from the known label set.
    pub malware_type: String,

    /// Integer score in 1..=10.
    pub score: u8,
}

// =============================================================================
// Risk Level
// =============================================================================

/// Coarse risk classification, ordered from least to most severe.
///
/// Doubles as the severity scale for signature matches in report
/// details, where the backend reports the same lowercase strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Returns all variants in ascending severity order.
    pub fn all() -> &'static [RiskLevel] {
        &[RiskLevel::Low, RiskLevel::Medium, RiskLevel::High]
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Analysis Mode
// =============================================================================

/// Depth selector shown on the scan page. Cosmetic in the simulator:
/// the fabricated pipeline timing does not depend on it, matching the
/// backend console this tool stands in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    #[default]
    Quick,
    Deep,
}

impl AnalysisMode {
    /// Returns all variants in display order.
    pub fn all() -> &'static [AnalysisMode] {
        &[AnalysisMode::Quick, AnalysisMode::Deep]
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisMode::Quick => "Quick Scan",
            AnalysisMode::Deep => "Deep Analysis",
        }
    }

    /// Advertised turnaround for the mode.
    pub fn estimated_duration(&self) -> &'static str {
        match self {
            AnalysisMode::Quick => "2-3 minutes",
            AnalysisMode::Deep => "10-15 minutes",
        }
    }
}

impl std::fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Dashboard Statistics
// =============================================================================

/// Aggregate statistics shown on the dashboard page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// System-wide sample counts.
    pub total_files: FileCounts,

    /// Sample counts for the signed-in analyst.
    pub user_files: FileCounts,

    /// Registered platform users.
    pub total_users: u32,

    /// Malware family ranking, per time range.
    pub top_malware_types: TopMalwareTypes,

    /// Average risk score per file extension.
    pub risk_scores: Vec<TypeRiskScore>,

    /// Most recent pipeline events, newest first.
    pub recent_activities: Vec<ActivityEntry>,

    /// Health of the analysis engines and the API gateway.
    pub system_status: SystemStatus,
}

/// Sample counts broken down by pipeline outcome.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FileCounts {
    pub total: u32,
    pub success: u32,
    pub pending: u32,
    pub failed: u32,
}

/// Malware family rankings for both dashboard time ranges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopMalwareTypes {
    pub daily: Vec<MalwareTypeCount>,
    pub monthly: Vec<MalwareTypeCount>,
}

impl TopMalwareTypes {
    /// Ranking for the given time range.
    pub fn for_range(&self, range: StatsRange) -> &[MalwareTypeCount] {
        match range {
            StatsRange::Daily => &self.daily,
            StatsRange::Monthly => &self.monthly,
        }
    }
}

/// One entry in the malware family ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MalwareTypeCount {
    /// Family label ("Trojan", "Ransomware", ...).
    #[serde(rename = "type")]
    pub malware_type: String,

    /// Detections in the range.
    pub count: u32,
}

/// Average risk score for one file extension.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRiskScore {
    /// Extension including the leading dot (".apk").
    pub file_type: String,

    /// Average composite score on the 0-10 scale.
    pub risk_score: f32,
}

/// One recent pipeline event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: u32,
    pub file_name: String,
    pub status: ActivityStatus,
    #[serde(with = "ts_format")]
    pub timestamp: DateTime<Utc>,
    pub file_type: String,
}

/// Outcome of a recent pipeline event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Success,
    Pending,
    Failed,
}

impl ActivityStatus {
    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            ActivityStatus::Success => "Success",
            ActivityStatus::Pending => "Pending",
            ActivityStatus::Failed => "Failed",
        }
    }
}

/// Health of the analysis engines and the API gateway.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SystemStatus {
    pub capev2: EngineHealth,
    pub mobsf: EngineHealth,
    pub api: EngineHealth,
}

/// Reported health of one backend component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineHealth {
    Online,
    Degraded,
    Offline,
}

impl EngineHealth {
    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            EngineHealth::Online => "Online",
            EngineHealth::Degraded => "Degraded",
            EngineHealth::Offline => "Offline",
        }
    }
}

/// Time range selector for the malware family ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatsRange {
    #[default]
    Daily,
    Monthly,
}

impl StatsRange {
    /// Returns all variants in display order.
    pub fn all() -> &'static [StatsRange] {
        &[StatsRange::Daily, StatsRange::Monthly]
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            StatsRange::Daily => "Daily",
            StatsRange::Monthly => "Monthly",
        }
    }
}

// =============================================================================
// Report Detail (full analysis findings for one sample)
// =============================================================================

/// Full analysis findings for one completed sample, keyed by record ID.
///
/// Header metadata (name, size, uploader, hashes) lives on the paired
/// `FileRecord`; this type carries only what the analysis itself adds.
/// Not every record has a report: benign or failed samples may have
/// none, and the detail page shows an empty state for those.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDetail {
    /// Record ID this report belongs to.
    pub id: String,

    /// Full detection name ("Trojan.AndroidOS.FakeApp").
    pub malware_type: String,

    /// Composite risk score on the 0-10 scale.
    pub risk_score: f32,

    /// Observed runtime behaviours grouped by kind.
    pub behaviors: BehaviorFindings,

    /// Matched detection signatures, most severe first.
    pub signatures: Vec<SignatureMatch>,

    /// Static analysis findings.
    #[serde(rename = "static")]
    pub static_analysis: StaticFindings,

    /// Dynamic (sandbox) analysis findings.
    #[serde(rename = "dynamic")]
    pub dynamic_analysis: DynamicFindings,

    /// Per-engine results.
    pub engines: EngineResults,

    /// Backend paths of the generated artefacts.
    pub download_links: DownloadLinks,
}

/// Observed runtime behaviours grouped by kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorFindings {
    pub file_creations: Vec<String>,
    pub registry_changes: Vec<String>,
    pub network_connections: Vec<String>,
    pub suspicious_domains: Vec<String>,
    pub api_calls: Vec<String>,
}

/// One matched detection signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureMatch {
    pub name: String,
    pub severity: RiskLevel,
    pub description: String,
}

/// Static analysis findings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticFindings {
    pub imports: Vec<String>,
    pub strings: Vec<String>,
    pub resources: Vec<String>,
}

/// Dynamic (sandbox) analysis findings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicFindings {
    pub processes: Vec<String>,
    pub network_traffic: Vec<String>,
    pub system_changes: Vec<String>,
}

/// Results from both analysis engines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineResults {
    pub capev2: EngineReport,
    pub mobsf: EngineReport,
}

/// Result from a single analysis engine.
///
/// CAPEv2 reports a single detection string; MobSF reports a finding
/// list. Both shapes deserialise into this type via serde defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineReport {
    pub status: EngineRunStatus,
    pub score: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detection: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub findings: Vec<String>,
}

/// Run state of a single engine for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineRunStatus {
    Completed,
    Running,
    Failed,
}

impl EngineRunStatus {
    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            EngineRunStatus::Completed => "Completed",
            EngineRunStatus::Running => "Running",
            EngineRunStatus::Failed => "Failed",
        }
    }
}

/// Backend paths of the generated report artefacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadLinks {
    pub report_pdf: String,
    pub report_json: String,
    pub analysis_log: String,
}

// =============================================================================
// User Profile
// =============================================================================

/// Account and activity data for the signed-in analyst.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    pub user: UserProfile,
    pub login_history: Vec<LoginRecord>,
    pub upload_history: Vec<UploadRecord>,
    pub download_history: Vec<DownloadRecord>,
}

/// Account details for the signed-in analyst.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    pub role: String,
    #[serde(with = "ts_format")]
    pub join_date: DateTime<Utc>,
    #[serde(with = "ts_format")]
    pub last_login: DateTime<Utc>,
}

/// One sign-in attempt, newest first in the history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRecord {
    pub id: u32,
    #[serde(with = "ts_format")]
    pub timestamp: DateTime<Utc>,
    pub ip_address: String,
    pub location: String,
    pub device: String,
    pub status: LoginStatus,
}

/// Outcome of a sign-in attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginStatus {
    Success,
    Failed,
}

impl LoginStatus {
    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            LoginStatus::Success => "Success",
            LoginStatus::Failed => "Failed",
        }
    }
}

/// One past upload by the analyst.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRecord {
    pub id: u32,
    pub file_name: String,
    pub file_type: String,
    #[serde(with = "ts_format")]
    pub timestamp: DateTime<Utc>,
    pub status: FileStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f32>,
}

/// One past report download by the analyst.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRecord {
    pub id: u32,
    pub file_name: String,
    pub report_type: String,
    #[serde(with = "ts_format")]
    pub timestamp: DateTime<Utc>,
    pub file_size: u64,
}

// =============================================================================
// Timestamp wire format
// =============================================================================

/// Serde adapter for the backend's "YYYY-MM-DD HH:MM:SS" timestamps,
/// which carry no zone marker and are defined to be UTC.
pub mod ts_format {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&ts.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}
