// Rampart - ui/theme.rs
//
// Colour scheme, status colour mappings, and layout constants.
// No dependencies on app state or business logic.

use crate::core::model::{
    ActivityStatus, EngineHealth, EngineRunStatus, FileStatus, LoginStatus, RiskLevel, UploadStatus,
};
use crate::util::constants::{RISK_HIGH_THRESHOLD, RISK_MEDIUM_THRESHOLD};
use egui::Color32;

/// Safe / success indicators.
pub const GREEN: Color32 = Color32::from_rgb(74, 222, 128); // Green 400
/// In-progress / caution indicators.
pub const YELLOW: Color32 = Color32::from_rgb(250, 204, 21); // Yellow 400
/// Failure / high-risk indicators.
pub const RED: Color32 = Color32::from_rgb(248, 113, 113); // Red 400
/// Active-selection / informational indicators.
pub const BLUE: Color32 = Color32::from_rgb(96, 165, 250); // Blue 400
/// De-emphasised text.
pub const DIM: Color32 = Color32::from_rgb(156, 163, 175); // Gray 400

/// Colour for a repository record's pipeline status.
pub fn status_colour(status: &FileStatus) -> Color32 {
    match status {
        FileStatus::Completed => GREEN,
        FileStatus::Analyzing => YELLOW,
        FileStatus::Failed => RED,
    }
}

/// Colour for a queue item's pipeline phase.
pub fn upload_status_colour(status: &UploadStatus) -> Color32 {
    match status {
        UploadStatus::Uploading => BLUE,
        UploadStatus::Analyzing => YELLOW,
        UploadStatus::Completed => GREEN,
        UploadStatus::Failed => RED,
    }
}

/// Colour for a 0-10 risk score, banded by the risk thresholds.
pub fn risk_score_colour(score: f32) -> Color32 {
    if score >= RISK_HIGH_THRESHOLD {
        RED
    } else if score >= RISK_MEDIUM_THRESHOLD {
        YELLOW
    } else {
        GREEN
    }
}

/// Colour for a coarse risk level (signature severities, verdicts).
pub fn risk_level_colour(level: &RiskLevel) -> Color32 {
    match level {
        RiskLevel::High => RED,
        RiskLevel::Medium => YELLOW,
        RiskLevel::Low => GREEN,
    }
}

/// Colour for a dashboard activity row's outcome.
pub fn activity_colour(status: &ActivityStatus) -> Color32 {
    match status {
        ActivityStatus::Success => GREEN,
        ActivityStatus::Pending => YELLOW,
        ActivityStatus::Failed => RED,
    }
}

/// Colour for an analysis engine's reported health.
pub fn engine_health_colour(health: &EngineHealth) -> Color32 {
    match health {
        EngineHealth::Online => GREEN,
        EngineHealth::Degraded => YELLOW,
        EngineHealth::Offline => RED,
    }
}

/// Colour for a per-report engine run outcome.
pub fn engine_run_colour(status: &EngineRunStatus) -> Color32 {
    match status {
        EngineRunStatus::Completed => GREEN,
        EngineRunStatus::Running => YELLOW,
        EngineRunStatus::Failed => RED,
    }
}

/// Colour for a login history row's outcome.
pub fn login_status_colour(status: &LoginStatus) -> Color32 {
    match status {
        LoginStatus::Success => GREEN,
        LoginStatus::Failed => RED,
    }
}

/// Layout constants.
pub const SIDEBAR_WIDTH: f32 = 170.0;
pub const ROW_HEIGHT: f32 = 22.0;
pub const STATUS_BAR_HEIGHT: f32 = 28.0;
pub const CARD_MIN_WIDTH: f32 = 220.0;
