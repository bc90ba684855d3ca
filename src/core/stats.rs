// Rampart - core/stats.rs
//
// Pure aggregation helpers behind the dashboard and scan pages.
// Core layer: no I/O or UI dependencies.

use crate::core::model::{MalwareTypeCount, UploadItem, UploadStatus};

/// Live counts over the ingestion queue, for the scan page sidebar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueSummary {
    pub total: usize,
    pub uploading: usize,
    pub analyzing: usize,
    pub completed: usize,
    pub failed: usize,
}

impl QueueSummary {
    /// Items still moving through the pipeline.
    pub fn in_flight(&self) -> usize {
        self.uploading + self.analyzing
    }
}

/// Tally queue items by pipeline phase.
pub fn queue_summary(items: &[UploadItem]) -> QueueSummary {
    let mut summary = QueueSummary {
        total: items.len(),
        ..Default::default()
    };
    for item in items {
        match item.status {
            UploadStatus::Uploading => summary.uploading += 1,
            UploadStatus::Analyzing => summary.analyzing += 1,
            UploadStatus::Completed => summary.completed += 1,
            UploadStatus::Failed => summary.failed += 1,
        }
    }
    summary
}

/// Bar lengths for the malware family ranking, proportional to the
/// largest count in the set. Returns one fraction in 0.0..=1.0 per
/// entry; an all-zero or empty ranking yields zero-length bars.
pub fn ranking_fractions(counts: &[MalwareTypeCount]) -> Vec<f32> {
    let max = counts.iter().map(|entry| entry.count).max().unwrap_or(0);
    if max == 0 {
        return vec![0.0; counts.len()];
    }
    counts
        .iter()
        .map(|entry| entry.count as f32 / max as f32)
        .collect()
}

/// Bar length for a 0-10 risk score, clamped into 0.0..=1.0.
pub fn risk_fraction(score: f32) -> f32 {
    (score / 10.0).clamp(0.0, 1.0)
}
