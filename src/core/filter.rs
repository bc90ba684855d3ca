// Rampart - core/filter.rs
//
// Composable filter and sort engine for repository records.
// All active filters are AND-combined; the surviving indices are then
// sorted by the active sort key. Core layer: pure logic, no I/O or UI
// dependencies.

use crate::core::model::{FileRecord, FileStatus};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Complete filter and sort state for the repository view.
///
/// Filters are AND-combined when applied. Sorting always runs, even
/// when no narrowing filter is active.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    /// Case-insensitive substring search across filename, uploader,
    /// and MD5 hash. Empty = no filter.
    pub search_term: String,

    /// Pipeline status to include. None = all statuses.
    pub status: Option<FileStatus>,

    /// File extension to include (exact match). None = all types.
    pub file_type: Option<String>,

    /// Active sort key.
    pub sort_by: SortBy,

    /// Active sort direction.
    pub sort_order: SortOrder,
}

impl FilterState {
    /// Returns true if no narrowing filters are active.
    /// The sort key is not a filter; it never hides records.
    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty() && self.status.is_none() && self.file_type.is_none()
    }

    /// Select a sort key from a column header click.
    ///
    /// Clicking the already-active key flips the direction; selecting
    /// a new key resets the direction to descending.
    pub fn toggle_sort(&mut self, key: SortBy) {
        if self.sort_by == key {
            self.sort_order = self.sort_order.flipped();
        } else {
            self.sort_by = key;
            self.sort_order = SortOrder::Desc;
        }
    }
}

/// Sort key for the repository view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Name,
    Size,
    Risk,
    #[default]
    Date,
}

impl SortBy {
    /// Returns all variants in column order.
    pub fn all() -> &'static [SortBy] {
        &[SortBy::Name, SortBy::Size, SortBy::Risk, SortBy::Date]
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            SortBy::Name => "Name",
            SortBy::Size => "Size",
            SortBy::Risk => "Risk",
            SortBy::Date => "Date",
        }
    }
}

/// Sort direction for the repository view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// The opposite direction.
    pub fn flipped(&self) -> SortOrder {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    /// Direction arrow for column headers.
    pub fn arrow(&self) -> &'static str {
        match self {
            SortOrder::Asc => "\u{25b2}",
            SortOrder::Desc => "\u{25bc}",
        }
    }
}

/// Apply filters and sorting to a slice of records, returning indices
/// of matching records in display order.
///
/// Returns a Vec of indices into the original records slice. This
/// avoids copying records and enables virtual scrolling on the
/// filtered view. The sort is stable: records that compare equal on
/// the active key keep their relative source order in both directions.
pub fn apply_filters(records: &[FileRecord], filter: &FilterState) -> Vec<usize> {
    let text_lower = filter.search_term.to_lowercase();

    let mut indices: Vec<usize> = if filter.is_empty() {
        (0..records.len()).collect()
    } else {
        records
            .iter()
            .enumerate()
            .filter(|(_, record)| matches_all(record, filter, &text_lower))
            .map(|(idx, _)| idx)
            .collect()
    };

    indices.sort_by(|&a, &b| {
        let ord = compare_records(&records[a], &records[b], filter.sort_by);
        match filter.sort_order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });

    indices
}

/// Check if a single record matches all active filters.
fn matches_all(record: &FileRecord, filter: &FilterState, text_lower: &str) -> bool {
    // Status filter
    if let Some(status) = filter.status {
        if record.status != status {
            return false;
        }
    }

    // Type filter (extensions are stored lowercase)
    if let Some(ref file_type) = filter.file_type {
        if record.file_type != *file_type {
            return false;
        }
    }

    // Text search (case-insensitive substring over name, uploader, MD5)
    if !text_lower.is_empty()
        && !record.name.to_lowercase().contains(text_lower)
        && !record.uploaded_by.to_lowercase().contains(text_lower)
        && !record.hashes.md5.to_lowercase().contains(text_lower)
    {
        return false;
    }

    true
}

/// Compare two records on the given sort key, ascending.
///
/// Records without a risk score sort as 0.0 so unfinished samples
/// group below every scored record in the default descending view.
fn compare_records(a: &FileRecord, b: &FileRecord, key: SortBy) -> Ordering {
    match key {
        SortBy::Name => a.name.cmp(&b.name),
        SortBy::Size => a.size.cmp(&b.size),
        SortBy::Risk => {
            let ra = a.risk_score.unwrap_or(0.0);
            let rb = b.risk_score.unwrap_or(0.0);
            ra.total_cmp(&rb)
        }
        SortBy::Date => a.upload_date.cmp(&b.upload_date),
    }
}
