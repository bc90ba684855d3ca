// Rampart - core/fixtures.rs
//
// Fixture catalogue: the canned analysis data behind every page.
// Core layer: accepts JSON strings, never touches the filesystem.
// I/O is handled by app::catalogue, which feeds content here.
//
// The embedded documents are captured responses from the analysis
// backend. Operators can replace individual documents at startup by
// pointing --fixtures at a directory of captures with the same names.

use crate::core::model::{DashboardStats, FileRecord, ProfileData, ReportDetail};
use crate::util::error::FixtureError;
use std::path::Path;

// =============================================================================
// Catalogue documents
// =============================================================================

/// The four documents that make up a complete catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureDoc {
    Files,
    Dashboard,
    Reports,
    Profile,
}

impl FixtureDoc {
    /// Returns all documents in load order.
    pub fn all() -> &'static [FixtureDoc] {
        &[
            FixtureDoc::Files,
            FixtureDoc::Dashboard,
            FixtureDoc::Reports,
            FixtureDoc::Profile,
        ]
    }

    /// On-disk file name for this document.
    pub fn file_name(&self) -> &'static str {
        match self {
            FixtureDoc::Files => "files.json",
            FixtureDoc::Dashboard => "dashboard.json",
            FixtureDoc::Reports => "reports.json",
            FixtureDoc::Profile => "profile.json",
        }
    }

    /// Map an override file name back to its document.
    pub fn from_file_name(name: &str) -> Option<FixtureDoc> {
        FixtureDoc::all()
            .iter()
            .copied()
            .find(|doc| doc.file_name() == name)
    }
}

// =============================================================================
// Catalogue
// =============================================================================

/// The complete canned dataset: repository records, dashboard
/// aggregates, report details, and the analyst profile.
#[derive(Debug, Clone)]
pub struct FixtureCatalogue {
    pub files: Vec<FileRecord>,
    pub dashboard: DashboardStats,
    pub reports: Vec<ReportDetail>,
    pub profile: ProfileData,
}

impl FixtureCatalogue {
    /// Report detail for a record ID, if the catalogue carries one.
    pub fn report_for(&self, record_id: &str) -> Option<&ReportDetail> {
        self.reports.iter().find(|report| report.id == record_id)
    }
}

/// Parse the embedded catalogue.
///
/// The embedded documents ship inside the binary, so a parse failure
/// here is a build defect: it is fatal at startup rather than degraded
/// into an empty dashboard.
pub fn load_builtin() -> Result<FixtureCatalogue, FixtureError> {
    let catalogue = FixtureCatalogue {
        files: parse_embedded(
            FixtureDoc::Files.file_name(),
            include_str!("../../fixtures/files.json"),
        )?,
        dashboard: parse_embedded(
            FixtureDoc::Dashboard.file_name(),
            include_str!("../../fixtures/dashboard.json"),
        )?,
        reports: parse_embedded(
            FixtureDoc::Reports.file_name(),
            include_str!("../../fixtures/reports.json"),
        )?,
        profile: parse_embedded(
            FixtureDoc::Profile.file_name(),
            include_str!("../../fixtures/profile.json"),
        )?,
    };

    tracing::info!(
        files = catalogue.files.len(),
        reports = catalogue.reports.len(),
        "Built-in fixture catalogue loaded"
    );
    Ok(catalogue)
}

fn parse_embedded<T: serde::de::DeserializeOwned>(
    name: &'static str,
    content: &str,
) -> Result<T, FixtureError> {
    serde_json::from_str(content).map_err(|e| FixtureError::Embedded { name, source: e })
}

/// Replace one catalogue document with override content.
///
/// `path` is used for error messages only (not for I/O).
pub fn apply_document(
    catalogue: &mut FixtureCatalogue,
    doc: FixtureDoc,
    content: &str,
    path: &Path,
) -> Result<(), FixtureError> {
    let parse_err = |e: serde_json::Error| FixtureError::JsonParse {
        path: path.to_path_buf(),
        source: e,
    };

    match doc {
        FixtureDoc::Files => catalogue.files = serde_json::from_str(content).map_err(parse_err)?,
        FixtureDoc::Dashboard => {
            catalogue.dashboard = serde_json::from_str(content).map_err(parse_err)?
        }
        FixtureDoc::Reports => {
            catalogue.reports = serde_json::from_str(content).map_err(parse_err)?
        }
        FixtureDoc::Profile => {
            catalogue.profile = serde_json::from_str(content).map_err(parse_err)?
        }
    }

    tracing::info!(
        document = doc.file_name(),
        path = %path.display(),
        "Fixture override applied"
    );
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{EngineHealth, FileStatus};
    use std::path::PathBuf;

    #[test]
    fn test_builtin_catalogue_loads() {
        let catalogue = load_builtin().expect("embedded catalogue must parse");
        assert!(!catalogue.files.is_empty());
        assert!(!catalogue.reports.is_empty());
        assert!(!catalogue.profile.login_history.is_empty());
    }

    #[test]
    fn test_builtin_records_are_coherent() {
        let catalogue = load_builtin().unwrap();

        let first = &catalogue.files[0];
        assert_eq!(first.name, "suspicious_app.apk");
        assert_eq!(first.status, FileStatus::Completed);
        assert_eq!(first.file_type, "apk");
        assert_eq!(first.risk_score, Some(8.5));
        assert_eq!(first.hashes.md5.len(), 32);

        // Records still in the pipeline carry no verdict fields.
        let analyzing = catalogue
            .files
            .iter()
            .find(|r| r.status == FileStatus::Analyzing)
            .expect("catalogue includes an analyzing record");
        assert!(analyzing.risk_score.is_none());
        assert!(analyzing.malware_type.is_none());
    }

    #[test]
    fn test_builtin_dashboard_is_coherent() {
        let catalogue = load_builtin().unwrap();
        let stats = &catalogue.dashboard;

        let t = stats.total_files;
        assert_eq!(t.success + t.pending + t.failed, t.total);
        let u = stats.user_files;
        assert_eq!(u.success + u.pending + u.failed, u.total);

        assert!(!stats.top_malware_types.daily.is_empty());
        assert!(!stats.top_malware_types.monthly.is_empty());
        assert_eq!(stats.system_status.api, EngineHealth::Online);
    }

    #[test]
    fn test_builtin_reports_key_existing_records() {
        let catalogue = load_builtin().unwrap();
        for report in &catalogue.reports {
            assert!(
                catalogue.files.iter().any(|r| r.id == report.id),
                "report {} has no matching record",
                report.id
            );
        }
        assert!(catalogue.report_for("1").is_some());
    }

    #[test]
    fn test_apply_document_replaces_files() {
        let mut catalogue = load_builtin().unwrap();
        let original_len = catalogue.files.len();

        let replacement = r#"[{
            "id": "x1",
            "name": "single.exe",
            "size": 2048,
            "type": "exe",
            "uploadDate": "2024-03-01 08:00:00",
            "uploadedBy": "tester",
            "status": "completed",
            "riskScore": 1.0,
            "malwareType": "Clean",
            "hashes": {"md5": "0", "sha1": "1", "sha256": "2"}
        }]"#;

        apply_document(
            &mut catalogue,
            FixtureDoc::Files,
            replacement,
            &PathBuf::from("override/files.json"),
        )
        .unwrap();

        assert_eq!(catalogue.files.len(), 1);
        assert_ne!(catalogue.files.len(), original_len);
        assert_eq!(catalogue.files[0].name, "single.exe");
    }

    #[test]
    fn test_apply_document_rejects_malformed_json() {
        let mut catalogue = load_builtin().unwrap();
        let result = apply_document(
            &mut catalogue,
            FixtureDoc::Dashboard,
            "{ not json",
            &PathBuf::from("override/dashboard.json"),
        );
        assert!(matches!(result, Err(FixtureError::JsonParse { .. })));
        // The catalogue keeps its previous dashboard on failure.
        assert!(catalogue.dashboard.total_files.total > 0);
    }

    #[test]
    fn test_document_name_round_trip() {
        for doc in FixtureDoc::all() {
            assert_eq!(FixtureDoc::from_file_name(doc.file_name()), Some(*doc));
        }
        assert_eq!(FixtureDoc::from_file_name("notes.json"), None);
    }
}
