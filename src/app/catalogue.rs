// Rampart - app/catalogue.rs
//
// Manages loading of the fixture catalogue from both built-in sources
// (embedded in the binary) and user-supplied JSON captures on disk.
// User documents replace the built-in document with the same file name.

use crate::core::fixtures::{self, FixtureCatalogue, FixtureDoc};
use crate::util::constants;
use crate::util::error::FixtureError;
use std::path::Path;

/// Load the complete catalogue: built-in documents first, then overrides.
///
/// An override file with a recognised name replaces the corresponding
/// built-in document wholesale. Invalid override files are logged and
/// skipped (non-fatal); the built-in document stays in place.
///
/// A malformed built-in document is fatal: the binary shipped broken.
///
/// Returns the merged catalogue and any non-fatal errors encountered.
pub fn load_catalogue(
    override_dir: Option<&Path>,
) -> Result<(FixtureCatalogue, Vec<FixtureError>), FixtureError> {
    let mut catalogue = fixtures::load_builtin()?;
    let mut errors = Vec::new();

    // Apply user overrides if the directory exists
    if let Some(dir) = override_dir {
        if dir.is_dir() {
            apply_override_dir(&mut catalogue, dir, &mut errors);
        } else {
            tracing::debug!(
                dir = %dir.display(),
                "Fixture override directory does not exist (skipping)"
            );
        }
    }

    tracing::info!(
        files = catalogue.files.len(),
        reports = catalogue.reports.len(),
        overrides_failed = errors.len(),
        "Fixture catalogue ready"
    );

    Ok((catalogue, errors))
}

/// Apply every JSON document found in an override directory.
fn apply_override_dir(
    catalogue: &mut FixtureCatalogue,
    dir: &Path,
    errors: &mut Vec<FixtureError>,
) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            errors.push(FixtureError::Io {
                path: dir.to_path_buf(),
                source: e,
            });
            return;
        }
    };

    for entry_result in entries {
        let entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                errors.push(FixtureError::Io {
                    path: dir.to_path_buf(),
                    source: e,
                });
                continue;
            }
        };

        let path = entry.path();

        // Only process .json files
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        // The file name selects which catalogue document to replace
        let doc = match path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(FixtureDoc::from_file_name)
        {
            Some(doc) => doc,
            None => {
                errors.push(FixtureError::UnknownDocument { path });
                continue;
            }
        };

        // Check file size
        let metadata = match std::fs::metadata(&path) {
            Ok(m) => m,
            Err(e) => {
                errors.push(FixtureError::Io {
                    path: path.clone(),
                    source: e,
                });
                continue;
            }
        };

        if metadata.len() > constants::MAX_FIXTURE_FILE_SIZE {
            errors.push(FixtureError::FileTooLarge {
                path: path.clone(),
                size: metadata.len(),
                max_size: constants::MAX_FIXTURE_FILE_SIZE,
            });
            continue;
        }

        // Read and apply the document
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                errors.push(FixtureError::Io {
                    path: path.clone(),
                    source: e,
                });
                continue;
            }
        };

        if let Err(e) = fixtures::apply_document(catalogue, doc, &content, &path) {
            errors.push(e);
        }
    }
}
