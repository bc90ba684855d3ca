// Rampart - core/export.rs
//
// CSV and JSON export of the filtered repository view, plus JSON
// export of a single report detail.
// Core layer: writes to any Write implementor; the GUI owns file
// creation and save dialogs.

use crate::core::model::{FileRecord, ReportDetail};
use crate::util::constants::MAX_EXPORT_RECORDS;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export repository records to CSV.
///
/// Writes: name, size, type, uploaded, uploader, status, risk score,
/// malware type, md5. Returns the number of data rows written.
pub fn export_csv<W: Write>(
    records: &[FileRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_record_cap(records.len())?;

    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            "name",
            "size",
            "type",
            "uploaded",
            "uploader",
            "status",
            "risk_score",
            "malware_type",
            "md5",
        ])
        .map_err(|e| ExportError::Csv {
            path: export_path.to_path_buf(),
            source: e,
        })?;

    let mut count = 0;
    for record in records {
        let risk = record
            .risk_score
            .map(|score| format!("{score:.1}"))
            .unwrap_or_default();

        csv_writer
            .write_record([
                record.name.as_str(),
                &record.size.to_string(),
                &record.file_type,
                &record.upload_date.format("%Y-%m-%d %H:%M:%S").to_string(),
                &record.uploaded_by,
                record.status.label(),
                &risk,
                record.malware_type.as_deref().unwrap_or(""),
                &record.hashes.md5,
            ])
            .map_err(|e| ExportError::Csv {
                path: export_path.to_path_buf(),
                source: e,
            })?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export repository records to JSON (array of objects in the
/// backend's wire shape).
pub fn export_json<W: Write>(
    records: &[FileRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_record_cap(records.len())?;

    serde_json::to_writer_pretty(writer, records).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(records.len())
}

/// Export one report detail to JSON.
pub fn export_report_json<W: Write>(
    report: &ReportDetail,
    writer: W,
    export_path: &Path,
) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, report).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })
}

fn check_record_cap(count: usize) -> Result<(), ExportError> {
    if count > MAX_EXPORT_RECORDS {
        return Err(ExportError::TooManyRecords {
            count,
            max: MAX_EXPORT_RECORDS,
        });
    }
    Ok(())
}
