//! Export module for payalloc
//!
//! Writes allocation results in multiple formats:
//! - JSON: versioned report with totals (machine-readable)
//! - YAML: the same report with a header comment (human-readable)
//! - CSV: entry lines only (spreadsheet-compatible)
//!
//! Every format can be loaded again as an entry snapshot.

pub mod csv;
pub mod json;
pub mod yaml;

use std::io::Write;
use std::path::Path;

pub use self::csv::export_entries_csv;
pub use json::{export_report_json, AllocationReport, ReportMetadata, EXPORT_SCHEMA_VERSION};
pub use yaml::export_report_yaml;

use crate::error::PayallocResult;
use crate::storage::{write_atomic, SnapshotFormat};

/// Write a report in the given format
pub fn write_report<W: Write>(
    report: &AllocationReport,
    format: SnapshotFormat,
    writer: &mut W,
) -> PayallocResult<()> {
    match format {
        SnapshotFormat::Json => export_report_json(report, writer),
        SnapshotFormat::Yaml => export_report_yaml(report, writer),
        SnapshotFormat::Csv => export_entries_csv(&report.entries, writer),
    }
}

/// Write a report to `path` atomically, picking the format from its extension
pub fn export_report_file<P: AsRef<Path>>(
    report: &AllocationReport,
    path: P,
) -> PayallocResult<SnapshotFormat> {
    let path = path.as_ref();
    let format = SnapshotFormat::from_path(path)?;

    let mut buffer = Vec::new();
    write_report(report, format, &mut buffer)?;
    write_atomic(path, &buffer)?;

    Ok(format)
}
