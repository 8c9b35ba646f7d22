//! YAML Export functionality
//!
//! Writes the allocation report in human-readable form.

use std::io::Write;

use crate::error::{PayallocError, PayallocResult};
use crate::export::json::AllocationReport;

/// Export the report as YAML with a header comment
pub fn export_report_yaml<W: Write>(report: &AllocationReport, writer: &mut W) -> PayallocResult<()> {
    let header = format!(
        "# payalloc allocation report\n\
         # Generated: {}\n\
         # App Version: {}\n\
         # {}: {}\n\
         #\n\
         # Pass this file to any payalloc command to keep editing the allocation.\n\n",
        report.exported_at,
        report.app_version,
        report.kind.amount_label(),
        report.full_amount,
    );

    writer
        .write_all(header.as_bytes())
        .map_err(|e| PayallocError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, report).map_err(|e| PayallocError::Export(e.to_string()))
}
