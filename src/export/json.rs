//! JSON Export functionality
//!
//! Exports an allocated payment form as a versioned report. The report keeps
//! its lines under `entries`, so it can be loaded again as a snapshot.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::{PayallocError, PayallocResult};
use crate::models::{Money, PaymentEntry, PaymentForm, PaymentKind};
use crate::services::FormTotals;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Allocated payment form, ready to be written out
#[derive(Debug, Clone, Serialize)]
pub struct AllocationReport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub kind: PaymentKind,

    /// Declared total of the payment
    pub full_amount: Money,

    pub entries: Vec<PaymentEntry>,

    pub totals: FormTotals,

    pub metadata: ReportMetadata,
}

/// Counts for a quick look at the report
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub entry_count: usize,

    /// Lines with any payment allocated
    pub paid_count: usize,

    /// Lines paid down to zero remaining
    pub settled_count: usize,
}

impl AllocationReport {
    /// Build a report from a form and its computed totals
    pub fn from_form(form: &PaymentForm, totals: FormTotals) -> Self {
        let metadata = ReportMetadata {
            entry_count: form.entries.len(),
            paid_count: form
                .entries
                .iter()
                .filter(|e| e.payment_amount.is_positive())
                .count(),
            settled_count: form.entries.iter().filter(|e| e.is_fully_paid()).count(),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            kind: form.kind,
            full_amount: form.full_amount,
            entries: form.entries.clone(),
            totals,
            metadata,
        }
    }
}

/// Export the report as pretty-printed JSON
pub fn export_report_json<W: Write>(report: &AllocationReport, writer: &mut W) -> PayallocResult<()> {
    serde_json::to_writer_pretty(&mut *writer, report)
        .map_err(|e| PayallocError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| PayallocError::Export(e.to_string()))
}
