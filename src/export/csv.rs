//! CSV Export functionality
//!
//! Writes entry lines in the same column layout the CSV snapshot loader reads.

use serde::Serialize;
use std::io::Write;

use crate::error::{PayallocError, PayallocResult};
use crate::models::PaymentEntry;

#[derive(Serialize)]
struct EntryRow<'a> {
    id: &'a str,
    due_amount: String,
    payment_amount: String,
    document_number: Option<&'a str>,
    document_date: Option<String>,
    memo: Option<&'a str>,
}

impl<'a> From<&'a PaymentEntry> for EntryRow<'a> {
    fn from(entry: &'a PaymentEntry) -> Self {
        Self {
            id: entry.id.as_str(),
            due_amount: entry.due_amount.to_decimal_string(),
            payment_amount: entry.payment_amount.to_decimal_string(),
            document_number: entry.document_number.as_deref(),
            document_date: entry.document_date.map(|d| d.format("%Y-%m-%d").to_string()),
            memo: entry.memo.as_deref(),
        }
    }
}

/// Export entry lines to CSV with a header row
pub fn export_entries_csv<W: Write>(entries: &[PaymentEntry], writer: &mut W) -> PayallocResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for entry in entries {
        csv_writer
            .serialize(EntryRow::from(entry))
            .map_err(|e| PayallocError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| PayallocError::Export(e.to_string()))
}
