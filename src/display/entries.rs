//! Entry display formatting
//!
//! Formats payment entry lines as a table and the form totals as a summary
//! block for terminal output.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{PaymentEntry, PaymentKind};
use crate::services::FormTotals;

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Entry")]
    id: String,
    #[tabled(rename = "Document")]
    document: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Payment")]
    payment: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
}

/// Format entry lines as a table
pub fn format_entry_table(entries: &[PaymentEntry], kind: PaymentKind, symbol: &str) -> String {
    if entries.is_empty() {
        return format!("No {} entries.", kind.document_label().to_lowercase());
    }

    let rows = entries.iter().enumerate().map(|(i, entry)| EntryRow {
        position: i + 1,
        id: entry.id.to_string(),
        document: entry.document_number.clone().unwrap_or_default(),
        date: entry
            .document_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        due: entry.due_amount.format_with_symbol(symbol),
        payment: entry.payment_amount.format_with_symbol(symbol),
        remaining: entry.remaining_due().format_with_symbol(symbol),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::new(4..), Alignment::right());
    table.to_string()
}

/// Format the totals block
pub fn format_totals(totals: &FormTotals, kind: PaymentKind, symbol: &str) -> String {
    let lines = [
        ("Total due", totals.total_due),
        ("Total payment", totals.total_payment),
        (kind.amount_label(), totals.full_amount),
        ("Remaining due", totals.remaining_due),
    ];

    let mut output: String = lines
        .iter()
        .map(|(label, amount)| {
            format!(
                "{:<16} {:>14}\n",
                format!("{}:", label),
                amount.format_with_symbol(symbol)
            )
        })
        .collect();

    if totals.unallocated.is_positive() {
        output.push_str(&format!(
            "{:<16} {:>14}\n",
            "Unallocated:",
            totals.unallocated.format_with_symbol(symbol)
        ));
    }

    if !totals.balanced {
        output.push_str(&format!(
            "Warning: {} does not match the sum of line payments.\n",
            kind.amount_label().to_lowercase()
        ));
    }

    output
}
