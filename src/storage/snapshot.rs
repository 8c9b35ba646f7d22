//! Entry snapshot loading
//!
//! A snapshot is the entry set a backend would return for a vendor or
//! customer, saved to disk. JSON and YAML snapshots hold either a bare list
//! of entries or a document with an `entries` key (which is what the JSON and
//! YAML exports write). CSV snapshots have one entry per row.
//!
//! Documents may also carry the payment kind and declared full amount of the
//! form they were saved from, so an exported report resumes as it was left.

use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{PayallocError, PayallocResult};
use crate::models::{
    validate_entries, EntryId, EntryValidationError, Money, PaymentEntry, PaymentForm, PaymentKind,
};

use super::file_io::read_text_required;

/// On-disk format of an entry snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
    Csv,
}

impl SnapshotFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> PayallocResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("csv") => Ok(Self::Csv),
            _ => Err(PayallocError::Import(format!(
                "Unsupported snapshot file {} (expected .json, .yaml or .csv)",
                path.display()
            ))),
        }
    }
}

impl fmt::Display for SnapshotFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Yaml => write!(f, "YAML"),
            Self::Csv => write!(f, "CSV"),
        }
    }
}

#[derive(Deserialize)]
struct EntriesDocument {
    #[serde(default)]
    kind: Option<PaymentKind>,
    #[serde(default)]
    full_amount: Option<Money>,
    entries: Vec<PaymentEntry>,
}

impl From<EntriesDocument> for Snapshot {
    fn from(doc: EntriesDocument) -> Self {
        Self {
            kind: doc.kind,
            full_amount: doc.full_amount,
            entries: doc.entries,
        }
    }
}

/// A loaded entry set plus the form state saved alongside it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub kind: Option<PaymentKind>,
    pub full_amount: Option<Money>,
    pub entries: Vec<PaymentEntry>,
}

impl Snapshot {
    fn from_entries(entries: Vec<PaymentEntry>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    /// Resume a form session from this snapshot
    ///
    /// An explicit `kind` wins over the saved one. Without a saved full
    /// amount the form declares the sum of the saved payments.
    pub fn into_form(self, kind: Option<PaymentKind>) -> PaymentForm {
        let kind = kind.or(self.kind).unwrap_or_default();
        let mut form = PaymentForm::from_snapshot(kind, self.entries);
        if let Some(full_amount) = self.full_amount {
            form.full_amount = full_amount;
        }
        form
    }
}

/// One CSV row before its amounts are parsed
///
/// Ids stay text so "007" is not read as the number 7.
#[derive(Debug, Deserialize)]
struct CsvRow {
    id: String,
    due_amount: String,
    #[serde(default)]
    payment_amount: Option<String>,
    #[serde(default)]
    document_number: Option<String>,
    #[serde(default)]
    document_date: Option<String>,
    #[serde(default)]
    memo: Option<String>,
}

impl CsvRow {
    fn into_entry(self, line: usize) -> PayallocResult<PaymentEntry> {
        let amount = |field: &str, value: &str| {
            Money::parse(value).map_err(|e| {
                PayallocError::Import(format!("line {}: invalid {}: {}", line, field, e))
            })
        };

        let due_amount = amount("due_amount", &self.due_amount)?;
        let payment_amount = match self.payment_amount.as_deref() {
            Some(value) => amount("payment_amount", value)?,
            None => Money::zero(),
        };
        let document_date = self
            .document_date
            .as_deref()
            .map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d"))
            .transpose()
            .map_err(|e| {
                PayallocError::Import(format!("line {}: invalid document_date: {}", line, e))
            })?;

        Ok(PaymentEntry {
            id: EntryId::new(self.id),
            due_amount,
            payment_amount,
            document_number: self.document_number,
            document_date,
            memo: self.memo,
        })
    }
}

fn parse_json(contents: &str) -> PayallocResult<Snapshot> {
    let import_err = |e: serde_json::Error| PayallocError::Import(e.to_string());

    let value: serde_json::Value = serde_json::from_str(contents).map_err(import_err)?;
    if value.is_array() {
        serde_json::from_value(value)
            .map(Snapshot::from_entries)
            .map_err(import_err)
    } else {
        serde_json::from_value::<EntriesDocument>(value)
            .map(Snapshot::from)
            .map_err(import_err)
    }
}

fn parse_yaml(contents: &str) -> PayallocResult<Snapshot> {
    let import_err = |e: serde_yaml::Error| PayallocError::Import(e.to_string());

    let value: serde_yaml::Value = serde_yaml::from_str(contents).map_err(import_err)?;
    if value.is_sequence() {
        serde_yaml::from_value(value)
            .map(Snapshot::from_entries)
            .map_err(import_err)
    } else {
        serde_yaml::from_value::<EntriesDocument>(value)
            .map(Snapshot::from)
            .map_err(import_err)
    }
}

fn parse_csv(contents: &str) -> PayallocResult<Vec<PaymentEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(index, row)| {
            // Header is line 1
            let line = index + 2;
            row.map_err(|e| PayallocError::Import(format!("line {}: {}", line, e)))?
                .into_entry(line)
        })
        .collect()
}

/// Parse and validate a snapshot held in memory
pub fn parse_snapshot(contents: &str, format: SnapshotFormat) -> PayallocResult<Snapshot> {
    let snapshot = match format {
        SnapshotFormat::Json => parse_json(contents)?,
        SnapshotFormat::Yaml => parse_yaml(contents)?,
        SnapshotFormat::Csv => Snapshot::from_entries(parse_csv(contents)?),
    };

    validate_entries(&snapshot.entries).map_err(|e| match e {
        EntryValidationError::DuplicateId(id) => PayallocError::duplicate_entry(id.as_str()),
        other => PayallocError::Import(other.to_string()),
    })?;
    if snapshot.full_amount.is_some_and(|amount| amount.is_negative()) {
        return Err(PayallocError::Import("full_amount cannot be negative".to_string()));
    }
    Ok(snapshot)
}

/// Parse and validate the entries of a snapshot held in memory
pub fn parse_entries(contents: &str, format: SnapshotFormat) -> PayallocResult<Vec<PaymentEntry>> {
    parse_snapshot(contents, format).map(|snapshot| snapshot.entries)
}

/// Load and validate the snapshot at `path`
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> PayallocResult<Snapshot> {
    let path = path.as_ref();
    let format = SnapshotFormat::from_path(path)?;
    let contents = read_text_required(path)?;

    parse_snapshot(&contents, format).map_err(|e| match e {
        PayallocError::Import(msg) => {
            PayallocError::Import(format!("{} ({}): {}", path.display(), format, msg))
        }
        other => other,
    })
}

/// Load and validate the entries of the snapshot at `path`
pub fn load_entries<P: AsRef<Path>>(path: P) -> PayallocResult<Vec<PaymentEntry>> {
    load_snapshot(path).map(|snapshot| snapshot.entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            SnapshotFormat::from_path(Path::new("bills.JSON")).unwrap(),
            SnapshotFormat::Json
        );
        assert_eq!(
            SnapshotFormat::from_path(Path::new("a/b/invoices.yml")).unwrap(),
            SnapshotFormat::Yaml
        );
        assert!(SnapshotFormat::from_path(Path::new("entries.txt")).is_err());
        assert!(SnapshotFormat::from_path(Path::new("entries")).is_err());
    }

    #[test]
    fn test_json_bare_array() {
        let json = r#"[
            {"id": 1, "due_amount": 100, "payment_amount": 0},
            {"id": "INV-2", "due_amount": "50.25"}
        ]"#;

        let entries = parse_entries(json, SnapshotFormat::Json).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id.as_str(), "1");
        assert_eq!(entries[0].due_amount, Money::from_cents(10000));
        assert_eq!(entries[1].due_amount, Money::from_cents(5025));
        assert!(entries[1].payment_amount.is_zero());
    }

    #[test]
    fn test_json_entries_document() {
        let json = r#"{
            "kind": "received",
            "entries": [
                {"id": "A", "due_amount": 12.5, "document_number": "INV-0001",
                 "document_date": "2024-03-01"}
            ]
        }"#;

        let entries = parse_entries(json, SnapshotFormat::Json).unwrap();
        assert_eq!(entries[0].document_number.as_deref(), Some("INV-0001"));
        assert_eq!(entries[0].document_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(entries[0].due_amount, Money::from_cents(1250));
    }

    #[test]
    fn test_document_keeps_form_state() {
        let json = r#"{
            "kind": "received",
            "full_amount": 150,
            "entries": [{"id": "A", "due_amount": 100, "payment_amount": 100}]
        }"#;

        let snapshot = parse_snapshot(json, SnapshotFormat::Json).unwrap();
        assert_eq!(snapshot.kind, Some(PaymentKind::Received));
        assert_eq!(snapshot.full_amount, Some(Money::from_cents(15000)));

        let form = snapshot.clone().into_form(None);
        assert_eq!(form.kind, PaymentKind::Received);
        assert_eq!(form.full_amount, Money::from_cents(15000));

        let form = snapshot.into_form(Some(PaymentKind::Made));
        assert_eq!(form.kind, PaymentKind::Made);

        let bare = r#"[{"id": 1, "due_amount": 10, "payment_amount": 4}]"#;
        let bare = parse_snapshot(bare, SnapshotFormat::Json).unwrap();
        assert_eq!(bare.kind, None);
        let form = bare.into_form(None);
        assert_eq!(form.kind, PaymentKind::Made);
        assert_eq!(form.full_amount, Money::from_cents(400));

        let negative = r#"{"full_amount": -1, "entries": []}"#;
        assert!(matches!(
            parse_snapshot(negative, SnapshotFormat::Json),
            Err(PayallocError::Import(_))
        ));
    }

    #[test]
    fn test_oversized_amounts_are_rejected() {
        let json = r#"[{"id": 1, "due_amount": 50000000000000000},
                       {"id": 2, "due_amount": 50000000000000000}]"#;
        let err = parse_entries(json, SnapshotFormat::Json).unwrap_err();
        assert!(matches!(err, PayallocError::Import(_)));

        let csv = "id,due_amount\n1,50000000000000000\n";
        let err = parse_entries(csv, SnapshotFormat::Csv).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_yaml_snapshot() {
        let yaml = "# exported\nentries:\n  - id: B-1\n    due_amount: 80\n    payment_amount: 20\n";

        let entries = parse_entries(yaml, SnapshotFormat::Yaml).unwrap();
        assert_eq!(entries[0].id.as_str(), "B-1");
        assert_eq!(entries[0].payment_amount, Money::from_cents(2000));
    }

    #[test]
    fn test_csv_snapshot() {
        let csv = "id,due_amount,payment_amount,document_number,document_date,memo\n\
                   007, 100.00 ,,BILL-7,2024-01-15,\n\
                   8,50,25.5,,,rent\n";

        let entries = parse_entries(csv, SnapshotFormat::Csv).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id.as_str(), "007");
        assert!(entries[0].payment_amount.is_zero());
        assert_eq!(entries[0].document_date, NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(entries[0].memo, None);
        assert_eq!(entries[1].payment_amount, Money::from_cents(2550));
        assert_eq!(entries[1].memo.as_deref(), Some("rent"));
    }

    #[test]
    fn test_csv_minimal_columns() {
        let csv = "id,due_amount\n1,10\n2,20\n";

        let entries = parse_entries(csv, SnapshotFormat::Csv).unwrap();
        assert_eq!(entries[1].due_amount, Money::from_cents(2000));
    }

    #[test]
    fn test_csv_bad_amount_reports_line() {
        let csv = "id,due_amount\n1,10\n2,ten\n";

        let err = parse_entries(csv, SnapshotFormat::Csv).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_invalid_snapshot_is_rejected() {
        let overpaid = r#"[{"id": 1, "due_amount": 10, "payment_amount": 11}]"#;
        let err = parse_entries(overpaid, SnapshotFormat::Json).unwrap_err();
        assert!(matches!(err, PayallocError::Import(_)));

        let duplicate = r#"[{"id": 1, "due_amount": 10}, {"id": "1", "due_amount": 5}]"#;
        let err = parse_entries(duplicate, SnapshotFormat::Json).unwrap_err();
        assert_eq!(err.to_string(), "Entry already exists: 1");
    }

    #[test]
    fn test_load_entries_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bills.json");
        std::fs::write(&path, r#"[{"id": 1, "due_amount": 10}]"#).unwrap();

        let entries = load_entries(&path).unwrap();
        assert_eq!(entries.len(), 1);

        let missing = load_entries(temp_dir.path().join("none.json")).unwrap_err();
        assert!(matches!(missing, PayallocError::Io(_)));
    }

    #[test]
    fn test_load_error_names_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.yaml");
        std::fs::write(&path, "entries: [").unwrap();

        let err = load_entries(&path).unwrap_err();
        assert!(err.to_string().contains("broken.yaml"));
    }
}
