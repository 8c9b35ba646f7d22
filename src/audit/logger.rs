//! Audit logger for append-only audit log
//!
//! Each entry is written as a single JSON line and flushed immediately.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{PayallocError, PayallocResult};
use crate::models::{FormId, PaymentEntry};

use super::diff::generate_diff;
use super::entry::{AuditEntry, EntityType};

/// Handles writing audit entries to the audit log file (JSONL)
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create a new AuditLogger that writes to the specified path
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    fn open_for_append(&self) -> PayallocResult<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| PayallocError::Audit(format!("Failed to open audit log: {}", e)))
    }

    fn write_line(file: &mut File, entry: &AuditEntry) -> PayallocResult<()> {
        let json = serde_json::to_string(entry)
            .map_err(|e| PayallocError::Json(format!("Failed to serialize audit entry: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| PayallocError::Audit(format!("Failed to write audit entry: {}", e)))
    }

    /// Log a single audit entry
    pub fn log(&self, entry: &AuditEntry) -> PayallocResult<()> {
        self.log_batch(std::slice::from_ref(entry))
    }

    /// Log multiple audit entries, flushing once at the end
    pub fn log_batch(&self, entries: &[AuditEntry]) -> PayallocResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut file = self.open_for_append()?;
        for entry in entries {
            Self::write_line(&mut file, entry)?;
        }

        file.flush()
            .map_err(|e| PayallocError::Audit(format!("Failed to flush audit log: {}", e)))
    }

    /// Log one `Update` per entry whose payment changed
    ///
    /// Entries are matched by id; lines present on only one side are ignored.
    /// Returns how many entries were written.
    pub fn log_entry_changes(
        &self,
        form_id: FormId,
        before: &[PaymentEntry],
        after: &[PaymentEntry],
    ) -> PayallocResult<usize> {
        let changed = after
            .iter()
            .filter_map(|new| {
                let old = before.iter().find(|old| old.id == new.id)?;
                (old.payment_amount != new.payment_amount).then_some((old, new))
            })
            .map(|(old, new)| -> PayallocResult<AuditEntry> {
                let old_json = serde_json::to_value(old)?;
                let new_json = serde_json::to_value(new)?;
                Ok(AuditEntry::update(
                    EntityType::PaymentEntry,
                    format!("{}/{}", form_id, new.id),
                    Some(new.label().to_string()),
                    &old_json,
                    &new_json,
                    generate_diff(&old_json, &new_json),
                ))
            })
            .collect::<PayallocResult<Vec<AuditEntry>>>()?;

        self.log_batch(&changed)?;
        Ok(changed.len())
    }

    /// Read all audit entries, oldest first
    pub fn read_all(&self) -> PayallocResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| PayallocError::Audit(format!("Failed to open audit log: {}", e)))?;

        let mut entries = Vec::new();
        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                PayallocError::Audit(format!("Failed to read audit log line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
                PayallocError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// Read the most recent N entries from the log
    pub fn read_recent(&self, count: usize) -> PayallocResult<Vec<AuditEntry>> {
        let mut all_entries = self.read_all()?;
        let start = all_entries.len().saturating_sub(count);
        Ok(all_entries.split_off(start))
    }

    /// Number of entries in the audit log
    pub fn entry_count(&self) -> PayallocResult<usize> {
        Ok(self.read_all()?.len())
    }

    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::Operation;
    use crate::models::Money;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    fn form_entry(i: usize) -> AuditEntry {
        AuditEntry::allocate(
            format!("frm-{}", i),
            None,
            &json!({"full_amount": 0.0}),
            &json!({"full_amount": i}),
            None,
        )
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();
        logger.log(&form_entry(1)).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Allocate);
        assert_eq!(entries[0].entity_type, EntityType::PaymentForm);
    }

    #[test]
    fn test_read_recent() {
        let (logger, _temp) = create_test_logger();
        let batch: Vec<_> = (0..10).map(form_entry).collect();
        logger.log_batch(&batch).unwrap();

        assert_eq!(logger.entry_count().unwrap(), 10);
        let recent = logger.read_recent(3).unwrap();
        let ids: Vec<_> = recent.iter().map(|e| e.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["frm-7", "frm-8", "frm-9"]);
    }

    #[test]
    fn test_empty_log() {
        let (logger, _temp) = create_test_logger();

        assert!(!logger.exists());
        assert_eq!(logger.entry_count().unwrap(), 0);
        assert!(logger.read_all().unwrap().is_empty());

        logger.log_batch(&[]).unwrap();
        assert!(!logger.exists());
    }

    #[test]
    fn test_log_entry_changes_only_records_changed_lines() {
        let (logger, _temp) = create_test_logger();
        let form_id = FormId::new();

        let before = vec![
            PaymentEntry::new("1", Money::from_cents(10000)),
            PaymentEntry::new("2", Money::from_cents(5000)),
        ];
        let after = vec![
            before[0].paying(Money::from_cents(10000)),
            before[1].clone(),
        ];

        let written = logger.log_entry_changes(form_id, &before, &after).unwrap();
        assert_eq!(written, 1);

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entity_type, EntityType::PaymentEntry);
        assert_eq!(entries[0].entity_id, format!("{}/1", form_id));
        assert_eq!(
            entries[0].diff_summary.as_deref(),
            Some("payment_amount: 0.0 -> 100.0")
        );
    }

    #[test]
    fn test_log_entry_changes_reports_failures() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the log file should be
        let logger = AuditLogger::new(temp_dir.path().to_path_buf());

        let before = vec![PaymentEntry::new("1", Money::from_cents(10000))];
        let after = vec![before[0].paying(Money::from_cents(2500))];

        assert!(logger
            .log_entry_changes(FormId::new(), &before, &after)
            .is_err());
        assert_eq!(
            logger
                .log_entry_changes(FormId::new(), &before, &before)
                .unwrap(),
            0
        );
    }

    #[test]
    fn test_corrupt_line_is_reported() {
        let (logger, _temp) = create_test_logger();
        std::fs::write(logger.path(), "not json\n").unwrap();

        let err = logger.read_all().unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }
}
