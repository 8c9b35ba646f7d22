//! Audit logging system for payalloc
//!
//! Records allocation runs and per-line payment changes with before/after
//! values in an append-only audit log.
//!
//! # Architecture
//!
//! - `AuditEntry`: a single log entry with timestamp, operation, entity
//!   information, and optional before/after values.
//! - `AuditLogger`: writes entries to the audit log file as line-delimited
//!   JSON (JSONL) and reads them back.
//! - `generate_diff`: one-line summaries of what changed between two states.
//!
//! # Example
//!
//! ```rust,ignore
//! use payalloc::audit::AuditLogger;
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log_entry_changes(form.id, &form.entries, &next.entries)?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
