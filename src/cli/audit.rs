//! Audit log CLI command

use crate::audit::AuditLogger;
use crate::config::PayallocPaths;
use crate::error::PayallocResult;

/// Show the most recent audit log entries, oldest first
pub fn handle_audit_command(paths: &PayallocPaths, count: usize) -> PayallocResult<()> {
    let logger = AuditLogger::new(paths.audit_log());

    let entries = logger.read_recent(count)?;
    if entries.is_empty() {
        println!("No audit entries yet.");
        return Ok(());
    }

    let total = logger.entry_count()?;
    println!(
        "Showing {} of {} audit entries ({})",
        entries.len(),
        total,
        logger.path().display()
    );
    println!();

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
