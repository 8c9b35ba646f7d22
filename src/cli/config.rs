//! Configuration CLI command

use crate::config::{PayallocPaths, Settings};
use crate::error::PayallocResult;

/// Show paths and settings, optionally writing the settings file first
pub fn handle_config_command(
    paths: &PayallocPaths,
    settings: &Settings,
    init: bool,
) -> PayallocResult<()> {
    if init {
        settings.save(paths)?;
        println!("Settings written to: {}", paths.settings_file().display());
        println!();
    }

    println!("payalloc Configuration");
    println!("======================");
    println!("Base directory: {}", paths.base_dir().display());
    println!(
        "Settings file:  {}{}",
        paths.settings_file().display(),
        if paths.is_initialized() { "" } else { " (not created)" }
    );
    println!("Audit log:      {}", paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol:   {}", settings.currency_symbol);
    println!("  Over-allocation:   {}", settings.over_allocation);
    println!("  Audit logging:     {}", settings.audit_enabled);
    println!("  Default format:    {}", settings.default_format);

    Ok(())
}
