//! User settings for payalloc
//!
//! Manages user preferences: currency display, how over-allocation is
//! handled, audit logging and the default output format.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::paths::PayallocPaths;
use crate::error::PayallocError;
use crate::storage::file_io::write_json_atomic;

/// What to do when a target amount exceeds the total due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OverAllocationPolicy {
    /// Fill every entry and silently drop the excess (default)
    #[default]
    Cap,
    /// Refuse the target and report how much is actually due
    Reject,
}

impl fmt::Display for OverAllocationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cap => write!(f, "cap"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Output format for entry sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    Json,
    Yaml,
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// User settings for payalloc
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used for display
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Over-allocation handling for typed target amounts
    #[serde(default)]
    pub over_allocation: OverAllocationPolicy,

    /// Whether allocation changes are written to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,

    /// Output format when none is given on the command line
    #[serde(default)]
    pub default_format: OutputFormat,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            over_allocation: OverAllocationPolicy::default(),
            audit_enabled: default_audit_enabled(),
            default_format: OutputFormat::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &PayallocPaths) -> Result<Self, PayallocError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                PayallocError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                PayallocError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PayallocPaths) -> Result<(), PayallocError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
            .map_err(|e| PayallocError::Config(format!("Failed to write settings file: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.over_allocation, OverAllocationPolicy::Cap);
        assert!(settings.audit_enabled);
        assert_eq!(settings.default_format, OutputFormat::Table);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PayallocPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.over_allocation = OverAllocationPolicy::Reject;
        settings.currency_symbol = "€".to_string();

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.over_allocation, OverAllocationPolicy::Reject);
        assert_eq!(loaded.currency_symbol, "€");
    }

    #[test]
    fn test_missing_file_is_not_written() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PayallocPaths::with_base_dir(temp_dir.path().join("fresh"));

        let settings = Settings::load_or_create(&paths).unwrap();
        assert!(settings.audit_enabled);
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"over_allocation": "reject"}"#).unwrap();
        assert_eq!(settings.over_allocation, OverAllocationPolicy::Reject);
        assert_eq!(settings.schema_version, 1);
        assert!(settings.audit_enabled);
    }

    #[test]
    fn test_corrupt_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PayallocPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{ not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, PayallocError::Config(_)));
    }
}
