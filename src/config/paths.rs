//! Path management for payalloc
//!
//! ## Path Resolution Order
//!
//! 1. `PAYALLOC_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/payalloc` or `~/.config/payalloc`
//! 3. Windows: `%APPDATA%\payalloc`

use std::path::PathBuf;

use crate::error::PayallocError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "PAYALLOC_DATA_DIR";

/// Manages all paths used by payalloc
#[derive(Debug, Clone)]
pub struct PayallocPaths {
    base_dir: PathBuf,
}

impl PayallocPaths {
    /// Create a new PayallocPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home or config directory can be determined.
    pub fn new() -> Result<Self, PayallocError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create PayallocPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), PayallocError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| PayallocError::Io(format!("Failed to create base directory: {}", e)))
    }

    /// Check if settings have ever been saved
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, PayallocError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                PayallocError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("payalloc"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, PayallocError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| PayallocError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("payalloc"))
}
