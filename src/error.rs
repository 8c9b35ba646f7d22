//! Custom error types for payalloc
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. The allocation engine itself is infallible;
//! these errors come from the layers around it (config, snapshots, form edits).

use thiserror::Error;

use crate::models::Money;

/// The main error type for payalloc operations
#[derive(Error, Debug)]
pub enum PayallocError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Validation errors for entries and form edits
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Target amount exceeds what the entries can absorb
    #[error(
        "Cannot allocate {}: only {} is due",
        with_symbol(.requested, .currency_symbol),
        with_symbol(.available, .currency_symbol)
    )]
    OverAllocation {
        requested: Money,
        available: Money,
        currency_symbol: String,
    },

    /// Snapshot import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Audit log errors
    #[error("Audit error: {0}")]
    Audit(String),
}

impl PayallocError {
    /// Create a "not found" error for payment entries
    pub fn entry_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Entry",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for payment entries
    pub fn duplicate_entry(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Entry",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Create an over-allocation error that shows amounts with `currency_symbol`
    pub fn over_allocation(requested: Money, available: Money, currency_symbol: &str) -> Self {
        Self::OverAllocation {
            requested,
            available,
            currency_symbol: currency_symbol.to_string(),
        }
    }

    /// Check if this is an over-allocation error
    pub fn is_over_allocation(&self) -> bool {
        matches!(self, Self::OverAllocation { .. })
    }
}

fn with_symbol(amount: &Money, symbol: &str) -> String {
    amount.format_with_symbol(symbol)
}

// Implement From traits for common error types

impl From<std::io::Error> for PayallocError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PayallocError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for PayallocError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<csv::Error> for PayallocError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for payalloc operations
pub type PayallocResult<T> = Result<T, PayallocError>;
