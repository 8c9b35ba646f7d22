//! Display formatting for terminal output
//!
//! Provides utilities for formatting payment forms for terminal display.

pub mod entries;

pub use entries::{format_entry_table, format_totals};
