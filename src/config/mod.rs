//! Configuration module for payalloc
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::PayallocPaths;
pub use settings::{OutputFormat, OverAllocationPolicy, Settings};
