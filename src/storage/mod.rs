//! Storage layer for payalloc
//!
//! Loads entry snapshots from JSON, YAML or CSV files and writes results with
//! atomic writes and automatic directory creation.

pub mod file_io;
pub mod snapshot;

pub use file_io::{read_text_required, write_atomic, write_json_atomic};
pub use snapshot::{
    load_entries, load_snapshot, parse_entries, parse_snapshot, Snapshot, SnapshotFormat,
};
