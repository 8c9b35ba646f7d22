//! Core data models for payalloc
//!
//! This module contains the data structures of the payment domain: money,
//! entry lines, identifiers and the payment form session.

pub mod entry;
pub mod form;
pub mod ids;
pub mod money;

pub use entry::{validate_entries, EntryValidationError, PaymentEntry};
pub use form::{FieldChange, FormUpdate, PaymentForm, PaymentKind};
pub use ids::{EntryId, FormId};
pub use money::{Money, MoneyParseError};
