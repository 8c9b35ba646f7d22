//! payalloc - Payment allocation engine for payable and receivable entries
//!
//! This library spreads a payment over outstanding bills or invoices. It pays
//! every entry in full, or allocates a target amount greedily in entry order
//! until the amount runs out, and computes the totals a payment form shows.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Core data models (money, entries, payment forms)
//! - `services`: Allocation engine, aggregates and payment form operations
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `storage`: Entry snapshot loading and atomic file writes
//! - `export`: JSON, YAML and CSV output
//! - `display`: Terminal tables
//! - `audit`: Audit logging system
//! - `cli`: Command handlers for the `payalloc` binary
//!
//! # Example
//!
//! ```rust
//! use payalloc::models::{Money, PaymentEntry};
//! use payalloc::services::{allocate_amount, sum_payment_amount};
//!
//! let entries = vec![
//!     PaymentEntry::new("1", Money::from_cents(10000)),
//!     PaymentEntry::new("2", Money::from_cents(5000)),
//! ];
//!
//! let allocated = allocate_amount(Money::from_cents(12000), &entries);
//! assert_eq!(allocated[1].payment_amount, Money::from_cents(2000));
//! assert_eq!(sum_payment_amount(&allocated), Money::from_cents(12000));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{PayallocError, PayallocResult};
