//! Service layer for payalloc
//!
//! `allocation` and `aggregate` are the pure engine: plain functions over
//! entry slices. `form` adds the payment-form behaviour and settings on top.

pub mod aggregate;
pub mod allocation;
pub mod form;

pub use aggregate::{sum_due_amount, sum_payment_amount, sum_remaining_due};
pub use allocation::{
    allocate_amount, allocate_amount_with_outcome, allocate_full, AllocationOutcome,
};
pub use form::{FormTotals, PaymentFormService};
