//! Payment form service
//!
//! Provides the header behaviour of the "payment made" and "payment receive"
//! forms on top of the allocation engine: the full-amount shortcut, the typed
//! full amount, per-line edits and the totals block. Each operation returns a
//! [`FormUpdate`] rather than changing the form.

use serde::Serialize;

use crate::config::{OverAllocationPolicy, Settings};
use crate::error::{PayallocError, PayallocResult};
use crate::models::{EntryId, FormUpdate, Money, PaymentForm};

use super::aggregate::{sum_due_amount, sum_payment_amount, sum_remaining_due};
use super::allocation::{allocate_amount_with_outcome, allocate_full};

/// Service for payment form edits
pub struct PaymentFormService<'a> {
    settings: &'a Settings,
}

/// Totals shown in the form header and checked before submit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormTotals {
    pub total_due: Money,
    pub total_payment: Money,
    pub full_amount: Money,
    pub remaining_due: Money,
    /// Declared full amount that no line absorbs
    pub unallocated: Money,
    /// Declared full amount equals the sum of line payments
    pub balanced: bool,
}

impl<'a> PaymentFormService<'a> {
    /// Create a new payment form service
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// "Pay/Receive full amount": pay every line and declare the total
    pub fn receive_full_amount(&self, form: &PaymentForm) -> FormUpdate {
        let entries = allocate_full(&form.entries);
        let full_amount = sum_payment_amount(&entries);

        FormUpdate::new()
            .set_entries(entries)
            .set_full_amount(full_amount)
    }

    /// The user typed a full amount: sanitize it and spread it over the lines
    pub fn full_amount_changed(&self, form: &PaymentForm, input: &str) -> PayallocResult<FormUpdate> {
        self.allocate_target(form, Money::sanitize(input))
    }

    /// Spread an already-sanitized target over the lines
    pub fn allocate_target(&self, form: &PaymentForm, target: Money) -> PayallocResult<FormUpdate> {
        let outcome = allocate_amount_with_outcome(target, &form.entries);

        if outcome.is_over_allocated() && self.settings.over_allocation == OverAllocationPolicy::Reject {
            return Err(PayallocError::over_allocation(
                target,
                sum_due_amount(&form.entries),
                &self.settings.currency_symbol,
            ));
        }

        Ok(FormUpdate::new()
            .set_entries(outcome.entries)
            .set_full_amount(target.max(Money::zero())))
    }

    /// Edit a single line's payment
    ///
    /// The declared full amount follows the new sum of line payments.
    pub fn set_entry_payment(
        &self,
        form: &PaymentForm,
        entry_id: &EntryId,
        amount: Money,
    ) -> PayallocResult<FormUpdate> {
        let position = form
            .entries
            .iter()
            .position(|e| &e.id == entry_id)
            .ok_or_else(|| PayallocError::entry_not_found(entry_id.as_str()))?;

        let mut entries = form.entries.clone();
        entries[position] = entries[position].paying(amount);
        entries[position]
            .validate()
            .map_err(|e| PayallocError::Validation(e.to_string()))?;

        let full_amount = sum_payment_amount(&entries);
        Ok(FormUpdate::new()
            .set_entries(entries)
            .set_full_amount(full_amount))
    }

    /// Compute the totals block for a form
    pub fn totals(&self, form: &PaymentForm) -> FormTotals {
        let total_payment = sum_payment_amount(&form.entries);

        FormTotals {
            total_due: sum_due_amount(&form.entries),
            total_payment,
            full_amount: form.full_amount,
            remaining_due: sum_remaining_due(&form.entries),
            unallocated: form.full_amount.saturating_sub(total_payment),
            balanced: form.full_amount == total_payment,
        }
    }
}
