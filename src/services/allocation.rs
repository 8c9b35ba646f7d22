//! Payment allocation engine
//!
//! Pure functions that spread a payment over an ordered entry set. Entry order
//! is allocation priority: the first entry is filled before the second is
//! touched. Nothing here reads settings or other ambient state, and inputs are
//! never mutated; every call returns a fresh entry set.

use serde::Serialize;

use crate::models::{Money, PaymentEntry};

use super::aggregate::sum_payment_amount;

/// Pay every entry in full
pub fn allocate_full(entries: &[PaymentEntry]) -> Vec<PaymentEntry> {
    entries
        .iter()
        .map(|entry| entry.paying(entry.due_amount.max(Money::zero())))
        .collect()
}

/// Spread `target` over the entries in order, filling each before the next
///
/// Whatever exceeds the total due is dropped. A negative target allocates
/// nothing; callers are expected to sanitize input with [`Money::sanitize`].
pub fn allocate_amount(target: Money, entries: &[PaymentEntry]) -> Vec<PaymentEntry> {
    allocate_amount_with_outcome(target, entries).entries
}

/// Result of a greedy allocation, including what could not be placed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationOutcome {
    pub entries: Vec<PaymentEntry>,
    /// Sum of the payments in `entries`
    pub allocated: Money,
    /// Part of the target that exceeded the total due
    pub unallocated: Money,
}

impl AllocationOutcome {
    pub fn is_over_allocated(&self) -> bool {
        self.unallocated.is_positive()
    }
}

/// Same walk as [`allocate_amount`], but reports the dropped excess
pub fn allocate_amount_with_outcome(target: Money, entries: &[PaymentEntry]) -> AllocationOutcome {
    let mut remaining = target.max(Money::zero());

    let entries: Vec<PaymentEntry> = entries
        .iter()
        .map(|entry| {
            let taking = remaining.min(entry.due_amount).max(Money::zero());
            remaining -= taking;
            entry.paying(taking)
        })
        .collect();

    AllocationOutcome {
        allocated: sum_payment_amount(&entries),
        unallocated: remaining,
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryId;
    use crate::services::aggregate::sum_due_amount;

    fn entries(dues: &[i64]) -> Vec<PaymentEntry> {
        dues.iter()
            .enumerate()
            .map(|(i, due)| PaymentEntry::new(EntryId::from(i as u64 + 1), Money::from_cents(*due)))
            .collect()
    }

    fn payments(entries: &[PaymentEntry]) -> Vec<i64> {
        entries.iter().map(|e| e.payment_amount.cents()).collect()
    }

    fn within_bounds(entries: &[PaymentEntry]) -> bool {
        entries
            .iter()
            .all(|e| !e.payment_amount.is_negative() && e.payment_amount <= e.due_amount)
    }

    #[test]
    fn test_allocate_full_pays_everything() {
        let input = entries(&[10000, 5000, 125]);
        let paid = allocate_full(&input);

        assert_eq!(payments(&paid), vec![10000, 5000, 125]);
        assert_eq!(sum_payment_amount(&paid), sum_due_amount(&input));
        assert!(within_bounds(&paid));
    }

    #[test]
    fn test_allocate_full_is_idempotent() {
        let input = entries(&[300, 0, 4599]);
        let once = allocate_full(&input);
        let twice = allocate_full(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_allocate_full_overwrites_partial_payments() {
        let input = vec![PaymentEntry::with_payment(
            "1",
            Money::from_cents(800),
            Money::from_cents(200),
        )];
        assert_eq!(payments(&allocate_full(&input)), vec![800]);
    }

    #[test]
    fn test_fills_first_entry_first() {
        let input = entries(&[10000, 5000]);
        let result = allocate_amount(Money::from_cents(12000), &input);
        assert_eq!(payments(&result), vec![10000, 2000]);
    }

    #[test]
    fn test_later_entries_get_zero_once_exhausted() {
        let input = entries(&[1000, 1000, 1000]);
        let result = allocate_amount(Money::from_cents(1500), &input);
        assert_eq!(payments(&result), vec![1000, 500, 0]);
    }

    #[test]
    fn test_zero_target_clears_payments() {
        let input = vec![
            PaymentEntry::with_payment("1", Money::from_cents(500), Money::from_cents(500)),
            PaymentEntry::with_payment("2", Money::from_cents(500), Money::from_cents(100)),
        ];
        let result = allocate_amount(Money::zero(), &input);
        assert_eq!(payments(&result), vec![0, 0]);
    }

    #[test]
    fn test_negative_target_allocates_nothing() {
        let input = entries(&[500]);
        let outcome = allocate_amount_with_outcome(Money::from_cents(-100), &input);
        assert_eq!(payments(&outcome.entries), vec![0]);
        assert_eq!(outcome.unallocated, Money::zero());
    }

    #[test]
    fn test_target_sum_matches_when_within_due() {
        let input = entries(&[333, 0, 1250, 1, 9999]);
        let total_due = sum_due_amount(&input).cents();

        for target in [0, 1, 332, 333, 334, 1583, 1584, 5000, total_due] {
            let result = allocate_amount(Money::from_cents(target), &input);
            assert_eq!(sum_payment_amount(&result).cents(), target, "target {}", target);
            assert!(within_bounds(&result));
        }
    }

    #[test]
    fn test_excess_is_capped_at_total_due() {
        let input = entries(&[10000, 5000]);
        let outcome = allocate_amount_with_outcome(Money::from_cents(20000), &input);

        assert_eq!(payments(&outcome.entries), vec![10000, 5000]);
        assert_eq!(outcome.allocated, sum_due_amount(&input));
        assert_eq!(outcome.unallocated, Money::from_cents(5000));
        assert!(outcome.is_over_allocated());

        let capped = allocate_amount(Money::from_cents(20000), &input);
        assert_eq!(sum_payment_amount(&capped), sum_due_amount(&input));
    }

    #[test]
    fn test_empty_input() {
        assert!(allocate_full(&[]).is_empty());
        assert!(allocate_amount(Money::from_cents(100), &[]).is_empty());

        let outcome = allocate_amount_with_outcome(Money::from_cents(100), &[]);
        assert_eq!(outcome.allocated, Money::zero());
        assert_eq!(outcome.unallocated, Money::from_cents(100));
    }

    #[test]
    fn test_input_is_not_mutated_and_result_is_deterministic() {
        let input = entries(&[700, 300]);
        let snapshot = input.clone();

        let first = allocate_amount(Money::from_cents(800), &input);
        let second = allocate_amount(Money::from_cents(800), &input);

        assert_eq!(input, snapshot);
        assert_eq!(first, second);
    }

    #[test]
    fn test_metadata_survives_allocation() {
        let mut entry = PaymentEntry::new("INV-9", Money::from_cents(100));
        entry.document_number = Some("INV-9".into());
        entry.memo = Some("March services".into());

        let result = allocate_full(&[entry.clone()]);
        assert_eq!(result[0].document_number, entry.document_number);
        assert_eq!(result[0].memo, entry.memo);
        assert_eq!(result[0].id, entry.id);
    }
}
