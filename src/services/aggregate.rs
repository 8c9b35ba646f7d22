//! Aggregate calculations over entry sets
//!
//! Totals shown on the payment form and used to check that the declared full
//! amount matches its lines. An empty entry set sums to zero.

use crate::models::{Money, PaymentEntry};

/// Sum of `due_amount` across all entries (the "full amount")
pub fn sum_due_amount(entries: &[PaymentEntry]) -> Money {
    entries.iter().map(|e| e.due_amount).sum()
}

/// Sum of `payment_amount` across all entries
pub fn sum_payment_amount(entries: &[PaymentEntry]) -> Money {
    entries.iter().map(|e| e.payment_amount).sum()
}

/// What stays outstanding after the current payments
pub fn sum_remaining_due(entries: &[PaymentEntry]) -> Money {
    entries.iter().map(PaymentEntry::remaining_due).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sums_are_zero() {
        assert_eq!(sum_due_amount(&[]), Money::zero());
        assert_eq!(sum_payment_amount(&[]), Money::zero());
        assert_eq!(sum_remaining_due(&[]), Money::zero());
    }

    #[test]
    fn test_sums() {
        let entries = vec![
            PaymentEntry::with_payment("1", Money::from_cents(10000), Money::from_cents(10000)),
            PaymentEntry::with_payment("2", Money::from_cents(5000), Money::from_cents(2000)),
            PaymentEntry::new("3", Money::from_cents(1)),
        ];

        assert_eq!(sum_due_amount(&entries), Money::from_cents(15001));
        assert_eq!(sum_payment_amount(&entries), Money::from_cents(12000));
        assert_eq!(sum_remaining_due(&entries), Money::from_cents(3001));
    }

    #[test]
    fn test_large_sums_do_not_overflow() {
        let entries: Vec<_> = (0..200)
            .map(|i| PaymentEntry::with_payment(i.to_string().as_str(), Money::MAX, Money::MAX))
            .collect();

        let due = sum_due_amount(&entries);
        assert_eq!(due, Money::from_cents(i64::MAX));
        assert_eq!(sum_payment_amount(&entries), due);
        assert_eq!(sum_remaining_due(&entries), Money::zero());
    }
}
