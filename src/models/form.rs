//! Payment form model
//!
//! A payment form is the in-memory session a user edits: the kind of payment,
//! the declared "full amount" and the entry lines it is spread across. Edits
//! are expressed as a [`FormUpdate`] of field changes, so whatever renders
//! the form decides when and how to apply them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::entry::PaymentEntry;
use super::ids::FormId;
use super::money::Money;

/// Which side of the ledger the payment is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentKind {
    /// Paying vendor bills
    #[default]
    Made,
    /// Receiving payment against customer invoices
    Received,
}

impl PaymentKind {
    /// Heading for the big number at the top of the form
    pub fn amount_label(&self) -> &'static str {
        match self {
            Self::Made => "Payment made",
            Self::Received => "Amount received",
        }
    }

    /// Caption of the full-amount shortcut
    pub fn full_amount_label(&self) -> &'static str {
        match self {
            Self::Made => "Pay full amount",
            Self::Received => "Receive full amount",
        }
    }

    /// What the entry lines are called
    pub fn document_label(&self) -> &'static str {
        match self {
            Self::Made => "Bill",
            Self::Received => "Invoice",
        }
    }
}

impl fmt::Display for PaymentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Made => write!(f, "made"),
            Self::Received => write!(f, "received"),
        }
    }
}

impl FromStr for PaymentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "made" | "payment-made" | "payable" => Ok(Self::Made),
            "received" | "receive" | "payment-receive" | "receivable" => Ok(Self::Received),
            other => Err(format!("Unknown payment kind: {}", other)),
        }
    }
}

/// A single field change produced by a form operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    Entries(Vec<PaymentEntry>),
    FullAmount(Money),
}

/// The set of field changes a form operation wants applied
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormUpdate {
    pub changes: Vec<FieldChange>,
}

impl FormUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_entries(mut self, entries: Vec<PaymentEntry>) -> Self {
        self.changes.push(FieldChange::Entries(entries));
        self
    }

    pub fn set_full_amount(mut self, amount: Money) -> Self {
        self.changes.push(FieldChange::FullAmount(amount));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// The entry set this update would install, if any
    pub fn entries(&self) -> Option<&[PaymentEntry]> {
        self.changes.iter().rev().find_map(|change| match change {
            FieldChange::Entries(entries) => Some(entries.as_slice()),
            FieldChange::FullAmount(_) => None,
        })
    }

    /// The full amount this update would install, if any
    pub fn full_amount(&self) -> Option<Money> {
        self.changes.iter().rev().find_map(|change| match change {
            FieldChange::FullAmount(amount) => Some(*amount),
            FieldChange::Entries(_) => None,
        })
    }
}

/// In-memory state of a payment form session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentForm {
    pub id: FormId,

    #[serde(default)]
    pub kind: PaymentKind,

    /// Total the user declared for this payment
    #[serde(default)]
    pub full_amount: Money,

    /// Entry lines in backend order; earlier lines are filled first
    pub entries: Vec<PaymentEntry>,
}

impl PaymentForm {
    /// Start a form session over a freshly loaded entry set
    pub fn new(kind: PaymentKind, entries: Vec<PaymentEntry>) -> Self {
        Self {
            id: FormId::new(),
            kind,
            full_amount: Money::zero(),
            entries,
        }
    }

    /// Resume a form from a saved entry set
    ///
    /// The declared full amount starts out as the sum of the saved payments.
    pub fn from_snapshot(kind: PaymentKind, entries: Vec<PaymentEntry>) -> Self {
        let full_amount = entries.iter().map(|e| e.payment_amount).sum();
        Self {
            full_amount,
            ..Self::new(kind, entries)
        }
    }

    /// Return the form with the update applied; `self` is left as it was
    pub fn apply(&self, update: &FormUpdate) -> Self {
        let mut next = self.clone();
        for change in &update.changes {
            match change {
                FieldChange::Entries(entries) => next.entries = entries.clone(),
                FieldChange::FullAmount(amount) => next.full_amount = *amount,
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_form() -> PaymentForm {
        PaymentForm::new(
            PaymentKind::Received,
            vec![
                PaymentEntry::new("1", Money::from_cents(10000)),
                PaymentEntry::new("2", Money::from_cents(5000)),
            ],
        )
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(PaymentKind::Made.full_amount_label(), "Pay full amount");
        assert_eq!(PaymentKind::Received.amount_label(), "Amount received");
        assert_eq!(PaymentKind::Received.document_label(), "Invoice");
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("made".parse::<PaymentKind>(), Ok(PaymentKind::Made));
        assert_eq!("Receivable".parse::<PaymentKind>(), Ok(PaymentKind::Received));
        assert!("refund".parse::<PaymentKind>().is_err());
    }

    #[test]
    fn test_apply_update() {
        let form = sample_form();
        let paid: Vec<_> = form
            .entries
            .iter()
            .map(|e| e.paying(e.due_amount))
            .collect();
        let update = FormUpdate::new()
            .set_entries(paid.clone())
            .set_full_amount(Money::from_cents(15000));

        let next = form.apply(&update);

        assert_eq!(next.entries, paid);
        assert_eq!(next.full_amount, Money::from_cents(15000));
        assert_eq!(next.id, form.id);
        // Original form is untouched
        assert_eq!(form.full_amount, Money::zero());
        assert!(form.entries.iter().all(|e| e.payment_amount.is_zero()));
    }

    #[test]
    fn test_from_snapshot_declares_saved_payments() {
        let form = PaymentForm::from_snapshot(
            PaymentKind::Made,
            vec![
                PaymentEntry::with_payment("1", Money::from_cents(10000), Money::from_cents(2500)),
                PaymentEntry::with_payment("2", Money::from_cents(5000), Money::from_cents(1000)),
            ],
        );

        assert_eq!(form.full_amount, Money::from_cents(3500));
        assert_eq!(PaymentForm::new(PaymentKind::Made, form.entries).full_amount, Money::zero());
    }

    #[test]
    fn test_update_accessors() {
        let update = FormUpdate::new().set_full_amount(Money::from_cents(1));
        assert_eq!(update.full_amount(), Some(Money::from_cents(1)));
        assert!(update.entries().is_none());
        assert!(FormUpdate::new().is_empty());
    }

    #[test]
    fn test_form_serialization() {
        let form = sample_form();
        let json = serde_json::to_string(&form).unwrap();
        let back: PaymentForm = serde_json::from_str(&json).unwrap();
        assert_eq!(back, form);
    }
}
