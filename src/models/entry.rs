//! Payment entry model
//!
//! One outstanding payable or receivable line (a bill or an invoice) inside a
//! payment form. The backend owns `due_amount`; allocation only ever changes
//! `payment_amount`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::ids::EntryId;
use super::money::Money;

/// An outstanding obligation being paid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentEntry {
    /// Backend identifier, unique within an entry set
    pub id: EntryId,

    /// Total outstanding balance of the bill or invoice
    pub due_amount: Money,

    /// Amount currently allocated to this entry
    #[serde(default)]
    pub payment_amount: Money,

    /// Bill or invoice number, for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,

    /// Bill or invoice date, for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl PaymentEntry {
    /// Create an entry with nothing allocated yet
    pub fn new(id: impl Into<EntryId>, due_amount: Money) -> Self {
        Self {
            id: id.into(),
            due_amount,
            payment_amount: Money::zero(),
            document_number: None,
            document_date: None,
            memo: None,
        }
    }

    /// Create an entry with an existing allocation
    pub fn with_payment(id: impl Into<EntryId>, due_amount: Money, payment_amount: Money) -> Self {
        Self {
            payment_amount,
            ..Self::new(id, due_amount)
        }
    }

    /// Copy of this entry with a different allocated amount
    pub fn paying(&self, payment_amount: Money) -> Self {
        Self {
            payment_amount,
            ..self.clone()
        }
    }

    /// What is still owed after this entry's payment
    pub fn remaining_due(&self) -> Money {
        self.due_amount.saturating_sub(self.payment_amount)
    }

    pub fn is_fully_paid(&self) -> bool {
        self.payment_amount == self.due_amount
    }

    /// Label shown to users: document number when known, else the id
    pub fn label(&self) -> &str {
        self.document_number
            .as_deref()
            .unwrap_or_else(|| self.id.as_str())
    }

    /// Validate the entry
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.id.as_str().trim().is_empty() {
            return Err(EntryValidationError::MissingId);
        }

        if self.due_amount.is_negative() {
            return Err(EntryValidationError::NegativeDue(self.id.clone(), self.due_amount));
        }

        if self.payment_amount.is_negative() {
            return Err(EntryValidationError::NegativePayment(
                self.id.clone(),
                self.payment_amount,
            ));
        }

        if self.payment_amount > self.due_amount {
            return Err(EntryValidationError::PaymentExceedsDue {
                id: self.id.clone(),
                payment: self.payment_amount,
                due: self.due_amount,
            });
        }

        Ok(())
    }
}

/// Validate a whole entry set: each entry on its own, plus unique ids
pub fn validate_entries(entries: &[PaymentEntry]) -> Result<(), EntryValidationError> {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        entry.validate()?;
        if !seen.insert(&entry.id) {
            return Err(EntryValidationError::DuplicateId(entry.id.clone()));
        }
    }
    Ok(())
}

/// Validation errors for payment entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    MissingId,
    DuplicateId(EntryId),
    NegativeDue(EntryId, Money),
    NegativePayment(EntryId, Money),
    PaymentExceedsDue {
        id: EntryId,
        payment: Money,
        due: Money,
    },
}

impl fmt::Display for EntryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingId => write!(f, "Entry id cannot be empty"),
            Self::DuplicateId(id) => write!(f, "Entry id '{}' appears more than once", id),
            Self::NegativeDue(id, due) => {
                write!(f, "Entry '{}' has a negative due amount: {}", id, due)
            }
            Self::NegativePayment(id, payment) => {
                write!(f, "Entry '{}' has a negative payment amount: {}", id, payment)
            }
            Self::PaymentExceedsDue { id, payment, due } => write!(
                f,
                "Entry '{}' payment {} exceeds its due amount {}",
                id, payment, due
            ),
        }
    }
}

impl std::error::Error for EntryValidationError {}
