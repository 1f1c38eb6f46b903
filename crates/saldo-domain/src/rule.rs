//! Domain model for recurring payment rules.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{common::*, transaction::TransactionInstance};

/// A user-defined recurring payment template. `next_due_date` always points
/// at the earliest occurrence that has not been materialized yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurringRule {
    pub id: Uuid,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub kind: EntryKind,
    pub frequency: Frequency,
    pub next_due_date: NaiveDate,
}

impl RecurringRule {
    pub fn new(
        amount: f64,
        category: impl Into<String>,
        description: impl Into<String>,
        kind: EntryKind,
        frequency: Frequency,
        next_due_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: Uuid::new_v4(),
            amount: validate_amount(amount)?,
            category: category.into(),
            description: description.into(),
            kind,
            frequency,
            next_due_date,
        })
    }

    /// Derives a rule from a transaction the user opted into recurrence.
    ///
    /// The originating transaction is already posted, so the schedule pointer
    /// starts one period later. One-shot rules keep the original date and
    /// never advance.
    pub fn from_instance(
        instance: &TransactionInstance,
        frequency: Frequency,
    ) -> Result<Self, ValidationError> {
        let next_due_date = frequency.next_date(instance.date).unwrap_or(instance.date);
        Self::new(
            instance.amount,
            instance.category.clone(),
            instance.description.clone(),
            instance.kind,
            frequency,
            next_due_date,
        )
    }

    /// Returns `true` when the rule still has an unmaterialized occurrence on
    /// or before `today`.
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.frequency.is_recurring() && self.next_due_date <= today
    }
}

impl Identifiable for RecurringRule {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for RecurringRule {
    fn amount(&self) -> f64 {
        self.amount
    }
}
