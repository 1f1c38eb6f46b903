//! Domain model for concrete, dated transactions.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{common::*, rule::RecurringRule};

/// Marker appended to descriptions of transactions posted from a rule.
const RECURRING_MARKER: &str = "(recurring)";

/// A single dated transaction, either entered manually or materialized from
/// a recurring rule. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionInstance {
    pub id: Uuid,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub kind: EntryKind,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_rule: Option<Uuid>,
}

impl TransactionInstance {
    pub fn new(
        amount: f64,
        category: impl Into<String>,
        description: impl Into<String>,
        kind: EntryKind,
        date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: Uuid::new_v4(),
            amount: validate_amount(amount)?,
            category: category.into(),
            description: description.into(),
            kind,
            date,
            source_rule: None,
        })
    }

    /// Materializes one occurrence of `rule` dated `date`.
    pub fn from_rule(rule: &RecurringRule, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount: rule.amount,
            category: rule.category.clone(),
            description: format!("{} {}", rule.description, RECURRING_MARKER),
            kind: rule.kind,
            date,
            source_rule: Some(rule.id),
        }
    }

    /// Chronological sort key derived from the transaction date.
    pub fn ordering_key(&self) -> i32 {
        self.date.num_days_from_ce()
    }

    /// Returns `true` when the transaction was posted from a recurring rule.
    pub fn is_recurring(&self) -> bool {
        self.source_rule.is_some()
    }
}

impl Identifiable for TransactionInstance {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for TransactionInstance {
    fn amount(&self) -> f64 {
        self.amount
    }
}
