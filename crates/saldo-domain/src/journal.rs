//! Journal container holding a user's transactions and recurring rules.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{common::*, rule::RecurringRule, transaction::TransactionInstance};

/// Named snapshot of everything the engine operates on: posted transactions
/// plus the recurring rules that generate new ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Journal {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub rules: Vec<RecurringRule>,
    #[serde(default)]
    pub transactions: Vec<TransactionInstance>,
}

impl Journal {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            created_at: now,
            updated_at: now,
            rules: Vec::new(),
            transactions: Vec::new(),
        }
    }

    /// Marks the journal as modified.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn add_rule(&mut self, rule: RecurringRule) -> Uuid {
        let id = rule.id;
        self.rules.push(rule);
        self.touch();
        id
    }

    /// Removes the rule, returning whether it existed. Transactions already
    /// posted from it keep their provenance id and are not deleted.
    pub fn remove_rule(&mut self, id: Uuid) -> bool {
        let before = self.rules.len();
        self.rules.retain(|rule| rule.id != id);
        let removed = self.rules.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    pub fn add_transaction(&mut self, transaction: TransactionInstance) -> Uuid {
        let id = transaction.id;
        self.transactions.push(transaction);
        self.touch();
        id
    }

    pub fn rule(&self, id: Uuid) -> Option<&RecurringRule> {
        find_by_id(&self.rules, id)
    }

    pub fn transaction(&self, id: Uuid) -> Option<&TransactionInstance> {
        find_by_id(&self.transactions, id)
    }

    /// Transactions sorted chronologically by ordering key.
    pub fn transactions_by_date(&self) -> Vec<TransactionInstance> {
        let mut sorted = self.transactions.clone();
        sorted.sort_by_key(TransactionInstance::ordering_key);
        sorted
    }

    /// Expense transactions dated in the calendar month containing
    /// `reference`. This is the pre-filter the forecast contract expects
    /// callers to apply.
    pub fn expenses_for_month(&self, reference: NaiveDate) -> Vec<TransactionInstance> {
        self.transactions
            .iter()
            .filter(|txn| {
                txn.kind == EntryKind::Expense
                    && txn.date.year() == reference.year()
                    && txn.date.month() == reference.month()
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{EntryKind, Frequency};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(amount: f64, d: NaiveDate) -> TransactionInstance {
        TransactionInstance::new(amount, "Misc", "Test", EntryKind::Expense, d).unwrap()
    }

    #[test]
    fn expenses_for_month_filters_kind_and_month() {
        let mut journal = Journal::new("Household");
        journal.add_transaction(expense(10.0, date(2024, 4, 5)));
        journal.add_transaction(expense(20.0, date(2024, 3, 28)));
        journal.add_transaction(
            TransactionInstance::new(500.0, "Salary", "Payday", EntryKind::Income, date(2024, 4, 1))
                .unwrap(),
        );

        let april = journal.expenses_for_month(date(2024, 4, 20));
        assert_eq!(april.len(), 1);
        assert_eq!(april[0].amount, 10.0);
    }

    #[test]
    fn transactions_by_date_sorts_chronologically() {
        let mut journal = Journal::new("Sorting");
        journal.add_transaction(expense(1.0, date(2024, 4, 20)));
        journal.add_transaction(expense(2.0, date(2024, 4, 1)));
        journal.add_transaction(expense(3.0, date(2024, 4, 10)));

        let sorted = journal.transactions_by_date();
        let dates: Vec<NaiveDate> = sorted.iter().map(|txn| txn.date).collect();
        assert_eq!(
            dates,
            vec![date(2024, 4, 1), date(2024, 4, 10), date(2024, 4, 20)]
        );
    }

    #[test]
    fn remove_rule_keeps_posted_transactions() {
        let mut journal = Journal::new("Lifecycle");
        let rule = RecurringRule::new(
            15.0,
            "Subscriptions",
            "Music",
            EntryKind::Expense,
            Frequency::Monthly,
            date(2024, 1, 1),
        )
        .unwrap();
        let rule_id = journal.add_rule(rule.clone());
        journal.add_transaction(TransactionInstance::from_rule(&rule, date(2024, 1, 1)));

        assert!(journal.remove_rule(rule_id));
        assert!(!journal.remove_rule(rule_id));
        assert!(journal.rule(rule_id).is_none());
        assert_eq!(journal.transactions.len(), 1);
        assert_eq!(journal.transactions[0].source_rule, Some(rule_id));
    }
}
