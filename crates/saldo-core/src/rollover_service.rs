//! Rollover of recurring rules into posted transactions.
//!
//! Converts elapsed calendar time into concrete transaction instances,
//! advancing each rule's schedule pointer without gaps or duplicates.

use chrono::NaiveDate;
use tracing::warn;

use saldo_domain::{Journal, RecurringRule, TransactionInstance};

/// Most occurrences materialized per rule in a single pass. A rule further
/// behind than this resumes catch-up on the next pass instead of blocking.
pub const CATCH_UP_CEILING: usize = 12;

/// Result of advancing a set of rules across elapsed time.
#[derive(Debug, Clone, Default)]
pub struct RolloverOutcome {
    /// Newly materialized instances, in rule order, chronological per rule.
    pub instances: Vec<TransactionInstance>,
    /// Every input rule, with due pointers advanced where applicable.
    pub rules: Vec<RecurringRule>,
}

impl RolloverOutcome {
    /// Returns `true` when the pass materialized nothing.
    pub fn is_noop(&self) -> bool {
        self.instances.is_empty()
    }
}

pub struct RolloverService;

impl RolloverService {
    /// Materializes every due occurrence for each rule and advances its
    /// `next_due_date` pointer past the dates produced.
    ///
    /// Pure: inputs are never mutated; the caller applies the returned
    /// updates. Running `advance` twice with the same `today` is idempotent.
    pub fn advance(rules: &[RecurringRule], today: NaiveDate) -> RolloverOutcome {
        let mut outcome = RolloverOutcome {
            instances: Vec::new(),
            rules: Vec::with_capacity(rules.len()),
        };
        for rule in rules {
            let (instances, updated) = Self::advance_rule(rule, today);
            outcome.instances.extend(instances);
            outcome.rules.push(updated);
        }
        outcome
    }

    /// Rolls a journal forward to `today`, posting due occurrences in place.
    /// Returns the number of transactions posted.
    pub fn run(journal: &mut Journal, today: NaiveDate) -> usize {
        let outcome = Self::advance(&journal.rules, today);
        if outcome.is_noop() {
            return 0;
        }
        let posted = outcome.instances.len();
        journal.rules = outcome.rules;
        journal.transactions.extend(outcome.instances);
        journal.touch();
        posted
    }

    fn advance_rule(
        rule: &RecurringRule,
        today: NaiveDate,
    ) -> (Vec<TransactionInstance>, RecurringRule) {
        let mut updated = rule.clone();
        let mut instances = Vec::new();
        // One-shot rules are already fully materialized and never advance.
        while updated.is_due(today) {
            if instances.len() == CATCH_UP_CEILING {
                warn!(
                    rule = %updated.id,
                    next_due = %updated.next_due_date,
                    "catch-up ceiling reached; rule resumes on the next pass"
                );
                break;
            }
            let due = updated.next_due_date;
            instances.push(TransactionInstance::from_rule(&updated, due));
            match updated.frequency.next_date(due) {
                Some(next) => updated.next_due_date = next,
                None => break,
            }
        }
        (instances, updated)
    }
}
