//! Month-end projection combining observed run-rate with scheduled
//! obligations still due before the month closes.

use chrono::{Datelike, NaiveDate};

use saldo_domain::{
    last_day_of_month, Amounted, EntryKind, ForecastResult, RecurringRule, TransactionInstance,
    TrendFlag,
};

/// Hard stop for the per-rule occurrence scan. The month-end bound already
/// terminates the walk; this guards a rule whose pointer lies far in the past.
const PENDING_SCAN_GUARD: usize = 512;

pub struct ForecastService;

impl ForecastService {
    /// Projects the month-end spend total for the month containing `today`.
    ///
    /// `month_expenses` must already be narrowed to expense instances dated
    /// in `today`'s month (see `Journal::expenses_for_month`); no
    /// re-filtering happens here. Returns `None` only for the degenerate
    /// day-of-month case, which cannot occur for a valid date.
    pub fn project(
        month_expenses: &[TransactionInstance],
        rules: &[RecurringRule],
        today: NaiveDate,
        budget_limit: f64,
    ) -> Option<ForecastResult> {
        let day_of_month = today.day();
        if day_of_month == 0 {
            return None;
        }

        let observed_total: f64 = month_expenses.iter().map(Amounted::amount).sum();
        let daily_average = observed_total / f64::from(day_of_month);
        let month_end = last_day_of_month(today);
        let days_remaining = month_end.day() - day_of_month;
        let projected_month_total = observed_total + daily_average * f64::from(days_remaining);

        Some(ForecastResult {
            projected_month_total,
            trend: TrendFlag::from_projection(projected_month_total, budget_limit),
            daily_average,
            days_remaining,
            pending_recurring_total: Self::pending_recurring_total(rules, today, month_end),
            observed_total,
        })
    }

    /// Sums the not-yet-posted occurrences of expense rules that land inside
    /// the remainder of the month: strictly after `today`, on or before
    /// `month_end`. A weekly rule can contribute several times.
    ///
    /// One-shot rules are skipped: their single occurrence is materialized at
    /// entry time and already counted in the observed history.
    fn pending_recurring_total(
        rules: &[RecurringRule],
        today: NaiveDate,
        month_end: NaiveDate,
    ) -> f64 {
        let mut pending = 0.0;
        for rule in rules {
            if rule.kind != EntryKind::Expense || !rule.frequency.is_recurring() {
                continue;
            }
            let mut occurrence = rule.next_due_date;
            let mut guard = 0usize;
            while occurrence <= month_end {
                if occurrence > today {
                    pending += rule.amount();
                }
                guard += 1;
                if guard >= PENDING_SCAN_GUARD {
                    break;
                }
                match rule.frequency.next_date(occurrence) {
                    Some(next) => occurrence = next,
                    None => break,
                }
            }
        }
        pending
    }
}
