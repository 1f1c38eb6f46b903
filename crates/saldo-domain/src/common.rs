//! Shared traits, calendar arithmetic, and enums for scheduling primitives.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exposes a stable identifier for entities stored in a journal.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Looks up an entity by identifier within a journal collection.
pub fn find_by_id<T: Identifiable>(items: &[T], id: Uuid) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Distinguishes money coming in from money going out.
pub enum EntryKind {
    Income,
    Expense,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntryKind::Income => "Income",
            EntryKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Enumerates the cadences a recurring rule can carry.
pub enum Frequency {
    Once,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Calculates the occurrence after `from`, or `None` for one-shot rules.
    ///
    /// Monthly and yearly steps clamp to the end of shorter months. The clamp
    /// is stateless, so Jan 31 -> Feb 28 -> Mar 28.
    pub fn next_date(self, from: NaiveDate) -> Option<NaiveDate> {
        match self {
            Frequency::Once => None,
            Frequency::Daily => Some(from + Duration::days(1)),
            Frequency::Weekly => Some(from + Duration::weeks(1)),
            Frequency::Monthly => Some(add_one_month(from)),
            Frequency::Yearly => Some(add_one_year(from)),
        }
    }

    /// Returns `true` when the cadence repeats.
    pub fn is_recurring(self) -> bool {
        !matches!(self, Frequency::Once)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Frequency::Once => "Once",
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
            Frequency::Yearly => "Yearly",
        };
        f.write_str(label)
    }
}

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    (first_next - Duration::days(1)).day()
}

/// Last calendar day of the month containing `date`.
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let day = days_in_month(date.year(), date.month());
    NaiveDate::from_ymd_opt(date.year(), date.month(), day).unwrap()
}

fn add_one_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn add_one_year(date: NaiveDate) -> NaiveDate {
    let year = date.year() + 1;
    let day = date.day().min(days_in_month(year, date.month()));
    NaiveDate::from_ymd_opt(year, date.month(), day).unwrap()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Errors raised when constructing domain values from raw input.
pub enum ValidationError {
    NegativeAmount,
    NonFiniteAmount,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NegativeAmount => f.write_str("amount must not be negative"),
            ValidationError::NonFiniteAmount => f.write_str("amount must be a finite number"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validates a monetary amount before it enters the domain.
pub fn validate_amount(amount: f64) -> Result<f64, ValidationError> {
    if !amount.is_finite() {
        return Err(ValidationError::NonFiniteAmount);
    }
    if amount < 0.0 {
        return Err(ValidationError::NegativeAmount);
    }
    Ok(amount)
}
