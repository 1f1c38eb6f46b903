//! Derived forecast types produced by the projection engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Month-end spending projection. Recomputed on demand, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastResult {
    pub projected_month_total: f64,
    pub trend: TrendFlag,
    pub daily_average: f64,
    pub days_remaining: u32,
    pub pending_recurring_total: f64,
    pub observed_total: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Signals whether the projection lands over or under the budget limit.
pub enum TrendFlag {
    OverBudget,
    UnderBudget,
}

impl TrendFlag {
    pub fn from_projection(projected: f64, budget_limit: f64) -> Self {
        if projected > budget_limit {
            TrendFlag::OverBudget
        } else {
            TrendFlag::UnderBudget
        }
    }

    pub fn is_over(self) -> bool {
        matches!(self, TrendFlag::OverBudget)
    }
}

impl fmt::Display for TrendFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TrendFlag::OverBudget => "Over Budget",
            TrendFlag::UnderBudget => "Under Budget",
        };
        f.write_str(label)
    }
}
