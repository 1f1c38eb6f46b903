use chrono::NaiveDate;

use saldo_core::{ForecastService, RolloverService};
use saldo_domain::{
    EntryKind, Frequency, Journal, RecurringRule, TransactionInstance, TrendFlag,
};

fn sample_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn expense(amount: f64, date: NaiveDate) -> TransactionInstance {
    TransactionInstance::new(amount, "Groceries", "Weekly shop", EntryKind::Expense, date)
        .expect("valid transaction")
}

fn expense_rule(amount: f64, frequency: Frequency, next_due: NaiveDate) -> RecurringRule {
    RecurringRule::new(
        amount,
        "Bills",
        "Utilities",
        EntryKind::Expense,
        frequency,
        next_due,
    )
    .expect("valid rule")
}

#[test]
fn projects_from_observed_daily_run_rate() {
    // 300 spent by day 10 of a 30-day month
    let expenses = vec![
        expense(100.0, sample_date(2024, 9, 2)),
        expense(100.0, sample_date(2024, 9, 6)),
        expense(100.0, sample_date(2024, 9, 10)),
    ];

    let forecast = ForecastService::project(&expenses, &[], sample_date(2024, 9, 10), 1000.0)
        .expect("forecast available");

    assert_eq!(forecast.observed_total, 300.0);
    assert_eq!(forecast.daily_average, 30.0);
    assert_eq!(forecast.days_remaining, 20);
    assert_eq!(forecast.projected_month_total, 900.0);
    assert_eq!(forecast.trend, TrendFlag::UnderBudget);
}

#[test]
fn trend_flips_only_when_projection_exceeds_the_limit() {
    let expenses = vec![expense(300.0, sample_date(2024, 9, 10))];
    let today = sample_date(2024, 9, 10);

    let tight = ForecastService::project(&expenses, &[], today, 800.0).unwrap();
    assert_eq!(tight.trend, TrendFlag::OverBudget);
    assert!(tight.trend.is_over());

    // projection equal to the limit stays under
    let exact = ForecastService::project(&expenses, &[], today, 900.0).unwrap();
    assert_eq!(exact.trend, TrendFlag::UnderBudget);
}

#[test]
fn weekly_rule_contributes_every_remaining_occurrence() {
    // due tomorrow, then three more before the month ends
    let rules = vec![expense_rule(
        25.0,
        Frequency::Weekly,
        sample_date(2024, 9, 3),
    )];

    let forecast =
        ForecastService::project(&[], &rules, sample_date(2024, 9, 2), 1000.0).unwrap();
    assert_eq!(forecast.pending_recurring_total, 100.0);
}

#[test]
fn daily_rule_contributes_each_remaining_day() {
    let rules = vec![expense_rule(4.5, Frequency::Daily, sample_date(2024, 9, 28))];

    let forecast =
        ForecastService::project(&[], &rules, sample_date(2024, 9, 27), 1000.0).unwrap();
    // Sep 28, 29, 30
    assert_eq!(forecast.pending_recurring_total, 13.5);
}

#[test]
fn pending_ignores_income_one_shot_and_out_of_month_rules() {
    let income = RecurringRule::new(
        2000.0,
        "Salary",
        "Payday",
        EntryKind::Income,
        Frequency::Monthly,
        sample_date(2024, 9, 25),
    )
    .unwrap();
    let once = expense_rule(80.0, Frequency::Once, sample_date(2024, 9, 20));
    let next_month = expense_rule(60.0, Frequency::Monthly, sample_date(2024, 10, 1));

    let forecast = ForecastService::project(
        &[],
        &[income, once, next_month],
        sample_date(2024, 9, 10),
        1000.0,
    )
    .unwrap();
    assert_eq!(forecast.pending_recurring_total, 0.0);
}

#[test]
fn occurrences_on_or_before_today_do_not_count_as_pending() {
    // the invariant says rollover already handled these; pending looks
    // strictly ahead
    let rules = vec![expense_rule(
        40.0,
        Frequency::Monthly,
        sample_date(2024, 9, 10),
    )];

    let forecast =
        ForecastService::project(&[], &rules, sample_date(2024, 9, 10), 1000.0).unwrap();
    assert_eq!(forecast.pending_recurring_total, 0.0);
}

#[test]
fn empty_history_projects_zero_run_rate() {
    let rules = vec![expense_rule(
        15.0,
        Frequency::Monthly,
        sample_date(2024, 9, 20),
    )];

    let forecast =
        ForecastService::project(&[], &rules, sample_date(2024, 9, 5), 500.0).unwrap();
    assert_eq!(forecast.observed_total, 0.0);
    assert_eq!(forecast.daily_average, 0.0);
    assert_eq!(forecast.projected_month_total, 0.0);
    assert_eq!(forecast.pending_recurring_total, 15.0);
    assert_eq!(forecast.trend, TrendFlag::UnderBudget);
}

#[test]
fn forecast_leaves_its_inputs_untouched() {
    let expenses = vec![expense(120.0, sample_date(2024, 9, 4))];
    let rules = vec![expense_rule(
        30.0,
        Frequency::Weekly,
        sample_date(2024, 9, 12),
    )];
    let expenses_snapshot = expenses.clone();
    let rules_snapshot = rules.clone();

    let _ = ForecastService::project(&expenses, &rules, sample_date(2024, 9, 8), 400.0);
    assert_eq!(expenses, expenses_snapshot);
    assert_eq!(rules, rules_snapshot);
}

#[test]
fn rollover_then_forecast_counts_nothing_twice() {
    let mut journal = Journal::new("EndToEnd");
    journal.add_rule(expense_rule(
        50.0,
        Frequency::Weekly,
        sample_date(2024, 9, 2),
    ));
    let today = sample_date(2024, 9, 16);

    // materialize everything due first, as the contract requires
    let posted = RolloverService::run(&mut journal, today);
    assert_eq!(posted, 3);

    let month_expenses = journal.expenses_for_month(today);
    let forecast =
        ForecastService::project(&month_expenses, &journal.rules, today, 1000.0).unwrap();

    // Sep 2, 9, 16 are observed history; Sep 23 and 30 are still pending
    assert_eq!(forecast.observed_total, 150.0);
    assert_eq!(forecast.pending_recurring_total, 100.0);
}
