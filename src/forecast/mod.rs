use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use std::path::Path;

use crate::models::{Expense, GoalParams, WalletParams};

/// Length of the projected window, in days.
pub(crate) const HORIZON_DAYS: u32 = 180;

/// Variable spending is smoothed over a flat 30 days regardless of the true
/// month length. A known approximation kept for parity with the numbers the
/// tool has always shown.
const SMOOTHING_DAYS: u32 = 30;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DayBalance {
    pub(crate) date: NaiveDate,
    pub(crate) balance: Decimal,
}

/// Result of one projection run. Recomputed from scratch on every call,
/// never persisted.
#[derive(Debug, Clone)]
pub(crate) struct Forecast {
    /// One entry per projected day, chronological from the anchor date.
    pub(crate) series: Vec<DayBalance>,
    pub(crate) final_balance: Decimal,
    /// Lowest balance seen; the pre-projection starting balance counts.
    pub(crate) min_balance: Decimal,
    /// Date the balance first dips below zero, if it ever does.
    pub(crate) first_shortfall: Option<NaiveDate>,
}

impl Forecast {
    pub(crate) fn is_safe(&self) -> bool {
        self.min_balance >= Decimal::ZERO
    }
}

/// Project a daily balance over `horizon_days` starting at `today`.
///
/// Within each day the flows apply in a fixed order: daily burn, then
/// salary, then fixed bills, then the one-time goal. `today` is injected
/// rather than read from the clock, so identical inputs always produce an
/// identical series.
pub(crate) fn project(
    wallet: &WalletParams,
    goal: &GoalParams,
    expenses: &[Expense],
    today: NaiveDate,
    horizon_days: u32,
) -> Forecast {
    let active: Vec<&Expense> = expenses.iter().filter(|e| e.is_active).collect();
    let fixed: Vec<&Expense> = active.iter().copied().filter(|e| e.is_fixed()).collect();
    let variable_total: Decimal = active
        .iter()
        .filter(|e| e.is_variable())
        .map(|e| e.amount)
        .sum();
    let daily_burn = variable_total / Decimal::from(SMOOTHING_DAYS);

    let mut balance = wallet.starting_balance;
    let mut min_balance = balance;
    let mut first_shortfall = None;
    let mut series = Vec::with_capacity(horizon_days as usize);

    for i in 0..horizon_days {
        let date = today + Duration::days(i64::from(i));
        let day = date.day();

        balance -= daily_burn;
        if day == wallet.salary_day {
            balance += wallet.salary_amount;
        }
        let bills_due: Decimal = fixed
            .iter()
            .filter(|e| e.day_of_month == day)
            .map(|e| e.amount)
            .sum();
        balance -= bills_due;
        if i == goal.day_offset {
            balance -= goal.cost;
        }

        if balance < min_balance {
            min_balance = balance;
        }
        if balance < Decimal::ZERO && first_shortfall.is_none() {
            first_shortfall = Some(date);
        }
        series.push(DayBalance { date, balance });
    }

    let final_balance = series
        .last()
        .map(|d| d.balance)
        .unwrap_or(wallet.starting_balance);

    Forecast {
        series,
        final_balance,
        min_balance,
        first_shortfall,
    }
}

/// Write a projected series to CSV as `date,balance` rows.
/// Returns the number of rows written.
pub(crate) fn write_series_csv(path: &Path, forecast: &Forecast) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    writer.write_record(["date", "balance"])?;
    for day in &forecast.series {
        writer.write_record([day.date.format("%Y-%m-%d").to_string(), day.balance.to_string()])?;
    }
    writer.flush().context("Failed to flush CSV file")?;
    Ok(forecast.series.len())
}
