#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

// ── Expense ───────────────────────────────────────────────────

#[test]
fn test_expense_new_defaults() {
    let e = Expense::new("Rent".into(), dec!(1200), 5);
    assert!(e.id.is_none());
    assert_eq!(e.name, "Rent");
    assert_eq!(e.amount, dec!(1200));
    assert_eq!(e.day_of_month, 5);
    assert!(e.is_active);
}

#[test]
fn test_fixed_vs_variable() {
    let bill = Expense::new("Rent".into(), dec!(1200), 5);
    assert!(bill.is_fixed());
    assert!(!bill.is_variable());

    let groceries = Expense::new("Groceries".into(), dec!(600), 0);
    assert!(!groceries.is_fixed());
    assert!(groceries.is_variable());
}

#[test]
fn test_normalized_empty_name() {
    let e = Expense::new(String::new(), dec!(10), 1).normalized();
    assert_eq!(e.name, expense::DEFAULT_NAME);

    let e = Expense::new("   ".into(), dec!(10), 1).normalized();
    assert_eq!(e.name, expense::DEFAULT_NAME);
}

#[test]
fn test_normalized_trims_name() {
    let e = Expense::new("  Rent  ".into(), dec!(10), 1).normalized();
    assert_eq!(e.name, "Rent");
}

#[test]
fn test_normalized_negative_amount() {
    let e = Expense::new("Bad".into(), dec!(-50), 1).normalized();
    assert_eq!(e.amount, Decimal::ZERO);
}

#[test]
fn test_normalized_day_clamped() {
    let e = Expense::new("Late".into(), dec!(10), 99).normalized();
    assert_eq!(e.day_of_month, expense::MAX_DAY_OF_MONTH);
}

#[test]
fn test_normalized_keeps_valid_rows() {
    let e = Expense::new("Rent".into(), dec!(1200.50), 5).normalized();
    assert_eq!(e.name, "Rent");
    assert_eq!(e.amount, dec!(1200.50));
    assert_eq!(e.day_of_month, 5);
    assert!(e.is_active);
}

// ── WalletParams / GoalParams ─────────────────────────────────

#[test]
fn test_wallet_defaults() {
    let w = WalletParams::default();
    assert_eq!(w.starting_balance, dec!(2000));
    assert_eq!(w.salary_day, 1);
    assert_eq!(w.salary_amount, dec!(3500));
}

#[test]
fn test_goal_defaults() {
    let g = GoalParams::default();
    assert_eq!(g.cost, dec!(2000));
    assert_eq!(g.day_offset, 60);
}
