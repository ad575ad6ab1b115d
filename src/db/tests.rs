#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;

// ── Seeding ───────────────────────────────────────────────────

#[test]
fn test_demo_expenses_seeded() {
    let db = Database::open_in_memory().unwrap();
    let expenses = db.get_expenses().unwrap();
    assert_eq!(expenses.len(), 4);
    assert!(expenses.iter().any(|e| e.name == "Rent / Mortgage"));
    assert!(expenses.iter().any(|e| e.name == "Groceries & Food" && e.is_variable()));
    assert!(expenses.iter().all(|e| e.is_active));
}

#[test]
fn test_demo_expenses_not_reseeded() {
    let mut db = Database::open_in_memory().unwrap();
    let before = db.get_expenses().unwrap().len();
    db.seed_demo_expenses().unwrap();
    assert_eq!(db.get_expenses().unwrap().len(), before);
}

#[test]
fn test_empty_ledger_stays_empty() {
    // Deleting every row must not trigger another demo seed on later reads.
    let mut db = Database::open_in_memory().unwrap();
    db.replace_expenses(&[]).unwrap();
    assert_eq!(db.get_expenses().unwrap().len(), 0);
    assert_eq!(db.expense_count().unwrap(), 0);
}

// ── Expense CRUD ──────────────────────────────────────────────

#[test]
fn test_expense_insert_and_get() {
    let db = Database::open_in_memory().unwrap();
    let e = Expense::new("Gym".into(), dec!(45), 12);
    let id = db.insert_expense(&e).unwrap();
    assert!(id > 0);

    let fetched = db.get_expense_by_id(id).unwrap().unwrap();
    assert_eq!(fetched.name, "Gym");
    assert_eq!(fetched.amount, dec!(45));
    assert_eq!(fetched.day_of_month, 12);
    assert!(fetched.is_active);
}

#[test]
fn test_expense_by_id_not_found() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.get_expense_by_id(99999).unwrap().is_none());
}

#[test]
fn test_expense_update() {
    let db = Database::open_in_memory().unwrap();
    let id = db
        .insert_expense(&Expense::new("Gym".into(), dec!(45), 12))
        .unwrap();

    let mut updated = db.get_expense_by_id(id).unwrap().unwrap();
    updated.name = "Climbing Gym".into();
    updated.amount = dec!(60);
    db.update_expense(id, &updated).unwrap();

    let fetched = db.get_expense_by_id(id).unwrap().unwrap();
    assert_eq!(fetched.name, "Climbing Gym");
    assert_eq!(fetched.amount, dec!(60));
}

#[test]
fn test_expense_delete() {
    let db = Database::open_in_memory().unwrap();
    let id = db
        .insert_expense(&Expense::new("Gym".into(), dec!(45), 12))
        .unwrap();
    let before = db.expense_count().unwrap();

    db.delete_expense(id).unwrap();
    assert_eq!(db.expense_count().unwrap(), before - 1);
    assert!(db.get_expense_by_id(id).unwrap().is_none());
}

#[test]
fn test_set_expense_active() {
    let db = Database::open_in_memory().unwrap();
    let id = db
        .insert_expense(&Expense::new("Gym".into(), dec!(45), 12))
        .unwrap();

    db.set_expense_active(id, false).unwrap();
    assert!(!db.get_expense_by_id(id).unwrap().unwrap().is_active);

    db.set_expense_active(id, true).unwrap();
    assert!(db.get_expense_by_id(id).unwrap().unwrap().is_active);
}

#[test]
fn test_expenses_ordered_by_id() {
    let db = Database::open_in_memory().unwrap();
    let expenses = db.get_expenses().unwrap();
    for pair in expenses.windows(2) {
        assert!(pair[0].id < pair[1].id);
    }
}

// ── Replace-all ───────────────────────────────────────────────

#[test]
fn test_replace_expenses() {
    let mut db = Database::open_in_memory().unwrap();
    let new_rows = vec![
        Expense::new("Rent".into(), dec!(900), 1),
        Expense::new("Coffee".into(), dec!(90), 0),
    ];

    let count = db.replace_expenses(&new_rows).unwrap();
    assert_eq!(count, 2);

    let expenses = db.get_expenses().unwrap();
    assert_eq!(expenses.len(), 2);
    assert_eq!(expenses[0].name, "Rent");
    assert_eq!(expenses[1].name, "Coffee");
    // Every row gets a fresh id
    assert!(expenses.iter().all(|e| e.id.is_some()));
}

#[test]
fn test_replace_normalizes_rows() {
    let mut db = Database::open_in_memory().unwrap();
    let sloppy = vec![
        Expense::new(String::new(), dec!(-5), 99),
        Expense::new("  Rent  ".into(), dec!(900), 1),
    ];

    db.replace_expenses(&sloppy).unwrap();
    let expenses = db.get_expenses().unwrap();

    assert_eq!(expenses[0].name, "New Item");
    assert_eq!(expenses[0].amount, Decimal::ZERO);
    assert_eq!(expenses[0].day_of_month, 31);
    assert!(expenses[0].is_active);
    assert_eq!(expenses[1].name, "Rent");
}

#[test]
fn test_insert_normalizes_row() {
    let db = Database::open_in_memory().unwrap();
    let id = db
        .insert_expense(&Expense::new("".into(), dec!(-1), 40))
        .unwrap();
    let fetched = db.get_expense_by_id(id).unwrap().unwrap();
    assert_eq!(fetched.name, "New Item");
    assert_eq!(fetched.amount, Decimal::ZERO);
    assert_eq!(fetched.day_of_month, 31);
}

// ── Decimal precision ─────────────────────────────────────────

#[test]
fn test_decimal_precision_preserved() {
    let db = Database::open_in_memory().unwrap();
    let id = db
        .insert_expense(&Expense::new("Precise".into(), dec!(1234.5678), 3))
        .unwrap();
    let fetched = db.get_expense_by_id(id).unwrap().unwrap();
    assert_eq!(fetched.amount, dec!(1234.5678));
}

#[test]
fn test_large_amounts() {
    let db = Database::open_in_memory().unwrap();
    let id = db
        .insert_expense(&Expense::new("House".into(), dec!(350000.00), 28))
        .unwrap();
    let fetched = db.get_expense_by_id(id).unwrap().unwrap();
    assert_eq!(fetched.amount, dec!(350000.00));
}

// ── Schema migration ──────────────────────────────────────────

#[test]
fn test_schema_version_set() {
    let db = Database::open_in_memory().unwrap();
    let version: i32 = db
        .conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(version, schema::CURRENT_VERSION);
}

#[test]
fn test_double_migrate_idempotent() {
    let mut db = Database::open_in_memory().unwrap();
    db.migrate().unwrap();
    let version: i32 = db
        .conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(version, schema::CURRENT_VERSION);
}

#[test]
fn test_open_on_disk_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("peekin.db");

    let id = {
        let db = Database::open(&path).unwrap();
        db.insert_expense(&Expense::new("Gym".into(), dec!(45), 12))
            .unwrap()
    };

    let db = Database::open(&path).unwrap();
    let fetched = db.get_expense_by_id(id).unwrap();
    assert!(fetched.is_some());
    // Re-opening must not reseed on top of existing rows
    assert_eq!(db.expense_count().unwrap(), 5);
}
