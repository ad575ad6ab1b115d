mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::Expense;

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        db.seed_demo_expenses()?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        db.seed_demo_expenses()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        // Check if schema_version table exists
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        // Existing database - check version and apply migrations
        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    /// First-run starter rows so the projection has something to show.
    fn seed_demo_expenses(&mut self) -> Result<()> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(());
        }

        let demo: &[(&str, i64, u32)] = &[
            ("Rent / Mortgage", 1200, 5),
            ("Car Loan", 400, 20),
            ("Netflix & Subs", 15, 1),
            ("Groceries & Food", 600, 0),
        ];

        let tx = self.conn.transaction()?;
        for &(name, amount, day) in demo {
            tx.execute(
                "INSERT INTO expenses (name, amount, day_of_month, is_active) VALUES (?1, ?2, ?3, 1)",
                params![name, Decimal::from(amount).to_string(), day],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    // ── Expenses ──────────────────────────────────────────────

    pub(crate) fn get_expenses(&self) -> Result<Vec<Expense>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, amount, day_of_month, is_active FROM expenses ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            let amount_str: String = row.get(2)?;
            Ok(Expense {
                id: Some(row.get(0)?),
                name: row.get(1)?,
                amount: Decimal::from_str(&amount_str).unwrap_or_default(),
                day_of_month: row.get(3)?,
                is_active: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_expense_by_id(&self, id: i64) -> Result<Option<Expense>> {
        let result = self.conn.query_row(
            "SELECT id, name, amount, day_of_month, is_active FROM expenses WHERE id = ?1",
            params![id],
            |row| {
                let amount_str: String = row.get(2)?;
                Ok(Expense {
                    id: Some(row.get(0)?),
                    name: row.get(1)?,
                    amount: Decimal::from_str(&amount_str).unwrap_or_default(),
                    day_of_month: row.get(3)?,
                    is_active: row.get(4)?,
                })
            },
        );
        match result {
            Ok(e) => Ok(Some(e)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn insert_expense(&self, expense: &Expense) -> Result<i64> {
        let expense = expense.clone().normalized();
        self.conn.execute(
            "INSERT INTO expenses (name, amount, day_of_month, is_active) VALUES (?1, ?2, ?3, ?4)",
            params![
                expense.name,
                expense.amount.to_string(),
                expense.day_of_month,
                expense.is_active,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn update_expense(&self, id: i64, expense: &Expense) -> Result<()> {
        let expense = expense.clone().normalized();
        self.conn.execute(
            "UPDATE expenses SET name = ?1, amount = ?2, day_of_month = ?3, is_active = ?4 WHERE id = ?5",
            params![
                expense.name,
                expense.amount.to_string(),
                expense.day_of_month,
                expense.is_active,
                id,
            ],
        )?;
        Ok(())
    }

    pub(crate) fn set_expense_active(&self, id: i64, is_active: bool) -> Result<()> {
        self.conn.execute(
            "UPDATE expenses SET is_active = ?1 WHERE id = ?2",
            params![is_active, id],
        )?;
        Ok(())
    }

    pub(crate) fn delete_expense(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM expenses WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// Replace the whole ledger in one transaction. Rows are normalized on
    /// the way in; ids are reassigned.
    pub(crate) fn replace_expenses(&mut self, expenses: &[Expense]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM expenses", [])?;
        let mut count = 0;
        for expense in expenses {
            let expense = expense.clone().normalized();
            tx.execute(
                "INSERT INTO expenses (name, amount, day_of_month, is_active) VALUES (?1, ?2, ?3, ?4)",
                params![
                    expense.name,
                    expense.amount.to_string(),
                    expense.day_of_month,
                    expense.is_active,
                ],
            )?;
            count += 1;
        }
        tx.commit()?;
        Ok(count)
    }

    pub(crate) fn expense_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?)
    }
}

#[cfg(test)]
mod tests;
