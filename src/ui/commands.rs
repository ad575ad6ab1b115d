use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;

use rust_decimal::Decimal;

use super::app::{App, InputMode, PendingAction, Screen};
use super::util::format_amount;
use crate::db::Database;
use crate::forecast::{self, HORIZON_DAYS};
use crate::models::Expense;

/// Upper bound the balance input accepts, matching the wallet widget range.
const MAX_BALANCE: i64 = 100_000;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit PeekIn", cmd_quit, r);
    register_command!("quit", "Quit PeekIn", cmd_quit, r);
    register_command!("f", "Go to Forecast", cmd_forecast, r);
    register_command!("forecast", "Go to Forecast", cmd_forecast, r);
    register_command!("e", "Go to Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to Expenses", cmd_expenses, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "balance",
        "Set starting balance (e.g. :balance 2000)",
        cmd_balance,
        r
    );
    register_command!(
        "salary",
        "Set salary day and amount (e.g. :salary 1 3500)",
        cmd_salary,
        r
    );
    register_command!(
        "goal",
        "Set goal cost and days out (e.g. :goal 2000 60)",
        cmd_goal,
        r
    );
    register_command!(
        "add",
        "Add expense (e.g. :add Gym 45 12, day 0 = daily)",
        cmd_add,
        r
    );
    register_command!("rename", "Rename selected expense", cmd_rename, r);
    register_command!(
        "amount",
        "Set selected expense amount (e.g. :amount 45)",
        cmd_amount,
        r
    );
    register_command!(
        "day",
        "Set selected expense day, 0 = daily (e.g. :day 12)",
        cmd_day,
        r
    );
    register_command!("toggle", "Toggle selected expense on/off", cmd_toggle, r);
    register_command!(
        "delete-expense",
        "Delete selected expense",
        cmd_delete_expense,
        r
    );
    register_command!(
        "export",
        "Export forecast to CSV (e.g. :export ~/forecast.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(());
    }
    let (name, args) = input.split_once(' ').unwrap_or((input, ""));
    match COMMANDS.get(name) {
        Some(cmd) => (cmd.run)(args.trim(), app, db),
        None => {
            app.set_status(format!("Unknown command: {name} (:help for a list)"));
            Ok(())
        }
    }
}

// ── Parsing helpers ──────────────────────────────────────────

fn parse_amount(s: &str) -> Result<Decimal, String> {
    let amount = Decimal::from_str(s).map_err(|_| format!("Invalid amount: {s}"))?;
    if amount < Decimal::ZERO {
        return Err(format!("Amount must not be negative: {s}"));
    }
    Ok(amount)
}

fn parse_day(s: &str, min: u32, max: u32) -> Result<u32, String> {
    let day: u32 = s.parse().map_err(|_| format!("Invalid day: {s}"))?;
    if day < min || day > max {
        return Err(format!("Day must be in [{min}, {max}]: {s}"));
    }
    Ok(day)
}

// ── Navigation ───────────────────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_forecast(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Forecast;
    app.refresh_forecast();
    Ok(())
}

fn cmd_expenses(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

// ── Wallet & goal ────────────────────────────────────────────

fn cmd_balance(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let balance = match parse_amount(args) {
        Ok(b) => b,
        Err(msg) => {
            app.set_status(msg);
            return Ok(());
        }
    };
    if balance > Decimal::from(MAX_BALANCE) {
        app.set_status(format!("Balance must be at most {MAX_BALANCE}"));
        return Ok(());
    }
    app.wallet.starting_balance = balance;
    app.refresh_forecast();
    app.set_status(format!("Starting balance: {}", format_amount(balance)));
    Ok(())
}

fn cmd_salary(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    if parts.len() != 2 {
        app.set_status("Usage: :salary <day 1-31> <amount>");
        return Ok(());
    }
    let (day, amount) = match (parse_day(parts[0], 1, 31), parse_amount(parts[1])) {
        (Ok(d), Ok(a)) => (d, a),
        (Err(msg), _) | (_, Err(msg)) => {
            app.set_status(msg);
            return Ok(());
        }
    };
    app.wallet.salary_day = day;
    app.wallet.salary_amount = amount;
    app.refresh_forecast();
    app.set_status(format!("Salary: {} on day {day}", format_amount(amount)));
    Ok(())
}

fn cmd_goal(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    if parts.len() != 2 {
        app.set_status("Usage: :goal <cost> <days out>");
        return Ok(());
    }
    let cost = match parse_amount(parts[0]) {
        Ok(c) => c,
        Err(msg) => {
            app.set_status(msg);
            return Ok(());
        }
    };
    let days: u32 = match parts[1].parse() {
        Ok(d) => d,
        Err(_) => {
            app.set_status(format!("Invalid number of days: {}", parts[1]));
            return Ok(());
        }
    };
    app.goal.cost = cost;
    app.goal.day_offset = days;
    app.refresh_forecast();
    let note = if days >= HORIZON_DAYS {
        " (beyond the horizon)".to_string()
    } else {
        let date = app.today + chrono::Duration::days(i64::from(days));
        format!(" ({})", date.format("%d %b %Y"))
    };
    app.set_status(format!(
        "Goal: {} in {days} days{note}",
        format_amount(cost)
    ));
    Ok(())
}

// ── Expense editing ──────────────────────────────────────────

fn cmd_add(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    if parts.len() < 3 {
        app.set_status("Usage: :add <name> <amount> <day 0-31>");
        return Ok(());
    }
    // Last two tokens are amount and day; everything before is the name.
    let (amount_str, day_str) = (parts[parts.len() - 2], parts[parts.len() - 1]);
    let name = parts[..parts.len() - 2].join(" ");
    let (amount, day) = match (parse_amount(amount_str), parse_day(day_str, 0, 31)) {
        (Ok(a), Ok(d)) => (a, d),
        (Err(msg), _) | (_, Err(msg)) => {
            app.set_status(msg);
            return Ok(());
        }
    };

    db.insert_expense(&Expense::new(name.clone(), amount, day))?;
    app.screen = Screen::Expenses;
    app.refresh_expenses(db)?;
    // Jump to the new row
    app.expense_index = app.expenses.len().saturating_sub(1);
    app.expense_scroll = app
        .expense_index
        .saturating_sub(app.expense_page().saturating_sub(1));
    app.set_status(format!("Added: {name}"));
    Ok(())
}

fn cmd_rename(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let Some(expense) = app.selected_expense().cloned() else {
        app.set_status("No expense selected");
        return Ok(());
    };
    if args.is_empty() {
        // Interactive rename via the edit prompt
        app.input_mode = InputMode::Editing;
        app.command_input.clear();
        return Ok(());
    }
    if let Some(id) = expense.id {
        let mut updated = expense;
        updated.name = args.to_string();
        db.update_expense(id, &updated)?;
        app.refresh_expenses(db)?;
        app.set_status(format!("Renamed to: {args}"));
    }
    Ok(())
}

fn cmd_amount(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let amount = match parse_amount(args) {
        Ok(a) => a,
        Err(msg) => {
            app.set_status(msg);
            return Ok(());
        }
    };
    let Some(expense) = app.selected_expense().cloned() else {
        app.set_status("No expense selected");
        return Ok(());
    };
    if let Some(id) = expense.id {
        let mut updated = expense;
        updated.amount = amount;
        db.update_expense(id, &updated)?;
        app.refresh_expenses(db)?;
        app.set_status(format!("Amount set: {}", format_amount(amount)));
    }
    Ok(())
}

fn cmd_day(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let day = match parse_day(args, 0, 31) {
        Ok(d) => d,
        Err(msg) => {
            app.set_status(msg);
            return Ok(());
        }
    };
    let Some(expense) = app.selected_expense().cloned() else {
        app.set_status("No expense selected");
        return Ok(());
    };
    if let Some(id) = expense.id {
        let mut updated = expense;
        updated.day_of_month = day;
        db.update_expense(id, &updated)?;
        app.refresh_expenses(db)?;
        if day == 0 {
            app.set_status("Now daily spending (smoothed over the month)");
        } else {
            app.set_status(format!("Due on day {day}"));
        }
    }
    Ok(())
}

fn cmd_toggle(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let Some(expense) = app.selected_expense().cloned() else {
        app.set_status("No expense selected");
        return Ok(());
    };
    if let Some(id) = expense.id {
        db.set_expense_active(id, !expense.is_active)?;
        app.refresh_expenses(db)?;
        let verb = if expense.is_active { "Paused" } else { "Resumed" };
        app.set_status(format!("{verb}: {}", expense.name));
    }
    Ok(())
}

fn cmd_delete_expense(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let Some(expense) = app.selected_expense().cloned() else {
        app.set_status("No expense selected");
        return Ok(());
    };
    let Some(id) = expense.id else {
        return Ok(());
    };
    app.confirm_message = format!("Delete '{}'?", expense.name);
    app.pending_action = Some(PendingAction::DeleteExpense {
        id,
        name: expense.name,
    });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/peekin-forecast.csv")
    } else {
        crate::run::shellexpand(args)
    };

    match forecast::write_series_csv(std::path::Path::new(&path), &app.forecast) {
        Ok(count) => app.set_status(format!("Exported {count} days to {path}")),
        Err(e) => app.set_status(format!("Export failed: {e}")),
    }
    Ok(())
}
