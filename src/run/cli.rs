use anyhow::Result;
use chrono::{Duration, Local};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::db::Database;
use crate::forecast::{self, HORIZON_DAYS};
use crate::models::{Expense, GoalParams, WalletParams};
use crate::ui::util::format_amount;

pub(crate) fn as_cli(args: &[String], db: &mut Database) -> Result<()> {
    match args[1].as_str() {
        "forecast" | "f" => cli_forecast(&args[2..], db),
        "expenses" | "ls" => cli_expenses(db),
        "add" => cli_add(&args[2..], db),
        "rm" => cli_rm(&args[2..], db),
        "toggle" => cli_toggle(&args[2..], db),
        "import" => cli_import(&args[2..], db),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("peekin {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("PeekIn — local-only cash-flow projection");
    println!();
    println!("Usage: peekin [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  forecast                      Print the {HORIZON_DAYS}-day projection summary");
    println!("    --balance <amount>          Starting balance (default: 2000)");
    println!("    --salary-day <1-31>         Day income is credited (default: 1)");
    println!("    --salary <amount>           Monthly income (default: 3500)");
    println!("    --goal <amount>             One-time purchase to test (default: 2000)");
    println!("    --goal-days <n>             Days until the purchase (default: 60)");
    println!("    --export <path>             Also write the daily series to CSV");
    println!("  expenses                      List the expense ledger");
    println!("  add <name> <amount> <day>     Add an expense (day 0 = daily spending)");
    println!("  rm <id>                       Delete an expense by id");
    println!("  toggle <id>                   Flip an expense on/off");
    println!("  import <file.csv>             Replace the whole ledger from a CSV");
    println!("                                (columns: name, amount, day_of_month[, is_active])");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

// ── Argument parsing ─────────────────────────────────────────

fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

fn parse_amount(s: &str, what: &str) -> Result<Decimal> {
    let amount =
        Decimal::from_str(s).map_err(|_| anyhow::anyhow!("Invalid {what}: {s}"))?;
    if amount < Decimal::ZERO {
        anyhow::bail!("{what} must not be negative: {s}");
    }
    Ok(amount)
}

// ── Commands ─────────────────────────────────────────────────

fn cli_forecast(args: &[String], db: &mut Database) -> Result<()> {
    let mut wallet = WalletParams::default();
    let mut goal = GoalParams::default();

    if let Some(v) = flag_value(args, "--balance") {
        let balance = parse_amount(v, "balance")?;
        if balance > Decimal::from(100_000) {
            anyhow::bail!("Balance must be at most 100000");
        }
        wallet.starting_balance = balance;
    }
    if let Some(v) = flag_value(args, "--salary-day") {
        let day: u32 = v.parse().map_err(|_| anyhow::anyhow!("Invalid salary day: {v}"))?;
        if !(1..=31).contains(&day) {
            anyhow::bail!("Salary day must be in [1, 31]: {v}");
        }
        wallet.salary_day = day;
    }
    if let Some(v) = flag_value(args, "--salary") {
        wallet.salary_amount = parse_amount(v, "salary")?;
    }
    if let Some(v) = flag_value(args, "--goal") {
        goal.cost = parse_amount(v, "goal cost")?;
    }
    if let Some(v) = flag_value(args, "--goal-days") {
        goal.day_offset = v
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid goal days: {v}"))?;
    }

    let expenses = db.get_expenses()?;
    let active = expenses.iter().filter(|e| e.is_active).count();
    let today = Local::now().date_naive();
    let result = forecast::project(&wallet, &goal, &expenses, today, HORIZON_DAYS);

    let goal_date = today + Duration::days(i64::from(goal.day_offset));
    println!(
        "PeekIn — {HORIZON_DAYS}-day forecast from {}",
        today.format("%d %b %Y")
    );
    println!("{}", "─".repeat(46));
    println!("  Starting balance:  {}", format_amount(wallet.starting_balance));
    println!(
        "  Salary:            {} on day {}",
        format_amount(wallet.salary_amount),
        wallet.salary_day
    );
    if goal.day_offset >= HORIZON_DAYS {
        println!(
            "  Goal:              {} beyond the horizon (never charged)",
            format_amount(goal.cost)
        );
    } else {
        println!(
            "  Goal:              {} in {} days ({})",
            format_amount(goal.cost),
            goal.day_offset,
            goal_date.format("%d %b %Y")
        );
    }
    println!("  Active expenses:   {active}");
    println!();
    println!(
        "  Balance in {} mo.:  {}",
        HORIZON_DAYS / 30,
        format_amount(result.final_balance)
    );
    println!("  Lowest point:      {}", format_amount(result.min_balance));
    println!();
    match result.first_shortfall {
        Some(date) => println!(
            "  Shortfall on {} — this goal does not fit.",
            date.format("%d %b %Y")
        ),
        None => println!(
            "  Safe budget — keeps a buffer of {}.",
            format_amount(result.min_balance)
        ),
    }

    if let Some(path) = flag_value(args, "--export") {
        let path = crate::run::shellexpand(path);
        let count = forecast::write_series_csv(Path::new(&path), &result)?;
        println!();
        println!("  Exported {count} days to {path}");
    }

    Ok(())
}

fn cli_expenses(db: &mut Database) -> Result<()> {
    let expenses = db.get_expenses()?;
    if expenses.is_empty() {
        println!("No expenses");
        return Ok(());
    }

    println!("{:<5} {:<26} {:>12}  {:<6} On", "ID", "Name", "Amount", "Day");
    println!("{}", "─".repeat(56));
    for e in &expenses {
        let due = if e.is_variable() {
            "daily".to_string()
        } else {
            format!("{}", e.day_of_month)
        };
        println!(
            "{:<5} {:<26} {:>12}  {:<6} {}",
            e.id.unwrap_or(0),
            e.name,
            format_amount(e.amount),
            due,
            if e.is_active { "yes" } else { "no" },
        );
    }
    Ok(())
}

fn cli_add(args: &[String], db: &mut Database) -> Result<()> {
    if args.len() < 3 {
        anyhow::bail!("Usage: peekin add <name> <amount> <day 0-31>");
    }
    let name = args[0].clone();
    let amount = parse_amount(&args[1], "amount")?;
    let day: u32 = args[2]
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid day: {}", args[2]))?;
    if day > 31 {
        anyhow::bail!("Day must be in [0, 31]: {day}");
    }

    let id = db.insert_expense(&Expense::new(name.clone(), amount, day))?;
    let due = if day == 0 {
        "daily spending".to_string()
    } else {
        format!("due on day {day}")
    };
    println!("Added expense {id}: {name} ({}, {due})", format_amount(amount));
    Ok(())
}

fn cli_rm(args: &[String], db: &mut Database) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: peekin rm <id>");
    }
    let id: i64 = args[0]
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid id: {}", args[0]))?;
    let Some(expense) = db.get_expense_by_id(id)? else {
        anyhow::bail!("No expense with id {id}");
    };
    db.delete_expense(id)?;
    println!("Deleted: {}", expense.name);
    Ok(())
}

/// Replace-all import. Malformed cells fall back to the ledger defaults
/// rather than failing the whole file.
fn cli_import(args: &[String], db: &mut Database) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: peekin import <file.csv>");
    }
    let path = Path::new(&args[0]);
    if !path.exists() {
        anyhow::bail!("File not found: {}", args[0]);
    }

    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let col = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };
    let (Some(name_col), Some(amount_col), Some(day_col)) =
        (col("name"), col("amount"), col("day_of_month"))
    else {
        anyhow::bail!("CSV must have name, amount and day_of_month columns");
    };
    let active_col = col("is_active");

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let name = record.get(name_col).unwrap_or("").to_string();
        let amount =
            Decimal::from_str(record.get(amount_col).unwrap_or("0").trim()).unwrap_or_default();
        let day: u32 = record.get(day_col).unwrap_or("0").trim().parse().unwrap_or(0);
        let mut expense = Expense::new(name, amount, day);
        if let Some(c) = active_col {
            let v = record.get(c).unwrap_or("yes").trim().to_lowercase();
            expense.is_active = !matches!(v.as_str(), "no" | "false" | "0");
        }
        rows.push(expense);
    }

    let count = db.replace_expenses(&rows)?;
    println!(
        "Ledger replaced: {count} rows imported ({} in store)",
        db.expense_count()?
    );
    Ok(())
}

fn cli_toggle(args: &[String], db: &mut Database) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: peekin toggle <id>");
    }
    let id: i64 = args[0]
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid id: {}", args[0]))?;
    let Some(expense) = db.get_expense_by_id(id)? else {
        anyhow::bail!("No expense with id {id}");
    };
    db.set_expense_active(id, !expense.is_active)?;
    let state = if expense.is_active { "off" } else { "on" };
    println!("{}: now {state}", expense.name);
    Ok(())
}
