use anyhow::Result;
use chrono::{Local, NaiveDate};

use crate::db::Database;
use crate::forecast::{self, Forecast, HORIZON_DAYS};
use crate::models::{Expense, GoalParams, WalletParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Forecast,
    Expenses,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Forecast, Self::Expenses]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forecast => write!(f, "Forecast"),
            Self::Expenses => write!(f, "Expenses"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteExpense { id: i64, name: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) confirm_message: String,
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) show_help: bool,
    pub(crate) visible_rows: usize,

    /// Anchor date for the projection, fixed when the session starts.
    pub(crate) today: NaiveDate,
    pub(crate) wallet: WalletParams,
    pub(crate) goal: GoalParams,

    // Expenses
    pub(crate) expenses: Vec<Expense>,
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,

    // Latest projection
    pub(crate) forecast: Forecast,
}

impl App {
    pub(crate) fn new() -> Self {
        let today = Local::now().date_naive();
        let wallet = WalletParams::default();
        let goal = GoalParams::default();
        let forecast = forecast::project(&wallet, &goal, &[], today, HORIZON_DAYS);
        Self {
            running: true,
            screen: Screen::Forecast,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            confirm_message: String::new(),
            pending_action: None,
            show_help: false,
            visible_rows: 20,
            today,
            wallet,
            goal,
            expenses: Vec::new(),
            expense_index: 0,
            expense_scroll: 0,
            forecast,
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    /// Reload the ledger and re-run the projection.
    pub(crate) fn refresh_expenses(&mut self, db: &Database) -> Result<()> {
        self.expenses = db.get_expenses()?;
        if self.expense_index >= self.expenses.len() {
            self.expense_index = self.expenses.len().saturating_sub(1);
        }
        if self.expense_scroll > self.expense_index {
            self.expense_scroll = self.expense_index;
        }
        self.refresh_forecast();
        Ok(())
    }

    /// Re-run the projection against the in-memory expense list.
    pub(crate) fn refresh_forecast(&mut self) {
        self.forecast = forecast::project(
            &self.wallet,
            &self.goal,
            &self.expenses,
            self.today,
            HORIZON_DAYS,
        );
    }

    pub(crate) fn refresh_all(&mut self, db: &Database) -> Result<()> {
        self.refresh_expenses(db)
    }

    pub(crate) fn selected_expense(&self) -> Option<&Expense> {
        self.expenses.get(self.expense_index)
    }

    pub(crate) fn expense_page(&self) -> usize {
        self.visible_rows.max(1)
    }
}
