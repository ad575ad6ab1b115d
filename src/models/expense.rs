use rust_decimal::Decimal;

/// Placeholder label for rows saved without a name.
pub const DEFAULT_NAME: &str = "New Item";

/// Highest valid calendar day; day 0 marks variable (daily) spending.
pub const MAX_DAY_OF_MONTH: u32 = 31;

#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: Option<i64>,
    pub name: String,
    pub amount: Decimal,
    /// 0 = variable/daily spending, 1-31 = fixed bill due that day.
    pub day_of_month: u32,
    pub is_active: bool,
}

impl Expense {
    pub fn new(name: String, amount: Decimal, day_of_month: u32) -> Self {
        Self {
            id: None,
            name,
            amount,
            day_of_month,
            is_active: true,
        }
    }

    pub fn is_fixed(&self) -> bool {
        self.day_of_month > 0
    }

    pub fn is_variable(&self) -> bool {
        self.day_of_month == 0
    }

    /// Fill defaults for missing or out-of-range fields: empty name becomes
    /// the placeholder, negative amounts become zero, the day is clamped to
    /// [0, 31]. Applied by the ledger before every write so the projection
    /// only ever sees well-formed rows.
    pub fn normalized(mut self) -> Self {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            self.name = DEFAULT_NAME.to_string();
        } else if trimmed.len() != self.name.len() {
            self.name = trimmed.to_string();
        }
        if self.amount < Decimal::ZERO {
            self.amount = Decimal::ZERO;
        }
        if self.day_of_month > MAX_DAY_OF_MONTH {
            self.day_of_month = MAX_DAY_OF_MONTH;
        }
        self
    }
}
