use rust_decimal::Decimal;

/// Per-run wallet settings; never persisted.
#[derive(Debug, Clone)]
pub struct WalletParams {
    pub starting_balance: Decimal,
    /// Calendar day income is credited, in [1, 31].
    pub salary_day: u32,
    pub salary_amount: Decimal,
}

impl Default for WalletParams {
    fn default() -> Self {
        Self {
            starting_balance: Decimal::from(2000),
            salary_day: 1,
            salary_amount: Decimal::from(3500),
        }
    }
}

/// A hypothetical one-time purchase tested against the projection.
#[derive(Debug, Clone)]
pub struct GoalParams {
    pub cost: Decimal,
    /// Days from the start of the projection at which the cost is deducted.
    pub day_offset: u32,
}

impl Default for GoalParams {
    fn default() -> Self {
        Self {
            cost: Decimal::from(2000),
            day_offset: 60,
        }
    }
}
