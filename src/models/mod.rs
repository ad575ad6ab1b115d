mod expense;
mod params;

pub use expense::Expense;
pub use params::{GoalParams, WalletParams};

#[cfg(test)]
mod tests;
