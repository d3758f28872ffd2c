//! Backtest run configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::rule::StrategyRule;

/// Inclusive date window for the simulation loop.
///
/// Indicators are always computed over the full price history, so bars
/// before `start` still feed warm-up. Only bars inside the window are
/// traded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// How buy/sell quantities are rounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareSizing {
    /// Floor every quantity to a whole number of shares.
    #[default]
    WholeShares,
    /// Trade exact fractional quantities.
    Fractional,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Starting cash.
    pub starting_value: f64,
    /// Evaluated each bar in list order, after sells.
    pub buy_rules: Vec<StrategyRule>,
    /// Evaluated each bar in list order, before buys.
    pub sell_rules: Vec<StrategyRule>,
    #[serde(default)]
    pub date_range: Option<DateRange>,
    #[serde(default)]
    pub sizing: ShareSizing,
    /// Subtracted from the mean per-pair return by the Sharpe ratio.
    #[serde(default)]
    pub risk_free_rate: f64,
}

impl BacktestConfig {
    pub fn new(starting_value: f64) -> Self {
        BacktestConfig {
            starting_value,
            buy_rules: Vec::new(),
            sell_rules: Vec::new(),
            date_range: None,
            sizing: ShareSizing::default(),
            risk_free_rate: 0.0,
        }
    }
}
