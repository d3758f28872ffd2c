//! Portfolio state and fill simulation.
//!
//! Fills happen at the bar close, with no commission or slippage model.
//! Quantities are sized from the rule's `trade_percent` and rounded per
//! the configured [`ShareSizing`]; a fill that rounds to zero shares is
//! skipped rather than recorded.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::ShareSizing;
use crate::rule::TradeAction;

/// Cash plus a single long position. Both are invariant non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioState {
    pub cash: f64,
    pub shares_held: f64,
}

impl PortfolioState {
    pub fn new(cash: f64) -> Self {
        PortfolioState {
            cash,
            shares_held: 0.0,
        }
    }

    /// Mark-to-market value at `price`.
    pub fn equity(&self, price: f64) -> f64 {
        self.cash + self.shares_held * price
    }
}

/// One executed fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub action: TradeAction,
    pub date: NaiveDate,
    pub price: f64,
    pub shares: f64,
}

/// Mark-to-market equity at one bar close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}

/// Output of one completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub starting_value: f64,
    pub final_value: f64,
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<EquityPoint>,
}

fn size_shares(exact: f64, sizing: ShareSizing) -> f64 {
    match sizing {
        ShareSizing::WholeShares => exact.floor(),
        ShareSizing::Fractional => exact,
    }
}

/// Buy with `trade_percent` of current cash. Returns the fill, or `None`
/// when the sized quantity is zero.
pub fn execute_buy(
    portfolio: &mut PortfolioState,
    price: f64,
    date: NaiveDate,
    trade_percent: f64,
    sizing: ShareSizing,
) -> Option<Trade> {
    if price <= 0.0 {
        return None;
    }

    let spend = portfolio.cash * trade_percent;
    let shares = size_shares(spend / price, sizing);
    if shares <= 0.0 {
        return None;
    }

    portfolio.cash -= shares * price;
    portfolio.shares_held += shares;

    Some(Trade {
        action: TradeAction::Buy,
        date,
        price,
        shares,
    })
}

/// Sell `trade_percent` of the current position. Returns the fill, or
/// `None` when the sized quantity is zero.
pub fn execute_sell(
    portfolio: &mut PortfolioState,
    price: f64,
    date: NaiveDate,
    trade_percent: f64,
    sizing: ShareSizing,
) -> Option<Trade> {
    let shares = size_shares(portfolio.shares_held * trade_percent, sizing);
    if shares <= 0.0 {
        return None;
    }

    portfolio.cash += shares * price;
    portfolio.shares_held -= shares;

    Some(Trade {
        action: TradeAction::Sell,
        date,
        price,
        shares,
    })
}
