//! Performance metrics over a completed run.
//!
//! Trade pairing is positional: the i-th buy is matched with the i-th
//! sell, and unmatched fills at the tail are ignored. Metrics that need
//! at least one pair (or a non-empty equity curve) are `None` rather
//! than zero, so "no data" serializes as `null` instead of masquerading
//! as a measured result.

use serde::{Deserialize, Serialize};

use crate::portfolio::{BacktestResult, EquityPoint, Trade};
use crate::rule::TradeAction;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Absolute profit or loss.
    pub total_return: f64,
    /// Fractional return, `total_return / starting_value` (0.10 means
    /// a 10% gain).
    pub return_pct: f64,
    /// Number of matched buy/sell pairs.
    pub trade_pairs: usize,
    /// Fraction of pairs sold above their buy price. `None` with zero
    /// pairs.
    pub win_rate: Option<f64>,
    /// Computed over per-pair returns. `None` with zero pairs;
    /// `Some(0.0)` when the pair returns have no variance.
    pub sharpe_ratio: Option<f64>,
    /// Largest peak-to-trough fraction of the equity curve. `None` only
    /// when the curve is empty.
    pub max_drawdown: Option<f64>,
}

impl PerformanceMetrics {
    pub fn compute(result: &BacktestResult, risk_free_rate: f64) -> Self {
        let total_return = result.final_value - result.starting_value;
        let return_pct = if result.starting_value > 0.0 {
            total_return / result.starting_value
        } else {
            0.0
        };

        let returns = pair_returns(&result.trades);
        let trade_pairs = returns.len();
        let win_rate = win_rate(&returns);
        let sharpe_ratio = sharpe(&returns, risk_free_rate);
        let max_drawdown = max_drawdown(&result.equity_curve);

        PerformanceMetrics {
            total_return,
            return_pct,
            trade_pairs,
            win_rate,
            sharpe_ratio,
            max_drawdown,
        }
    }
}

/// Match the i-th buy against the i-th sell and compute each pair's
/// fractional return. Unmatched fills at the tail are dropped.
fn pair_returns(trades: &[Trade]) -> Vec<f64> {
    let buys = trades.iter().filter(|t| t.action == TradeAction::Buy);
    let sells = trades.iter().filter(|t| t.action == TradeAction::Sell);

    buys.zip(sells)
        .map(|(buy, sell)| (sell.price - buy.price) / buy.price)
        .collect()
}

/// A pair wins when it sold higher than it bought.
fn win_rate(returns: &[f64]) -> Option<f64> {
    if returns.is_empty() {
        return None;
    }

    let wins = returns.iter().filter(|r| **r > 0.0).count();
    Some(wins as f64 / returns.len() as f64)
}

fn sharpe(returns: &[f64], risk_free_rate: f64) -> Option<f64> {
    if returns.is_empty() {
        return None;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let stddev = variance.sqrt();

    if stddev > 0.0 {
        Some((mean - risk_free_rate) / stddev)
    } else {
        Some(0.0)
    }
}

fn max_drawdown(equity_curve: &[EquityPoint]) -> Option<f64> {
    let first = equity_curve.first()?;

    let mut peak = first.equity;
    let mut max_dd = 0.0_f64;
    for point in equity_curve {
        if point.equity > peak {
            peak = point.equity;
        } else if peak > 0.0 {
            let dd = (peak - point.equity) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }

    Some(max_dd)
}
