//! Bar-by-bar backtest simulation.
//!
//! A run validates the configuration and pre-computes indicators before
//! the bar loop, then settles the final value after the last bar. Within
//! each bar, sell rules are evaluated before buy rules so freed cash is
//! available to the same bar's buys.

use std::collections::HashMap;

use crate::config::BacktestConfig;
use crate::error::EngineError;
use crate::indicator::{self, IndicatorKind, IndicatorSeries};
use crate::ohlcv::PriceBar;
use crate::portfolio::{execute_buy, execute_sell, BacktestResult, EquityPoint, PortfolioState};
use crate::rule_eval::rule_fires;
use crate::validation::validate_config;

/// Run a full backtest over `bars`.
///
/// Indicators are computed over the entire series so history before an
/// optional date range still feeds warm-up; only in-range bars are traded
/// and recorded on the equity curve. Bars too early for a rule's
/// indicator simply cannot trigger it, so a short series yields a quiet
/// run rather than an error.
pub fn run_backtest(
    bars: &[PriceBar],
    config: &BacktestConfig,
) -> Result<BacktestResult, EngineError> {
    validate_config(config)?;
    let indicators = compute_indicators(bars, config);
    let mut portfolio = PortfolioState::new(config.starting_value);
    let mut trades = Vec::new();
    let mut equity_curve = Vec::new();

    for (index, bar) in bars.iter().enumerate() {
        if let Some(range) = &config.date_range {
            if !range.contains(bar.date) {
                continue;
            }
        }

        for rule in &config.sell_rules {
            if portfolio.shares_held > 0.0 && rule_fires(rule, bars, &indicators, index) {
                if let Some(trade) = execute_sell(
                    &mut portfolio,
                    bar.close,
                    bar.date,
                    rule.trade_percent,
                    config.sizing,
                ) {
                    trades.push(trade);
                }
            }
        }

        for rule in &config.buy_rules {
            if portfolio.cash > 0.0 && rule_fires(rule, bars, &indicators, index) {
                if let Some(trade) = execute_buy(
                    &mut portfolio,
                    bar.close,
                    bar.date,
                    rule.trade_percent,
                    config.sizing,
                ) {
                    trades.push(trade);
                }
            }
        }

        equity_curve.push(EquityPoint {
            date: bar.date,
            equity: portfolio.equity(bar.close),
        });
    }

    // Final value marks any open position to the last traded bar's close.
    let final_value = equity_curve
        .last()
        .map(|point| point.equity)
        .unwrap_or(config.starting_value);

    Ok(BacktestResult {
        starting_value: config.starting_value,
        final_value,
        trades,
        equity_curve,
    })
}

/// One series per distinct indicator across both rule lists.
fn compute_indicators(
    bars: &[PriceBar],
    config: &BacktestConfig,
) -> HashMap<IndicatorKind, IndicatorSeries> {
    let mut map = HashMap::new();
    for rule in config.sell_rules.iter().chain(config.buy_rules.iter()) {
        let kind = rule.kind.indicator_kind();
        map.entry(kind.clone())
            .or_insert_with(|| indicator::compute(bars, &kind));
    }
    map
}
