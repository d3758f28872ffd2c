#![allow(dead_code)]

use chrono::NaiveDate;
use quantly::{BacktestConfig, MaType, PriceBar, RuleKind, StrategyRule, TradeAction};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn make_bar(ticker: &str, date_str: &str, close: f64) -> PriceBar {
    PriceBar {
        ticker: ticker.to_string(),
        date: NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap(),
        open: close,
        high: close * 1.01,
        low: close * 0.99,
        close,
        volume: 10_000,
    }
}

/// Consecutive daily bars from `closes`, open = close, 1% high/low bands.
pub fn make_series(start: NaiveDate, closes: &[f64]) -> Vec<PriceBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PriceBar {
            ticker: "TEST".to_string(),
            date: start + chrono::Duration::days(i as i64),
            open: close,
            high: close * 1.01,
            low: close * 0.99,
            close,
            volume: 10_000,
        })
        .collect()
}

pub fn sma_rule(action: TradeAction, period: usize, trade_percent: f64) -> StrategyRule {
    StrategyRule::new(
        RuleKind::MaCross {
            ma: MaType::Sma,
            period,
        },
        action,
        trade_percent,
    )
}

pub fn rsi_rule(action: TradeAction, period: usize, threshold: f64) -> StrategyRule {
    StrategyRule::new(RuleKind::RsiThreshold { period, threshold }, action, 1.0)
}

pub fn config_with(
    starting_value: f64,
    buy_rules: Vec<StrategyRule>,
    sell_rules: Vec<StrategyRule>,
) -> BacktestConfig {
    let mut config = BacktestConfig::new(starting_value);
    config.buy_rules = buy_rules;
    config.sell_rules = sell_rules;
    config
}
