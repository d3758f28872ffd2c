//! End-to-end runs through the public API: configuration in, simulated
//! fills and metrics out.

mod common;

use common::*;
use quantly::{
    run_backtest, BacktestConfig, DateRange, EngineError, PerformanceMetrics, RuleKind,
    ShareSizing, StrategyRule, TradeAction,
};

#[test]
fn quiet_market_leaves_capital_untouched() {
    let bars = make_series(date(2024, 1, 1), &[100.0, 100.0, 100.0, 100.0, 100.0]);
    let config = config_with(1000.0, vec![sma_rule(TradeAction::Buy, 2, 1.0)], vec![]);

    let result = run_backtest(&bars, &config).unwrap();

    assert!(result.trades.is_empty());
    assert_eq!(result.final_value, 1000.0);
    assert_eq!(result.equity_curve.len(), 5);
}

#[test]
fn buy_then_sell_round_trip_with_metrics() {
    let bars = make_series(
        date(2024, 1, 1),
        &[10.0, 10.0, 8.0, 12.0, 13.0, 14.0, 13.0],
    );
    let config = config_with(
        1200.0,
        vec![sma_rule(TradeAction::Buy, 2, 1.0)],
        vec![sma_rule(TradeAction::Sell, 2, 1.0)],
    );

    let result = run_backtest(&bars, &config).unwrap();

    assert_eq!(result.trades.len(), 2);
    let buy = &result.trades[0];
    assert_eq!(buy.action, TradeAction::Buy);
    assert_eq!(buy.price, 12.0);
    assert_eq!(buy.shares, 100.0);
    let sell = &result.trades[1];
    assert_eq!(sell.action, TradeAction::Sell);
    assert_eq!(sell.price, 13.0);
    assert_eq!(sell.shares, 100.0);

    assert_eq!(result.final_value, 1300.0);

    let metrics = PerformanceMetrics::compute(&result, 0.0);
    assert_eq!(metrics.trade_pairs, 1);
    assert_eq!(metrics.win_rate, Some(1.0));
    assert!((metrics.total_return - 100.0).abs() < 1e-9);
    // Equity peaked at 1400 (100 shares at 14) before the exit at 13.
    assert!((metrics.max_drawdown.unwrap() - 100.0 / 1400.0).abs() < 1e-9);
}

#[test]
fn oversold_rule_never_fires_in_a_rally() {
    // RSI of a monotonic rise stays pinned at 100, far from 30.
    let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
    let bars = make_series(date(2024, 1, 1), &closes);
    let config = config_with(1000.0, vec![rsi_rule(TradeAction::Buy, 14, 30.0)], vec![]);

    let result = run_backtest(&bars, &config).unwrap();

    assert!(result.trades.is_empty());
    assert_eq!(result.final_value, 1000.0);
}

#[test]
fn runs_are_byte_identical() {
    let closes: Vec<f64> = (0..50)
        .map(|i| 100.0 + 15.0 * ((i as f64) * 0.4).sin())
        .collect();
    let bars = make_series(date(2024, 1, 1), &closes);
    let config = config_with(
        10_000.0,
        vec![sma_rule(TradeAction::Buy, 5, 0.5)],
        vec![sma_rule(TradeAction::Sell, 5, 0.5)],
    );

    let first = run_backtest(&bars, &config).unwrap();
    let second = run_backtest(&bars, &config).unwrap();

    let first_json = serde_json::to_string(&first).unwrap();
    let second_json = serde_json::to_string(&second).unwrap();
    assert_eq!(first_json, second_json);
}

#[test]
fn date_range_excludes_out_of_window_bars() {
    let bars = make_series(date(2024, 1, 1), &[10.0, 10.0, 8.0, 12.0, 13.0]);
    let mut config = config_with(1200.0, vec![sma_rule(TradeAction::Buy, 2, 1.0)], vec![]);
    config.date_range = Some(DateRange {
        start: date(2024, 1, 4),
        end: date(2024, 1, 5),
    });

    let result = run_backtest(&bars, &config).unwrap();

    // The cross lands on Jan 4 and pre-window bars fed the SMA.
    assert_eq!(result.trades.len(), 1);
    assert_eq!(result.trades[0].date, date(2024, 1, 4));
    assert_eq!(result.equity_curve.len(), 2);
}

#[test]
fn empty_rule_lists_are_rejected() {
    let bars = make_series(date(2024, 1, 1), &[100.0, 101.0]);
    let config = BacktestConfig::new(1000.0);

    let err = run_backtest(&bars, &config).unwrap_err();
    assert!(matches!(err, EngineError::InvalidConfiguration { .. }));
}

#[test]
fn bad_rule_reports_list_position() {
    let bars = make_series(date(2024, 1, 1), &[100.0, 101.0]);
    let bad = StrategyRule::new(
        RuleKind::RsiThreshold {
            period: 14,
            threshold: 150.0,
        },
        TradeAction::Sell,
        0.5,
    );
    let config = config_with(1000.0, vec![], vec![sma_rule(TradeAction::Sell, 2, 0.5), bad]);

    let err = run_backtest(&bars, &config).unwrap_err();
    match err {
        EngineError::InvalidRule { index, action, .. } => {
            assert_eq!(index, 1);
            assert_eq!(action, TradeAction::Sell);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn config_deserializes_from_tagged_json() {
    let json = r#"{
        "starting_value": 5000.0,
        "buy_rules": [
            {"kind": {"kind": "rsi_threshold", "period": 14, "threshold": 30.0},
             "action": "buy", "trade_percent": 0.5}
        ],
        "sell_rules": [
            {"kind": {"kind": "sar_flip", "af_start": 0.02, "af_increment": 0.02, "af_max": 0.2},
             "action": "sell", "trade_percent": 1.0}
        ],
        "sizing": "fractional",
        "risk_free_rate": 0.03
    }"#;

    let config: BacktestConfig = serde_json::from_str(json).unwrap();

    assert_eq!(config.buy_rules.len(), 1);
    assert_eq!(config.sell_rules.len(), 1);
    assert_eq!(config.sizing, ShareSizing::Fractional);
    assert!(matches!(
        config.buy_rules[0].kind,
        RuleKind::RsiThreshold { period: 14, .. }
    ));

    let bars = make_series(date(2024, 1, 1), &[100.0, 101.0, 102.0]);
    assert!(run_backtest(&bars, &config).is_ok());
}

#[test]
fn no_trade_run_serializes_null_metrics() {
    let bars = make_series(date(2024, 1, 1), &[100.0; 5]);
    let config = config_with(1000.0, vec![sma_rule(TradeAction::Buy, 2, 1.0)], vec![]);

    let result = run_backtest(&bars, &config).unwrap();
    let metrics = PerformanceMetrics::compute(&result, 0.0);

    let json = serde_json::to_value(&metrics).unwrap();
    assert!(json["win_rate"].is_null());
    assert_eq!(json["trade_pairs"], 0);
}

#[test]
fn multiple_rule_families_in_one_run() {
    let closes: Vec<f64> = (0..80)
        .map(|i| 100.0 + 20.0 * ((i as f64) * 0.25).sin() + 0.1 * i as f64)
        .collect();
    let bars = make_series(date(2024, 1, 1), &closes);
    let config = config_with(
        10_000.0,
        vec![
            sma_rule(TradeAction::Buy, 10, 0.5),
            rsi_rule(TradeAction::Buy, 14, 35.0),
        ],
        vec![
            sma_rule(TradeAction::Sell, 10, 0.5),
            StrategyRule::new(
                RuleKind::BollingerBand {
                    period: 20,
                    std_dev: 2.0,
                },
                TradeAction::Sell,
                0.25,
            ),
        ],
    );

    let result = run_backtest(&bars, &config).unwrap();

    // The oscillating series must produce activity and stay solvent.
    assert!(!result.trades.is_empty());
    assert!(result.final_value > 0.0);
    for point in &result.equity_curve {
        assert!(point.equity >= 0.0);
    }
}
