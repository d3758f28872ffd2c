//! Strategy rule evaluation.
//!
//! Decides, for one rule at one bar index, whether the rule fires. Every
//! rule is edge-triggered: threshold rules fire on *crossing* the threshold
//! (current and previous bar compared), not while the condition merely
//! holds, so a rule cannot re-fire on every bar of a sustained condition.
//!
//! Warm-up bars are invalid indicator points; any rule that needs an
//! invalid value simply cannot fire at that index.

use std::collections::HashMap;

use crate::indicator::{IndicatorKind, IndicatorSeries, IndicatorValue};
use crate::ohlcv::PriceBar;
use crate::rule::{RuleKind, StrategyRule, TradeAction};

pub type IndicatorMap = HashMap<IndicatorKind, IndicatorSeries>;

/// Does `rule` fire at `bar_index`?
pub fn rule_fires(
    rule: &StrategyRule,
    bars: &[PriceBar],
    indicators: &IndicatorMap,
    bar_index: usize,
) -> bool {
    // Every rule family compares against the previous bar.
    if bar_index == 0 || bar_index >= bars.len() {
        return false;
    }

    let kind = rule.kind.indicator_kind();
    let Some(series) = indicators.get(&kind) else {
        return false;
    };

    match &rule.kind {
        RuleKind::MaCross { .. } => {
            let (Some(ma_prev), Some(ma_curr)) = (
                simple_at(series, bar_index - 1),
                simple_at(series, bar_index),
            ) else {
                return false;
            };
            let prev_close = bars[bar_index - 1].close;
            let curr_close = bars[bar_index].close;
            // Strictly on the line the bar before is not yet a cross.
            match rule.action {
                TradeAction::Buy => prev_close < ma_prev && curr_close > ma_curr,
                TradeAction::Sell => prev_close > ma_prev && curr_close < ma_curr,
            }
        }
        RuleKind::RsiThreshold { threshold, .. } => {
            threshold_cross(series, bar_index, *threshold, rule.action, simple_at)
        }
        RuleKind::StochasticThreshold { threshold, .. } => {
            threshold_cross(series, bar_index, *threshold, rule.action, stochastic_k_at)
        }
        RuleKind::MacdHistogramFlip { .. } => {
            let (Some(prev), Some(curr)) = (
                histogram_at(series, bar_index - 1),
                histogram_at(series, bar_index),
            ) else {
                return false;
            };
            match rule.action {
                TradeAction::Buy => prev < 0.0 && curr > 0.0,
                TradeAction::Sell => prev > 0.0 && curr < 0.0,
            }
        }
        RuleKind::BollingerBand { .. } => {
            let (Some((prev_upper, prev_lower)), Some((upper, lower))) = (
                bands_at(series, bar_index - 1),
                bands_at(series, bar_index),
            ) else {
                return false;
            };
            let prev_close = bars[bar_index - 1].close;
            let curr_close = bars[bar_index].close;
            match rule.action {
                // Touch or cross of the band counts.
                TradeAction::Buy => prev_close > prev_lower && curr_close <= lower,
                TradeAction::Sell => prev_close < prev_upper && curr_close >= upper,
            }
        }
        RuleKind::AtrThreshold { threshold, .. } | RuleKind::AdxThreshold { threshold, .. } => {
            // Volatility/trend-strength emergence: upward cross for either
            // action.
            let (Some(prev), Some(curr)) = (
                simple_at(series, bar_index - 1),
                simple_at(series, bar_index),
            ) else {
                return false;
            };
            prev <= *threshold && curr > *threshold
        }
        RuleKind::VwapCross => {
            let (Some(vwap_prev), Some(vwap_curr)) = (
                simple_at(series, bar_index - 1),
                simple_at(series, bar_index),
            ) else {
                return false;
            };
            let prev_close = bars[bar_index - 1].close;
            let curr_close = bars[bar_index].close;
            match rule.action {
                TradeAction::Buy => prev_close < vwap_prev && curr_close > vwap_curr,
                TradeAction::Sell => prev_close > vwap_prev && curr_close < vwap_curr,
            }
        }
        RuleKind::ObvSlopeFlip => {
            if bar_index < 2 {
                return false;
            }
            let (Some(obv2), Some(obv1), Some(obv0)) = (
                simple_at(series, bar_index - 2),
                simple_at(series, bar_index - 1),
                simple_at(series, bar_index),
            ) else {
                return false;
            };
            let prev_slope = obv1 - obv2;
            let curr_slope = obv0 - obv1;
            match rule.action {
                TradeAction::Buy => prev_slope <= 0.0 && curr_slope > 0.0,
                TradeAction::Sell => prev_slope >= 0.0 && curr_slope < 0.0,
            }
        }
        RuleKind::SarFlip { .. } => {
            let (Some(prev_up), Some(curr_up)) = (
                trend_at(series, bar_index - 1),
                trend_at(series, bar_index),
            ) else {
                return false;
            };
            match rule.action {
                TradeAction::Buy => !prev_up && curr_up,
                TradeAction::Sell => prev_up && !curr_up,
            }
        }
    }
}

/// Oversold/overbought crossings: buy fires on a downward cross of the
/// threshold, sell on an upward cross.
fn threshold_cross(
    series: &IndicatorSeries,
    bar_index: usize,
    threshold: f64,
    action: TradeAction,
    extract: fn(&IndicatorSeries, usize) -> Option<f64>,
) -> bool {
    let (Some(prev), Some(curr)) = (extract(series, bar_index - 1), extract(series, bar_index))
    else {
        return false;
    };
    match action {
        TradeAction::Buy => prev >= threshold && curr < threshold,
        TradeAction::Sell => prev <= threshold && curr > threshold,
    }
}

fn point_at(series: &IndicatorSeries, index: usize) -> Option<&IndicatorValue> {
    let point = series.values.get(index)?;
    point.valid.then_some(&point.value)
}

fn simple_at(series: &IndicatorSeries, index: usize) -> Option<f64> {
    match point_at(series, index)? {
        IndicatorValue::Simple(v) => Some(*v),
        _ => None,
    }
}

fn stochastic_k_at(series: &IndicatorSeries, index: usize) -> Option<f64> {
    match point_at(series, index)? {
        IndicatorValue::Stochastic { k, .. } => Some(*k),
        _ => None,
    }
}

fn histogram_at(series: &IndicatorSeries, index: usize) -> Option<f64> {
    match point_at(series, index)? {
        IndicatorValue::Macd { histogram, .. } => Some(*histogram),
        _ => None,
    }
}

fn bands_at(series: &IndicatorSeries, index: usize) -> Option<(f64, f64)> {
    match point_at(series, index)? {
        IndicatorValue::Bollinger { upper, lower, .. } => Some((*upper, *lower)),
        _ => None,
    }
}

fn trend_at(series: &IndicatorSeries, index: usize) -> Option<bool> {
    match point_at(series, index)? {
        IndicatorValue::Sar { uptrend, .. } => Some(*uptrend),
        _ => None,
    }
}
