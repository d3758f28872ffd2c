//! Strategy rule configuration.
//!
//! A rule is a tagged union over the ten indicator families, each variant
//! carrying only the parameters that family understands, so invalid
//! combinations (a VWAP rule with a period, say) are unrepresentable.
//! Rule list order is the single tie-break priority: there is no score.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::indicator::IndicatorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeAction::Buy => write!(f, "buy"),
            TradeAction::Sell => write!(f, "sell"),
        }
    }
}

/// Which moving-average flavor a crossover rule tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaType {
    Sma,
    Ema,
    Wma,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleKind {
    /// Close crossing a moving-average line (buy above, sell below).
    MaCross { ma: MaType, period: usize },
    /// RSI crossing a threshold (buy: downward into oversold; sell: upward
    /// into overbought).
    RsiThreshold { period: usize, threshold: f64 },
    /// MACD histogram sign change.
    MacdHistogramFlip {
        fast: usize,
        slow: usize,
        signal: usize,
    },
    /// Close crossing onto/through a Bollinger band (buy: lower band, sell:
    /// upper band).
    BollingerBand { period: usize, std_dev: f64 },
    /// Stochastic %K crossing a threshold, same directions as RSI.
    StochasticThreshold {
        k_period: usize,
        d_period: usize,
        threshold: f64,
    },
    /// ATR crossing above a volatility threshold.
    AtrThreshold { period: usize, threshold: f64 },
    /// ADX crossing above a trend-strength threshold.
    AdxThreshold { period: usize, threshold: f64 },
    /// Close crossing the session VWAP (buy above, sell below).
    VwapCross,
    /// OBV slope sign change (buy: turns positive, sell: turns negative).
    ObvSlopeFlip,
    /// Parabolic SAR trend flip (buy: down→up, sell: up→down).
    SarFlip {
        af_start: f64,
        af_increment: f64,
        af_max: f64,
    },
}

impl RuleKind {
    /// The indicator this rule reads, as a cache key for the pre-computed
    /// indicator map.
    pub fn indicator_kind(&self) -> IndicatorKind {
        match self {
            RuleKind::MaCross { ma, period } => match ma {
                MaType::Sma => IndicatorKind::Sma(*period),
                MaType::Ema => IndicatorKind::Ema(*period),
                MaType::Wma => IndicatorKind::Wma(*period),
            },
            RuleKind::RsiThreshold { period, .. } => IndicatorKind::Rsi(*period),
            RuleKind::MacdHistogramFlip { fast, slow, signal } => IndicatorKind::Macd {
                fast: *fast,
                slow: *slow,
                signal: *signal,
            },
            RuleKind::BollingerBand { period, std_dev } => IndicatorKind::Bollinger {
                period: *period,
                stddev_mult_x100: (std_dev * 100.0).round() as u32,
            },
            RuleKind::StochasticThreshold {
                k_period, d_period, ..
            } => IndicatorKind::Stochastic {
                k_period: *k_period,
                d_period: *d_period,
            },
            RuleKind::AtrThreshold { period, .. } => IndicatorKind::Atr(*period),
            RuleKind::AdxThreshold { period, .. } => IndicatorKind::Adx(*period),
            RuleKind::VwapCross => IndicatorKind::Vwap,
            RuleKind::ObvSlopeFlip => IndicatorKind::Obv,
            RuleKind::SarFlip {
                af_start,
                af_increment,
                af_max,
            } => IndicatorKind::Sar {
                af_start_x1000: (af_start * 1000.0).round() as u32,
                af_increment_x1000: (af_increment * 1000.0).round() as u32,
                af_max_x1000: (af_max * 1000.0).round() as u32,
            },
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.indicator_kind().fmt(f)
    }
}

/// One configured entry in a buy or sell rule list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyRule {
    pub kind: RuleKind,
    pub action: TradeAction,
    /// Fraction of cash (buy) or held shares (sell) committed per fill.
    pub trade_percent: f64,
}

impl StrategyRule {
    pub fn new(kind: RuleKind, action: TradeAction, trade_percent: f64) -> Self {
        StrategyRule {
            kind,
            action,
            trade_percent,
        }
    }
}
