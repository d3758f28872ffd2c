//! Exponential Moving Average.
//!
//! alpha = 2/(n+1); the first defined value is the SMA of the first n
//! closes, after which EMA[i] = C[i]*alpha + EMA[i-1]*(1-alpha). Each
//! value depends on the previous one, so the prefix is computed in
//! order. Warmup: first (n-1) bars are invalid.

use crate::indicator::{IndicatorKind, IndicatorPoint, IndicatorSeries, IndicatorValue};
use crate::ohlcv::PriceBar;

pub fn calculate_ema(bars: &[PriceBar], period: usize) -> IndicatorSeries {
    let kind = IndicatorKind::Ema(period);

    if period == 0 || bars.is_empty() {
        return IndicatorSeries {
            kind,
            values: Vec::new(),
        };
    }

    let raw = ema_raw_values(bars, period);
    let warmup = period - 1;

    let values = bars
        .iter()
        .zip(raw)
        .enumerate()
        .map(|(i, (bar, ema))| IndicatorPoint {
            date: bar.date,
            valid: i >= warmup,
            value: IndicatorValue::Simple(ema),
        })
        .collect();

    IndicatorSeries { kind, values }
}

/// Close-price EMA per bar, 0.0 while the seed window is still filling.
/// Shared with the cascaded MACD computation.
pub(crate) fn ema_raw_values(bars: &[PriceBar], period: usize) -> Vec<f64> {
    let alpha = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(bars.len());
    let mut state: Option<f64> = None;

    for (i, bar) in bars.iter().enumerate() {
        state = match state {
            Some(prev) => Some(bar.close * alpha + prev * (1.0 - alpha)),
            None if i + 1 == period => {
                Some(bars[..period].iter().map(|b| b.close).sum::<f64>() / period as f64)
            }
            None => None,
        };
        out.push(state.unwrap_or(0.0));
    }

    out
}
