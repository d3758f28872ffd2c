//! Stochastic Oscillator.
//!
//! %K = 100 * (close - lowest_low(k)) / (highest_high(k) - lowest_low(k))
//! %D = SMA(d) of %K
//!
//! A flat window (highest high == lowest low) yields the neutral 50 rather
//! than dividing by zero. %K is valid from index k-1; %D needs d further
//! %K values and is `None` until index k+d-2.

use crate::indicator::{IndicatorKind, IndicatorPoint, IndicatorSeries, IndicatorValue};
use crate::ohlcv::PriceBar;

pub fn calculate_stochastic(bars: &[PriceBar], k_period: usize, d_period: usize) -> IndicatorSeries {
    let kind = IndicatorKind::Stochastic { k_period, d_period };

    if k_period == 0 || d_period == 0 || bars.is_empty() {
        return IndicatorSeries {
            kind,
            values: Vec::new(),
        };
    }

    let mut k_values: Vec<f64> = vec![0.0; bars.len()];

    for i in (k_period - 1)..bars.len() {
        let window = &bars[i + 1 - k_period..=i];
        let highest = window.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
        let lowest = window.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);

        let range = highest - lowest;
        k_values[i] = if range > 0.0 {
            100.0 * (bars[i].close - lowest) / range
        } else {
            50.0
        };
    }

    let k_warmup = k_period - 1;
    let d_warmup = k_period + d_period - 2;

    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let d = (i >= d_warmup)
                .then(|| k_values[i + 1 - d_period..=i].iter().sum::<f64>() / d_period as f64);
            IndicatorPoint {
                date: bar.date,
                valid: i >= k_warmup,
                value: IndicatorValue::Stochastic { k: k_values[i], d },
            }
        })
        .collect();

    IndicatorSeries { kind, values }
}
