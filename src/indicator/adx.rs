//! ADX (Average Directional Index).
//!
//! Directional movement per bar:
//!   +DM = high - prev_high when that exceeds prev_low - low and is positive
//!   -DM = prev_low - low   when that exceeds high - prev_high and is positive
//!
//! +DM/-DM/TR are Wilder-sum smoothed over n bars (defined from index n),
//! normalized into +DI/-DI, combined into DX = 100*|+DI - -DI|/(+DI + -DI),
//! and ADX is the Wilder-smoothed average of DX, seeded at index 2n-1.
//! Zero denominators yield 0 rather than an error.

use crate::indicator::{IndicatorKind, IndicatorPoint, IndicatorSeries, IndicatorValue};
use crate::ohlcv::PriceBar;

pub fn calculate_adx(bars: &[PriceBar], period: usize) -> IndicatorSeries {
    if period == 0 || bars.is_empty() {
        return IndicatorSeries {
            kind: IndicatorKind::Adx(period),
            values: Vec::new(),
        };
    }

    let n = bars.len();
    let mut plus_dm = vec![0.0; n];
    let mut minus_dm = vec![0.0; n];
    let mut tr = vec![0.0; n];

    for i in 1..n {
        let up_move = bars[i].high - bars[i - 1].high;
        let down_move = bars[i - 1].low - bars[i].low;

        if up_move > down_move && up_move > 0.0 {
            plus_dm[i] = up_move;
        }
        if down_move > up_move && down_move > 0.0 {
            minus_dm[i] = down_move;
        }
        tr[i] = bars[i].true_range(bars[i - 1].close);
    }

    // Wilder-sum smoothing: seed with the sum of the first n values, then
    // s = s - s/n + current.
    let mut dx = vec![0.0; n];
    let mut smooth_plus = 0.0;
    let mut smooth_minus = 0.0;
    let mut smooth_tr = 0.0;

    for i in 1..n {
        if i <= period {
            smooth_plus += plus_dm[i];
            smooth_minus += minus_dm[i];
            smooth_tr += tr[i];
        } else {
            smooth_plus = smooth_plus - smooth_plus / period as f64 + plus_dm[i];
            smooth_minus = smooth_minus - smooth_minus / period as f64 + minus_dm[i];
            smooth_tr = smooth_tr - smooth_tr / period as f64 + tr[i];
        }

        if i >= period {
            let (plus_di, minus_di) = if smooth_tr > 0.0 {
                (
                    100.0 * smooth_plus / smooth_tr,
                    100.0 * smooth_minus / smooth_tr,
                )
            } else {
                (0.0, 0.0)
            };

            let di_sum = plus_di + minus_di;
            dx[i] = if di_sum > 0.0 {
                100.0 * (plus_di - minus_di).abs() / di_sum
            } else {
                0.0
            };
        }
    }

    let warmup = 2 * period - 1;
    let mut values = Vec::with_capacity(n);
    let mut adx = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        if i < warmup {
            values.push(IndicatorPoint {
                date: bar.date,
                valid: false,
                value: IndicatorValue::Simple(0.0),
            });
            continue;
        }

        if i == warmup {
            adx = dx[period..=warmup].iter().sum::<f64>() / period as f64;
        } else {
            adx = (adx * (period - 1) as f64 + dx[i]) / period as f64;
        }

        values.push(IndicatorPoint {
            date: bar.date,
            valid: true,
            value: IndicatorValue::Simple(adx),
        });
    }

    IndicatorSeries {
        kind: IndicatorKind::Adx(period),
        values,
    }
}
