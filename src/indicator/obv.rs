//! OBV (On-Balance Volume).

use crate::indicator::{IndicatorKind, IndicatorPoint, IndicatorSeries, IndicatorValue};
use crate::ohlcv::PriceBar;

/// Cumulative running sum of signed volume.
///
/// OBV[0] = volume[0]
/// close up:   OBV[i] = OBV[i-1] + volume[i]
/// close down: OBV[i] = OBV[i-1] - volume[i]
/// unchanged:  OBV[i] = OBV[i-1]
///
/// No warmup; all bars are valid.
pub fn calculate_obv(bars: &[PriceBar]) -> IndicatorSeries {
    let mut values = Vec::with_capacity(bars.len());
    let mut obv: f64 = 0.0;
    let mut prev_close: f64 = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        if i == 0 {
            obv = bar.volume as f64;
        } else if bar.close > prev_close {
            obv += bar.volume as f64;
        } else if bar.close < prev_close {
            obv -= bar.volume as f64;
        }
        prev_close = bar.close;

        values.push(IndicatorPoint {
            date: bar.date,
            valid: true,
            value: IndicatorValue::Simple(obv),
        });
    }

    IndicatorSeries {
        kind: IndicatorKind::Obv,
        values,
    }
}
