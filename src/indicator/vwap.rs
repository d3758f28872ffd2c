//! VWAP (Volume Weighted Average Price).
//!
//! Cumulative (typical_price * volume) / cumulative volume from the first
//! bar of the series; the series itself defines the session, so there is no
//! configurable window. All bars are valid. Zero cumulative volume falls
//! back to the close.

use crate::indicator::{IndicatorKind, IndicatorPoint, IndicatorSeries, IndicatorValue};
use crate::ohlcv::PriceBar;

pub fn calculate_vwap(bars: &[PriceBar]) -> IndicatorSeries {
    let mut values = Vec::with_capacity(bars.len());
    let mut cum_tp_vol = 0.0;
    let mut cum_vol = 0.0;

    for bar in bars {
        cum_tp_vol += bar.typical_price() * bar.volume as f64;
        cum_vol += bar.volume as f64;

        let vwap = if cum_vol > 0.0 {
            cum_tp_vol / cum_vol
        } else {
            bar.close
        };

        values.push(IndicatorPoint {
            date: bar.date,
            valid: true,
            value: IndicatorValue::Simple(vwap),
        });
    }

    IndicatorSeries {
        kind: IndicatorKind::Vwap,
        values,
    }
}
