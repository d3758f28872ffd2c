//! Parabolic SAR (stop and reverse).
//!
//! The most stateful indicator in the library: trend direction, extreme
//! point, and acceleration factor all carry from bar to bar. The per-bar
//! state is threaded explicitly through [`sar_step`] as an accumulator so
//! the recurrence stays referentially transparent and testable on its own.
//!
//! Per bar: project SAR toward the extreme point, clamp against the prior
//! two bars' lows (uptrend) or highs (downtrend), flip trend and reset the
//! acceleration factor when price crosses the SAR, otherwise grow the factor
//! by `af_increment` up to `af_max` on each new extreme.

use crate::indicator::{IndicatorKind, IndicatorPoint, IndicatorSeries, IndicatorValue};
use crate::ohlcv::PriceBar;

/// Per-bar SAR accumulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SarState {
    pub uptrend: bool,
    pub sar: f64,
    pub extreme: f64,
    pub af: f64,
}

impl SarState {
    /// Seed from the first two bars: the second bar's direction sets the
    /// trend, the first bar's opposite extreme sets the initial SAR.
    pub fn seed(first: &PriceBar, second: &PriceBar, af_start: f64) -> Self {
        let uptrend = second.close >= first.close;
        SarState {
            uptrend,
            sar: if uptrend { first.low } else { first.high },
            extreme: if uptrend { second.high } else { second.low },
            af: af_start,
        }
    }
}

/// Advance the SAR one bar.
///
/// `prior` and `prior2` supply the previous two bars' extremes, which clamp
/// the projected SAR so it never enters their range.
pub fn sar_step(
    state: SarState,
    bar: &PriceBar,
    prior: &PriceBar,
    prior2: &PriceBar,
    af_start: f64,
    af_increment: f64,
    af_max: f64,
) -> SarState {
    let projected = state.sar + state.af * (state.extreme - state.sar);

    if state.uptrend {
        let projected = projected.min(prior.low).min(prior2.low);
        if bar.low < projected {
            // Price crossed below the SAR: reverse to downtrend.
            SarState {
                uptrend: false,
                sar: state.extreme,
                extreme: bar.low,
                af: af_start,
            }
        } else if bar.high > state.extreme {
            SarState {
                uptrend: true,
                sar: projected,
                extreme: bar.high,
                af: (state.af + af_increment).min(af_max),
            }
        } else {
            SarState {
                uptrend: true,
                sar: projected,
                ..state
            }
        }
    } else {
        let projected = projected.max(prior.high).max(prior2.high);
        if bar.high > projected {
            SarState {
                uptrend: true,
                sar: state.extreme,
                extreme: bar.high,
                af: af_start,
            }
        } else if bar.low < state.extreme {
            SarState {
                uptrend: false,
                sar: projected,
                extreme: bar.low,
                af: (state.af + af_increment).min(af_max),
            }
        } else {
            SarState {
                uptrend: false,
                sar: projected,
                ..state
            }
        }
    }
}

pub fn calculate_sar(
    bars: &[PriceBar],
    af_start: f64,
    af_increment: f64,
    af_max: f64,
) -> IndicatorSeries {
    let kind = IndicatorKind::Sar {
        af_start_x1000: (af_start * 1000.0).round() as u32,
        af_increment_x1000: (af_increment * 1000.0).round() as u32,
        af_max_x1000: (af_max * 1000.0).round() as u32,
    };

    if bars.len() < 2 {
        let values = bars
            .iter()
            .map(|b| IndicatorPoint {
                date: b.date,
                valid: false,
                value: IndicatorValue::Sar {
                    value: 0.0,
                    uptrend: true,
                },
            })
            .collect();
        return IndicatorSeries { kind, values };
    }

    let mut values = Vec::with_capacity(bars.len());
    values.push(IndicatorPoint {
        date: bars[0].date,
        valid: false,
        value: IndicatorValue::Sar {
            value: 0.0,
            uptrend: true,
        },
    });

    let mut state = SarState::seed(&bars[0], &bars[1], af_start);
    values.push(IndicatorPoint {
        date: bars[1].date,
        valid: true,
        value: IndicatorValue::Sar {
            value: state.sar,
            uptrend: state.uptrend,
        },
    });

    for i in 2..bars.len() {
        state = sar_step(
            state,
            &bars[i],
            &bars[i - 1],
            &bars[i - 2],
            af_start,
            af_increment,
            af_max,
        );
        values.push(IndicatorPoint {
            date: bars[i].date,
            valid: true,
            value: IndicatorValue::Sar {
                value: state.sar,
                uptrend: state.uptrend,
            },
        });
    }

    IndicatorSeries { kind, values }
}
