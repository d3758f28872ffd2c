//! Technical indicator library.
//!
//! Each indicator function takes the full ordered bar series plus its
//! parameters and returns an [`IndicatorSeries`] aligned 1:1 with bar
//! indices. Functions are deterministic and side-effect-free. Bars inside an
//! indicator's warm-up period are reported as invalid points, never as zero.
//!
//! - `IndicatorPoint`: one point in an indicator time series
//! - `IndicatorValue`: enum over the output shapes
//! - `IndicatorKind`: indicator identity + parameters (HashMap key)
//! - `IndicatorSeries`: a full series of points

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod obv;
pub mod rsi;
pub mod sar;
pub mod sma;
pub mod stochastic;
pub mod vwap;
pub mod wma;

use chrono::NaiveDate;
use std::fmt;

use crate::error::EngineError;
use crate::ohlcv::PriceBar;

#[derive(Debug, Clone)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: IndicatorValue,
}

#[derive(Debug, Clone)]
pub enum IndicatorValue {
    Simple(f64),
    Macd {
        line: f64,
        signal: f64,
        histogram: f64,
    },
    Stochastic {
        k: f64,
        /// %D lags %K by its own SMA window, so a point can hold a
        /// defined %K while %D is still absent.
        d: Option<f64>,
    },
    Bollinger {
        upper: f64,
        middle: f64,
        lower: f64,
    },
    Sar {
        value: f64,
        uptrend: bool,
    },
}

/// Indicator identity plus parameters. Fractional parameters are stored as
/// scaled integers so the type can serve as a HashMap key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorKind {
    Sma(usize),
    Ema(usize),
    Wma(usize),
    Rsi(usize),
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
    Bollinger {
        period: usize,
        stddev_mult_x100: u32,
    },
    Stochastic {
        k_period: usize,
        d_period: usize,
    },
    Atr(usize),
    Adx(usize),
    Vwap,
    Obv,
    Sar {
        af_start_x1000: u32,
        af_increment_x1000: u32,
        af_max_x1000: u32,
    },
}

impl IndicatorKind {
    /// Minimum series length before the indicator produces its first valid
    /// value.
    pub fn minimum_bars(&self) -> usize {
        match self {
            IndicatorKind::Sma(p) | IndicatorKind::Ema(p) | IndicatorKind::Wma(p) => *p,
            IndicatorKind::Rsi(p) => p + 1,
            IndicatorKind::Macd { slow, signal, .. } => slow + signal - 1,
            IndicatorKind::Bollinger { period, .. } => *period,
            IndicatorKind::Stochastic { k_period, d_period } => k_period + d_period - 1,
            IndicatorKind::Atr(p) => *p,
            IndicatorKind::Adx(p) => 2 * p,
            IndicatorKind::Vwap | IndicatorKind::Obv => 1,
            IndicatorKind::Sar { .. } => 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub kind: IndicatorKind,
    pub values: Vec<IndicatorPoint>,
}

/// Compute one indicator over the full series, dispatching on kind.
///
/// Never fails: a series shorter than the warm-up simply yields no valid
/// points. [`compute_indicator`] is the fallible public entry point.
pub fn compute(bars: &[PriceBar], kind: &IndicatorKind) -> IndicatorSeries {
    match kind {
        IndicatorKind::Sma(p) => sma::calculate_sma(bars, *p),
        IndicatorKind::Ema(p) => ema::calculate_ema(bars, *p),
        IndicatorKind::Wma(p) => wma::calculate_wma(bars, *p),
        IndicatorKind::Rsi(p) => rsi::calculate_rsi(bars, *p),
        IndicatorKind::Macd { fast, slow, signal } => {
            macd::calculate_macd(bars, *fast, *slow, *signal)
        }
        IndicatorKind::Bollinger {
            period,
            stddev_mult_x100,
        } => bollinger::calculate_bollinger(bars, *period, *stddev_mult_x100),
        IndicatorKind::Stochastic { k_period, d_period } => {
            stochastic::calculate_stochastic(bars, *k_period, *d_period)
        }
        IndicatorKind::Atr(p) => atr::calculate_atr(bars, *p),
        IndicatorKind::Adx(p) => adx::calculate_adx(bars, *p),
        IndicatorKind::Vwap => vwap::calculate_vwap(bars),
        IndicatorKind::Obv => obv::calculate_obv(bars),
        IndicatorKind::Sar {
            af_start_x1000,
            af_increment_x1000,
            af_max_x1000,
        } => sar::calculate_sar(
            bars,
            *af_start_x1000 as f64 / 1000.0,
            *af_increment_x1000 as f64 / 1000.0,
            *af_max_x1000 as f64 / 1000.0,
        ),
    }
}

/// Public indicator entry point: fails with `InsufficientData` when the
/// series is shorter than the indicator's warm-up length.
pub fn compute_indicator(
    bars: &[PriceBar],
    kind: &IndicatorKind,
) -> Result<IndicatorSeries, EngineError> {
    let minimum = kind.minimum_bars();
    if bars.len() < minimum {
        return Err(EngineError::InsufficientData {
            indicator: kind.to_string(),
            bars: bars.len(),
            minimum,
        });
    }
    Ok(compute(bars, kind))
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorKind::Sma(period) => write!(f, "SMA({})", period),
            IndicatorKind::Ema(period) => write!(f, "EMA({})", period),
            IndicatorKind::Wma(period) => write!(f, "WMA({})", period),
            IndicatorKind::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorKind::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
            IndicatorKind::Bollinger {
                period,
                stddev_mult_x100,
            } => {
                let mult = *stddev_mult_x100 as f64 / 100.0;
                write!(f, "BOLLINGER({},{})", period, mult)
            }
            IndicatorKind::Stochastic { k_period, d_period } => {
                write!(f, "STOCHASTIC({},{})", k_period, d_period)
            }
            IndicatorKind::Atr(period) => write!(f, "ATR({})", period),
            IndicatorKind::Adx(period) => write!(f, "ADX({})", period),
            IndicatorKind::Vwap => write!(f, "VWAP"),
            IndicatorKind::Obv => write!(f, "OBV"),
            IndicatorKind::Sar {
                af_start_x1000,
                af_increment_x1000,
                af_max_x1000,
            } => {
                write!(
                    f,
                    "SAR({},{},{})",
                    *af_start_x1000 as f64 / 1000.0,
                    *af_increment_x1000 as f64 / 1000.0,
                    *af_max_x1000 as f64 / 1000.0
                )
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_display_sma() {
        assert_eq!(IndicatorKind::Sma(20).to_string(), "SMA(20)");
    }

    #[test]
    fn kind_display_macd() {
        let macd = IndicatorKind::Macd {
            fast: 12,
            slow: 26,
            signal: 9,
        };
        assert_eq!(macd.to_string(), "MACD(12,26,9)");
    }

    #[test]
    fn kind_display_bollinger() {
        let boll = IndicatorKind::Bollinger {
            period: 20,
            stddev_mult_x100: 200,
        };
        assert_eq!(boll.to_string(), "BOLLINGER(20,2)");
    }

    #[test]
    fn kind_display_sar() {
        let sar = IndicatorKind::Sar {
            af_start_x1000: 20,
            af_increment_x1000: 20,
            af_max_x1000: 200,
        };
        assert_eq!(sar.to_string(), "SAR(0.02,0.02,0.2)");
    }

    #[test]
    fn kind_hash_eq() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        let sma20 = IndicatorKind::Sma(20);
        let rsi14 = IndicatorKind::Rsi(14);

        map.insert(sma20.clone(), "sma20");
        map.insert(rsi14.clone(), "rsi14");

        assert_eq!(map.get(&IndicatorKind::Sma(20)), Some(&"sma20"));
        assert_eq!(map.get(&IndicatorKind::Rsi(14)), Some(&"rsi14"));
        assert_eq!(map.get(&IndicatorKind::Sma(50)), None);
    }

    #[test]
    fn minimum_bars_per_kind() {
        assert_eq!(IndicatorKind::Sma(20).minimum_bars(), 20);
        assert_eq!(IndicatorKind::Rsi(14).minimum_bars(), 15);
        assert_eq!(
            IndicatorKind::Macd {
                fast: 12,
                slow: 26,
                signal: 9
            }
            .minimum_bars(),
            34
        );
        assert_eq!(
            IndicatorKind::Stochastic {
                k_period: 14,
                d_period: 3
            }
            .minimum_bars(),
            16
        );
        assert_eq!(IndicatorKind::Adx(14).minimum_bars(), 28);
        assert_eq!(IndicatorKind::Vwap.minimum_bars(), 1);
    }

    #[test]
    fn compute_indicator_rejects_short_series() {
        let bars = test_support::make_bars(&[100.0, 101.0, 102.0]);
        let err = compute_indicator(&bars, &IndicatorKind::Rsi(14)).unwrap_err();
        match err {
            EngineError::InsufficientData {
                indicator,
                bars,
                minimum,
            } => {
                assert_eq!(indicator, "RSI(14)");
                assert_eq!(bars, 3);
                assert_eq!(minimum, 15);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn compute_indicator_accepts_exact_minimum() {
        let bars = test_support::make_bars(&[100.0; 20]);
        let series = compute_indicator(&bars, &IndicatorKind::Sma(20)).unwrap();
        assert_eq!(series.values.len(), 20);
        assert!(series.values[19].valid);
    }
}
