//! Bollinger Bands.
//!
//! - Middle: SMA over n bars
//! - Upper/Lower: Middle ± (multiplier × population standard deviation)
//!
//! Population std dev divides by N, not N-1. The multiplier is carried as a
//! x100 integer so the kind stays hashable. Warmup: first (n-1) bars invalid.

use crate::indicator::{IndicatorKind, IndicatorPoint, IndicatorSeries, IndicatorValue};
use crate::ohlcv::PriceBar;

pub fn calculate_bollinger(
    bars: &[PriceBar],
    period: usize,
    stddev_mult_x100: u32,
) -> IndicatorSeries {
    let kind = IndicatorKind::Bollinger {
        period,
        stddev_mult_x100,
    };

    if period == 0 || bars.is_empty() {
        return IndicatorSeries {
            kind,
            values: Vec::new(),
        };
    }

    let mut values = Vec::with_capacity(bars.len());
    let warmup = period - 1;
    let mult = stddev_mult_x100 as f64 / 100.0;

    for i in 0..bars.len() {
        let valid = i >= warmup;

        let (upper, middle, lower) = if valid {
            let window = &bars[i + 1 - period..=i];
            let middle: f64 = window.iter().map(|b| b.close).sum::<f64>() / period as f64;
            let variance: f64 = window
                .iter()
                .map(|b| {
                    let diff = b.close - middle;
                    diff * diff
                })
                .sum::<f64>()
                / period as f64;
            let band = mult * variance.sqrt();
            (middle + band, middle, middle - band)
        } else {
            (0.0, 0.0, 0.0)
        };

        values.push(IndicatorPoint {
            date: bars[i].date,
            valid,
            value: IndicatorValue::Bollinger {
                upper,
                middle,
                lower,
            },
        });
    }

    IndicatorSeries { kind, values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::test_support::make_bars;

    fn bands(point: &IndicatorPoint) -> (f64, f64, f64) {
        match point.value {
            IndicatorValue::Bollinger {
                upper,
                middle,
                lower,
            } => (upper, middle, lower),
            _ => panic!("expected Bollinger value"),
        }
    }

    #[test]
    fn bollinger_warmup() {
        let bars = make_bars(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let series = calculate_bollinger(&bars, 3, 200);

        assert!(!series.values[0].valid);
        assert!(!series.values[1].valid);
        assert!(series.values[2].valid);
    }

    #[test]
    fn bollinger_constant_prices_collapse_bands() {
        let bars = make_bars(&[100.0; 5]);
        let series = calculate_bollinger(&bars, 3, 200);

        let (upper, middle, lower) = bands(&series.values[4]);
        assert!((middle - 100.0).abs() < f64::EPSILON);
        assert!((upper - 100.0).abs() < f64::EPSILON);
        assert!((lower - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn bollinger_population_stddev() {
        let bars = make_bars(&[10.0, 20.0, 30.0]);
        let series = calculate_bollinger(&bars, 3, 200);

        // mean = 20, population variance = ((10)^2 + 0 + (10)^2)/3
        let stddev = (200.0f64 / 3.0).sqrt();
        let (upper, middle, lower) = bands(&series.values[2]);
        assert!((middle - 20.0).abs() < 1e-9);
        assert!((upper - (20.0 + 2.0 * stddev)).abs() < 1e-9);
        assert!((lower - (20.0 - 2.0 * stddev)).abs() < 1e-9);
    }

    #[test]
    fn bollinger_band_ordering() {
        let bars = make_bars(
            &(0..20)
                .map(|i| 100.0 + ((i * 13) % 7) as f64)
                .collect::<Vec<_>>(),
        );
        let series = calculate_bollinger(&bars, 5, 150);

        for point in series.values.iter().filter(|p| p.valid) {
            let (upper, middle, lower) = bands(point);
            assert!(upper >= middle);
            assert!(middle >= lower);
        }
    }

    #[test]
    fn bollinger_empty_and_zero_period() {
        assert!(calculate_bollinger(&[], 3, 200).values.is_empty());
        let bars = make_bars(&[10.0]);
        assert!(calculate_bollinger(&bars, 0, 200).values.is_empty());
    }
}
