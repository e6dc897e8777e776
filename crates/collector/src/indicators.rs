//! Indicators derived from raw candle history.

use crate::types::Candle;
use std::collections::BTreeMap;

/// Mean of the last `period` values, or `None` with too little history.
#[must_use]
pub fn simple_moving_average(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Moving averages of close price for each configured period.
#[must_use]
pub fn moving_averages(closes: &[f64], periods: &[usize]) -> BTreeMap<usize, Option<f64>> {
    periods
        .iter()
        .map(|&period| (period, simple_moving_average(closes, period)))
        .collect()
}

/// Average daily quote volume over the trailing `lookback_days`.
///
/// With less history than the lookback, averages over whatever is available.
/// Per-candle volume is scaled by `candles_per_day` so the result is
/// comparable with a 24h volume figure.
#[must_use]
pub fn average_daily_volume(candles: &[Candle], lookback_days: u32, candles_per_day: usize) -> f64 {
    let wanted = lookback_days as usize * candles_per_day;
    let window = tail(candles, wanted);
    if window.is_empty() {
        return 0.0;
    }
    let per_candle = window.iter().map(|c| c.quote_volume).sum::<f64>() / window.len() as f64;
    per_candle * candles_per_day as f64
}

/// Quote volume over the last day of candles.
#[must_use]
pub fn trailing_volume(candles: &[Candle], candles_per_day: usize) -> f64 {
    tail(candles, candles_per_day)
        .iter()
        .map(|c| c.quote_volume)
        .sum()
}

/// Highest high and lowest low over the last day of candles.
#[must_use]
pub fn trailing_range(candles: &[Candle], candles_per_day: usize) -> Option<(f64, f64)> {
    let window = tail(candles, candles_per_day);
    if window.is_empty() {
        return None;
    }
    let high = window.iter().map(|c| c.high).fold(f64::MIN, f64::max);
    let low = window.iter().map(|c| c.low).fold(f64::MAX, f64::min);
    Some((high, low))
}

fn tail(candles: &[Candle], n: usize) -> &[Candle] {
    &candles[candles.len().saturating_sub(n)..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn candles(n: usize) -> Vec<Candle> {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        (0..n)
            .map(|i| {
                let close = 100.0 + i as f64;
                Candle {
                    open_time: start + Duration::hours(i as i64),
                    open: close - 0.5,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    volume: 1.0,
                    quote_volume: 10.0,
                }
            })
            .collect()
    }

    #[test]
    fn sma_uses_last_values() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(simple_moving_average(&values, 2), Some(4.5));
        assert_eq!(simple_moving_average(&values, 5), Some(3.0));
    }

    #[test]
    fn sma_requires_full_window() {
        assert_eq!(simple_moving_average(&[1.0, 2.0], 3), None);
        assert_eq!(simple_moving_average(&[1.0, 2.0], 0), None);
    }

    #[test]
    fn moving_averages_with_short_history() {
        let closes: Vec<f64> = candles(60).iter().map(|c| c.close).collect();
        let mas = moving_averages(&closes, &[20, 50, 200]);

        // last 20 closes are 140..=159
        assert_eq!(mas[&20], Some(149.5));
        assert_eq!(mas[&50], Some(134.5));
        assert_eq!(mas[&200], None);
    }

    #[test]
    fn daily_volume_is_scaled_per_day() {
        // 10 quote volume per hourly candle = 240 per day
        let volume = average_daily_volume(&candles(200), 7, 24);
        assert!((volume - 240.0).abs() < 1e-9);
    }

    #[test]
    fn daily_volume_with_partial_history() {
        let mut history = candles(30);
        history[29].quote_volume = 40.0;
        // (29 * 10 + 40) / 30 = 11 per candle
        let volume = average_daily_volume(&history, 7, 24);
        assert!((volume - 264.0).abs() < 1e-9);
    }

    #[test]
    fn daily_volume_without_candles_is_zero() {
        assert_eq!(average_daily_volume(&[], 7, 24), 0.0);
    }

    #[test]
    fn trailing_window_helpers() {
        let history = candles(48);
        assert!((trailing_volume(&history, 24) - 240.0).abs() < 1e-9);

        let (high, low) = trailing_range(&history, 24).unwrap();
        assert!((high - 148.0).abs() < 1e-9);
        assert!((low - 123.0).abs() < 1e-9);
        assert!(trailing_range(&[], 24).is_none());
    }
}
