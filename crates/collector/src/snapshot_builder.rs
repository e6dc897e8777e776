//! Assembles a [`MarketSnapshot`] from raw exchange data.

use crate::indicators::{average_daily_volume, moving_averages, trailing_range, trailing_volume};
use crate::types::{Candle, Ticker24h};
use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use market_pulse_core::{AnalysisConfig, Liquidations, MarketSnapshot};

/// Best-effort inputs; `None` means the source was unavailable.
#[derive(Debug, Clone, Default)]
pub struct SnapshotInputs {
    pub ticker: Option<Ticker24h>,
    pub funding_rate: Option<f64>,
    pub open_interest: Option<f64>,
    pub liquidations: Option<Liquidations>,
    pub sentiment: Option<f64>,
}

/// Builds a validated snapshot.
///
/// Configured MA periods are sorted and the first three fill the short,
/// medium and long slots (`ma_20`, `ma_50`, `ma_200`). Without a ticker,
/// 24h volume and range come from the last day of candles.
///
/// # Errors
/// Returns an error if there are no candles or the resulting snapshot is invalid.
pub fn build_snapshot(
    symbol: &str,
    captured_at: DateTime<Utc>,
    candles: &[Candle],
    inputs: &SnapshotInputs,
    config: &AnalysisConfig,
    candles_per_day: usize,
) -> Result<MarketSnapshot> {
    let Some(last) = candles.last() else {
        bail!("no OHLCV data available for {symbol}");
    };

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let mut periods = config.ma_periods.clone();
    periods.sort_unstable();
    periods.dedup();
    let averages = moving_averages(&closes, &periods);
    let slot = |i: usize| periods.get(i).and_then(|p| averages.get(p).copied().flatten());

    let volume_24h = inputs
        .ticker
        .map_or_else(|| trailing_volume(candles, candles_per_day), |t| t.quote_volume);
    let volume_avg = average_daily_volume(candles, config.volume_lookback_days, candles_per_day);

    let mut snapshot = MarketSnapshot::new(symbol, captured_at, last.close, volume_24h, volume_avg)
        .with_moving_averages(slot(0), slot(1), slot(2));

    let range = inputs
        .ticker
        .map(|t| (t.high, t.low))
        .or_else(|| trailing_range(candles, candles_per_day));
    if let Some((high, low)) = range {
        snapshot = snapshot.with_range_24h(high, low);
    }
    if let Some(rate) = inputs.funding_rate {
        snapshot = snapshot.with_funding_rate(rate);
    }
    if let Some(oi) = inputs.open_interest {
        snapshot = snapshot.with_open_interest(oi);
    }
    if let Some(liquidations) = inputs.liquidations {
        snapshot = snapshot.with_liquidations(liquidations);
    }
    if let Some(score) = inputs.sentiment {
        snapshot = snapshot.with_sentiment(score);
    }

    snapshot.validate()?;
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
    }

    fn hourly(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| {
                let close = 100.0 + i as f64;
                Candle {
                    open_time: at() - Duration::hours((n - i) as i64),
                    open: close,
                    high: close + 2.0,
                    low: close - 2.0,
                    close,
                    volume: 1.0,
                    quote_volume: 10.0,
                }
            })
            .collect()
    }

    #[test]
    fn derives_indicators_from_candles_only() {
        let candles = hourly(200);
        let snapshot = build_snapshot(
            "BTC/USDT",
            at(),
            &candles,
            &SnapshotInputs::default(),
            &AnalysisConfig::default(),
            24,
        )
        .unwrap();

        assert_eq!(snapshot.symbol, "BTC/USDT");
        assert!((snapshot.price - 299.0).abs() < 1e-9);
        assert!((snapshot.volume_24h - 240.0).abs() < 1e-9);
        assert!((snapshot.volume_avg_7d - 240.0).abs() < 1e-9);
        assert_eq!(snapshot.ma_20, Some(289.5));
        assert_eq!(snapshot.ma_50, Some(274.5));
        assert_eq!(snapshot.ma_200, Some(199.5));
        assert_eq!(snapshot.high_24h, Some(301.0));
        assert_eq!(snapshot.low_24h, Some(274.0));
        assert!(snapshot.funding_rate.is_none());
        assert!(snapshot.liquidations.is_none());
    }

    #[test]
    fn ticker_overrides_candle_fallbacks() {
        let inputs = SnapshotInputs {
            ticker: Some(Ticker24h {
                last_price: 150.0,
                high: 160.0,
                low: 140.0,
                quote_volume: 5000.0,
            }),
            funding_rate: Some(0.0001),
            open_interest: Some(12_345.0),
            liquidations: Some(Liquidations::new(3, 1)),
            sentiment: Some(0.4),
        };

        let snapshot = build_snapshot(
            "ETH/USDT",
            at(),
            &hourly(60),
            &inputs,
            &AnalysisConfig::default(),
            24,
        )
        .unwrap();

        assert!((snapshot.volume_24h - 5000.0).abs() < 1e-9);
        assert_eq!(snapshot.high_24h, Some(160.0));
        assert_eq!(snapshot.low_24h, Some(140.0));
        assert_eq!(snapshot.funding_rate, Some(0.0001));
        assert_eq!(snapshot.open_interest, Some(12_345.0));
        assert_eq!(snapshot.liquidations.map(|l| l.total), Some(4));
        assert_eq!(snapshot.sentiment_score, Some(0.4));
        // 60 candles cannot support a 200-period average
        assert!(snapshot.ma_200.is_none());
    }

    #[test]
    fn custom_periods_fill_slots_in_ascending_order() {
        let config = AnalysisConfig {
            ma_periods: vec![30, 10, 5],
            ..Default::default()
        };
        let snapshot = build_snapshot(
            "BTC/USDT",
            at(),
            &hourly(40),
            &SnapshotInputs::default(),
            &config,
            24,
        )
        .unwrap();

        assert_eq!(snapshot.ma_20, Some(137.0));
        assert_eq!(snapshot.ma_50, Some(134.5));
        assert_eq!(snapshot.ma_200, Some(124.5));
    }

    #[test]
    fn no_candles_is_an_error() {
        let err = build_snapshot(
            "BTC/USDT",
            at(),
            &[],
            &SnapshotInputs::default(),
            &AnalysisConfig::default(),
            24,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "no OHLCV data available for BTC/USDT");
    }

    #[test]
    fn non_positive_close_is_rejected() {
        let mut candles = hourly(5);
        if let Some(last) = candles.last_mut() {
            last.close = 0.0;
        }
        assert!(build_snapshot(
            "BTC/USDT",
            at(),
            &candles,
            &SnapshotInputs::default(),
            &AnalysisConfig::default(),
            24,
        )
        .is_err());
    }
}
