//! Shared types for the snapshot collector.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use std::str::FromStr;

const MS_PER_DAY: i64 = 86_400_000;

/// One OHLCV candle.
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub open_time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Base asset volume
    pub volume: f64,
    /// Quote asset volume
    pub quote_volume: f64,
}

/// 24h rolling ticker statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ticker24h {
    pub last_price: f64,
    pub high: f64,
    pub low: f64,
    pub quote_volume: f64,
}

/// Candle interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    OneMinute,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    OneHour,
    TwoHours,
    FourHours,
    SixHours,
    EightHours,
    TwelveHours,
    OneDay,
}

impl Interval {
    /// Returns the Binance API string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::OneMinute => "1m",
            Interval::FiveMinutes => "5m",
            Interval::FifteenMinutes => "15m",
            Interval::ThirtyMinutes => "30m",
            Interval::OneHour => "1h",
            Interval::TwoHours => "2h",
            Interval::FourHours => "4h",
            Interval::SixHours => "6h",
            Interval::EightHours => "8h",
            Interval::TwelveHours => "12h",
            Interval::OneDay => "1d",
        }
    }

    /// Returns the interval duration in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> i64 {
        match self {
            Interval::OneMinute => 60_000,
            Interval::FiveMinutes => 300_000,
            Interval::FifteenMinutes => 900_000,
            Interval::ThirtyMinutes => 1_800_000,
            Interval::OneHour => 3_600_000,
            Interval::TwoHours => 7_200_000,
            Interval::FourHours => 14_400_000,
            Interval::SixHours => 21_600_000,
            Interval::EightHours => 28_800_000,
            Interval::TwelveHours => 43_200_000,
            Interval::OneDay => MS_PER_DAY,
        }
    }

    /// Number of candles covering one day.
    #[must_use]
    pub fn candles_per_day(&self) -> usize {
        (MS_PER_DAY / self.duration_ms()) as usize
    }
}

impl FromStr for Interval {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "1m" => Ok(Interval::OneMinute),
            "5m" => Ok(Interval::FiveMinutes),
            "15m" => Ok(Interval::FifteenMinutes),
            "30m" => Ok(Interval::ThirtyMinutes),
            "1h" => Ok(Interval::OneHour),
            "2h" => Ok(Interval::TwoHours),
            "4h" => Ok(Interval::FourHours),
            "6h" => Ok(Interval::SixHours),
            "8h" => Ok(Interval::EightHours),
            "12h" => Ok(Interval::TwelveHours),
            "1d" => Ok(Interval::OneDay),
            _ => Err(anyhow!(
                "Invalid interval: '{}'. Valid values: 1m, 5m, 15m, 30m, 1h, 2h, 4h, 6h, 8h, 12h, 1d",
                s
            )),
        }
    }
}

/// Converts a pair like "btc/usdt" into the exchange form "BTCUSDT".
#[must_use]
pub fn normalize_symbol(symbol: &str) -> String {
    symbol
        .chars()
        .filter(|c| !matches!(c, '/' | '-' | '_' | ' '))
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_round_trips_through_str() {
        for s in ["1m", "5m", "15m", "30m", "1h", "2h", "4h", "6h", "8h", "12h", "1d"] {
            let interval: Interval = s.parse().unwrap();
            assert_eq!(interval.as_str(), s);
        }
    }

    #[test]
    fn interval_rejects_unknown() {
        assert!("7h".parse::<Interval>().is_err());
    }

    #[test]
    fn candles_per_day() {
        assert_eq!(Interval::OneHour.candles_per_day(), 24);
        assert_eq!(Interval::FourHours.candles_per_day(), 6);
        assert_eq!(Interval::OneDay.candles_per_day(), 1);
        assert_eq!(Interval::FifteenMinutes.candles_per_day(), 96);
    }

    #[test]
    fn normalize_symbol_strips_separators() {
        assert_eq!(normalize_symbol("BTC/USDT"), "BTCUSDT");
        assert_eq!(normalize_symbol("eth-usdt"), "ETHUSDT");
        assert_eq!(normalize_symbol("SOLUSDT"), "SOLUSDT");
    }
}
