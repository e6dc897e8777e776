//! Trend classification from price and moving averages.
//!
//! Price is compared against MA20 and MA50 with strict inequalities; MA200
//! only upgrades a trend from "short-term" to "strong". Missing MA20 or MA50
//! is a valid neutral outcome, not an error.

use market_pulse_core::Trend;

pub const INSUFFICIENT_DATA: &str = "insufficient data to determine trend";
pub const STRONG_UPTREND: &str = "strong uptrend, price above all major MAs";
pub const SHORT_TERM_UPTREND: &str = "short-term uptrend, price above MA20 and MA50";
pub const STRONG_DOWNTREND: &str = "strong downtrend, price below all major MAs";
pub const SHORT_TERM_DOWNTREND: &str = "short-term downtrend, price below MA20 and MA50";
pub const SIDEWAYS: &str = "sideways market, no clear trend";

/// Result of trend classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendClassification {
    pub trend: Trend,
    pub emoji: &'static str,
    pub description: &'static str,
}

impl TrendClassification {
    const fn new(trend: Trend, description: &'static str) -> Self {
        Self {
            trend,
            emoji: trend.emoji(),
            description,
        }
    }
}

/// Classifies the trend. First matching rule wins.
#[must_use]
pub fn classify_trend(
    price: f64,
    ma_20: Option<f64>,
    ma_50: Option<f64>,
    ma_200: Option<f64>,
) -> TrendClassification {
    let (Some(ma_20), Some(ma_50)) = (ma_20, ma_50) else {
        return TrendClassification::new(Trend::Neutral, INSUFFICIENT_DATA);
    };

    if price > ma_20 && ma_20 > ma_50 {
        let description = match ma_200 {
            Some(ma_200) if price > ma_200 => STRONG_UPTREND,
            _ => SHORT_TERM_UPTREND,
        };
        TrendClassification::new(Trend::Bullish, description)
    } else if price < ma_20 && ma_20 < ma_50 {
        let description = match ma_200 {
            Some(ma_200) if price < ma_200 => STRONG_DOWNTREND,
            _ => SHORT_TERM_DOWNTREND,
        };
        TrendClassification::new(Trend::Bearish, description)
    } else {
        TrendClassification::new(Trend::Neutral, SIDEWAYS)
    }
}
