//! Point-in-time market metrics for a single trading pair.
//!
//! A [`MarketSnapshot`] is built once per analysis cycle by a collector and is
//! read-only afterwards. Every derived field (moving averages, the 7-day volume
//! average) is computed by the collector, never by the analyzer.

use crate::error::AnalysisError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Forced-closure counts observed in the collector's sample window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Liquidations {
    /// Total liquidation events in the sample
    pub total: u64,
    /// Long positions liquidated (sell-side force orders)
    pub long_count: u64,
    /// Short positions liquidated (buy-side force orders)
    pub short_count: u64,
}

impl Liquidations {
    /// Creates a liquidation tally where `total` is the sum of both sides.
    #[must_use]
    pub const fn new(long_count: u64, short_count: u64) -> Self {
        Self {
            total: long_count + short_count,
            long_count,
            short_count,
        }
    }
}

/// All metrics for one symbol at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Exchange pair, e.g. "BTC/USDT"
    pub symbol: String,
    /// When the metrics were captured
    pub captured_at: DateTime<Utc>,
    /// Last traded price
    pub price: f64,
    /// Trailing 24h quote volume
    pub volume_24h: f64,
    /// Mean daily quote volume over the lookback window
    pub volume_avg_7d: f64,
    #[serde(default)]
    pub open_interest: Option<f64>,
    /// Signed perpetual funding rate
    #[serde(default)]
    pub funding_rate: Option<f64>,
    #[serde(default)]
    pub ma_20: Option<f64>,
    #[serde(default)]
    pub ma_50: Option<f64>,
    #[serde(default)]
    pub ma_200: Option<f64>,
    #[serde(default)]
    pub high_24h: Option<f64>,
    #[serde(default)]
    pub low_24h: Option<f64>,
    #[serde(default)]
    pub liquidations: Option<Liquidations>,
    /// 0.0 = extreme fear, 1.0 = extreme greed
    #[serde(default)]
    pub sentiment_score: Option<f64>,
}

impl MarketSnapshot {
    /// Creates a snapshot with only the required fields set.
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        captured_at: DateTime<Utc>,
        price: f64,
        volume_24h: f64,
        volume_avg_7d: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            captured_at,
            price,
            volume_24h,
            volume_avg_7d,
            open_interest: None,
            funding_rate: None,
            ma_20: None,
            ma_50: None,
            ma_200: None,
            high_24h: None,
            low_24h: None,
            liquidations: None,
            sentiment_score: None,
        }
    }

    /// Sets the 20/50/200 period moving averages.
    #[must_use]
    pub fn with_moving_averages(
        mut self,
        ma_20: Option<f64>,
        ma_50: Option<f64>,
        ma_200: Option<f64>,
    ) -> Self {
        self.ma_20 = ma_20;
        self.ma_50 = ma_50;
        self.ma_200 = ma_200;
        self
    }

    /// Sets the funding rate.
    #[must_use]
    pub fn with_funding_rate(mut self, rate: f64) -> Self {
        self.funding_rate = Some(rate);
        self
    }

    /// Sets open interest.
    #[must_use]
    pub fn with_open_interest(mut self, open_interest: f64) -> Self {
        self.open_interest = Some(open_interest);
        self
    }

    /// Sets the 24h trading range.
    #[must_use]
    pub fn with_range_24h(mut self, high: f64, low: f64) -> Self {
        self.high_24h = Some(high);
        self.low_24h = Some(low);
        self
    }

    /// Sets the liquidation tally.
    #[must_use]
    pub fn with_liquidations(mut self, liquidations: Liquidations) -> Self {
        self.liquidations = Some(liquidations);
        self
    }

    /// Sets the sentiment score, clamped to [0.0, 1.0].
    #[must_use]
    pub fn with_sentiment(mut self, score: f64) -> Self {
        self.sentiment_score = Some(score.clamp(0.0, 1.0));
        self
    }

    /// Checks the structural invariants the analyzer relies on.
    ///
    /// # Errors
    /// Returns [`AnalysisError::InvalidSnapshot`] when the price is not a
    /// positive finite number or either volume figure is unusable.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(AnalysisError::invalid(
                &self.symbol,
                format!("price must be positive and finite, got {}", self.price),
            ));
        }
        if !self.volume_24h.is_finite() {
            return Err(AnalysisError::invalid(
                &self.symbol,
                format!("24h volume must be finite, got {}", self.volume_24h),
            ));
        }
        if !self.volume_avg_7d.is_finite() || self.volume_avg_7d < 0.0 {
            return Err(AnalysisError::invalid(
                &self.symbol,
                format!(
                    "7-day volume average must be non-negative and finite, got {}",
                    self.volume_avg_7d
                ),
            ));
        }
        Ok(())
    }
}
