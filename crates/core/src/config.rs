use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub analysis: AnalysisConfig,
    pub collector: CollectorConfig,
    pub watch: WatchConfig,
}

/// Thresholds consumed by the analyzer. Read-only for the life of a cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Moving-average window sizes, in candles
    pub ma_periods: Vec<usize>,
    /// Window for the trailing volume average, in days
    pub volume_lookback_days: u32,
    /// Absolute funding rate at which funding is "dangerous"
    pub funding_rate_threshold: f64,
    /// Fractional volume increase that triggers a spike (0.30 = +30%)
    pub volume_spike_threshold: f64,
    /// Reserved for open-interest spike detection
    pub oi_spike_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ma_periods: vec![20, 50, 200],
            volume_lookback_days: 7,
            funding_rate_threshold: 0.01,
            volume_spike_threshold: 0.30,
            oi_spike_threshold: 0.15,
        }
    }
}

impl AnalysisConfig {
    /// Funding rate at which funding is "elevated".
    #[must_use]
    pub fn elevated_funding_threshold(&self) -> f64 {
        self.funding_rate_threshold * 0.5
    }

    /// Rejects thresholds that would make every classification meaningless.
    ///
    /// # Errors
    /// Returns an error if a threshold is non-positive or no MA period is set.
    pub fn validate(&self) -> Result<()> {
        if self.ma_periods.is_empty() || self.ma_periods.contains(&0) {
            bail!("ma_periods must contain positive window sizes");
        }
        if self.volume_lookback_days == 0 {
            bail!("volume_lookback_days must be positive");
        }
        if !(self.funding_rate_threshold > 0.0) {
            bail!(
                "funding_rate_threshold must be positive, got {}",
                self.funding_rate_threshold
            );
        }
        if !(self.volume_spike_threshold > 0.0) {
            bail!(
                "volume_spike_threshold must be positive, got {}",
                self.volume_spike_threshold
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    pub base_url: String,
    /// Fear & Greed index endpoint
    pub sentiment_url: String,
    /// Candle interval, e.g. "1h"
    pub timeframe: String,
    pub candle_limit: usize,
    pub liquidation_sample_limit: usize,
    pub rate_limit_per_second: u32,
    pub request_timeout_secs: u64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://fapi.binance.com".to_string(),
            sentiment_url: "https://api.alternative.me/fng/".to_string(),
            timeframe: "1h".to_string(),
            candle_limit: 200,
            liquidation_sample_limit: 100,
            rate_limit_per_second: 20,
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    pub symbols: Vec<String>,
    pub refresh_interval_secs: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            symbols: vec![
                "BTC/USDT".to_string(),
                "ETH/USDT".to_string(),
                "BNB/USDT".to_string(),
                "SOL/USDT".to_string(),
            ],
            refresh_interval_secs: 60,
        }
    }
}
