//! Snapshot → analysis entry point.

use crate::anomaly::detect_anomalies;
use crate::classifier::{
    classify_funding, classify_trend, classify_volatility, key_levels, volume_change_pct,
};
use crate::direction::{trading_advisories, trading_direction, DirectionInputs};
use chrono::{DateTime, Utc};
use market_pulse_core::{AnalysisConfig, AnalysisError, MarketAnalysis, MarketSnapshot};

/// Rule-based market state analyzer.
///
/// Holds only an immutable configuration, so one instance can be shared
/// across threads and called concurrently for different snapshots.
#[derive(Debug, Clone, Default)]
pub struct MarketAnalyzer {
    config: AnalysisConfig,
}

impl MarketAnalyzer {
    #[must_use]
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyzes a snapshot, stamping the result with the current time.
    ///
    /// Never fails: missing metrics degrade to neutral or "unknown" outcomes.
    #[must_use]
    pub fn analyze(&self, snapshot: MarketSnapshot) -> MarketAnalysis {
        self.analyze_at(snapshot, Utc::now())
    }

    /// Validates the snapshot, then analyzes it.
    ///
    /// # Errors
    /// Returns [`AnalysisError::InvalidSnapshot`] if the snapshot is unusable.
    pub fn try_analyze(&self, snapshot: MarketSnapshot) -> Result<MarketAnalysis, AnalysisError> {
        snapshot.validate()?;
        Ok(self.analyze(snapshot))
    }

    /// Analyzes a snapshot with an explicit analysis timestamp.
    #[must_use]
    pub fn analyze_at(
        &self,
        snapshot: MarketSnapshot,
        analyzed_at: DateTime<Utc>,
    ) -> MarketAnalysis {
        let trend = classify_trend(
            snapshot.price,
            snapshot.ma_20,
            snapshot.ma_50,
            snapshot.ma_200,
        );
        let volume_change = volume_change_pct(snapshot.volume_24h, snapshot.volume_avg_7d);
        let funding_status =
            classify_funding(snapshot.funding_rate, self.config.funding_rate_threshold);
        let volatility_status = classify_volatility(snapshot.high_24h, snapshot.low_24h);
        let anomalies = detect_anomalies(&snapshot, volume_change, &self.config);
        let key_levels = key_levels(&snapshot);

        let direction = trading_direction(&DirectionInputs {
            trend: trend.trend,
            funding_status,
            volume_change_pct: volume_change,
            volatility_status,
            anomalies: &anomalies,
        });

        tracing::debug!(
            symbol = %snapshot.symbol,
            trend = %trend.trend,
            volume_change_pct = volume_change,
            funding = %funding_status,
            volatility = %volatility_status,
            anomalies = anomalies.len(),
            "snapshot analyzed"
        );

        MarketAnalysis {
            symbol: snapshot.symbol.clone(),
            analyzed_at,
            trend: trend.trend,
            trend_emoji: trend.emoji.to_string(),
            trend_description: trend.description.to_string(),
            volume_change_pct: volume_change,
            funding_status,
            volatility_status,
            anomalies,
            key_levels,
            trading_direction: direction.to_string(),
            source_snapshot: snapshot,
        }
    }

    /// Every trading-direction candidate for a finished analysis, head first.
    #[must_use]
    pub fn trading_advisories(analysis: &MarketAnalysis) -> Vec<&'static str> {
        trading_advisories(&DirectionInputs::from(analysis))
    }
}
