//! Anomaly detection.
//!
//! Checks run in a fixed order and append to the result independently, so
//! the output is in detection order rather than severity order. A check
//! whose inputs are missing is skipped silently.

use market_pulse_core::{
    AnalysisConfig, Anomaly, AnomalyKind, Liquidations, MarketSnapshot, Severity,
};

/// Volume change (in percent) above which a spike is high severity.
pub const HIGH_SEVERITY_VOLUME_CHANGE_PCT: f64 = 50.0;

/// Liquidation events in the sample window above which risk is flagged.
pub const LIQUIDATION_RISK_THRESHOLD: u64 = 50;

/// One side dominates when it has more than this multiple of the other.
const DOMINANT_SIDE_RATIO: u64 = 2;

/// Runs every active check against one snapshot.
#[must_use]
pub fn detect_anomalies(
    snapshot: &MarketSnapshot,
    volume_change_pct: f64,
    config: &AnalysisConfig,
) -> Vec<Anomaly> {
    let checks = [
        detect_volume_spike(volume_change_pct, config.volume_spike_threshold),
        detect_funding_extreme(snapshot.funding_rate, config.funding_rate_threshold),
        snapshot.liquidations.and_then(detect_liquidation_risk),
    ];

    checks.into_iter().flatten().collect()
}

/// Flags 24h volume running above the trailing average by more than
/// `spike_threshold` (a fraction, 0.30 = 30%).
#[must_use]
pub fn detect_volume_spike(volume_change_pct: f64, spike_threshold: f64) -> Option<Anomaly> {
    if !(volume_change_pct > spike_threshold * 100.0) {
        return None;
    }

    let severity = if volume_change_pct > HIGH_SEVERITY_VOLUME_CHANGE_PCT {
        Severity::High
    } else {
        Severity::Medium
    };

    Some(Anomaly::new(
        AnomalyKind::VolumeSpike,
        severity,
        format!("volume spiked {volume_change_pct:.1}% above the 7-day average"),
        volume_change_pct,
    ))
}

/// Flags a funding rate whose magnitude exceeds the danger threshold.
#[must_use]
pub fn detect_funding_extreme(funding_rate: Option<f64>, threshold: f64) -> Option<Anomaly> {
    let rate = funding_rate?;
    if !(rate.abs() > threshold) {
        return None;
    }

    let description = if rate > 0.0 {
        "extreme positive funding, squeeze risk for shorts"
    } else {
        "extreme negative funding, squeeze risk for longs"
    };

    Some(Anomaly::new(
        AnomalyKind::FundingExtreme,
        Severity::High,
        description,
        rate,
    ))
}

/// Flags heavy liquidation activity and names the dominant side.
#[must_use]
pub fn detect_liquidation_risk(liquidations: Liquidations) -> Option<Anomaly> {
    let Liquidations {
        total,
        long_count,
        short_count,
    } = liquidations;

    if total <= LIQUIDATION_RISK_THRESHOLD {
        return None;
    }

    let description = if long_count > short_count.saturating_mul(DOMINANT_SIDE_RATIO) {
        "heavy long liquidations, strong downward pressure".to_string()
    } else if short_count > long_count.saturating_mul(DOMINANT_SIDE_RATIO) {
        "heavy short liquidations, strong upward pressure".to_string()
    } else {
        format!("heavy liquidations on both sides ({total} positions)")
    };

    Some(Anomaly::new(
        AnomalyKind::LiquidationRisk,
        Severity::Medium,
        description,
        total as f64,
    ))
}
