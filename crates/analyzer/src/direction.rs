//! Trading-direction heuristic.
//!
//! Candidates are gathered in priority order: the trend statement first,
//! then risk advisories. Only the head of the list is surfaced as the
//! trading direction, so the visible text is always the trend statement.

use market_pulse_core::{
    Anomaly, AnomalyKind, FundingStatus, MarketAnalysis, Severity, Trend, VolatilityStatus,
};

/// Volume change (in percent) above which a trend counts as having momentum.
pub const MOMENTUM_VOLUME_CHANGE_PCT: f64 = 20.0;

pub const STRONG_UPWARD_MOMENTUM: &str = "strong upward momentum";
pub const UPTREND_NOT_SUSTAINED: &str = "uptrend may not be sustained yet";
pub const SELLING_PRESSURE_INCREASING: &str = "selling pressure increasing";
pub const DOWNTREND_NEAR_REVERSAL: &str = "downtrend may be close to reversal";
pub const SIDEWAYS_WAIT: &str = "sideways market, wait for clearer signal";
pub const SQUEEZE_CAUTION: &str = "watch for short squeeze or long squeeze";
pub const VOLATILITY_CAUTION: &str = "high volatility, manage risk tightly";
pub const VOLUME_ANOMALY_CAUTION: &str = "unusual volume activity, observe further";
pub const FUNDING_ANOMALY_CAUTION: &str = "extreme funding rate, sudden reversal possible";
pub const WAIT_FOR_CONFIRMATION: &str = "wait for confirmation signal before acting";

/// The already-computed fields the heuristic reads.
#[derive(Debug, Clone, Copy)]
pub struct DirectionInputs<'a> {
    pub trend: Trend,
    pub funding_status: FundingStatus,
    pub volume_change_pct: f64,
    pub volatility_status: VolatilityStatus,
    pub anomalies: &'a [Anomaly],
}

impl<'a> From<&'a MarketAnalysis> for DirectionInputs<'a> {
    fn from(analysis: &'a MarketAnalysis) -> Self {
        Self {
            trend: analysis.trend,
            funding_status: analysis.funding_status,
            volume_change_pct: analysis.volume_change_pct,
            volatility_status: analysis.volatility_status,
            anomalies: &analysis.anomalies,
        }
    }
}

/// Every candidate line, in priority order.
#[must_use]
pub fn trading_advisories(inputs: &DirectionInputs<'_>) -> Vec<&'static str> {
    let mut advisories = Vec::new();

    let has_momentum = inputs.volume_change_pct > MOMENTUM_VOLUME_CHANGE_PCT;
    advisories.push(match (inputs.trend, has_momentum) {
        (Trend::Bullish, true) => STRONG_UPWARD_MOMENTUM,
        (Trend::Bullish, false) => UPTREND_NOT_SUSTAINED,
        (Trend::Bearish, true) => SELLING_PRESSURE_INCREASING,
        (Trend::Bearish, false) => DOWNTREND_NEAR_REVERSAL,
        (Trend::Neutral, _) => SIDEWAYS_WAIT,
    });

    if inputs.funding_status == FundingStatus::Dangerous {
        advisories.push(SQUEEZE_CAUTION);
    }

    if inputs.volatility_status == VolatilityStatus::High {
        advisories.push(VOLATILITY_CAUTION);
    }

    for anomaly in inputs.anomalies {
        if anomaly.severity != Severity::High {
            continue;
        }
        match anomaly.kind {
            AnomalyKind::VolumeSpike => advisories.push(VOLUME_ANOMALY_CAUTION),
            AnomalyKind::FundingExtreme => advisories.push(FUNDING_ANOMALY_CAUTION),
            AnomalyKind::LiquidationRisk | AnomalyKind::OiSpike => {}
        }
    }

    advisories
}

/// The head of [`trading_advisories`], or a wait-for-confirmation default.
#[must_use]
pub fn trading_direction(inputs: &DirectionInputs<'_>) -> &'static str {
    trading_advisories(inputs)
        .first()
        .copied()
        .unwrap_or(WAIT_FOR_CONFIRMATION)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(trend: Trend, volume_change_pct: f64) -> DirectionInputs<'static> {
        DirectionInputs {
            trend,
            funding_status: FundingStatus::Normal,
            volume_change_pct,
            volatility_status: VolatilityStatus::Low,
            anomalies: &[],
        }
    }

    #[test]
    fn trend_statements() {
        assert_eq!(
            trading_direction(&inputs(Trend::Bullish, 25.0)),
            STRONG_UPWARD_MOMENTUM
        );
        assert_eq!(
            trading_direction(&inputs(Trend::Bullish, 20.0)),
            UPTREND_NOT_SUSTAINED
        );
        assert_eq!(
            trading_direction(&inputs(Trend::Bearish, 21.0)),
            SELLING_PRESSURE_INCREASING
        );
        assert_eq!(
            trading_direction(&inputs(Trend::Bearish, -5.0)),
            DOWNTREND_NEAR_REVERSAL
        );
        assert_eq!(trading_direction(&inputs(Trend::Neutral, 90.0)), SIDEWAYS_WAIT);
    }

    #[test]
    fn advisories_follow_trend_statement() {
        let anomalies = vec![
            Anomaly::new(AnomalyKind::VolumeSpike, Severity::High, "v", 60.0),
            Anomaly::new(AnomalyKind::LiquidationRisk, Severity::Medium, "l", 60.0),
            Anomaly::new(AnomalyKind::FundingExtreme, Severity::High, "f", 0.02),
        ];
        let inputs = DirectionInputs {
            trend: Trend::Bearish,
            funding_status: FundingStatus::Dangerous,
            volume_change_pct: 60.0,
            volatility_status: VolatilityStatus::High,
            anomalies: &anomalies,
        };

        assert_eq!(
            trading_advisories(&inputs),
            vec![
                SELLING_PRESSURE_INCREASING,
                SQUEEZE_CAUTION,
                VOLATILITY_CAUTION,
                VOLUME_ANOMALY_CAUTION,
                FUNDING_ANOMALY_CAUTION,
            ]
        );
    }

    #[test]
    fn direction_is_always_the_head() {
        let anomalies = vec![Anomaly::new(
            AnomalyKind::FundingExtreme,
            Severity::High,
            "f",
            0.05,
        )];
        let inputs = DirectionInputs {
            trend: Trend::Neutral,
            funding_status: FundingStatus::Dangerous,
            volume_change_pct: 0.0,
            volatility_status: VolatilityStatus::High,
            anomalies: &anomalies,
        };

        assert_eq!(trading_direction(&inputs), SIDEWAYS_WAIT);
    }

    #[test]
    fn medium_anomalies_add_no_advisory() {
        let anomalies = vec![Anomaly::new(
            AnomalyKind::VolumeSpike,
            Severity::Medium,
            "v",
            40.0,
        )];
        let inputs = DirectionInputs {
            anomalies: &anomalies,
            ..inputs(Trend::Bullish, 40.0)
        };

        assert_eq!(trading_advisories(&inputs), vec![STRONG_UPWARD_MOMENTUM]);
    }
}
