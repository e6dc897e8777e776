#![allow(clippy::format_push_string)]
#![allow(clippy::uninlined_format_args)]

use crate::analysis::{FundingStatus, KeyLevel, MarketAnalysis, VolatilityStatus};

/// Maximum anomalies listed in a full report.
const MAX_REPORTED_ANOMALIES: usize = 3;

/// Volume change (in percent) above which the volume line is flagged.
const NOTABLE_VOLUME_CHANGE_PCT: f64 = 20.0;

pub struct ReportFormatter;

impl ReportFormatter {
    /// Renders a full markdown report for one analysis.
    #[must_use]
    pub fn format(analysis: &MarketAnalysis) -> String {
        let snapshot = &analysis.source_snapshot;
        let mut output = String::new();

        output.push_str(&format!(
            "🕒 **{}** | **{}**\n\n",
            analysis.analyzed_at.format("%H:%M:%S %d/%m/%Y"),
            analysis.symbol
        ));

        output.push_str(&format!(
            "**Trend:** {} {}\n\n",
            analysis.trend_emoji, analysis.trend_description
        ));

        let volume_emoji = if analysis.volume_change_pct.abs() > NOTABLE_VOLUME_CHANGE_PCT {
            "📊"
        } else {
            "📈"
        };
        output.push_str(&format!(
            "**Volume:** {} {} vs 7-day average\n\n",
            volume_emoji,
            Self::signed_pct(analysis.volume_change_pct)
        ));

        let funding_emoji = match analysis.funding_status {
            FundingStatus::Dangerous => "⚠️",
            FundingStatus::Elevated => "⚡",
            FundingStatus::Normal | FundingStatus::NoData => "✅",
        };
        output.push_str(&format!(
            "**Funding rate:** {} {}",
            funding_emoji, analysis.funding_status
        ));
        if let Some(rate) = snapshot.funding_rate.filter(|r| *r != 0.0) {
            output.push_str(&format!(" ({:.4}%)", rate * 100.0));
        }
        output.push_str("\n\n");

        let volatility_emoji = match analysis.volatility_status {
            VolatilityStatus::High => "🔥",
            VolatilityStatus::Medium => "💨",
            VolatilityStatus::Low | VolatilityStatus::Unknown => "😴",
        };
        output.push_str(&format!(
            "**Volatility:** {} {}\n\n",
            volatility_emoji, analysis.volatility_status
        ));

        if !analysis.anomalies.is_empty() {
            output.push_str("**⚠️ Anomalies detected:**\n");
            for anomaly in analysis.anomalies.iter().take(MAX_REPORTED_ANOMALIES) {
                output.push_str(&format!(
                    "  {} {}\n",
                    anomaly.severity.emoji(),
                    anomaly.description
                ));
            }
            output.push('\n');
        }

        if !analysis.key_levels.is_empty() {
            output.push_str("**📍 Key levels:**\n");
            let price = snapshot.price;

            if let Some(resistance) = analysis.key_level(KeyLevel::Resistance) {
                let distance = (resistance - price) / price * 100.0;
                output.push_str(&format!(
                    "  • Resistance: ${:.2} (+{:.1}%)\n",
                    resistance, distance
                ));
            }
            if let Some(support) = analysis.key_level(KeyLevel::Support) {
                let distance = (price - support) / price * 100.0;
                output.push_str(&format!("  • Support: ${:.2} (-{:.1}%)\n", support, distance));
            }
            if let Some(ma_200) = analysis.key_level(KeyLevel::Ma200) {
                output.push_str(&format!("  • MA200: ${:.2}\n", ma_200));
            }
            output.push('\n');
        }

        output.push_str("**📌 Trading direction:**\n");
        output.push_str(&format!("_{}_\n", analysis.trading_direction));

        output
    }

    /// Renders a single status line.
    #[must_use]
    pub fn format_compact(analysis: &MarketAnalysis) -> String {
        let mut output = format!(
            "{} **{}** @ ${:.2} | Vol: {:+.0}% | FR: {} | ",
            analysis.trend_emoji,
            analysis.symbol,
            analysis.source_snapshot.price,
            analysis.volume_change_pct,
            analysis.funding_status
        );

        if analysis.anomalies.is_empty() {
            output.push_str("✅ normal");
        } else {
            output.push_str(&format!("⚠️ {} alerts", analysis.anomalies.len()));
        }

        output
    }

    /// Renders the placeholder shown when a cycle produced no analysis.
    #[must_use]
    pub fn format_unavailable(symbol: &str, reason: &str) -> String {
        format!("❌ {symbol}: {reason}\n\nInsufficient data, waiting for update.")
    }

    fn signed_pct(value: f64) -> String {
        if value > 0.0 {
            format!("+{:.1}%", value)
        } else {
            format!("{:.1}%", value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Anomaly, AnomalyKind, KeyLevels, Severity, Trend};
    use crate::snapshot::MarketSnapshot;
    use chrono::{TimeZone, Utc};

    fn analysis() -> MarketAnalysis {
        let at = Utc.with_ymd_and_hms(2025, 3, 9, 14, 5, 7).unwrap();
        let snapshot = MarketSnapshot::new("BTC/USDT", at, 100.0, 150.0, 100.0)
            .with_funding_rate(0.02)
            .with_range_24h(110.0, 95.0);

        let mut key_levels = KeyLevels::new();
        key_levels.insert(KeyLevel::Support, 95.0);
        key_levels.insert(KeyLevel::Resistance, 110.0);
        key_levels.insert(KeyLevel::Ma200, 90.0);

        MarketAnalysis {
            symbol: "BTC/USDT".to_string(),
            analyzed_at: at,
            trend: Trend::Bullish,
            trend_emoji: Trend::Bullish.emoji().to_string(),
            trend_description: "strong uptrend, price above all major MAs".to_string(),
            volume_change_pct: 50.0,
            funding_status: FundingStatus::Dangerous,
            volatility_status: VolatilityStatus::High,
            anomalies: vec![
                Anomaly::new(AnomalyKind::VolumeSpike, Severity::Medium, "volume a", 50.0),
                Anomaly::new(AnomalyKind::FundingExtreme, Severity::High, "funding b", 0.02),
                Anomaly::new(AnomalyKind::LiquidationRisk, Severity::Medium, "liq c", 60.0),
                Anomaly::new(AnomalyKind::OiSpike, Severity::Low, "oi d", 0.2),
            ],
            key_levels,
            trading_direction: "strong upward momentum".to_string(),
            source_snapshot: snapshot,
        }
    }

    #[test]
    fn full_report_contains_every_section() {
        let report = ReportFormatter::format(&analysis());

        assert!(report.starts_with("🕒 **14:05:07 09/03/2025** | **BTC/USDT**"));
        assert!(report.contains("**Trend:** 📈 strong uptrend"));
        assert!(report.contains("**Volume:** 📊 +50.0% vs 7-day average"));
        assert!(report.contains("**Funding rate:** ⚠️ dangerous (2.0000%)"));
        assert!(report.contains("**Volatility:** 🔥 high"));
        assert!(report.contains("  • Resistance: $110.00 (+10.0%)"));
        assert!(report.contains("  • Support: $95.00 (-5.0%)"));
        assert!(report.contains("  • MA200: $90.00"));
        assert!(report.ends_with("_strong upward momentum_\n"));
    }

    #[test]
    fn full_report_lists_at_most_three_anomalies() {
        let report = ReportFormatter::format(&analysis());

        assert!(report.contains("  🟡 volume a"));
        assert!(report.contains("  🔴 funding b"));
        assert!(report.contains("  🟡 liq c"));
        assert!(!report.contains("oi d"));
    }

    #[test]
    fn empty_sections_are_omitted() {
        let mut analysis = analysis();
        analysis.anomalies.clear();
        analysis.key_levels.clear();
        analysis.source_snapshot.funding_rate = None;
        analysis.funding_status = FundingStatus::NoData;
        analysis.volume_change_pct = -4.0;

        let report = ReportFormatter::format(&analysis);

        assert!(!report.contains("Anomalies detected"));
        assert!(!report.contains("Key levels"));
        assert!(report.contains("**Funding rate:** ✅ no data\n"));
        assert!(report.contains("📈 -4.0% vs 7-day average"));
    }

    #[test]
    fn compact_report_counts_alerts() {
        let line = ReportFormatter::format_compact(&analysis());
        assert_eq!(
            line,
            "📈 **BTC/USDT** @ $100.00 | Vol: +50% | FR: dangerous | ⚠️ 4 alerts"
        );
    }

    #[test]
    fn compact_report_without_anomalies() {
        let mut analysis = analysis();
        analysis.anomalies.clear();

        let line = ReportFormatter::format_compact(&analysis);
        assert!(line.ends_with("✅ normal"));
    }

    #[test]
    fn unavailable_report_names_symbol_and_reason() {
        let text = ReportFormatter::format_unavailable("ETH/USDT", "no OHLCV data");
        assert!(text.starts_with("❌ ETH/USDT: no OHLCV data"));
        assert!(text.ends_with("waiting for update."));
    }
}
