//! Output types produced by the market analyzer.
//!
//! Status labels are plain lowercase strings on the wire (`"no data"`,
//! `"dangerous"`, ...) so that the report formatter and any JSON consumer
//! see the same vocabulary.

use crate::snapshot::MarketSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Directional classification of price against its moving averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

impl Trend {
    /// Chart glyph shown next to the trend in reports.
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Bullish => "📈",
            Self::Bearish => "📉",
            Self::Neutral => "➡️",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bullish => "bullish",
            Self::Bearish => "bearish",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Funding-rate risk level. Sign of the rate is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FundingStatus {
    #[serde(rename = "no data")]
    NoData,
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "elevated")]
    Elevated,
    #[serde(rename = "dangerous")]
    Dangerous,
}

impl FundingStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoData => "no data",
            Self::Normal => "normal",
            Self::Elevated => "elevated",
            Self::Dangerous => "dangerous",
        }
    }
}

impl fmt::Display for FundingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 24h range volatility bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolatilityStatus {
    Unknown,
    Low,
    Medium,
    High,
}

impl VolatilityStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for VolatilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of detected anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    VolumeSpike,
    FundingExtreme,
    LiquidationRisk,
    /// Reserved: needs an open-interest baseline that a single snapshot lacks.
    OiSpike,
}

impl AnomalyKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VolumeSpike => "volume_spike",
            Self::FundingExtreme => "funding_extreme",
            Self::LiquidationRisk => "liquidation_risk",
            Self::OiSpike => "oi_spike",
        }
    }
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Colored dot used by the report formatter.
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::High => "🔴",
            Self::Medium => "🟡",
            Self::Low => "🟢",
        }
    }
}

/// A single detected anomaly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub kind: AnomalyKind,
    pub severity: Severity,
    /// Human-readable explanation
    pub description: String,
    /// The numeric value that triggered the anomaly
    pub value: f64,
}

impl Anomaly {
    #[must_use]
    pub fn new(
        kind: AnomalyKind,
        severity: Severity,
        description: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            kind,
            severity,
            description: description.into(),
            value,
        }
    }
}

/// Named structural price levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyLevel {
    Support,
    Resistance,
    Ma50,
    Ma200,
}

impl KeyLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Support => "support",
            Self::Resistance => "resistance",
            Self::Ma50 => "ma_50",
            Self::Ma200 => "ma_200",
        }
    }
}

impl fmt::Display for KeyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key price levels keyed by level name.
pub type KeyLevels = BTreeMap<KeyLevel, f64>;

/// Complete classification of one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    pub symbol: String,
    pub analyzed_at: DateTime<Utc>,
    pub trend: Trend,
    pub trend_emoji: String,
    pub trend_description: String,
    /// Percent change of 24h volume against the 7-day average
    pub volume_change_pct: f64,
    pub funding_status: FundingStatus,
    pub volatility_status: VolatilityStatus,
    /// Detection order, not severity order
    pub anomalies: Vec<Anomaly>,
    pub key_levels: KeyLevels,
    pub trading_direction: String,
    /// The input snapshot, kept for raw price and funding display
    pub source_snapshot: MarketSnapshot,
}

impl MarketAnalysis {
    /// Anomalies of the given kind, in detection order.
    pub fn anomalies_of(&self, kind: AnomalyKind) -> impl Iterator<Item = &Anomaly> {
        self.anomalies.iter().filter(move |a| a.kind == kind)
    }

    #[must_use]
    pub fn key_level(&self, level: KeyLevel) -> Option<f64> {
        self.key_levels.get(&level).copied()
    }
}
