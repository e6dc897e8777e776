//! Market state classification and anomaly detection.
//!
//! The analyzer is a pure function of a [`MarketSnapshot`] and an
//! [`AnalysisConfig`]: no I/O, no shared state, no suspension points.
//!
//! [`MarketSnapshot`]: market_pulse_core::MarketSnapshot
//! [`AnalysisConfig`]: market_pulse_core::AnalysisConfig

pub mod analyzer;
pub mod anomaly;
pub mod classifier;
pub mod direction;

pub use analyzer::MarketAnalyzer;
pub use anomaly::{
    detect_anomalies, detect_funding_extreme, detect_liquidation_risk, detect_volume_spike,
};
pub use classifier::{
    classify_funding, classify_trend, classify_volatility, key_levels, volatility_pct,
    volume_change_pct, TrendClassification,
};
pub use direction::{trading_advisories, trading_direction, DirectionInputs};
