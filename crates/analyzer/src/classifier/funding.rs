//! Funding-rate risk classification.
//!
//! Only the magnitude matters here; the sign is reported by the
//! funding-extreme anomaly instead.

use market_pulse_core::FundingStatus;

/// Classifies a funding rate against the danger threshold `threshold`.
///
/// `|rate| < threshold / 2` is normal, `[threshold / 2, threshold)` elevated,
/// and anything at or above `threshold` dangerous.
#[must_use]
pub fn classify_funding(funding_rate: Option<f64>, threshold: f64) -> FundingStatus {
    let Some(rate) = funding_rate else {
        return FundingStatus::NoData;
    };

    let magnitude = rate.abs();
    if magnitude < threshold * 0.5 {
        FundingStatus::Normal
    } else if magnitude < threshold {
        FundingStatus::Elevated
    } else {
        FundingStatus::Dangerous
    }
}
