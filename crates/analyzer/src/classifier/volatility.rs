use market_pulse_core::VolatilityStatus;

/// Range below this percent is low volatility.
pub const MEDIUM_VOLATILITY_PCT: f64 = 3.0;
/// Range at or above this percent is high volatility.
pub const HIGH_VOLATILITY_PCT: f64 = 7.0;

/// 24h range as a percent of the low, when both bounds are usable.
#[must_use]
pub fn volatility_pct(high_24h: Option<f64>, low_24h: Option<f64>) -> Option<f64> {
    let (high, low) = (high_24h?, low_24h?);
    if low <= 0.0 {
        return None;
    }
    Some((high - low) / low * 100.0)
}

/// Buckets the 24h range: `< 3%` low, `[3%, 7%)` medium, `>= 7%` high.
#[must_use]
pub fn classify_volatility(high_24h: Option<f64>, low_24h: Option<f64>) -> VolatilityStatus {
    match volatility_pct(high_24h, low_24h) {
        None => VolatilityStatus::Unknown,
        Some(pct) if pct < MEDIUM_VOLATILITY_PCT => VolatilityStatus::Low,
        Some(pct) if pct < HIGH_VOLATILITY_PCT => VolatilityStatus::Medium,
        Some(_) => VolatilityStatus::High,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_bound_is_unknown() {
        assert_eq!(classify_volatility(None, Some(100.0)), VolatilityStatus::Unknown);
        assert_eq!(classify_volatility(Some(110.0), None), VolatilityStatus::Unknown);
        assert_eq!(classify_volatility(None, None), VolatilityStatus::Unknown);
    }

    #[test]
    fn zero_low_is_unknown() {
        assert_eq!(classify_volatility(Some(1.0), Some(0.0)), VolatilityStatus::Unknown);
    }

    #[test]
    fn ten_percent_range_is_high() {
        assert_eq!(volatility_pct(Some(110.0), Some(100.0)), Some(10.0));
        assert_eq!(classify_volatility(Some(110.0), Some(100.0)), VolatilityStatus::High);
    }

    #[test]
    fn bucket_boundaries() {
        assert_eq!(classify_volatility(Some(102.0), Some(100.0)), VolatilityStatus::Low);
        assert_eq!(classify_volatility(Some(103.0), Some(100.0)), VolatilityStatus::Medium);
        assert_eq!(classify_volatility(Some(106.5), Some(100.0)), VolatilityStatus::Medium);
        assert_eq!(classify_volatility(Some(107.0), Some(100.0)), VolatilityStatus::High);
    }
}
