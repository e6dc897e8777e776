use market_pulse_core::{KeyLevel, KeyLevels, MarketSnapshot};

/// Collects structural price levels straight from the snapshot.
///
/// Support and resistance come as a pair from the 24h range; a half-known
/// range yields neither.
#[must_use]
pub fn key_levels(snapshot: &MarketSnapshot) -> KeyLevels {
    let mut levels = KeyLevels::new();

    if let (Some(high), Some(low)) = (snapshot.high_24h, snapshot.low_24h) {
        levels.insert(KeyLevel::Support, low);
        levels.insert(KeyLevel::Resistance, high);
    }
    if let Some(ma_50) = snapshot.ma_50 {
        levels.insert(KeyLevel::Ma50, ma_50);
    }
    if let Some(ma_200) = snapshot.ma_200 {
        levels.insert(KeyLevel::Ma200, ma_200);
    }

    levels
}
