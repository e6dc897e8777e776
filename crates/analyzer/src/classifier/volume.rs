/// Percent change of 24h volume against the trailing average.
///
/// A zero average yields `0.0` rather than a division by zero.
#[must_use]
pub fn volume_change_pct(volume_24h: f64, volume_avg_7d: f64) -> f64 {
    if volume_avg_7d == 0.0 {
        return 0.0;
    }
    (volume_24h - volume_avg_7d) / volume_avg_7d * 100.0
}
