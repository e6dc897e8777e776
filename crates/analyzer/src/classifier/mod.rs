//! Independent, pure classification rules.
//!
//! Each rule reads only the inputs it needs and degrades to a neutral or
//! "unknown" outcome when they are absent.

pub mod funding;
pub mod key_levels;
pub mod trend;
pub mod volatility;
pub mod volume;

pub use funding::classify_funding;
pub use key_levels::key_levels;
pub use trend::{classify_trend, TrendClassification};
pub use volatility::{classify_volatility, volatility_pct};
pub use volume::volume_change_pct;
