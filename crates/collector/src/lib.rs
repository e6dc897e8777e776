//! Binance Futures data collection for market snapshots.

pub mod binance;
pub mod indicators;
pub mod sentiment;
pub mod snapshot_builder;
pub mod types;

pub use binance::BinanceFuturesCollector;
pub use indicators::{
    average_daily_volume, moving_averages, simple_moving_average, trailing_range, trailing_volume,
};
pub use sentiment::parse_fear_greed;
pub use snapshot_builder::{build_snapshot, SnapshotInputs};
pub use types::{normalize_symbol, Candle, Interval, Ticker24h};
