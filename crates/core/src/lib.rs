pub mod analysis;
pub mod config;
pub mod config_loader;
pub mod config_watcher;
pub mod error;
pub mod report_formatter;
pub mod snapshot;
pub mod traits;

pub use analysis::{
    Anomaly, AnomalyKind, FundingStatus, KeyLevel, KeyLevels, MarketAnalysis, Severity, Trend,
    VolatilityStatus,
};
pub use config::{AnalysisConfig, AppConfig, CollectorConfig, WatchConfig};
pub use config_loader::{ConfigLoader, DEFAULT_CONFIG_PATH};
pub use config_watcher::ConfigWatcher;
pub use error::AnalysisError;
pub use report_formatter::ReportFormatter;
pub use snapshot::{Liquidations, MarketSnapshot};
pub use traits::MarketDataSource;
