use crate::snapshot::MarketSnapshot;
use anyhow::Result;
use async_trait::async_trait;

/// Produces a fully populated snapshot for one symbol.
///
/// Implementations own every derived field (moving averages, the trailing
/// volume average); the analyzer never computes them.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn collect(&self, symbol: &str) -> Result<MarketSnapshot>;
    fn name(&self) -> &str;
}
