//! Market snapshot collector for Binance Futures.
//!
//! Pulls candles, the 24h ticker, funding, open interest and recent forced
//! orders over REST with a shared rate limiter, then derives the snapshot's
//! indicator fields from the candle history.

use crate::sentiment::{parse_fear_greed, FearGreedResponse};
use crate::snapshot_builder::{build_snapshot, SnapshotInputs};
use crate::types::{normalize_symbol, Candle, Interval, Ticker24h};
use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use governor::{Quota, RateLimiter};
use market_pulse_core::{
    AnalysisConfig, CollectorConfig, Liquidations, MarketDataSource, MarketSnapshot,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::num::NonZeroU32;
use std::time::Duration;

/// 24h ticker response (only the fields we read).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerResponse {
    pub last_price: String,
    pub high_price: String,
    pub low_price: String,
    pub quote_volume: String,
}

/// Premium index response carrying the last funding rate.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumIndexResponse {
    pub symbol: String,
    pub mark_price: String,
    pub last_funding_rate: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenInterestResponse {
    pub open_interest: String,
}

/// A forced (liquidation) order.
#[derive(Debug, Deserialize)]
pub struct ForceOrder {
    /// SELL = long liquidation, BUY = short liquidation
    pub side: String,
}

/// Binance Futures snapshot collector.
pub struct BinanceFuturesCollector {
    client: reqwest::Client,
    base_url: String,
    sentiment_url: String,
    interval: Interval,
    candle_limit: usize,
    liquidation_sample_limit: usize,
    analysis: AnalysisConfig,
    rate_limiter: RateLimiter<
        governor::state::NotKeyed,
        governor::state::InMemoryState,
        governor::clock::DefaultClock,
    >,
}

impl BinanceFuturesCollector {
    /// Creates a collector from the collector and analysis settings.
    ///
    /// The analysis settings decide which moving averages and how much
    /// volume history go into each snapshot.
    ///
    /// # Errors
    /// Returns an error for an unknown timeframe, a zero rate limit, or if the
    /// HTTP client cannot be built.
    pub fn new(collector: &CollectorConfig, analysis: &AnalysisConfig) -> Result<Self> {
        let interval: Interval = collector.timeframe.parse()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(collector.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        let rate = NonZeroU32::new(collector.rate_limit_per_second)
            .ok_or_else(|| anyhow!("Rate limit must be > 0"))?;
        let rate_limiter = RateLimiter::direct(Quota::per_second(rate));

        Ok(Self {
            client,
            base_url: collector.base_url.trim_end_matches('/').to_string(),
            sentiment_url: collector.sentiment_url.clone(),
            interval,
            candle_limit: collector.candle_limit,
            liquidation_sample_limit: collector.liquidation_sample_limit,
            analysis: analysis.clone(),
            rate_limiter,
        })
    }

    #[must_use]
    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Fetches the most recent candles, oldest first.
    ///
    /// # Errors
    /// Returns an error if the request fails or the body is not a kline array.
    pub async fn fetch_candles(&self, pair: &str) -> Result<Vec<Candle>> {
        let url = format!("{}/fapi/v1/klines", self.base_url);
        let data: Vec<Vec<serde_json::Value>> = self
            .get_json(
                &url,
                &[
                    ("symbol", pair.to_string()),
                    ("interval", self.interval.as_str().to_string()),
                    ("limit", self.candle_limit.to_string()),
                ],
            )
            .await?;

        Ok(data.iter().filter_map(|kline| parse_kline(kline)).collect())
    }

    /// # Errors
    /// Returns an error if the request fails or a field does not parse.
    pub async fn fetch_ticker(&self, pair: &str) -> Result<Ticker24h> {
        let url = format!("{}/fapi/v1/ticker/24hr", self.base_url);
        let ticker: TickerResponse = self.get_json(&url, &[("symbol", pair.to_string())]).await?;
        parse_ticker(&ticker)
    }

    /// # Errors
    /// Returns an error if the request fails or the rate does not parse.
    pub async fn fetch_funding_rate(&self, pair: &str) -> Result<f64> {
        let url = format!("{}/fapi/v1/premiumIndex", self.base_url);
        let index: PremiumIndexResponse =
            self.get_json(&url, &[("symbol", pair.to_string())]).await?;
        parse_f64(&index.last_funding_rate, "lastFundingRate")
    }

    /// # Errors
    /// Returns an error if the request fails or the value does not parse.
    pub async fn fetch_open_interest(&self, pair: &str) -> Result<f64> {
        let url = format!("{}/fapi/v1/openInterest", self.base_url);
        let oi: OpenInterestResponse = self.get_json(&url, &[("symbol", pair.to_string())]).await?;
        parse_f64(&oi.open_interest, "openInterest")
    }

    /// Counts long and short liquidations in the most recent forced orders.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn fetch_liquidations(&self, pair: &str) -> Result<Liquidations> {
        let url = format!("{}/fapi/v1/allForceOrders", self.base_url);
        let orders: Vec<ForceOrder> = self
            .get_json(
                &url,
                &[
                    ("symbol", pair.to_string()),
                    ("limit", self.liquidation_sample_limit.to_string()),
                ],
            )
            .await?;
        Ok(tally_liquidations(&orders))
    }

    /// Fear & Greed index scaled to [0, 1].
    ///
    /// # Errors
    /// Returns an error if the request fails or the response carries no value.
    pub async fn fetch_sentiment(&self) -> Result<f64> {
        let response: FearGreedResponse = self
            .get_json(&self.sentiment_url, &[("limit", "1".to_string())])
            .await?;
        parse_fear_greed(&response).ok_or_else(|| anyhow!("Fear & Greed response has no value"))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T> {
        self.rate_limiter.until_ready().await;

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {url}"))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!("API error ({}) from {}: {}", status, url, error_text));
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse response from {url}"))
    }
}

#[async_trait]
impl MarketDataSource for BinanceFuturesCollector {
    async fn collect(&self, symbol: &str) -> Result<MarketSnapshot> {
        let pair = normalize_symbol(symbol);

        let candles = self
            .fetch_candles(&pair)
            .await
            .with_context(|| format!("Failed to fetch candles for {symbol}"))?;
        if candles.is_empty() {
            bail!("no OHLCV data available for {symbol}");
        }

        let (ticker, funding_rate, open_interest, liquidations, sentiment) = tokio::join!(
            self.fetch_ticker(&pair),
            self.fetch_funding_rate(&pair),
            self.fetch_open_interest(&pair),
            self.fetch_liquidations(&pair),
            self.fetch_sentiment(),
        );

        let inputs = SnapshotInputs {
            ticker: best_effort(ticker, "ticker", symbol),
            funding_rate: best_effort(funding_rate, "funding rate", symbol),
            open_interest: best_effort(open_interest, "open interest", symbol),
            liquidations: best_effort(liquidations, "liquidations", symbol),
            sentiment: best_effort(sentiment, "sentiment", symbol),
        };

        let snapshot = build_snapshot(
            symbol,
            Utc::now(),
            &candles,
            &inputs,
            &self.analysis,
            self.interval.candles_per_day(),
        )?;

        tracing::info!(
            symbol,
            candles = candles.len(),
            price = snapshot.price,
            "collected snapshot"
        );

        Ok(snapshot)
    }

    fn name(&self) -> &str {
        "binance-futures"
    }
}

fn best_effort<T>(result: Result<T>, what: &str, symbol: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(symbol, "Failed to fetch {}: {:#}", what, e);
            None
        }
    }
}

/// Parses a single kline from the Binance API response.
///
/// Binance kline format:
/// ```text
/// [
///   1499040000000,      // 0: Open time
///   "0.01634000",       // 1: Open
///   "0.80000000",       // 2: High
///   "0.01575800",       // 3: Low
///   "0.01577100",       // 4: Close
///   "148976.11427815",  // 5: Volume
///   1499644799999,      // 6: Close time
///   "2434.19055334",    // 7: Quote asset volume
///   ...
/// ]
/// ```
pub(crate) fn parse_kline(kline: &[serde_json::Value]) -> Option<Candle> {
    if kline.len() < 8 {
        return None;
    }

    let open_time = Utc.timestamp_millis_opt(kline[0].as_i64()?).single()?;

    Some(Candle {
        open_time,
        open: parse_f64_from_json(&kline[1])?,
        high: parse_f64_from_json(&kline[2])?,
        low: parse_f64_from_json(&kline[3])?,
        close: parse_f64_from_json(&kline[4])?,
        volume: parse_f64_from_json(&kline[5])?,
        quote_volume: parse_f64_from_json(&kline[7])?,
    })
}

/// Parses an f64 from a JSON value (handles both string and number formats).
fn parse_f64_from_json(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::String(s) => s.parse().ok(),
        serde_json::Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

fn parse_f64(value: &str, field: &str) -> Result<f64> {
    value
        .parse()
        .with_context(|| format!("Invalid {field}: '{value}'"))
}

pub(crate) fn parse_ticker(ticker: &TickerResponse) -> Result<Ticker24h> {
    Ok(Ticker24h {
        last_price: parse_f64(&ticker.last_price, "lastPrice")?,
        high: parse_f64(&ticker.high_price, "highPrice")?,
        low: parse_f64(&ticker.low_price, "lowPrice")?,
        quote_volume: parse_f64(&ticker.quote_volume, "quoteVolume")?,
    })
}

pub(crate) fn tally_liquidations(orders: &[ForceOrder]) -> Liquidations {
    let long_count = orders.iter().filter(|o| o.side == "SELL").count() as u64;
    let short_count = orders.iter().filter(|o| o.side == "BUY").count() as u64;
    Liquidations::new(long_count, short_count)
}
