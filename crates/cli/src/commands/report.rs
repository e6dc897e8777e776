//! Report command: collect → analyze → format for a single symbol.

use super::OutputFormat;
use anyhow::{Context, Result};
use clap::Args;
use market_pulse_analyzer::MarketAnalyzer;
use market_pulse_collector::BinanceFuturesCollector;
use market_pulse_core::{
    ConfigLoader, MarketAnalysis, MarketDataSource, ReportFormatter, DEFAULT_CONFIG_PATH,
};
use std::path::PathBuf;

/// Arguments for the report command.
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Trading pair (e.g., "BTC/USDT")
    #[arg(short, long)]
    pub symbol: String,

    /// Print a one-line summary instead of the full report
    #[arg(long)]
    pub compact: bool,

    /// Config file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

/// Runs the report command.
///
/// A symbol whose data cannot be collected still produces output (the
/// "unavailable" report); only configuration problems are errors.
///
/// # Errors
/// Returns an error if the configuration is invalid or the collector cannot be built.
pub async fn run_report(args: ReportArgs) -> Result<()> {
    let config = ConfigLoader::load_from(&args.config)?;
    let collector = BinanceFuturesCollector::new(&config.collector, &config.analysis)?;
    let analyzer = MarketAnalyzer::new(config.analysis);

    let format = OutputFormat::from_flags(args.compact, false);
    println!(
        "{}",
        render_report(&collector, &analyzer, &args.symbol, format).await
    );

    Ok(())
}

/// Runs one collect → analyze → format cycle. Never fails.
pub async fn render_report(
    source: &dyn MarketDataSource,
    analyzer: &MarketAnalyzer,
    symbol: &str,
    format: OutputFormat,
) -> String {
    let result = collect_and_analyze(source, analyzer, symbol)
        .await
        .and_then(|analysis| render(&analysis, format));

    match result {
        Ok(output) => output,
        Err(e) => {
            tracing::error!(symbol, "Analysis unavailable: {:#}", e);
            ReportFormatter::format_unavailable(symbol, &format!("{e:#}"))
        }
    }
}

async fn collect_and_analyze(
    source: &dyn MarketDataSource,
    analyzer: &MarketAnalyzer,
    symbol: &str,
) -> Result<MarketAnalysis> {
    let snapshot = source
        .collect(symbol)
        .await
        .with_context(|| format!("{} collection failed", source.name()))?;
    Ok(analyzer.try_analyze(snapshot)?)
}

/// Formats a finished analysis.
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn render(analysis: &MarketAnalysis, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Full => Ok(ReportFormatter::format(analysis)),
        OutputFormat::Compact => Ok(ReportFormatter::format_compact(analysis)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(analysis).context("Failed to serialize analysis")
        }
    }
}
