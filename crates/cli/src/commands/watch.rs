//! Watch command: periodic reports for a list of symbols.
//!
//! Edits to the config file are picked up on the next cycle. A reload that
//! cannot build a collector is logged and the previous settings stay active.

use super::report::render_report;
use super::OutputFormat;
use anyhow::Result;
use clap::Args;
use market_pulse_analyzer::MarketAnalyzer;
use market_pulse_collector::BinanceFuturesCollector;
use market_pulse_core::{AppConfig, ConfigLoader, ConfigWatcher, WatchConfig, DEFAULT_CONFIG_PATH};
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Arguments for the watch command.
#[derive(Args, Debug, Clone)]
pub struct WatchArgs {
    /// Comma-separated pairs (defaults to the configured watch list)
    #[arg(long, value_delimiter = ',')]
    pub symbols: Option<Vec<String>>,

    /// Seconds between cycles (defaults to the configured refresh interval)
    #[arg(long)]
    pub interval: Option<u64>,

    /// Print one line per symbol instead of full reports
    #[arg(long)]
    pub compact: bool,

    /// Config file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

/// Symbols and cadence for the loop. Command-line flags win over config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchPlan {
    pub symbols: Vec<String>,
    pub period: Duration,
}

impl WatchPlan {
    #[must_use]
    pub fn resolve(args: &WatchArgs, config: &WatchConfig) -> Self {
        let symbols = args
            .symbols
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| config.symbols.clone());
        let secs = args.interval.unwrap_or(config.refresh_interval_secs).max(1);

        Self {
            symbols,
            period: Duration::from_secs(secs),
        }
    }
}

struct WatchState {
    collector: BinanceFuturesCollector,
    analyzer: MarketAnalyzer,
    plan: WatchPlan,
}

impl WatchState {
    fn build(args: &WatchArgs, config: &AppConfig) -> Result<Self> {
        Ok(Self {
            collector: BinanceFuturesCollector::new(&config.collector, &config.analysis)?,
            analyzer: MarketAnalyzer::new(config.analysis.clone()),
            plan: WatchPlan::resolve(args, &config.watch),
        })
    }
}

fn ticker_for(period: Duration, first_at: Instant) -> Interval {
    let mut ticker = interval_at(first_at, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// Runs the watch loop until Ctrl+C.
///
/// # Errors
/// Returns an error if the initial configuration is invalid or the collector
/// cannot be built.
pub async fn run_watch(args: WatchArgs) -> Result<()> {
    let config = ConfigLoader::load_from(&args.config)?;
    let mut state = WatchState::build(&args, &config)?;
    let format = OutputFormat::from_flags(args.compact, false);

    let (watcher, mut config_rx) = ConfigWatcher::new(config, args.config.clone());
    let watcher_handle = tokio::spawn(async move {
        if let Err(e) = watcher.watch().await {
            tracing::warn!("Config hot reload disabled: {:#}", e);
        }
    });

    tracing::info!(
        symbols = ?state.plan.symbols,
        interval_secs = state.plan.period.as_secs(),
        "Starting watch loop"
    );
    tracing::info!("Press Ctrl+C to stop");

    let mut ticker = ticker_for(state.plan.period, Instant::now());

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if config_rx.has_changed().unwrap_or(false) {
                    let updated = config_rx.borrow_and_update().clone();
                    match WatchState::build(&args, &updated) {
                        Ok(next) => {
                            if next.plan.period != state.plan.period {
                                ticker = ticker_for(next.plan.period, Instant::now() + next.plan.period);
                            }
                            state = next;
                            tracing::info!(symbols = ?state.plan.symbols, "Applied reloaded configuration");
                        }
                        Err(e) => {
                            tracing::error!("Ignoring reloaded configuration: {:#}", e);
                        }
                    }
                }

                tracing::info!(symbols = state.plan.symbols.len(), "Running analysis cycle");
                for symbol in &state.plan.symbols {
                    let output = render_report(&state.collector, &state.analyzer, symbol, format).await;
                    println!("{output}\n");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received Ctrl+C, shutting down");
                break;
            }
        }
    }

    watcher_handle.abort();
    tracing::info!("Watch loop stopped");
    Ok(())
}
