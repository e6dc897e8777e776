//! Analyze command.
//!
//! Runs the analyzer over a snapshot stored as JSON, without touching the
//! network. Useful for replaying captured snapshots against new thresholds.

use super::report::render;
use super::OutputFormat;
use anyhow::{Context, Result};
use clap::Args;
use market_pulse_analyzer::MarketAnalyzer;
use market_pulse_core::{ConfigLoader, MarketSnapshot, DEFAULT_CONFIG_PATH};
use std::path::{Path, PathBuf};

/// Arguments for the analyze command.
#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Snapshot JSON file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Print a one-line summary instead of the full report
    #[arg(long)]
    pub compact: bool,

    /// Print the analysis as JSON
    #[arg(long, conflicts_with = "compact")]
    pub json: bool,

    /// Config file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

/// Runs the analyze command.
///
/// # Errors
/// Returns an error if the config or snapshot cannot be loaded, or the
/// snapshot fails validation.
pub fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let config = ConfigLoader::load_from(&args.config)?;
    let analyzer = MarketAnalyzer::new(config.analysis);

    let output = analyze_file(
        &args.input,
        &analyzer,
        OutputFormat::from_flags(args.compact, args.json),
    )?;
    println!("{output}");

    Ok(())
}

/// Loads, validates and analyzes one snapshot file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or the snapshot is invalid.
pub fn analyze_file(path: &Path, analyzer: &MarketAnalyzer, format: OutputFormat) -> Result<String> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot file {}", path.display()))?;
    let snapshot: MarketSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse snapshot file {}", path.display()))?;

    tracing::info!(symbol = %snapshot.symbol, path = %path.display(), "Analyzing snapshot");

    let analysis = analyzer.try_analyze(snapshot)?;
    render(&analysis, format)
}
