use clap::{Parser, Subcommand};
use market_pulse_cli::commands::{self, AnalyzeArgs, ReportArgs, WatchArgs};

#[derive(Parser)]
#[command(name = "market-pulse")]
#[command(about = "Market state classification and anomaly alerts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a snapshot stored as JSON
    Analyze(AnalyzeArgs),
    /// Collect live data for one symbol and print its report
    Report(ReportArgs),
    /// Periodically report on a list of symbols
    Watch(WatchArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so reports on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Analyze(args) => {
            commands::run_analyze(args)?;
        }
        Commands::Report(args) => {
            commands::run_report(args).await?;
        }
        Commands::Watch(args) => {
            commands::run_watch(args).await?;
        }
    }

    Ok(())
}
