//! CLI commands for market analysis.

pub mod analyze;
pub mod report;
pub mod watch;

pub use analyze::{analyze_file, run_analyze, AnalyzeArgs};
pub use report::{render, render_report, run_report, ReportArgs};
pub use watch::{run_watch, WatchArgs};

/// How an analysis is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Multi-line markdown report
    #[default]
    Full,
    /// One status line
    Compact,
    /// Pretty-printed analysis JSON
    Json,
}

impl OutputFormat {
    #[must_use]
    pub fn from_flags(compact: bool, json: bool) -> Self {
        if json {
            Self::Json
        } else if compact {
            Self::Compact
        } else {
            Self::Full
        }
    }
}
