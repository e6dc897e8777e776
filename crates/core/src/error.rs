use thiserror::Error;

/// Errors surfaced by an analysis cycle.
///
/// Missing optional metrics are never errors; they degrade to neutral
/// classifications. Only structurally unusable snapshots end up here.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    /// The snapshot violates an invariant the analyzer depends on.
    #[error("invalid snapshot for {symbol}: {reason}")]
    InvalidSnapshot { symbol: String, reason: String },
}

impl AnalysisError {
    pub(crate) fn invalid(symbol: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSnapshot {
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }
}
