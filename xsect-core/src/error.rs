//! Error taxonomy for the backtest pipeline.
//!
//! Only genuinely fatal conditions are errors. Insufficient history, an
//! empty schedule, and positions missing from the return panel are
//! policies, not failures: they yield empty outputs and (where relevant)
//! an observer event.

use polars::prelude::PolarsError;

#[derive(Debug, thiserror::Error)]
pub enum BacktestError {
    /// Interval string outside {daily, weekly, monthly}. Raised at the
    /// configuration boundary, before any windowing work.
    #[error("unsupported interval '{0}' (expected daily, weekly, or monthly)")]
    UnsupportedInterval(String),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("column '{column}': expected {expected}, got {actual}")]
    TypeMismatch {
        column: String,
        expected: String,
        actual: String,
    },

    #[error(transparent)]
    Polars(#[from] PolarsError),

    #[error("data source error: {0}")]
    Source(String),

    #[error("table store error: {0}")]
    Store(String),
}
