//! Observability context for a backtest run.
//!
//! An explicit observer is passed into the orchestrator instead of global
//! mutable state. All events are advisory: none of them alter control
//! flow, and the join-mismatch event in particular reports a policy
//! (silent drop), not a failure.

use chrono::NaiveDate;

/// Receiver for pipeline events.
pub trait BacktestObserver: Send + Sync {
    fn on_panel_loaded(&self, _rows: usize) {}
    fn on_windows_built(&self, _count: usize) {}
    /// A window yielded no positions (insufficient history or a thin
    /// cross-section).
    fn on_window_skipped(&self, _decision_date: NaiveDate) {}
    /// Positions whose (date, instrument) was absent from the return
    /// panel were dropped during aggregation.
    fn on_join_mismatch(&self, _dropped_rows: usize) {}
}

/// Discards all events.
pub struct NullObserver;

impl BacktestObserver for NullObserver {}

/// Emits structured `tracing` events.
pub struct TracingObserver;

impl BacktestObserver for TracingObserver {
    fn on_panel_loaded(&self, rows: usize) {
        tracing::debug!(rows, "return panel loaded");
    }

    fn on_windows_built(&self, count: usize) {
        tracing::debug!(count, "windows built");
    }

    fn on_window_skipped(&self, decision_date: NaiveDate) {
        tracing::debug!(%decision_date, "window produced no positions");
    }

    fn on_join_mismatch(&self, dropped_rows: usize) {
        tracing::warn!(dropped_rows, "positions absent from return panel dropped");
    }
}
