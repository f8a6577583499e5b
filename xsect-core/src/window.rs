//! Window chunking over the decision-date schedule.
//!
//! Each window covers exactly `window_len` consecutive schedule positions
//! and owns a filtered, column-projected copy of the panel over its closed
//! date interval. Windows are independent: every filter re-scans the full
//! panel, and the produced collection is never mutated in place.

use chrono::NaiveDate;
use polars::prelude::*;

use crate::error::BacktestError;
use crate::schema::{date_expr, DATE};

/// One lookback window, identified by its decision (end) date.
#[derive(Debug, Clone)]
pub struct Window {
    /// Chronological position among the produced windows.
    pub index: usize,
    /// First schedule date covered (inclusive).
    pub start: NaiveDate,
    /// Decision date (inclusive).
    pub end: NaiveDate,
    /// Panel rows with `start <= date <= end`, projected to the requested
    /// columns.
    pub data: DataFrame,
}

/// Slice the panel into consecutive overlapping windows of `window_len`
/// schedule positions.
///
/// For schedule index `i` in `window_len-1..len`, produces one window
/// spanning `[schedule[i-window_len+1], schedule[i]]`. A schedule shorter
/// than `window_len` produces zero windows; that is a policy, not an
/// error. Windows are emitted in strictly increasing decision-date order.
pub fn chunk_windows(
    panel: &DataFrame,
    schedule: &[NaiveDate],
    window_len: usize,
    columns: &[&str],
) -> Result<Vec<Window>, BacktestError> {
    if window_len == 0 || schedule.len() < window_len {
        return Ok(Vec::new());
    }

    let mut windows = Vec::with_capacity(schedule.len() - window_len + 1);
    for (index, i) in (window_len - 1..schedule.len()).enumerate() {
        let start = schedule[i + 1 - window_len];
        let end = schedule[i];

        let projection: Vec<Expr> = columns.iter().map(|c| col(*c)).collect();
        let data = panel
            .clone()
            .lazy()
            .filter(col(DATE).gt_eq(date_expr(start)).and(col(DATE).lt_eq(date_expr(end))))
            .select(projection)
            .collect()?;

        windows.push(Window {
            index,
            start,
            end,
            data,
        });
    }

    Ok(windows)
}
