//! Backtest orchestrator.
//!
//! Wires schedule building, window chunking, per-window strategy
//! invocation, and PnL aggregation. Windows are processed in parallel —
//! they touch disjoint read-only slices of the panel — but each result is
//! tagged with its window index and re-sorted into chronological order
//! before aggregation, since completion order carries no meaning.

use chrono::NaiveDate;
use polars::prelude::DataFrame;
use rayon::prelude::*;

use crate::error::BacktestError;
use crate::interval::Interval;
use crate::obs::BacktestObserver;
use crate::pnl::{aggregate_pnl, PnlRow};
use crate::schedule::{build_schedule, ScheduleSource};
use crate::schema::{INSTRUMENT, PANEL_COLUMNS, WEIGHT};
use crate::source::ReturnSource;
use crate::strategy::Strategy;
use crate::window::chunk_windows;

/// Outcome of a run: the PnL curve plus the final window's positions,
/// exposed for a downstream trade-generation collaborator.
#[derive(Debug)]
pub struct BacktestReport {
    pub pnl: Vec<PnlRow>,
    /// `{instrument, weight}` of the last window that traded; `None` when
    /// no window produced positions.
    pub final_positions: Option<DataFrame>,
    pub window_count: usize,
}

/// Orchestrates one backtest over a date range.
pub struct Backtester<'a> {
    start_date: NaiveDate,
    end_date: NaiveDate,
    interval: Interval,
    strategy: &'a dyn Strategy,
    source: &'a dyn ReturnSource,
    observer: &'a dyn BacktestObserver,
    calendar: Option<&'a [NaiveDate]>,
}

impl<'a> Backtester<'a> {
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        interval: Interval,
        strategy: &'a dyn Strategy,
        source: &'a dyn ReturnSource,
        observer: &'a dyn BacktestObserver,
    ) -> Self {
        Self {
            start_date,
            end_date,
            interval,
            strategy,
            source,
            observer,
            calendar: None,
        }
    }

    /// Derive the schedule from an external session calendar instead of
    /// the panel's own dates.
    pub fn with_calendar(mut self, sessions: &'a [NaiveDate]) -> Self {
        self.calendar = Some(sessions);
        self
    }

    pub fn run(&self) -> Result<BacktestReport, BacktestError> {
        let panel = self
            .source
            .load(self.start_date, self.end_date, self.interval)?;
        self.observer.on_panel_loaded(panel.height());

        let schedule_source = match self.calendar {
            Some(sessions) => ScheduleSource::Calendar(sessions),
            None => ScheduleSource::PanelDates,
        };
        let schedule = build_schedule(&panel, self.interval, schedule_source)?;

        let windows = chunk_windows(
            &panel,
            &schedule,
            self.strategy.window_len(),
            &PANEL_COLUMNS,
        )?;
        self.observer.on_windows_built(windows.len());
        let window_count = windows.len();

        let mut tagged: Vec<(usize, DataFrame)> = windows
            .par_iter()
            .map(|w| self.strategy.compute_portfolio(w).map(|df| (w.index, df)))
            .collect::<Result<Vec<_>, BacktestError>>()?;
        // Restore chronological order; rayon preserves it for collect, but
        // the aggregation contract must not depend on that.
        tagged.sort_by_key(|(index, _)| *index);

        for (window, (_, table)) in windows.iter().zip(&tagged) {
            if table.height() == 0 {
                self.observer.on_window_skipped(window.end);
            }
        }

        let tables: Vec<DataFrame> = tagged
            .into_iter()
            .filter(|(_, table)| table.height() > 0)
            .map(|(_, table)| table)
            .collect();

        let final_positions = match tables.last() {
            Some(table) => Some(table.select([INSTRUMENT, WEIGHT])?),
            None => None,
        };

        let pnl = aggregate_pnl(&tables, &panel, self.observer)?;

        Ok(BacktestReport {
            pnl,
            final_positions,
            window_count,
        })
    }
}
