//! Decision-date schedule construction.
//!
//! A schedule is the ascending list of distinct decision dates that window
//! boundaries are derived from. It comes either from the dates present in
//! the panel itself or from an external session calendar clipped to the
//! panel's date range.

use chrono::{Datelike, NaiveDate};
use polars::prelude::*;

use crate::error::BacktestError;
use crate::interval::Interval;
use crate::schema::{dates_from_column, DATE};

/// Where decision dates come from.
#[derive(Debug, Clone, Copy)]
pub enum ScheduleSource<'a> {
    /// Distinct sorted dates present in the panel.
    PanelDates,
    /// External calendar of valid trading sessions, clipped to the panel's
    /// date range.
    Calendar(&'a [NaiveDate]),
}

/// Build the decision-date schedule for a panel.
///
/// Panel mode ignores the interval: the schedule is simply the distinct
/// sorted panel dates. Calendar mode restricts sessions to
/// `[min(panel.date), max(panel.date)]`; for [`Interval::Monthly`] the
/// session list is first truncated to one entry per calendar month
/// (month starts, de-duplicated) before clipping.
pub fn build_schedule(
    panel: &DataFrame,
    interval: Interval,
    source: ScheduleSource<'_>,
) -> Result<Vec<NaiveDate>, BacktestError> {
    let panel_dates = distinct_sorted_dates(panel)?;

    match source {
        ScheduleSource::PanelDates => Ok(panel_dates),
        ScheduleSource::Calendar(sessions) => {
            let (Some(first), Some(last)) = (panel_dates.first(), panel_dates.last()) else {
                return Ok(Vec::new());
            };

            let mut sessions: Vec<NaiveDate> = match interval {
                Interval::Monthly => {
                    let mut months: Vec<NaiveDate> =
                        sessions.iter().map(|d| month_start(*d)).collect();
                    months.sort_unstable();
                    months.dedup();
                    months
                }
                Interval::Daily | Interval::Weekly => {
                    let mut s = sessions.to_vec();
                    s.sort_unstable();
                    s.dedup();
                    s
                }
            };

            sessions.retain(|d| d >= first && d <= last);
            Ok(sessions)
        }
    }
}

/// Distinct panel dates in ascending order.
pub fn distinct_sorted_dates(panel: &DataFrame) -> Result<Vec<NaiveDate>, BacktestError> {
    let df = panel
        .clone()
        .lazy()
        .select([col(DATE).unique().sort(SortOptions::default())])
        .collect()?;
    dates_from_column(df.column(DATE)?)
}

fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap()
}
