//! PnL aggregation.
//!
//! Joins every window's positions back to the raw return panel, collapses
//! to one portfolio return per date, and folds the sequence into
//! cumulative metrics. The fold is strictly sequential over dates; each
//! row is a function of all prior rows.

use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::BacktestError;
use crate::obs::BacktestObserver;
use crate::schema::{dates_from_column, dates_to_column, DATE, INSTRUMENT, RET, WEIGHT};

/// One point on the PnL curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PnlRow {
    pub date: NaiveDate,
    pub portfolio_return: f64,
    /// Compounded return to date: `prod(1 + r) - 1`.
    pub cum_simple_return: f64,
    /// Additive log return to date: `sum(log1p(r))`.
    pub cum_log_return: f64,
}

const WEIGHTED_RET: &str = "weighted_ret";
const PORTFOLIO_RET: &str = "portfolio_ret";

/// Aggregate all windows' position tables against the return panel.
///
/// Positions are inner-joined to the panel on (date, instrument); a
/// position whose key is absent from the panel is dropped and reported
/// through the observer, never fatal. No positions at all yields an empty
/// curve, not an error.
pub fn aggregate_pnl(
    position_tables: &[DataFrame],
    panel: &DataFrame,
    observer: &dyn BacktestObserver,
) -> Result<Vec<PnlRow>, BacktestError> {
    let mut tables = position_tables.iter().filter(|t| t.height() > 0);
    let Some(first) = tables.next() else {
        return Ok(Vec::new());
    };
    let mut positions = first.clone();
    for table in tables {
        positions.vstack_mut(table)?;
    }
    let submitted = positions.height();

    let joined = positions
        .lazy()
        .join(
            panel
                .clone()
                .lazy()
                .select([col(DATE), col(INSTRUMENT), col(RET)]),
            [col(DATE), col(INSTRUMENT)],
            [col(DATE), col(INSTRUMENT)],
            JoinArgs::new(JoinType::Inner),
        )
        .collect()?;

    let dropped = submitted.saturating_sub(joined.height());
    if dropped > 0 {
        observer.on_join_mismatch(dropped);
    }

    let daily = joined
        .lazy()
        .with_columns([(col(WEIGHT) * col(RET)).alias(WEIGHTED_RET)])
        .group_by([col(DATE)])
        .agg([col(WEIGHTED_RET).sum().alias(PORTFOLIO_RET)])
        .sort([DATE], SortMultipleOptions::default())
        .collect()?;

    let dates = dates_from_column(daily.column(DATE)?)?;
    let returns = daily.column(PORTFOLIO_RET)?.f64()?;
    let returns: Vec<f64> = (0..daily.height())
        .map(|i| returns.get(i).unwrap_or(0.0))
        .collect();

    Ok(accumulate_pnl(&dates, &returns))
}

/// The sequential cumulative fold: one [`PnlRow`] per date, each carrying
/// the running compounding product and running log-return sum of all
/// prior and current portfolio returns.
pub fn accumulate_pnl(dates: &[NaiveDate], returns: &[f64]) -> Vec<PnlRow> {
    debug_assert_eq!(dates.len(), returns.len());
    let mut rows = Vec::with_capacity(dates.len());
    let mut growth = 1.0_f64;
    let mut log_sum = 0.0_f64;
    for (date, r) in dates.iter().zip(returns) {
        growth *= 1.0 + r;
        log_sum += r.ln_1p();
        rows.push(PnlRow {
            date: *date,
            portfolio_return: *r,
            cum_simple_return: growth - 1.0,
            cum_log_return: log_sum,
        });
    }
    rows
}

/// Convert a PnL curve to a frame for persistence or export.
pub fn pnl_to_dataframe(rows: &[PnlRow]) -> Result<DataFrame, BacktestError> {
    let dates: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();
    let returns: Vec<f64> = rows.iter().map(|r| r.portfolio_return).collect();
    let cum_simple: Vec<f64> = rows.iter().map(|r| r.cum_simple_return).collect();
    let cum_log: Vec<f64> = rows.iter().map(|r| r.cum_log_return).collect();

    Ok(DataFrame::new(vec![
        dates_to_column(DATE, &dates)?,
        Column::new("portfolio_return".into(), returns),
        Column::new("cum_simple_return".into(), cum_simple),
        Column::new("cum_log_return".into(), cum_log),
    ])?)
}
