//! Run orchestration.
//!
//! Materializes the configured strategy, drives the core backtester, and
//! persists the resulting curves keyed by the config's content hash, so a
//! rerun of an identical config overwrites its own artifacts and nothing
//! else.

use chrono::NaiveDate;
use tracing::info;

use xsect_core::pnl::pnl_to_dataframe;
use xsect_core::{BacktestObserver, Backtester, PnlRow, ReturnSource, Strategy, TableStore};

use crate::config::{RunConfig, RunId};

/// Outcome of one orchestrated run.
#[derive(Debug)]
pub struct RunSummary {
    pub run_id: RunId,
    pub window_count: usize,
    pub pnl: Vec<PnlRow>,
    /// Compounded return over the whole curve; `None` when no window
    /// traded.
    pub total_return: Option<f64>,
}

/// Execute one config against a source, optionally persisting artifacts.
///
/// With a store, the PnL curve lands at `{run_id}_pnl` and the final
/// window's positions at `{run_id}_positions` (the latter only when some
/// window traded).
pub fn run_backtest(
    config: &RunConfig,
    source: &dyn ReturnSource,
    store: Option<&dyn TableStore>,
    observer: &dyn BacktestObserver,
    calendar: Option<&[NaiveDate]>,
) -> anyhow::Result<RunSummary> {
    let interval = config.interval()?;
    let strategy = config.build_strategy()?;
    let run_id = config.run_id();

    let mut backtester = Backtester::new(
        config.start_date,
        config.end_date,
        interval,
        strategy.as_ref(),
        source,
        observer,
    );
    if let Some(sessions) = calendar {
        backtester = backtester.with_calendar(sessions);
    }

    let report = backtester.run()?;
    info!(
        run_id = %run_id,
        strategy = strategy.name(),
        windows = report.window_count,
        pnl_rows = report.pnl.len(),
        "backtest complete"
    );

    if let Some(store) = store {
        let curve = pnl_to_dataframe(&report.pnl)?;
        store.write(&format!("{run_id}_pnl"), &curve)?;
        if let Some(positions) = &report.final_positions {
            store.write(&format!("{run_id}_positions"), positions)?;
        }
    }

    let total_return = report.pnl.last().map(|row| row.cum_simple_return);

    Ok(RunSummary {
        run_id,
        window_count: report.window_count,
        pnl: report.pnl,
        total_return,
    })
}
