//! Lagged rolling log-return signal.
//!
//! The ranking signal at date t is the trailing sum of `log1p(ret)` over
//! the previous `sub_window` observations, shifted forward by exactly one
//! observation so that the value attributed to t only reflects data
//! through t-1. The lag is a correctness property (no lookahead), never an
//! optimization to skip.

use polars::prelude::*;

use crate::error::BacktestError;
use crate::schema::{DATE, INSTRUMENT, LOG_RET, RET};

/// Compute the lagged rolling log-return signal for one window's data,
/// independently per instrument.
///
/// The rolling sum requires the full `sub_window` to be present
/// (`min_periods = sub_window`); rows whose signal is undefined after the
/// one-period shift are dropped. An instrument with zero surviving rows is
/// simply absent from the output.
pub fn lagged_momentum_signal(
    chunk: &DataFrame,
    sub_window: usize,
    name: &str,
) -> Result<DataFrame, BacktestError> {
    let rolling = RollingOptionsFixedWindow {
        window_size: sub_window,
        min_periods: sub_window,
        ..Default::default()
    };

    let out = chunk
        .clone()
        .lazy()
        // Rolling and shift are positional; per-instrument date order is
        // what makes "previous observation" mean t-1.
        .sort([INSTRUMENT, DATE], SortMultipleOptions::default())
        .with_columns([col(RET).log1p().alias(LOG_RET)])
        .with_columns([col(LOG_RET)
            .rolling_sum(rolling)
            .shift(lit(1))
            .over([col(INSTRUMENT)])
            .alias(name)])
        .drop_nulls(None)
        .collect()?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::dates_to_column;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Panel rows as (instrument, date, ret) triples.
    fn chunk(rows: &[(&str, NaiveDate, Option<f64>)]) -> DataFrame {
        let dates: Vec<NaiveDate> = rows.iter().map(|r| r.1).collect();
        let instruments: Vec<&str> = rows.iter().map(|r| r.0).collect();
        let rets: Vec<Option<f64>> = rows.iter().map(|r| r.2).collect();
        DataFrame::new(vec![
            dates_to_column(DATE, &dates).unwrap(),
            Column::new(INSTRUMENT.into(), instruments),
            Column::new(RET.into(), rets),
        ])
        .unwrap()
    }

    #[test]
    fn signal_is_lagged_trailing_sum_of_log_returns() {
        let rows: Vec<(&str, NaiveDate, Option<f64>)> = (0..5)
            .map(|i| ("AAA", ymd(2024, 1, 2 + i as u32), Some(0.01 * (i + 1) as f64)))
            .collect();
        let df = chunk(&rows);

        let out = lagged_momentum_signal(&df, 2, "mom").unwrap();

        // Rolling window of 2 is defined from the 2nd observation; the lag
        // pushes the first defined value to the 3rd. Rows 0-1 are dropped.
        assert_eq!(out.height(), 3);

        let signal = out.column("mom").unwrap().f64().unwrap();
        // Surviving row i came from input row i+2; it sums log1p of rets i..i+2.
        let expected0 = 0.01f64.ln_1p() + 0.02f64.ln_1p();
        let expected2 = 0.03f64.ln_1p() + 0.04f64.ln_1p();
        assert!((signal.get(0).unwrap() - expected0).abs() < 1e-12);
        assert!((signal.get(2).unwrap() - expected2).abs() < 1e-12);
    }

    #[test]
    fn instrument_with_insufficient_history_is_absent() {
        let mut rows: Vec<(&str, NaiveDate, Option<f64>)> = (0..6)
            .map(|i| ("LONG", ymd(2024, 1, 2 + i as u32), Some(0.01)))
            .collect();
        // Two observations cannot fill a sub-window of 4 plus the lag.
        rows.push(("SHORT", ymd(2024, 1, 2), Some(0.02)));
        rows.push(("SHORT", ymd(2024, 1, 3), Some(0.02)));
        let df = chunk(&rows);

        let out = lagged_momentum_signal(&df, 4, "mom").unwrap();
        let instruments = out.column(INSTRUMENT).unwrap().str().unwrap();
        for v in instruments.into_iter().flatten() {
            assert_eq!(v, "LONG");
        }
        assert!(out.height() > 0);
    }

    #[test]
    fn null_returns_never_produce_a_signal() {
        // First observation has no return; the rolling window must not
        // treat it as zero.
        let rows = vec![
            ("AAA", ymd(2024, 1, 2), None),
            ("AAA", ymd(2024, 1, 3), Some(0.01)),
            ("AAA", ymd(2024, 1, 4), Some(0.02)),
            ("AAA", ymd(2024, 1, 5), Some(0.03)),
        ];
        let df = chunk(&rows);

        let out = lagged_momentum_signal(&df, 2, "mom").unwrap();
        // Only the last row can carry a full lagged window of non-null
        // log-returns: sum over rows 1-2.
        assert_eq!(out.height(), 1);
        let signal = out.column("mom").unwrap().f64().unwrap();
        let expected = 0.01f64.ln_1p() + 0.02f64.ln_1p();
        assert!((signal.get(0).unwrap() - expected).abs() < 1e-12);
    }
}
