//! CSV-backed return source.
//!
//! Reads a long-format price file `{date, instrument, close}` at a fixed
//! sampling interval and derives simple returns per instrument. The first
//! observation of each instrument has a null return, which the signal
//! stage later treats as missing history.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use polars::prelude::*;
use tracing::debug;

use xsect_core::schema::{date_expr, PanelSchema, DATE, INSTRUMENT, RET};
use xsect_core::{BacktestError, Interval, ReturnSource};

const CLOSE: &str = "close";

/// Prices on disk; returns derived lazily on load.
pub struct CsvPriceSource {
    path: PathBuf,
    interval: Interval,
}

impl CsvPriceSource {
    /// `interval` declares what sampling the file actually contains;
    /// loading at any other interval is an error, not a resample.
    pub fn new(path: impl AsRef<Path>, interval: Interval) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            interval,
        }
    }
}

impl ReturnSource for CsvPriceSource {
    fn load(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        interval: Interval,
    ) -> Result<DataFrame, BacktestError> {
        if interval != self.interval {
            return Err(BacktestError::Source(format!(
                "price file {} holds {} data, {} requested",
                self.path.display(),
                self.interval,
                interval
            )));
        }

        let panel = LazyCsvReader::new(&self.path)
            .with_has_header(true)
            .with_try_parse_dates(true)
            .finish()?
            .sort([INSTRUMENT, DATE], SortMultipleOptions::default())
            .with_columns([(col(CLOSE) / col(CLOSE).shift(lit(1)) - lit(1.0))
                .over([col(INSTRUMENT)])
                .alias(RET)])
            .filter(col(DATE).gt_eq(date_expr(start)).and(col(DATE).lt_eq(date_expr(end))))
            .select([col(DATE), col(INSTRUMENT), col(RET)])
            .collect()?;

        PanelSchema::validate(&panel)?;
        debug!(rows = panel.height(), path = %self.path.display(), "loaded price panel");
        Ok(panel)
    }
}
