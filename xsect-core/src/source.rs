//! Return-panel provider seam.
//!
//! Data acquisition is an external collaborator; the pipeline depends only
//! on this trait. Implementations are expected to hand back a panel
//! conforming to [`crate::schema::PanelSchema`], sorted or not — the core
//! re-sorts as needed.

use chrono::NaiveDate;
use polars::prelude::*;

use crate::error::BacktestError;
use crate::interval::Interval;
use crate::schema::{date_expr, DATE, INSTRUMENT, PANEL_COLUMNS};

/// Supplies the (date, instrument, ret) panel for a date range.
pub trait ReturnSource {
    fn load(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        interval: Interval,
    ) -> Result<DataFrame, BacktestError>;
}

/// An in-memory panel, clipped to the requested range on load. The
/// canonical source for tests and embedding.
pub struct StaticSource {
    panel: DataFrame,
}

impl StaticSource {
    pub fn new(panel: DataFrame) -> Self {
        Self { panel }
    }
}

impl ReturnSource for StaticSource {
    fn load(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        _interval: Interval,
    ) -> Result<DataFrame, BacktestError> {
        let projection: Vec<Expr> = PANEL_COLUMNS.iter().map(|c| col(*c)).collect();
        let df = self
            .panel
            .clone()
            .lazy()
            .filter(col(DATE).gt_eq(date_expr(start)).and(col(DATE).lt_eq(date_expr(end))))
            .select(projection)
            .sort([INSTRUMENT, DATE], SortMultipleOptions::default())
            .collect()?;
        Ok(df)
    }
}
