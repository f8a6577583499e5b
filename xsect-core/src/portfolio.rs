//! Decile portfolio construction.
//!
//! Ranks a window's signal rows into K quantile buckets computed from that
//! window's cross-section only, equal-weights each bucket, and combines
//! the two extreme buckets into one long/short position table.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::BacktestError;
use crate::schema::{dates_from_column, dates_to_column, DATE, INSTRUMENT, WEIGHT};

/// Number of quantile buckets.
pub const BUCKETS: usize = 10;

/// Minimum signal rows a window needs to trade at all.
pub const MIN_CROSS_SECTION: usize = 10;

/// Which extreme bucket goes short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegRule {
    /// Long the top bucket, short the bottom bucket (momentum).
    LongHighShortLow,
    /// Long the bottom bucket, short the top bucket (reversal).
    LongLowShortHigh,
}

/// Quantile breakpoints at the (i+1)/k-th percentiles of `values`,
/// nearest-rank interpolation. The last breakpoint is the maximum.
pub fn quantile_breakpoints(values: &[f64], k: usize) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    (1..=k)
        .map(|i| {
            let q = i as f64 / k as f64;
            let idx = ((sorted.len() - 1) as f64 * q).round() as usize;
            sorted[idx.min(sorted.len() - 1)]
        })
        .collect()
}

/// Assign each value the lowest bucket whose breakpoint bounds it:
/// `bucket = min{ i : value <= breakpoint[i] }`, clipped to `k-1`.
///
/// The inclusive upper bound sends exact-breakpoint ties into the
/// lower-indexed bucket; with few distinct values buckets collapse toward
/// zero, which is accepted.
pub fn bucket_assignments(values: &[f64], k: usize) -> Vec<usize> {
    let breakpoints = quantile_breakpoints(values, k);
    values
        .iter()
        .map(|v| {
            breakpoints
                .iter()
                .position(|bp| v <= bp)
                .unwrap_or(k - 1)
                .min(k - 1)
        })
        .collect()
}

/// Build the combined long/short position table for one window's signal
/// rows.
///
/// Fewer than [`MIN_CROSS_SECTION`] rows is the no-trade sentinel: an
/// empty frame, not an error. Otherwise rows are bucketed by
/// [`bucket_assignments`], each extreme bucket is weighted equal-weight
/// `1/size`, and one side is negated per `rule`. The output carries only
/// `{date, instrument, weight}`.
pub fn decile_long_short(
    signal_df: &DataFrame,
    signal_col: &str,
    rule: LegRule,
) -> Result<DataFrame, BacktestError> {
    if signal_df.height() < MIN_CROSS_SECTION {
        return Ok(DataFrame::empty());
    }

    let dates = dates_from_column(signal_df.column(DATE)?)?;
    let instruments = signal_df.column(INSTRUMENT)?.str()?;
    let signals = signal_df.column(signal_col)?.f64()?;

    let values: Vec<f64> = (0..signal_df.height())
        .map(|i| {
            signals.get(i).ok_or_else(|| {
                PolarsError::ComputeError(format!("null signal at row {i}").into())
            })
        })
        .collect::<Result<_, _>>()?;

    let buckets = bucket_assignments(&values, BUCKETS);
    let mut sizes = [0usize; BUCKETS];
    for b in &buckets {
        sizes[*b] += 1;
    }

    let (short_bucket, long_bucket) = match rule {
        LegRule::LongHighShortLow => (0, BUCKETS - 1),
        LegRule::LongLowShortHigh => (BUCKETS - 1, 0),
    };

    // Low bucket first, then high, matching chronological concat order of
    // the two legs in the combined table.
    let mut out_dates = Vec::new();
    let mut out_instruments = Vec::new();
    let mut out_weights = Vec::new();
    for bucket in [0, BUCKETS - 1] {
        let size = sizes[bucket];
        if size == 0 {
            continue;
        }
        let magnitude = 1.0 / size as f64;
        let weight = if bucket == short_bucket {
            -magnitude
        } else {
            debug_assert_eq!(bucket, long_bucket);
            magnitude
        };
        for (i, b) in buckets.iter().enumerate() {
            if *b == bucket {
                out_dates.push(dates[i]);
                out_instruments.push(
                    instruments
                        .get(i)
                        .ok_or_else(|| {
                            PolarsError::ComputeError(format!("null instrument at row {i}").into())
                        })?
                        .to_string(),
                );
                out_weights.push(weight);
            }
        }
    }

    Ok(DataFrame::new(vec![
        dates_to_column(DATE, &out_dates)?,
        Column::new(INSTRUMENT.into(), out_instruments),
        Column::new(WEIGHT.into(), out_weights),
    ])?)
}
