//! Strategy capability: window length + per-window portfolio construction.
//!
//! A strategy is fully described by its window length, the signal
//! sub-window formula (length − 1), and a leg-assignment rule. Momentum
//! and Reversal share the signal/decile plumbing and differ only in those
//! parameters.

use polars::prelude::DataFrame;

use crate::error::BacktestError;
use crate::interval::Interval;
use crate::portfolio::{decile_long_short, LegRule};
use crate::signal::lagged_momentum_signal;
use crate::window::Window;

/// Signal column emitted by [`Momentum`].
pub const MOM: &str = "mom";
/// Signal column emitted by [`Reversal`].
pub const REV: &str = "rev";

/// Pluggable per-window portfolio construction.
pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Number of schedule positions per window.
    fn window_len(&self) -> usize;

    /// Build the combined long/short position table for one window. An
    /// empty frame means "no trade" for that window.
    fn compute_portfolio(&self, window: &Window) -> Result<DataFrame, BacktestError>;
}

fn rank_and_combine(
    window: &Window,
    window_len: usize,
    signal_col: &str,
    rule: LegRule,
) -> Result<DataFrame, BacktestError> {
    let signal = lagged_momentum_signal(&window.data, window_len - 1, signal_col)?;
    decile_long_short(&signal, signal_col, rule)
}

/// Long past winners, short past losers.
#[derive(Debug, Clone, Copy)]
pub struct Momentum {
    window_len: usize,
}

impl Momentum {
    pub fn new(interval: Interval) -> Self {
        let window_len = match interval {
            Interval::Daily => 231,
            Interval::Weekly => 12,
            Interval::Monthly => 12,
        };
        Self { window_len }
    }

    /// Override the per-interval default window length.
    pub fn with_window_len(window_len: usize) -> Self {
        Self { window_len }
    }
}

impl Strategy for Momentum {
    fn name(&self) -> &'static str {
        "momentum"
    }

    fn window_len(&self) -> usize {
        self.window_len
    }

    fn compute_portfolio(&self, window: &Window) -> Result<DataFrame, BacktestError> {
        rank_and_combine(window, self.window_len, MOM, LegRule::LongHighShortLow)
    }
}

/// Long past losers, short past winners.
#[derive(Debug, Clone, Copy)]
pub struct Reversal {
    window_len: usize,
}

impl Reversal {
    pub fn new(interval: Interval) -> Self {
        let window_len = match interval {
            Interval::Daily => 24,
            Interval::Weekly => 24,
            Interval::Monthly => 2,
        };
        Self { window_len }
    }

    /// Override the per-interval default window length.
    pub fn with_window_len(window_len: usize) -> Self {
        Self { window_len }
    }
}

impl Strategy for Reversal {
    fn name(&self) -> &'static str {
        "reversal"
    }

    fn window_len(&self) -> usize {
        self.window_len
    }

    fn compute_portfolio(&self, window: &Window) -> Result<DataFrame, BacktestError> {
        rank_and_combine(window, self.window_len, REV, LegRule::LongLowShortHigh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_lengths_per_interval() {
        assert_eq!(Momentum::new(Interval::Daily).window_len(), 231);
        assert_eq!(Momentum::new(Interval::Weekly).window_len(), 12);
        assert_eq!(Momentum::new(Interval::Monthly).window_len(), 12);

        assert_eq!(Reversal::new(Interval::Daily).window_len(), 24);
        assert_eq!(Reversal::new(Interval::Weekly).window_len(), 24);
        assert_eq!(Reversal::new(Interval::Monthly).window_len(), 2);
    }

    #[test]
    fn window_length_override() {
        assert_eq!(Momentum::with_window_len(36).window_len(), 36);
        assert_eq!(Reversal::with_window_len(6).window_len(), 6);
    }
}
