//! xsect core — cross-sectional long/short backtesting pipeline.
//!
//! The pipeline stages, leaves first:
//! - Schedule building (decision dates from the panel or a calendar)
//! - Window chunking (fixed-length overlapping schedule slices)
//! - Lagged rolling log-return signal, per instrument per window
//! - Decile ranking and equal-weight long/short combination
//! - PnL aggregation with a strictly sequential cumulative fold
//!
//! Data flows left to right through immutable frames; the orchestrator in
//! [`backtest`] drives it with a pluggable [`strategy::Strategy`]. All
//! I/O lives behind the collaborator traits in [`source`] and [`store`].

pub mod backtest;
pub mod error;
pub mod interval;
pub mod obs;
pub mod pnl;
pub mod portfolio;
pub mod schedule;
pub mod schema;
pub mod signal;
pub mod source;
pub mod store;
pub mod strategy;
pub mod window;

pub use backtest::{BacktestReport, Backtester};
pub use error::BacktestError;
pub use interval::Interval;
pub use obs::{BacktestObserver, NullObserver, TracingObserver};
pub use pnl::PnlRow;
pub use portfolio::LegRule;
pub use source::{ReturnSource, StaticSource};
pub use store::{MemoryStore, TableStore};
pub use strategy::{Momentum, Reversal, Strategy};
pub use window::Window;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: the types shared across the parallel window
    /// section are Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<Window>();
        require_sync::<Window>();
        require_send::<PnlRow>();
        require_sync::<PnlRow>();
        require_send::<Interval>();
        require_sync::<Interval>();
        require_send::<Momentum>();
        require_sync::<Momentum>();
        require_send::<Reversal>();
        require_sync::<Reversal>();
        require_send::<MemoryStore>();
        require_sync::<MemoryStore>();
        require_send::<NullObserver>();
        require_sync::<NullObserver>();
        require_send::<TracingObserver>();
        require_sync::<TracingObserver>();
    }
}
