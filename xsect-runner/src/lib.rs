//! xsect runner — orchestration around the core pipeline.
//!
//! Owns everything that touches the filesystem: TOML run configs with
//! content-hash run IDs, the CSV price loader, the Parquet table store,
//! session calendars, and CSV artifact export.

pub mod calendar;
pub mod config;
pub mod data_loader;
pub mod export;
pub mod runner;
pub mod store;

pub use calendar::load_calendar;
pub use config::{RunConfig, RunId, StrategyConfig};
pub use data_loader::CsvPriceSource;
pub use export::{write_pnl_csv, write_positions_csv};
pub use runner::{run_backtest, RunSummary};
pub use store::ParquetStore;
