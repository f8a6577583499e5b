//! Table-store seam.
//!
//! Persistence of tabular data is an external collaborator; the pipeline
//! depends only on this repository interface. A Parquet-backed
//! implementation lives in the runner crate; [`MemoryStore`] is the test
//! double.

use std::collections::HashMap;
use std::sync::Mutex;

use polars::prelude::DataFrame;

use crate::error::BacktestError;

/// Keyed table persistence.
pub trait TableStore {
    fn read(&self, name: &str) -> Result<DataFrame, BacktestError>;
    fn write(&self, name: &str, table: &DataFrame) -> Result<(), BacktestError>;
    fn exists(&self, name: &str) -> bool;
}

/// In-memory store keyed by table name.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, DataFrame>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TableStore for MemoryStore {
    fn read(&self, name: &str) -> Result<DataFrame, BacktestError> {
        self.tables
            .lock()
            .expect("store mutex poisoned")
            .get(name)
            .cloned()
            .ok_or_else(|| BacktestError::Store(format!("no such table '{name}'")))
    }

    fn write(&self, name: &str, table: &DataFrame) -> Result<(), BacktestError> {
        self.tables
            .lock()
            .expect("store mutex poisoned")
            .insert(name.to_string(), table.clone());
        Ok(())
    }

    fn exists(&self, name: &str) -> bool {
        self.tables
            .lock()
            .expect("store mutex poisoned")
            .contains_key(name)
    }
}
