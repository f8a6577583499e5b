//! Parquet-backed table store.
//!
//! One file per table under a flat directory, keyed by table name.
//! Writes go through a temp file plus rename so a crashed run never
//! leaves a half-written table behind.

use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::*;

use xsect_core::{BacktestError, TableStore};

pub struct ParquetStore {
    dir: PathBuf,
}

impl ParquetStore {
    /// Creates the directory if it does not exist.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, BacktestError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)
            .map_err(|e| BacktestError::Store(format!("create {}: {e}", dir.display())))?;
        Ok(Self { dir })
    }

    fn table_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.parquet"))
    }
}

impl TableStore for ParquetStore {
    fn read(&self, name: &str) -> Result<DataFrame, BacktestError> {
        let path = self.table_path(name);
        let file = File::open(&path)
            .map_err(|e| BacktestError::Store(format!("open {}: {e}", path.display())))?;
        Ok(ParquetReader::new(file).finish()?)
    }

    fn write(&self, name: &str, table: &DataFrame) -> Result<(), BacktestError> {
        let path = self.table_path(name);
        let tmp = self.dir.join(format!(".{name}.parquet.tmp"));

        let mut file = File::create(&tmp)
            .map_err(|e| BacktestError::Store(format!("create {}: {e}", tmp.display())))?;
        let mut table = table.clone();
        ParquetWriter::new(&mut file).finish(&mut table)?;
        std::fs::rename(&tmp, &path)
            .map_err(|e| BacktestError::Store(format!("rename to {}: {e}", path.display())))?;
        Ok(())
    }

    fn exists(&self, name: &str) -> bool {
        self.table_path(name).exists()
    }
}
