//! CSV artifact export.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;

use xsect_core::schema::{INSTRUMENT, WEIGHT};
use xsect_core::PnlRow;

pub fn write_pnl_csv(path: &Path, rows: &[PnlRow]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("failed to create pnl CSV {}", path.display()))?;
    writeln!(
        file,
        "date,portfolio_return,cum_simple_return,cum_log_return"
    )?;
    for row in rows {
        writeln!(
            file,
            "{},{:.8},{:.8},{:.8}",
            row.date, row.portfolio_return, row.cum_simple_return, row.cum_log_return
        )?;
    }
    Ok(())
}

/// Final positions table `{instrument, weight}` to CSV.
pub fn write_positions_csv(path: &Path, positions: &DataFrame) -> Result<()> {
    let instruments = positions.column(INSTRUMENT)?.str()?;
    let weights = positions.column(WEIGHT)?.f64()?;

    let mut file = File::create(path)
        .with_context(|| format!("failed to create positions CSV {}", path.display()))?;
    writeln!(file, "instrument,weight")?;
    for i in 0..positions.height() {
        let instrument = instruments
            .get(i)
            .with_context(|| format!("null instrument at row {i}"))?;
        let weight = weights
            .get(i)
            .with_context(|| format!("null weight at row {i}"))?;
        writeln!(file, "{},{:.8}", instrument, weight)?;
    }
    Ok(())
}
