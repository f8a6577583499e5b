//! Session-calendar loading.
//!
//! A calendar file is a one-column CSV of session dates (header `date`).
//! Dates are sorted and deduplicated; the core clips them to the panel's
//! range when building the schedule.

use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;

/// Load and normalize a session calendar.
pub fn load_calendar(path: &Path) -> anyhow::Result<Vec<NaiveDate>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open calendar {}", path.display()))?;

    let mut sessions = Vec::new();
    for record in reader.records() {
        let record = record.context("malformed calendar row")?;
        let field = record
            .get(0)
            .context("calendar row has no date field")?
            .trim();
        let date: NaiveDate = field
            .parse()
            .with_context(|| format!("invalid calendar date '{field}'"))?;
        sessions.push(date);
    }

    sessions.sort_unstable();
    sessions.dedup();
    Ok(sessions)
}
