//! Panel schema contract — the boundary between data collaborators and the
//! pipeline.
//!
//! Defines the canonical column names and dtypes of the return panel, plus
//! the Date-column conversion helpers used throughout the crate. All stages
//! assume this contract; the runner validates it at the load boundary.

use chrono::NaiveDate;
use polars::prelude::*;

use crate::error::BacktestError;

/// Calendar date of an observation.
pub const DATE: &str = "date";
/// Flat instrument identifier.
pub const INSTRUMENT: &str = "instrument";
/// Simple return; null for an instrument's first observation.
pub const RET: &str = "ret";
/// Log-transformed return, intermediate to signal computation.
pub const LOG_RET: &str = "logret";
/// Signed position weight.
pub const WEIGHT: &str = "weight";

/// Column projection every window carries.
pub const PANEL_COLUMNS: [&str; 3] = [DATE, INSTRUMENT, RET];

/// Canonical return-panel schema.
pub struct PanelSchema;

impl PanelSchema {
    pub fn schema() -> Schema {
        Schema::from_iter(vec![
            Field::new(DATE.into(), DataType::Date),
            Field::new(INSTRUMENT.into(), DataType::String),
            Field::new(RET.into(), DataType::Float64),
        ])
    }

    /// Validate a DataFrame against the panel contract.
    pub fn validate(df: &DataFrame) -> Result<(), BacktestError> {
        let expected = Self::schema();
        let actual = df.schema();

        for field in expected.iter_fields() {
            match actual.get(field.name()) {
                None => return Err(BacktestError::MissingColumn(field.name().to_string())),
                Some(dtype) if dtype != field.dtype() => {
                    return Err(BacktestError::TypeMismatch {
                        column: field.name().to_string(),
                        expected: format!("{:?}", field.dtype()),
                        actual: format!("{dtype:?}"),
                    });
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()
}

/// Days since the Unix epoch, the physical representation of a Date column.
pub fn date_to_days(date: NaiveDate) -> i32 {
    (date - epoch()).num_days() as i32
}

/// A Date-typed literal usable in filter expressions.
pub fn date_expr(date: NaiveDate) -> Expr {
    lit(date_to_days(date)).cast(DataType::Date)
}

/// Extract a Date column as `NaiveDate`s, in row order.
pub fn dates_from_column(column: &Column) -> Result<Vec<NaiveDate>, BacktestError> {
    let ca = column.date()?;
    let mut out = Vec::with_capacity(ca.len());
    for i in 0..ca.len() {
        let days = ca
            .get(i)
            .ok_or_else(|| PolarsError::ComputeError(format!("null date at row {i}").into()))?;
        out.push(epoch() + chrono::Duration::days(days as i64));
    }
    Ok(out)
}

/// Build a Date column from `NaiveDate`s.
pub fn dates_to_column(name: &str, dates: &[NaiveDate]) -> Result<Column, BacktestError> {
    let days: Vec<i32> = dates.iter().map(|d| date_to_days(*d)).collect();
    Ok(Column::new(name.into(), days).cast(&DataType::Date)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_panel() -> DataFrame {
        DataFrame::new(vec![
            dates_to_column(DATE, &[NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()]).unwrap(),
            Column::new(INSTRUMENT.into(), &["AAA"]),
            Column::new(RET.into(), &[0.01f64]),
        ])
        .unwrap()
    }

    #[test]
    fn valid_panel_passes() {
        assert!(PanelSchema::validate(&valid_panel()).is_ok());
    }

    #[test]
    fn missing_column_fails() {
        let df = valid_panel().drop(RET).unwrap();
        let err = PanelSchema::validate(&df).unwrap_err();
        assert!(matches!(err, BacktestError::MissingColumn(ref c) if c == RET));
    }

    #[test]
    fn wrong_type_fails() {
        let df = DataFrame::new(vec![
            dates_to_column(DATE, &[NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()]).unwrap(),
            Column::new(INSTRUMENT.into(), &["AAA"]),
            Column::new(RET.into(), &["not_a_number"]),
        ])
        .unwrap();
        let err = PanelSchema::validate(&df).unwrap_err();
        assert!(matches!(err, BacktestError::TypeMismatch { ref column, .. } if column == RET));
    }

    #[test]
    fn date_column_roundtrip() {
        let dates = vec![
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        ];
        let column = dates_to_column(DATE, &dates).unwrap();
        assert_eq!(dates_from_column(&column).unwrap(), dates);
    }
}
