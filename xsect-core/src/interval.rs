//! Decision-date interval selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BacktestError;

/// Spacing of decision dates in the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Daily,
    Weekly,
    Monthly,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Daily => "daily",
            Interval::Weekly => "weekly",
            Interval::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = BacktestError;

    /// Parses an interval selector. Any value outside the three supported
    /// spellings fails fast with [`BacktestError::UnsupportedInterval`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(Interval::Daily),
            "weekly" => Ok(Interval::Weekly),
            "monthly" => Ok(Interval::Monthly),
            _ => Err(BacktestError::UnsupportedInterval(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_intervals() {
        assert_eq!("daily".parse::<Interval>().unwrap(), Interval::Daily);
        assert_eq!("weekly".parse::<Interval>().unwrap(), Interval::Weekly);
        assert_eq!("MONTHLY".parse::<Interval>().unwrap(), Interval::Monthly);
    }

    #[test]
    fn rejects_unknown_interval() {
        let err = "hourly".parse::<Interval>().unwrap_err();
        assert!(matches!(err, BacktestError::UnsupportedInterval(ref s) if s == "hourly"));
    }

    #[test]
    fn serde_roundtrip_is_lowercase() {
        let json = serde_json::to_string(&Interval::Weekly).unwrap();
        assert_eq!(json, "\"weekly\"");
        let back: Interval = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Interval::Weekly);
    }
}
