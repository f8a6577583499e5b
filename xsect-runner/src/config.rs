//! Serializable run configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

use xsect_core::{BacktestError, Interval, Momentum, Reversal, Strategy};

/// Unique identifier for a run (content-addressable hash).
pub type RunId = String;

/// Everything needed to reproduce a run: strategy, interval, and the
/// inclusive date range. Loaded from TOML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    pub strategy: StrategyConfig,

    /// Sampling interval: "daily", "weekly", or "monthly".
    pub interval: String,

    /// Start date (inclusive).
    pub start_date: NaiveDate,

    /// End date (inclusive).
    pub end_date: NaiveDate,
}

/// Strategy selection plus an optional window-length override.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StrategyConfig {
    Momentum { window_len: Option<usize> },
    Reversal { window_len: Option<usize> },
}

impl RunConfig {
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Deterministic hash ID: identical configs share a RunId and can
    /// share persisted artifacts.
    pub fn run_id(&self) -> RunId {
        // Serialization of a plain struct with no maps is infallible.
        let json = serde_json::to_string(self).unwrap_or_default();
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }

    /// Parse the interval string; unknown values fail fast here, before
    /// any data is loaded.
    pub fn interval(&self) -> Result<Interval, BacktestError> {
        self.interval.parse()
    }

    /// Materialize the configured strategy.
    pub fn build_strategy(&self) -> Result<Box<dyn Strategy>, BacktestError> {
        let interval = self.interval()?;
        Ok(match &self.strategy {
            StrategyConfig::Momentum { window_len } => match window_len {
                Some(len) => Box::new(Momentum::with_window_len(*len)),
                None => Box::new(Momentum::new(interval)),
            },
            StrategyConfig::Reversal { window_len } => match window_len {
                Some(len) => Box::new(Reversal::with_window_len(*len)),
                None => Box::new(Reversal::new(interval)),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> RunConfig {
        RunConfig {
            strategy: StrategyConfig::Momentum { window_len: None },
            interval: "monthly".to_string(),
            start_date: ymd(2020, 1, 1),
            end_date: ymd(2023, 12, 31),
        }
    }

    #[test]
    fn toml_roundtrip() {
        let config = sample();
        let text = toml::to_string(&config).unwrap();
        let back: RunConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn parses_a_handwritten_config() {
        let text = r#"
            interval = "weekly"
            start_date = "2021-06-01"
            end_date = "2022-06-01"

            [strategy]
            type = "reversal"
            window_len = 8
        "#;
        let config: RunConfig = toml::from_str(text).unwrap();
        assert_eq!(
            config.strategy,
            StrategyConfig::Reversal { window_len: Some(8) }
        );
        assert_eq!(config.interval().unwrap(), Interval::Weekly);
        let strategy = config.build_strategy().unwrap();
        assert_eq!(strategy.window_len(), 8);
    }

    #[test]
    fn run_id_is_deterministic_and_config_sensitive() {
        let a = sample();
        let b = sample();
        assert_eq!(a.run_id(), b.run_id());

        let mut c = sample();
        c.interval = "daily".to_string();
        assert_ne!(a.run_id(), c.run_id());
    }

    #[test]
    fn unknown_interval_fails_before_running() {
        let mut config = sample();
        config.interval = "hourly".to_string();
        assert!(config.interval().is_err());
        assert!(config.build_strategy().is_err());
    }

    #[test]
    fn default_window_lengths_come_from_the_interval() {
        let config = sample();
        let strategy = config.build_strategy().unwrap();
        assert_eq!(strategy.name(), "momentum");
        assert_eq!(strategy.window_len(), 12);
    }
}
