//! Runtime configuration for the CLI and Lambda entry points

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::contact::ContactSettings;
use crate::input::FieldBounds;
use crate::quotes::{CsvQuoteSource, QuoteBoard, StaticQuotes, DEFAULT_QUOTE_TTL_SECS};

/// Path to a JSON config file
pub const CONFIG_PATH_VAR: &str = "SIP_PLANNER_CONFIG";
/// Overrides `quotesCsv`
pub const QUOTES_CSV_VAR: &str = "SIP_QUOTES_CSV";
/// Overrides `quoteTtlSecs`
pub const QUOTE_TTL_VAR: &str = "SIP_QUOTE_TTL_SECS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{var} must be a non-negative integer, got '{value}'")]
    InvalidVar { var: &'static str, value: String },

    #[error("{field}: min {min} is greater than max {max}")]
    InvalidBounds { field: &'static str, min: f64, max: f64 },

    #[error("{field}: step must be positive, got {step}")]
    InvalidStep { field: &'static str, step: f64 },
}

/// Parameters for the planner's boundaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerConfig {
    /// Slider range for the monthly amount
    #[serde(default = "FieldBounds::monthly_amount")]
    pub amount_bounds: FieldBounds,

    /// Slider range for the expected annual return in percent
    #[serde(default = "FieldBounds::annual_rate")]
    pub rate_bounds: FieldBounds,

    /// Slider range for the horizon in years
    #[serde(default = "FieldBounds::years")]
    pub years_bounds: FieldBounds,

    /// How long a primary quote result is reused
    #[serde(default = "default_quote_ttl_secs")]
    pub quote_ttl_secs: u64,

    /// Quote feed file; the static list is used when absent
    #[serde(default)]
    pub quotes_csv: Option<PathBuf>,

    #[serde(default)]
    pub contact: ContactSettings,
}

fn default_quote_ttl_secs() -> u64 { DEFAULT_QUOTE_TTL_SECS as u64 }

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            amount_bounds: FieldBounds::monthly_amount(),
            rate_bounds: FieldBounds::annual_rate(),
            years_bounds: FieldBounds::years(),
            quote_ttl_secs: default_quote_ttl_secs(),
            quotes_csv: None,
            contact: ContactSettings::default(),
        }
    }
}

impl PlannerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` for variables: config file first, then overrides
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_PATH_VAR) {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };

        if let Some(csv) = lookup(QUOTES_CSV_VAR).filter(|v| !v.trim().is_empty()) {
            config.quotes_csv = Some(PathBuf::from(csv.trim()));
        }

        if let Some(ttl) = lookup(QUOTE_TTL_VAR) {
            config.quote_ttl_secs = ttl.trim().parse().map_err(|_| ConfigError::InvalidVar {
                var: QUOTE_TTL_VAR,
                value: ttl.clone(),
            })?;
        }

        log::debug!("loaded config: {:?}", config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, bounds) in [
            ("amountBounds", &self.amount_bounds),
            ("rateBounds", &self.rate_bounds),
            ("yearsBounds", &self.years_bounds),
        ] {
            if bounds.min > bounds.max {
                return Err(ConfigError::InvalidBounds {
                    field,
                    min: bounds.min,
                    max: bounds.max,
                });
            }
            if bounds.step.is_nan() || bounds.step <= 0.0 {
                return Err(ConfigError::InvalidStep { field, step: bounds.step });
            }
        }
        Ok(())
    }

    pub fn quote_ttl(&self) -> Duration {
        let max_secs = (i64::MAX / 1_000) as u64;
        Duration::seconds(self.quote_ttl_secs.min(max_secs) as i64)
    }

    /// Quote board over the configured feed, falling back to the static list
    ///
    /// Without a feed the static list is the only source and is always
    /// reported as `Fallback`.
    pub fn quote_board(&self) -> QuoteBoard {
        match &self.quotes_csv {
            Some(path) => QuoteBoard::with_static_fallback(
                Box::new(CsvQuoteSource::new(path.clone())),
                self.quote_ttl(),
            ),
            None => QuoteBoard::fallback_only(Box::new(StaticQuotes::default()), self.quote_ttl()),
        }
    }
}
