//! Configuration loading
//!
//! Settings come from a TOML file: an explicit `--config` path, otherwise
//! `<config_home>/capgains/config.toml` when it exists, otherwise the
//! built-in FY 2024-25 defaults.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::LedgerError;
use crate::tax::tax_year::{TaxYear, DEFAULT_LONG_TERM_DAYS};

pub const DEFAULT_START_YEAR: i32 = 2024;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub tax_year: TaxYearConfig,
    pub rates: RateLabels,
    pub input: InputConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaxYearConfig {
    pub start_year: i32,
    /// Defaults to 23 July of `start_year`
    pub rate_cutoff: Option<NaiveDate>,
    pub long_term_days: i64,
}

impl Default for TaxYearConfig {
    fn default() -> Self {
        Self {
            start_year: DEFAULT_START_YEAR,
            rate_cutoff: None,
            long_term_days: DEFAULT_LONG_TERM_DAYS,
        }
    }
}

/// Percent labels shown above each quarter table
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RateLabels {
    pub before_cutoff: String,
    pub after_cutoff: String,
}

impl Default for RateLabels {
    fn default() -> Self {
        Self {
            before_cutoff: "15".to_string(),
            after_cutoff: "20".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    pub delimiter: char,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

impl Config {
    /// Resolve configuration from an explicit path or the user config dir.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        info!("Loading config from {:?}", path);
        let text = std::fs::read_to_string(path)
            .map_err(LedgerError::from)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        Self::from_toml(&text).with_context(|| format!("Invalid config file {:?}", path))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(text).map_err(|e| LedgerError::Config(e.to_string()))?;
        config.input_delimiter()?;
        Ok(config)
    }

    /// Override the financial year, dropping a cutoff that belonged to another year
    pub fn with_start_year(mut self, start_year: i32) -> Self {
        if self.tax_year.start_year != start_year {
            self.tax_year.start_year = start_year;
            self.tax_year.rate_cutoff = None;
        }
        self
    }

    /// Validated tax year built from the `[tax_year]` section
    pub fn tax_year(&self) -> Result<TaxYear> {
        let section = &self.tax_year;
        match section.rate_cutoff {
            Some(cutoff) => TaxYear::new(section.start_year, cutoff, section.long_term_days),
            None => {
                let default = TaxYear::for_start_year(section.start_year)?;
                TaxYear::new(
                    section.start_year,
                    default.rate_cutoff(),
                    section.long_term_days,
                )
            }
        }
    }

    /// CSV delimiter as a byte; only single-byte characters are allowed
    pub fn input_delimiter(&self) -> Result<u8> {
        let c = self.input.delimiter;
        if c.is_ascii() {
            Ok(c as u8)
        } else {
            Err(LedgerError::Config(format!("delimiter '{}' is not a single byte", c)).into())
        }
    }
}

/// `<config_home>/capgains/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dir_spec::config_home().map(|dir| dir.join("capgains").join("config.toml"))
}
